//! Prompt adapter around the external launcher
//!
//! The launcher (rofi in dmenu mode) gets the numbered history on stdin and
//! prints whatever the user selected or typed on stdout. A non-zero exit
//! means the user dismissed it.

use crate::error::{Result, SearchError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Default launcher program
pub const DEFAULT_LAUNCHER: &str = "rofi";

/// Render history entries as `"{n}. {entry}"`, most recent first
pub fn format_history(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {}", i + 1, entry))
        .collect()
}

/// What came back from the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// The user confirmed a line (already trimmed)
    Selected(String),
    /// The launcher exited non-zero
    Cancelled,
    /// The launcher succeeded but returned only whitespace
    Empty,
}

impl PromptOutcome {
    /// Classify a finished launcher run
    pub fn from_output(success: bool, stdout: &[u8]) -> Self {
        if !success {
            return Self::Cancelled;
        }
        let text = String::from_utf8_lossy(stdout);
        let text = text.trim();
        if text.is_empty() {
            Self::Empty
        } else {
            Self::Selected(text.to_string())
        }
    }
}

/// Anything that can show a list of lines and return the user's choice
pub trait Prompter {
    fn prompt(&self, lines: &[String]) -> Result<PromptOutcome>;
}

/// Runs rofi (or a compatible dmenu-style program)
#[derive(Debug, Clone)]
pub struct Launcher {
    program: String,
    config: PathBuf,
}

impl Launcher {
    pub fn new(program: impl Into<String>, config: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            config: config.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn config(&self) -> &Path {
        &self.config
    }

    /// Arguments in the order the launcher expects them: dmenu mode, theme
    /// config, a blank prompt label, case-insensitive matching.
    pub fn args(&self) -> Vec<String> {
        vec![
            "-dmenu".to_string(),
            "-config".to_string(),
            self.config.to_string_lossy().into_owned(),
            "-p".to_string(),
            " ".to_string(),
            "-i".to_string(),
        ]
    }
}

impl Prompter for Launcher {
    fn prompt(&self, lines: &[String]) -> Result<PromptOutcome> {
        let args = self.args();
        debug!("Running launcher: {} {:?}", self.program, args);

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| SearchError::launcher(format!("failed to spawn {}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            let menu = lines.join("\n");
            // The launcher may exit without reading its input
            match stdin.write_all(menu.as_bytes()) {
                Err(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                other => other?,
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| SearchError::launcher(format!("failed waiting for {}: {}", self.program, e)))?;

        let outcome = PromptOutcome::from_output(output.status.success(), &output.stdout);
        match &outcome {
            PromptOutcome::Cancelled => {
                info!("Launcher exited with {}, treating as cancel", output.status)
            }
            PromptOutcome::Empty => info!("Launcher returned no text"),
            PromptOutcome::Selected(text) => debug!("Launcher returned {:?}", text),
        }
        Ok(outcome)
    }
}
