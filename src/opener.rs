//! Handing URLs to the desktop
//!
//! The browser is launched through the OS default-handler program
//! (`xdg-open`). The opener runs detached in its own session with no stdio
//! attached; nothing waits for it or inspects its result.

use crate::error::{Result, SearchError};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Default program used to open URLs
pub const DEFAULT_OPENER: &str = "xdg-open";

/// Something that can take a finished URL off our hands
pub trait Opener {
    fn open(&self, url: &str) -> Result<()>;
}

/// Extension trait for std::process::Command to run a child detached
pub trait CommandDetach {
    /// Start the child in a new session so it is not tied to our process
    /// group or controlling terminal, and outlives us.
    fn detached(&mut self) -> &mut Self;
}

impl CommandDetach for Command {
    fn detached(&mut self) -> &mut Self {
        use std::os::unix::process::CommandExt;
        // SAFETY: setsid is async-signal-safe and touches no parent state
        unsafe {
            self.pre_exec(|| {
                nix::unistd::setsid().map_err(std::io::Error::from)?;
                Ok(())
            });
        }
        self.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
    }
}

/// Opens URLs with an external program, fire-and-forget
#[derive(Debug, Clone)]
pub struct SystemOpener {
    program: String,
}

impl SystemOpener {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self::new(DEFAULT_OPENER)
    }
}

impl Opener for SystemOpener {
    fn open(&self, url: &str) -> Result<()> {
        info!("Opening {} with {}", url, self.program);
        let child = Command::new(&self.program)
            .arg(url)
            .detached()
            .spawn()
            .map_err(|e| SearchError::opener(format!("failed to spawn {}: {}", self.program, e)))?;
        debug!("Opener started with PID {}", child.id());
        Ok(())
    }
}

/// Writes the URL to stdout instead of opening it
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintOpener;

impl Opener for PrintOpener {
    fn open(&self, url: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        match writeln!(stdout, "{}", url) {
            Err(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
            other => other.map_err(SearchError::from),
        }
    }
}
