//! Runtime settings
//!
//! Resolves the effective paths, programs and engine registry from the
//! command line (which already folds in environment variables) and the
//! platform config directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::Cli;
use crate::engine::EngineRegistry;
use crate::error::SearchError;
use crate::history::MAX_HISTORY;
use crate::opener::DEFAULT_OPENER;
use crate::prompt::DEFAULT_LAUNCHER;

/// History file location relative to the config directory
const HISTORY_RELATIVE: &str = "rofi/scripts/history.json";
/// rofi theme location relative to the config directory
const ROFI_CONFIG_RELATIVE: &str = "rofi/search.rasi";

/// Effective settings for one run
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub history_file: PathBuf,
    pub rofi_config: PathBuf,
    pub launcher: String,
    pub opener: String,
    pub max_history: usize,
    pub print: bool,
    pub engines: EngineRegistry,
}

impl SearchConfig {
    /// Settings rooted at `config_dir` with the built-in engines
    pub fn with_config_dir(config_dir: &Path) -> Self {
        Self {
            history_file: config_dir.join(HISTORY_RELATIVE),
            rofi_config: config_dir.join(ROFI_CONFIG_RELATIVE),
            launcher: DEFAULT_LAUNCHER.to_string(),
            opener: DEFAULT_OPENER.to_string(),
            max_history: MAX_HISTORY,
            print: false,
            engines: EngineRegistry::builtin(),
        }
    }

    /// Resolve settings from parsed arguments
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        // Only consult the platform directory when a default is needed
        let needs_dir = cli.history_file.is_none() || cli.rofi_config.is_none();
        let mut config = if needs_dir {
            Self::with_config_dir(&default_config_dir()?)
        } else {
            Self::with_config_dir(Path::new(""))
        };

        if let Some(path) = &cli.history_file {
            config.history_file = path.clone();
        }
        if let Some(path) = &cli.rofi_config {
            config.rofi_config = path.clone();
        }
        config.launcher = cli.launcher.clone();
        config.opener = cli.opener.clone();
        config.max_history = cli.max_history.max(1);
        config.print = cli.print;

        if let Some(path) = &cli.engines {
            config.engines = EngineRegistry::load_from_file(path)?;
        }

        debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }
}

/// `$XDG_CONFIG_HOME`, falling back to `$HOME/.config`
pub fn default_config_dir() -> Result<PathBuf> {
    if let Some(dir) = dirs::config_dir() {
        return Ok(dir);
    }
    let home = dirs::home_dir()
        .ok_or_else(|| SearchError::config("cannot determine home directory"))
        .context("No config directory available; pass --history-file and --rofi-config")?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_with_config_dir_layout() {
        let config = SearchConfig::with_config_dir(Path::new("/home/u/.config"));
        assert_eq!(
            config.history_file,
            PathBuf::from("/home/u/.config/rofi/scripts/history.json")
        );
        assert_eq!(
            config.rofi_config,
            PathBuf::from("/home/u/.config/rofi/search.rasi")
        );
        assert_eq!(config.max_history, 15);
        assert_eq!(config.engines, EngineRegistry::builtin());
    }

    #[test]
    fn test_from_cli_overrides() {
        let cli = Cli::try_parse_from([
            "rofi-search",
            "--history-file",
            "/tmp/h.json",
            "--rofi-config",
            "/tmp/t.rasi",
            "--launcher",
            "wofi",
            "--opener",
            "firefox",
            "--max-history",
            "5",
            "--print",
        ])
        .unwrap();

        let config = SearchConfig::from_cli(&cli).unwrap();
        assert_eq!(config.history_file, PathBuf::from("/tmp/h.json"));
        assert_eq!(config.rofi_config, PathBuf::from("/tmp/t.rasi"));
        assert_eq!(config.launcher, "wofi");
        assert_eq!(config.opener, "firefox");
        assert_eq!(config.max_history, 5);
        assert!(config.print);
    }

    #[test]
    fn test_from_cli_loads_engines_file() {
        let dir = TempDir::new().unwrap();
        let engines = dir.path().join("engines.json");
        fs::write(
            &engines,
            r#"[{"prefix": "w!", "template": "https://en.wikipedia.org/w/index.php?search="},
                {"template": "https://duckduckgo.com/?q=", "default": true}]"#,
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "rofi-search",
            "--history-file",
            "/tmp/h.json",
            "--rofi-config",
            "/tmp/t.rasi",
            "--engines",
            engines.to_str().unwrap(),
        ])
        .unwrap();

        let config = SearchConfig::from_cli(&cli).unwrap();
        assert_eq!(config.engines.default_engine().template, "https://duckduckgo.com/?q=");
    }

    #[test]
    fn test_from_cli_rejects_bad_engines_file() {
        let dir = TempDir::new().unwrap();
        let engines = dir.path().join("engines.json");
        fs::write(&engines, "[]").unwrap();

        let cli = Cli::try_parse_from([
            "rofi-search",
            "--history-file",
            "/tmp/h.json",
            "--rofi-config",
            "/tmp/t.rasi",
            "--engines",
            engines.to_str().unwrap(),
        ])
        .unwrap();

        assert!(SearchConfig::from_cli(&cli).is_err());
    }
}
