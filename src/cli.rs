use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::history::MAX_HISTORY;
use crate::opener::DEFAULT_OPENER;
use crate::prompt::DEFAULT_LAUNCHER;

/// rofi-search - search the web from a rofi prompt
///
/// Type a query, optionally starting with an engine prefix such as `y!` or
/// `gh!`, or pick one from history. The query opens in the default browser.
#[derive(Parser, Debug)]
#[command(name = "rofi-search")]
#[command(about = "Search the web from a rofi prompt, with engine prefixes and history")]
#[command(version)]
pub struct Cli {
    /// History file (JSON array of past queries)
    #[arg(long, global = true, env = "ROFI_SEARCH_HISTORY")]
    pub history_file: Option<PathBuf>,

    /// rofi theme/config file passed through to the launcher
    #[arg(long, global = true, env = "ROFI_SEARCH_CONFIG")]
    pub rofi_config: Option<PathBuf>,

    /// dmenu-compatible launcher program
    #[arg(long, global = true, default_value = DEFAULT_LAUNCHER)]
    pub launcher: String,

    /// Program used to open the final URL
    #[arg(long, global = true, default_value = DEFAULT_OPENER)]
    pub opener: String,

    /// Number of queries kept in history
    #[arg(long, global = true, default_value_t = MAX_HISTORY, value_parser = parse_max_history)]
    pub max_history: usize,

    /// JSON file replacing the built-in engine list
    #[arg(long, global = true)]
    pub engines: Option<PathBuf>,

    /// Print the URL to stdout instead of opening it
    #[arg(long, global = true)]
    pub print: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve and open a query without showing the prompt
    Query {
        /// Query text, with an optional engine prefix
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Inspect or reset the query history
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },
    /// List the engine prefixes and their URL templates
    Engines,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// Print history entries, most recent first
    List,
    /// Remove all history entries
    Clear,
}

fn parse_max_history(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{}", e))?;
    if n == 0 {
        return Err("history must hold at least one entry".to_string());
    }
    Ok(n)
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
