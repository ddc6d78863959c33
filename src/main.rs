//! rofi-search - main entry point
//!
//! Shows a rofi prompt seeded with recent queries and opens the chosen query
//! with the matching search engine. Every outcome of the search flow exits 0;
//! failures only show up in the log.

use std::io::Write;
use std::process::ExitCode;

use rofi_search::app::{self, RunOutcome};
use rofi_search::cli::{Cli, Commands, HistoryCommands};
use rofi_search::config::SearchConfig;
use rofi_search::history::History;
use rofi_search::opener::{Opener, PrintOpener, SystemOpener};
use rofi_search::prompt::{format_history, Launcher};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Initialize the logger; RUST_LOG overrides the default unless --verbose
fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logger(cli.verbose);
    info!("rofi-search starting");

    let config = match SearchConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            eprintln!("✗ {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let opener: Box<dyn Opener> = if config.print {
        Box::new(PrintOpener)
    } else {
        Box::new(SystemOpener::new(config.opener.clone()))
    };

    match cli.command {
        None => {
            let launcher = Launcher::new(config.launcher.clone(), config.rofi_config.clone());
            report(app::run_prompt(&config, &launcher, opener.as_ref()));
            ExitCode::SUCCESS
        }
        Some(Commands::Query { text }) => {
            report(app::run_query(&text.join(" "), &config, opener.as_ref()));
            ExitCode::SUCCESS
        }
        Some(Commands::History { action }) => run_history_command(&action, &config),
        Some(Commands::Engines) => {
            let lines: Vec<String> = config
                .engines
                .engines()
                .iter()
                .map(|engine| {
                    if engine.is_default {
                        format!("{:<8}{}", "(none)", engine.template)
                    } else {
                        format!("{:<8}{}", engine.prefix, engine.template)
                    }
                })
                .collect();
            print_lines(&lines)
        }
    }
}

/// Log how the search flow ended. Nothing here is user-visible.
fn report(result: rofi_search::error::Result<RunOutcome>) {
    match result {
        Ok(RunOutcome::Opened { query, url }) => info!("Opened {:?} as {}", query, url),
        Ok(RunOutcome::Cancelled) => debug!("Prompt cancelled"),
        Ok(RunOutcome::Empty) => debug!("No query entered"),
        Err(e) => error!("Search failed: {}", e),
    }
}

fn run_history_command(action: &HistoryCommands, config: &SearchConfig) -> ExitCode {
    let mut history = History::load(&config.history_file, config.max_history);
    match action {
        HistoryCommands::List => print_lines(&format_history(history.entries())),
        HistoryCommands::Clear => match history.clear(&config.history_file) {
            Ok(()) => {
                info!("Cleared history at {:?}", config.history_file);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to clear history: {}", e);
                eprintln!("✗ Failed to clear history: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

/// Print to stdout, treating a closed pipe as success
fn print_lines(lines: &[String]) -> ExitCode {
    let mut stdout = std::io::stdout().lock();
    for line in lines {
        match writeln!(stdout, "{}", line) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => break,
            Err(e) => {
                error!("Failed to write output: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
