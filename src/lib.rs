//! rofi-search library
//!
//! Components of the search launcher: history storage, the engine registry,
//! the rofi prompt adapter, query resolution and URL opening.

pub mod app;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod opener;
pub mod prompt;
pub mod resolver;

// Re-export main types for convenience
pub use app::{run_prompt, run_query, RunOutcome};
pub use config::SearchConfig;
pub use engine::{BuiltinEngine, Engine, EngineRegistry};
pub use error::SearchError;
pub use history::{History, MAX_HISTORY};
pub use opener::{CommandDetach, Opener, PrintOpener, SystemOpener};
pub use prompt::{format_history, Launcher, PromptOutcome, Prompter};
pub use resolver::{resolve, strip_decoration, ResolvedQuery};
