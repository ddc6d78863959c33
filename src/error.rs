//! Error handling module for rofi-search
//!
//! Provides centralized error handling with proper error types using thiserror.
//! None of these are shown to the user during a search; they end up in the log.

use thiserror::Error;

/// Main error type for rofi-search
#[derive(Error, Debug)]
pub enum SearchError {
    /// IO errors (history file, subprocess pipes)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The external prompt program could not be run
    #[error("Launcher error: {0}")]
    Launcher(String),

    /// The URL opener could not be spawned
    #[error("Opener error: {0}")]
    Opener(String),

    /// Configuration errors (paths, settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (engine registry contents)
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for rofi-search operations
pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    /// Create a launcher error
    pub fn launcher(msg: impl Into<String>) -> Self {
        Self::Launcher(msg.into())
    }

    /// Create an opener error
    pub fn opener(msg: impl Into<String>) -> Self {
        Self::Opener(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
