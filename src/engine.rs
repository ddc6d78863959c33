//! Search engine registry
//!
//! An ordered list of engines, each with a query prefix and a URL template
//! that only lacks the escaped search term. Exactly one entry is the default
//! and is used when no prefix matches. The registry is built once at startup
//! and passed to the resolver by reference.

use crate::error::{Result, SearchError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Engines shipped with the binary, in matching order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum BuiltinEngine {
    #[strum(serialize = "YouTube")]
    YouTube,
    #[strum(serialize = "Google")]
    Google,
    #[strum(serialize = "GitHub")]
    GitHub,
    #[strum(serialize = "Perplexity")]
    Perplexity,
}

impl BuiltinEngine {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::YouTube => "y!",
            Self::Google => "g!",
            Self::GitHub => "gh!",
            Self::Perplexity => "p!",
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            Self::YouTube => "https://www.youtube.com/results?search_query=",
            Self::Google => "https://www.google.com/search?q=",
            Self::GitHub => "https://www.github.com/search?q=",
            Self::Perplexity => "https://www.perplexity.ai/search?q=",
        }
    }

    /// The engine used for queries without a known prefix
    pub fn fallback() -> Self {
        Self::Perplexity
    }
}

/// A single registry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engine {
    /// Query prefix such as `y!`. Empty for the default entry.
    #[serde(default)]
    pub prefix: String,
    /// URL to which the escaped search term is appended
    pub template: String,
    #[serde(default, rename = "default")]
    pub is_default: bool,
}

impl Engine {
    pub fn new(prefix: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            template: template.into(),
            is_default: false,
        }
    }

    pub fn default_entry(template: impl Into<String>) -> Self {
        Self {
            prefix: String::new(),
            template: template.into(),
            is_default: true,
        }
    }
}

/// Immutable ordered engine list with exactly one default entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineRegistry {
    engines: Vec<Engine>,
}

impl EngineRegistry {
    /// Build a registry from an ordered list, validating it.
    ///
    /// Earlier entries win when one prefix is a textual prefix of another.
    pub fn new(engines: Vec<Engine>) -> Result<Self> {
        validate(&engines)?;
        Ok(Self { engines })
    }

    /// The registry shipped with the binary
    pub fn builtin() -> Self {
        let mut engines: Vec<Engine> = BuiltinEngine::iter()
            .map(|e| Engine::new(e.prefix(), e.template()))
            .collect();
        engines.push(Engine::default_entry(BuiltinEngine::fallback().template()));
        Self { engines }
    }

    /// Load a registry from a JSON array of engine entries
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read engines from {:?}", path.as_ref()))?;

        let engines: Vec<Engine> =
            serde_json::from_str(&content).context("Failed to parse engines JSON")?;

        Self::new(engines).with_context(|| format!("Invalid engines file {:?}", path.as_ref()))
    }

    /// All entries in declaration order, default included
    pub fn engines(&self) -> &[Engine] {
        &self.engines
    }

    /// Entries that take part in prefix matching, in declaration order
    pub fn prefixed(&self) -> impl Iterator<Item = &Engine> {
        self.engines.iter().filter(|e| !e.is_default)
    }

    pub fn default_engine(&self) -> &Engine {
        // `new` and `builtin` both guarantee a default entry
        self.engines
            .iter()
            .find(|e| e.is_default)
            .unwrap_or(&self.engines[0])
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate(engines: &[Engine]) -> Result<()> {
    if engines.is_empty() {
        return Err(SearchError::validation("engine registry is empty"));
    }

    let defaults = engines.iter().filter(|e| e.is_default).count();
    if defaults != 1 {
        return Err(SearchError::validation(format!(
            "expected exactly one default engine, found {}",
            defaults
        )));
    }

    let mut seen = HashSet::new();
    for engine in engines {
        if engine.template.trim().is_empty() {
            return Err(SearchError::validation(format!(
                "engine '{}' has an empty URL template",
                engine.prefix
            )));
        }
        if engine.is_default {
            continue;
        }
        if engine.prefix.is_empty() {
            return Err(SearchError::validation(
                "non-default engine must have a prefix",
            ));
        }
        if engine.prefix.chars().any(char::is_whitespace) {
            return Err(SearchError::validation(format!(
                "engine prefix '{}' contains whitespace",
                engine.prefix
            )));
        }
        if !seen.insert(engine.prefix.as_str()) {
            return Err(SearchError::validation(format!(
                "duplicate engine prefix '{}'",
                engine.prefix
            )));
        }
    }

    Ok(())
}
