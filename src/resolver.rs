//! Query resolution
//!
//! Turns the line returned by the prompt into a search URL:
//! 1. strip the `"{n}. "` decoration added to history lines,
//! 2. pick the first engine whose prefix starts the query,
//! 3. escape the remaining term and append it to the engine template.

use crate::engine::EngineRegistry;
use regex::Regex;
use std::sync::OnceLock;

/// Matches the `"{index}. "` prefix that the prompt puts on history lines
static DECORATION: OnceLock<Regex> = OnceLock::new();

fn decoration() -> &'static Regex {
    DECORATION.get_or_init(|| Regex::new(r"^\d+\.\s+").expect("static regex is valid"))
}

/// Remove a leading history index such as `"3. "`.
///
/// Only the exact display format is recognised: digits, a period, then at
/// least one whitespace character. `"3.hello"` is returned unchanged.
pub fn strip_decoration(input: &str) -> &str {
    match decoration().find(input) {
        Some(m) => &input[m.end()..],
        None => input,
    }
}

/// Outcome of resolving one prompt line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuery {
    /// The query as the user typed or selected it, without decoration.
    /// This is what gets written to history.
    pub query: String,
    /// URL template of the selected engine
    pub template: String,
    /// Search term to escape and append to the template
    pub term: String,
}

impl ResolvedQuery {
    /// Assemble the final URL with the term percent-encoded
    pub fn url(&self) -> String {
        format!("{}{}", self.template, urlencoding::encode(&self.term))
    }
}

/// Resolve a trimmed prompt line against the registry
pub fn resolve(input: &str, registry: &EngineRegistry) -> ResolvedQuery {
    let query = strip_decoration(input);

    let matched = registry
        .prefixed()
        .find(|engine| query.starts_with(engine.prefix.as_str()));

    let (template, term) = match matched {
        Some(engine) => (
            engine.template.clone(),
            query[engine.prefix.len()..].trim().to_string(),
        ),
        None => (registry.default_engine().template.clone(), query.to_string()),
    };

    ResolvedQuery {
        query: query.to_string(),
        template,
        term,
    }
}
