//! Persisted query history
//!
//! The history is a most-recent-first list of distinct queries, stored as a
//! JSON array of strings. The whole file is read once at startup and
//! overwritten once after the user confirms a query.

use crate::error::Result;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Default number of queries kept in the history file
pub const MAX_HISTORY: usize = 15;

/// Ordered, deduplicated list of past queries (index 0 is the most recent)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    max_len: usize,
}

impl History {
    /// Create an empty history holding at most `max_len` entries
    pub fn new(max_len: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_len: max_len.max(1),
        }
    }

    /// Build a history from existing entries, most recent first.
    ///
    /// Entries are taken as given; the cap applies on the next `record`.
    pub fn from_entries(entries: Vec<String>, max_len: usize) -> Self {
        Self {
            entries,
            max_len: max_len.max(1),
        }
    }

    /// Load the history file.
    ///
    /// A missing file, unreadable file, or anything that is not a JSON array
    /// of strings yields an empty history.
    pub fn load<P: AsRef<Path>>(path: P, max_len: usize) -> Self {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No history file at {:?}, starting empty", path);
                return Self::new(max_len);
            }
            Err(e) => {
                warn!("Failed to read history file {:?}: {}", path, e);
                return Self::new(max_len);
            }
        };

        match serde_json::from_str::<Vec<String>>(&content) {
            Ok(entries) => {
                debug!("Loaded {} history entries from {:?}", entries.len(), path);
                Self::from_entries(entries, max_len)
            }
            Err(e) => {
                warn!("Ignoring malformed history file {:?}: {}", path, e);
                Self::new(max_len)
            }
        }
    }

    /// Move `query` to the front, dropping any older copy, and cap the length
    pub fn record(&mut self, query: &str) {
        self.entries.retain(|entry| entry != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(self.max_len);
    }

    /// Overwrite the history file with the current entries.
    ///
    /// Missing parent directories are created.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(&self.entries)?;
        fs::write(path, json)?;
        debug!("Saved {} history entries to {:?}", self.entries.len(), path);
        Ok(())
    }

    /// Record `query` and persist the result in one step
    pub fn save_query<P: AsRef<Path>>(&mut self, query: &str, path: P) -> Result<()> {
        self.record(query);
        self.save(path)
    }

    /// Empty the history and persist it
    pub fn clear<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.entries.clear();
        self.save(path)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_HISTORY)
    }
}
