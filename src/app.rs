//! The search flow
//!
//! load history → prompt → resolve → save history → open URL.
//! Cancellation and empty input end the run without touching history or
//! opening anything.

use crate::config::SearchConfig;
use crate::error::Result;
use crate::history::History;
use crate::opener::Opener;
use crate::prompt::{format_history, PromptOutcome, Prompter};
use crate::resolver::resolve;
use tracing::{info, warn};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The user dismissed the prompt
    Cancelled,
    /// Nothing was entered
    Empty,
    /// A URL was handed to the opener
    Opened { query: String, url: String },
}

/// Show the prompt and act on the user's choice
pub fn run_prompt<P, O>(config: &SearchConfig, prompter: &P, opener: &O) -> Result<RunOutcome>
where
    P: Prompter + ?Sized,
    O: Opener + ?Sized,
{
    let history = History::load(&config.history_file, config.max_history);
    let lines = format_history(history.entries());

    match prompter.prompt(&lines)? {
        PromptOutcome::Cancelled => Ok(RunOutcome::Cancelled),
        PromptOutcome::Empty => Ok(RunOutcome::Empty),
        PromptOutcome::Selected(text) => submit(&text, history, config, opener),
    }
}

/// Resolve and open `text` as if it had been typed into the prompt
pub fn run_query<O>(text: &str, config: &SearchConfig, opener: &O) -> Result<RunOutcome>
where
    O: Opener + ?Sized,
{
    let text = text.trim();
    if text.is_empty() {
        return Ok(RunOutcome::Empty);
    }
    let history = History::load(&config.history_file, config.max_history);
    submit(text, history, config, opener)
}

fn submit<O>(text: &str, mut history: History, config: &SearchConfig, opener: &O) -> Result<RunOutcome>
where
    O: Opener + ?Sized,
{
    let resolved = resolve(text, &config.engines);
    let url = resolved.url();
    info!("Resolved {:?} to {}", resolved.query, url);

    // A failed history write must not stop the search itself
    if let Err(e) = history.save_query(&resolved.query, &config.history_file) {
        warn!(
            "Failed to save history to {:?}: {}",
            config.history_file, e
        );
    }

    opener.open(&url)?;

    Ok(RunOutcome::Opened {
        query: resolved.query,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    struct ScriptedPrompt {
        outcome: PromptOutcome,
        shown: RefCell<Vec<String>>,
    }

    impl ScriptedPrompt {
        fn new(outcome: PromptOutcome) -> Self {
            Self {
                outcome,
                shown: RefCell::new(Vec::new()),
            }
        }
    }

    impl Prompter for ScriptedPrompt {
        fn prompt(&self, lines: &[String]) -> Result<PromptOutcome> {
            *self.shown.borrow_mut() = lines.to_vec();
            Ok(self.outcome.clone())
        }
    }

    #[derive(Default)]
    struct RecordingOpener {
        urls: RefCell<Vec<String>>,
    }

    impl Opener for RecordingOpener {
        fn open(&self, url: &str) -> Result<()> {
            self.urls.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    fn config_in(dir: &TempDir) -> SearchConfig {
        SearchConfig::with_config_dir(dir.path())
    }

    #[test]
    fn test_typed_query_is_opened_and_recorded() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let prompt = ScriptedPrompt::new(PromptOutcome::Selected("gh! rofi scripts".into()));
        let opener = RecordingOpener::default();

        let outcome = run_prompt(&config, &prompt, &opener).unwrap();

        assert_eq!(
            outcome,
            RunOutcome::Opened {
                query: "gh! rofi scripts".into(),
                url: "https://www.github.com/search?q=rofi%20scripts".into(),
            }
        );
        assert!(prompt.shown.borrow().is_empty());
        assert_eq!(
            *opener.urls.borrow(),
            ["https://www.github.com/search?q=rofi%20scripts"]
        );
        let saved = History::load(&config.history_file, config.max_history);
        assert_eq!(saved.entries(), ["gh! rofi scripts"]);
    }

    #[test]
    fn test_selected_history_line_is_undecorated() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        History::from_entries(vec!["a".into(), "y! cats".into()], 15)
            .save(&config.history_file)
            .unwrap();

        let prompt = ScriptedPrompt::new(PromptOutcome::Selected("2. y! cats".into()));
        let opener = RecordingOpener::default();
        run_prompt(&config, &prompt, &opener).unwrap();

        assert_eq!(*prompt.shown.borrow(), ["1. a", "2. y! cats"]);
        assert_eq!(
            *opener.urls.borrow(),
            ["https://www.youtube.com/results?search_query=cats"]
        );
        let saved = History::load(&config.history_file, 15);
        assert_eq!(saved.entries(), ["y! cats", "a"]);
    }

    #[test]
    fn test_cancel_leaves_history_untouched() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        fs::create_dir_all(config.history_file.parent().unwrap()).unwrap();
        fs::write(&config.history_file, r#"["old"]"#).unwrap();

        let prompt = ScriptedPrompt::new(PromptOutcome::Cancelled);
        let opener = RecordingOpener::default();
        let outcome = run_prompt(&config, &prompt, &opener).unwrap();

        assert_eq!(outcome, RunOutcome::Cancelled);
        assert!(opener.urls.borrow().is_empty());
        assert_eq!(fs::read_to_string(&config.history_file).unwrap(), r#"["old"]"#);
    }

    #[test]
    fn test_empty_input_does_nothing() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let prompt = ScriptedPrompt::new(PromptOutcome::Empty);
        let opener = RecordingOpener::default();

        assert_eq!(run_prompt(&config, &prompt, &opener).unwrap(), RunOutcome::Empty);
        assert!(opener.urls.borrow().is_empty());
        assert!(!config.history_file.exists());
    }

    #[test]
    fn test_history_write_failure_still_opens() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        // A directory where the file should be makes the write fail
        config.history_file = dir.path().to_path_buf();

        let prompt = ScriptedPrompt::new(PromptOutcome::Selected("random text".into()));
        let opener = RecordingOpener::default();
        run_prompt(&config, &prompt, &opener).unwrap();

        assert_eq!(
            *opener.urls.borrow(),
            ["https://www.perplexity.ai/search?q=random%20text"]
        );
    }

    #[test]
    fn test_opener_failure_is_reported() {
        struct BrokenOpener;
        impl Opener for BrokenOpener {
            fn open(&self, _url: &str) -> Result<()> {
                Err(SearchError::opener("no browser"))
            }
        }

        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let err = run_query("p! rust", &config, &BrokenOpener).unwrap_err();
        assert!(matches!(err, SearchError::Opener(_)));
    }

    #[test]
    fn test_run_query_blank_is_empty() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let opener = RecordingOpener::default();
        assert_eq!(run_query("   ", &config, &opener).unwrap(), RunOutcome::Empty);
        assert!(opener.urls.borrow().is_empty());
    }

    #[test]
    fn test_run_query_records_history() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let opener = RecordingOpener::default();

        run_query("g! one", &config, &opener).unwrap();
        run_query("g! two", &config, &opener).unwrap();
        run_query("g! one", &config, &opener).unwrap();

        let saved = History::load(&config.history_file, config.max_history);
        assert_eq!(saved.entries(), ["g! one", "g! two"]);
    }
}
