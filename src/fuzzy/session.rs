//! A finder session: one corpus, a changing query and the palette's cap.

use crate::domain::{EntryType, ResultEntry, ResultMode, UpdateEvent};
use crate::fuzzy::engine::{FuzzyEngine, SkimEngine};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Holds the corpus being searched and the current result cap.
///
/// The cap is shared through [`FinderSession::cap_handle`] so whatever
/// receives [`crate::app::actions::EditorCommand::SetResultCap`] can update it
/// from another thread. Until the first update the cap is unbounded.
#[derive(Debug)]
pub struct FinderSession<E: FuzzyEngine = SkimEngine> {
    engine: E,
    corpus: Vec<ResultEntry>,
    mode: ResultMode,
    cap: Arc<AtomicUsize>,
}

impl Default for FinderSession {
    fn default() -> Self {
        Self::new(SkimEngine::default())
    }
}

impl<E: FuzzyEngine> FinderSession<E> {
    /// Starts an empty session.
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            corpus: Vec::new(),
            mode: ResultMode::Flat,
            cap: Arc::new(AtomicUsize::new(usize::MAX)),
        }
    }

    /// Replaces the corpus. Grouped corpora (any `FileLine` entry) switch the
    /// session to [`ResultMode::FileLine`].
    pub fn set_corpus(&mut self, corpus: Vec<ResultEntry>) {
        self.mode = if corpus.iter().any(|e| e.entry_type == EntryType::FileLine) {
            ResultMode::FileLine
        } else {
            ResultMode::Flat
        };
        tracing::debug!(entries = corpus.len(), mode = ?self.mode, "finder corpus replaced");
        self.corpus = corpus;
    }

    /// Shared handle to the result cap.
    #[must_use]
    pub fn cap_handle(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.cap)
    }

    /// Current result cap.
    #[must_use]
    pub fn cap(&self) -> usize {
        self.cap.load(Ordering::Relaxed)
    }

    /// Runs `query` and packages the ranked entries for the palette, with the
    /// selection on the first entry.
    #[must_use]
    pub fn query(&self, query: &str) -> UpdateEvent {
        let entries = self.engine.search(query, &self.corpus, self.cap());
        UpdateEvent::PaletteResults {
            mode: self.mode,
            entries,
            selected: 0,
        }
    }
}
