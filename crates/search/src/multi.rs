//! Multi-word queries.
//!
//! Each whitespace-separated term gets its own selector, sequence counter and
//! statistics. All terms share a single pass over the corpus.

use crate::cancel::CancelToken;
use crate::corpus::CorpusSource;
use crate::error::{Result, SearchError};
use crate::prefilter::DEFAULT_LENGTH_WINDOW;
use crate::query::{EntryFilter, Query};
use crate::scan::{decode_into, ScanStats, TermScan};
use crate::{MultiTermResponse, TermResults};
use std::time::Instant;

/// Runs one independent search per query term.
#[derive(Debug, Clone, Copy)]
pub struct MultiTermRunner {
    length_window: usize,
    filter: EntryFilter,
}

impl Default for MultiTermRunner {
    fn default() -> Self {
        Self {
            length_window: DEFAULT_LENGTH_WINDOW,
            filter: EntryFilter::default(),
        }
    }
}

impl MultiTermRunner {
    /// Runner with the default window and no entry filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prefilter tolerance.
    pub fn with_length_window(mut self, window: usize) -> Self {
        self.length_window = window;
        self
    }

    /// Set the filter applied per entry, per term.
    pub fn with_filter(mut self, filter: EntryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Search every term of `query`.
    pub fn run(&self, corpus: &dyn CorpusSource, query: &Query) -> Result<MultiTermResponse> {
        self.run_with_cancel(corpus, query, &CancelToken::new())
    }

    /// Search every term of `query`, stopping early if `cancel` fires.
    ///
    /// Result lists come back in the order the terms appear in the query.
    pub fn run_with_cancel(
        &self,
        corpus: &dyn CorpusSource,
        query: &Query,
        cancel: &CancelToken,
    ) -> Result<MultiTermResponse> {
        let started = Instant::now();
        let name = corpus.describe();

        let mut scans: Vec<TermScan> = query
            .terms()
            .map(|term| TermScan::new(&query.for_term(term), self.length_window, self.filter))
            .collect();

        let mut word_chars = Vec::new();
        for entry in corpus.entries()? {
            if cancel.is_cancelled() {
                tracing::warn!(corpus = %name, query = query.text(), "multi-term scan cancelled");
                return Err(SearchError::Cancelled);
            }
            let entry = entry.map_err(|e| SearchError::corpus_unavailable(name.as_str(), e))?;
            decode_into(&entry.word, &mut word_chars);
            for scan in &mut scans {
                scan.consider(&entry.word, &word_chars, entry.frequency);
            }
        }

        let examined = scans.first().map_or(ScanStats::default(), TermScan::stats).examined;
        tracing::info!(
            corpus = %name,
            query = query.text(),
            terms = scans.len(),
            examined,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "multi-term scan complete"
        );

        let terms = scans
            .into_iter()
            .map(|scan| {
                let term = scan.term().to_string();
                TermResults {
                    term,
                    results: scan.into_results(),
                }
            })
            .collect();

        Ok(MultiTermResponse::new(query.text(), terms))
    }
}
