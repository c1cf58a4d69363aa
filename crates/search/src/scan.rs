//! Single-pass corpus scan.
//!
//! Per entry: length prefilter, edit distance, threshold, domain filter,
//! then an offer to the bounded selector. Nothing but the selector outlives
//! the entry being examined.

use crate::cancel::CancelToken;
use crate::corpus::{CorpusEntry, CorpusSource};
use crate::error::{Result, SearchError};
use crate::fuzzy::levenshtein_chars;
use crate::prefilter::{LengthWindow, DEFAULT_LENGTH_WINDOW};
use crate::query::{EntryFilter, Query};
use crate::selector::{Candidate, TopK};
use crate::similarity::similarity;
use crate::{SearchResponse, SearchResult};
use serde::{Deserialize, Serialize};
use std::io;
use std::time::{Duration, Instant};

/// Counters collected during a scan. Observability only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Entries read from the corpus
    pub examined: u64,
    /// Entries rejected by the length window
    pub length_rejected: u64,
    /// Entries within the distance threshold
    pub passed_threshold: u64,
    /// Threshold-passing entries dropped by the entry filter
    pub filtered: u64,
}

impl ScanStats {
    /// Sum of two stat sets, for combining shards.
    pub fn combine(self, other: ScanStats) -> ScanStats {
        ScanStats {
            examined: self.examined + other.examined,
            length_rejected: self.length_rejected + other.length_rejected,
            passed_threshold: self.passed_threshold + other.passed_threshold,
            filtered: self.filtered + other.filtered,
        }
    }
}

/// Ranked results of one scan plus its statistics.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Results in ranking order
    pub results: Vec<SearchResult>,
    /// Scan counters
    pub stats: ScanStats,
    /// Wall time of the scan
    pub elapsed: Duration,
}

impl ScanOutcome {
    /// Wrap the results in the response shape shared by all strategies.
    pub fn into_response(self, query: &Query) -> SearchResponse {
        SearchResponse::new(query.text(), self.results)
    }
}

/// Scan state for one query term.
#[derive(Debug)]
pub(crate) struct TermScan {
    term: String,
    term_chars: Vec<char>,
    window: LengthWindow,
    max_distance: usize,
    filter: EntryFilter,
    selector: TopK,
    stats: ScanStats,
}

impl TermScan {
    pub(crate) fn new(query: &Query, length_window: usize, filter: EntryFilter) -> Self {
        let term_chars: Vec<char> = query.text().chars().collect();
        Self {
            window: LengthWindow::new(term_chars.len(), length_window, query.max_distance()),
            term: query.text().to_string(),
            term_chars,
            max_distance: query.max_distance(),
            filter,
            selector: TopK::new(query.limit()),
            stats: ScanStats::default(),
        }
    }

    pub(crate) fn term(&self) -> &str {
        &self.term
    }

    pub(crate) fn window(&self) -> LengthWindow {
        self.window
    }

    /// Distance of `word` if it qualifies for this term.
    fn evaluate(&mut self, word: &str, word_chars: &[char], frequency: u64) -> Option<usize> {
        self.stats.examined += 1;

        if !self.window.accepts(word_chars.len()) {
            self.stats.length_rejected += 1;
            return None;
        }

        let distance = levenshtein_chars(&self.term_chars, word_chars);
        if distance > self.max_distance {
            return None;
        }
        self.stats.passed_threshold += 1;

        if !self.filter.accepts(&self.term, word, frequency) {
            self.stats.filtered += 1;
            return None;
        }

        Some(distance)
    }

    /// Evaluate an entry and offer it with the next local sequence number.
    pub(crate) fn consider(&mut self, word: &str, word_chars: &[char], frequency: u64) {
        if let Some(distance) = self.evaluate(word, word_chars, frequency) {
            self.selector.offer(word, distance, frequency);
        }
    }

    /// Evaluate an entry and offer it under an externally assigned sequence.
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    pub(crate) fn consider_at(
        &mut self,
        sequence: u64,
        word: &str,
        word_chars: &[char],
        frequency: u64,
    ) {
        if let Some(distance) = self.evaluate(word, word_chars, frequency) {
            self.selector.offer_candidate(Candidate {
                word: word.to_string(),
                distance,
                frequency,
                sequence,
            });
        }
    }

    /// Fold another shard of the same term into this one.
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    pub(crate) fn merge(&mut self, other: TermScan) {
        self.stats = self.stats.combine(other.stats);
        self.selector.merge(other.selector);
    }

    pub(crate) fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Drain the selector into ranked results.
    pub(crate) fn into_results(self) -> Vec<SearchResult> {
        let term_len = self.term_chars.len();
        self.selector
            .drain()
            .into_iter()
            .map(|c| {
                let word_len = c.word.chars().count();
                SearchResult {
                    similarity: similarity(c.distance, term_len, word_len),
                    distance: c.distance,
                    frequency: c.frequency,
                    word: c.word,
                }
            })
            .collect()
    }
}

/// Reuse `buf` to hold the characters of `word`.
#[inline]
pub(crate) fn decode_into(word: &str, buf: &mut Vec<char>) {
    buf.clear();
    buf.extend(word.chars());
}

/// Configured scanner; cheap to copy and shareable across requests.
#[derive(Debug, Clone, Copy)]
pub struct ScanEngine {
    length_window: usize,
    filter: EntryFilter,
}

impl Default for ScanEngine {
    fn default() -> Self {
        Self {
            length_window: DEFAULT_LENGTH_WINDOW,
            filter: EntryFilter::default(),
        }
    }
}

impl ScanEngine {
    /// Engine with the default length window and no entry filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prefilter tolerance. Widened to the query's max distance at scan time.
    pub fn with_length_window(mut self, window: usize) -> Self {
        self.length_window = window;
        self
    }

    /// Set the per-entry domain filter.
    pub fn with_filter(mut self, filter: EntryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Configured prefilter tolerance.
    pub fn length_window(&self) -> usize {
        self.length_window
    }

    /// Configured entry filter.
    pub fn filter(&self) -> EntryFilter {
        self.filter
    }

    /// Scan `corpus` for `query`.
    pub fn scan(&self, corpus: &dyn CorpusSource, query: &Query) -> Result<ScanOutcome> {
        self.scan_with_cancel(corpus, query, &CancelToken::new())
    }

    /// Scan `corpus` for `query`, stopping early if `cancel` fires.
    pub fn scan_with_cancel(
        &self,
        corpus: &dyn CorpusSource,
        query: &Query,
        cancel: &CancelToken,
    ) -> Result<ScanOutcome> {
        let name = corpus.describe();
        let stream = corpus.entries()?;
        self.scan_stream(stream, &name, query, cancel)
    }

    /// Scan an arbitrary entry stream.
    ///
    /// The first stream error aborts the scan; nothing gathered before it is
    /// returned.
    pub fn scan_stream<I>(
        &self,
        entries: I,
        corpus_name: &str,
        query: &Query,
        cancel: &CancelToken,
    ) -> Result<ScanOutcome>
    where
        I: IntoIterator<Item = io::Result<CorpusEntry>>,
    {
        let started = Instant::now();
        let mut scan = TermScan::new(query, self.length_window, self.filter);
        let window = scan.window();
        tracing::debug!(
            corpus = corpus_name,
            query = query.text(),
            limit = query.limit(),
            max_distance = query.max_distance(),
            min_len = window.min_len(),
            max_len = window.max_len(),
            "scan started"
        );

        let mut word_chars = Vec::new();

        for entry in entries {
            if cancel.is_cancelled() {
                tracing::warn!(corpus = corpus_name, query = query.text(), "scan cancelled");
                return Err(SearchError::Cancelled);
            }
            let entry = entry.map_err(|e| {
                tracing::error!(corpus = corpus_name, error = %e, "corpus stream failed");
                SearchError::corpus_unavailable(corpus_name, e)
            })?;
            decode_into(&entry.word, &mut word_chars);
            scan.consider(&entry.word, &word_chars, entry.frequency);
        }

        let stats = scan.stats();
        let results = scan.into_results();
        let elapsed = started.elapsed();
        log_summary(corpus_name, query.text(), &stats, results.len(), elapsed);

        Ok(ScanOutcome {
            results,
            stats,
            elapsed,
        })
    }

    /// Scan an in-memory corpus split into contiguous shards across the
    /// rayon pool.
    ///
    /// Sequence numbers are global entry indices, so the merged result is
    /// identical to [`ScanEngine::scan_stream`] over the same slice.
    #[cfg(feature = "parallel")]
    pub fn scan_sharded(
        &self,
        entries: &[CorpusEntry],
        query: &Query,
        cancel: &CancelToken,
    ) -> Result<ScanOutcome> {
        use rayon::prelude::*;

        let started = Instant::now();
        let shard_len = entries
            .len()
            .div_ceil(rayon::current_num_threads().max(1))
            .max(1);

        let shards: Vec<TermScan> = entries
            .par_chunks(shard_len)
            .enumerate()
            .map(|(shard, chunk)| {
                let offset = (shard * shard_len) as u64;
                let mut scan = TermScan::new(query, self.length_window, self.filter);
                let mut word_chars = Vec::new();
                for (i, entry) in chunk.iter().enumerate() {
                    if cancel.is_cancelled() {
                        return Err(SearchError::Cancelled);
                    }
                    decode_into(&entry.word, &mut word_chars);
                    scan.consider_at(offset + i as u64, &entry.word, &word_chars, entry.frequency);
                }
                Ok(scan)
            })
            .collect::<Result<_>>()?;

        let mut merged = TermScan::new(query, self.length_window, self.filter);
        for shard in shards {
            merged.merge(shard);
        }

        let stats = merged.stats();
        let results = merged.into_results();
        let elapsed = started.elapsed();
        log_summary("memory (sharded)", query.text(), &stats, results.len(), elapsed);

        Ok(ScanOutcome {
            results,
            stats,
            elapsed,
        })
    }
}

fn log_summary(corpus: &str, query: &str, stats: &ScanStats, retained: usize, elapsed: Duration) {
    tracing::info!(
        corpus,
        query,
        examined = stats.examined,
        passed = stats.passed_threshold,
        retained,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "Scanned {} entries, {} candidates",
        stats.examined,
        stats.passed_threshold
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::MemoryCorpus;
    use crate::query::Threshold;
    use crate::testing::{CancelAfter, FailingCorpus};

    fn hello_corpus() -> MemoryCorpus {
        [("hello", 5u64), ("hallo", 3), ("hullo", 1), ("world", 9)]
            .into_iter()
            .map(CorpusEntry::from)
            .collect()
    }

    #[test]
    fn test_hello_scenario() {
        let query = Query::new("hello", 2, Threshold::MaxDistance(1)).unwrap();
        let outcome = ScanEngine::new().scan(&hello_corpus(), &query).unwrap();

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].word, "hello");
        assert_eq!(outcome.results[0].distance, 0);
        assert_eq!(outcome.results[0].frequency, 5);
        assert_eq!(outcome.results[0].similarity, 1.0);
        assert_eq!(outcome.results[1].word, "hallo");
        assert_eq!(outcome.results[1].distance, 1);
        assert_eq!(outcome.results[1].frequency, 3);
        assert!((outcome.results[1].similarity - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_stats() {
        let query = Query::new("hello", 2, Threshold::MaxDistance(1)).unwrap();
        let outcome = ScanEngine::new().scan(&hello_corpus(), &query).unwrap();
        assert_eq!(outcome.stats.examined, 4);
        assert_eq!(outcome.stats.passed_threshold, 3);
        assert_eq!(outcome.stats.length_rejected, 0);
    }

    #[test]
    fn test_length_prefilter_counts() {
        let corpus: MemoryCorpus = [("a", 1u64), ("hello", 1), ("extraordinary", 1)]
            .into_iter()
            .map(CorpusEntry::from)
            .collect();
        let query = Query::new("hello", 5, Threshold::MaxDistance(1)).unwrap();
        let outcome = ScanEngine::new().scan(&corpus, &query).unwrap();
        assert_eq!(outcome.stats.length_rejected, 2);
        assert_eq!(outcome.results.len(), 1);
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let query = Query::new("zzzzzz", 3, Threshold::MaxDistance(1)).unwrap();
        let outcome = ScanEngine::new().scan(&hello_corpus(), &query).unwrap();
        assert!(outcome.results.is_empty());
    }

    #[test]
    fn test_mid_stream_failure_discards_partial() {
        let query = Query::new("hello", 5, Threshold::MaxDistance(1)).unwrap();
        let err = ScanEngine::new().scan(&FailingCorpus, &query).unwrap_err();
        assert!(matches!(err, SearchError::CorpusUnavailable { .. }));
    }

    #[test]
    fn test_cancelled_before_start() {
        let query = Query::new("hello", 5, Threshold::MaxDistance(1)).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let err = ScanEngine::new()
            .scan_with_cancel(&hello_corpus(), &query, &cancel)
            .unwrap_err();
        assert!(matches!(err, SearchError::Cancelled));
    }

    #[test]
    fn test_term_scan_window_widens_to_distance() {
        let query = Query::new("hello", 5, Threshold::MaxDistance(3)).unwrap();
        let window = TermScan::new(&query, 1, EntryFilter::none()).window();
        assert_eq!(window.min_len(), 2);
        assert_eq!(window.max_len(), 8);
    }

    #[test]
    fn test_cancelled_mid_scan() {
        let query = Query::new("hello", 5, Threshold::MaxDistance(1)).unwrap();
        let cancel = CancelToken::new();
        let corpus = CancelAfter {
            cancel: cancel.clone(),
            after: 2,
        };
        let err = ScanEngine::new()
            .scan_with_cancel(&corpus, &query, &cancel)
            .unwrap_err();
        assert!(matches!(err, SearchError::Cancelled));
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn test_frequency_floor() {
        let engine = ScanEngine::new().with_filter(EntryFilter::none().with_frequency_floor(2));
        let query = Query::new("hello", 5, Threshold::MaxDistance(1)).unwrap();
        let outcome = engine.scan(&hello_corpus(), &query).unwrap();
        let words: Vec<_> = outcome.results.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["hello", "hallo"]);
        assert_eq!(outcome.stats.filtered, 1);
    }

    #[test]
    fn test_exclude_exact() {
        let engine = ScanEngine::new().with_filter(EntryFilter::none().excluding_exact(true));
        let query = Query::new("hello", 5, Threshold::MaxDistance(1)).unwrap();
        let outcome = engine.scan(&hello_corpus(), &query).unwrap();
        assert!(outcome.results.iter().all(|r| r.word != "hello"));
        assert_eq!(outcome.results.len(), 2);
    }

    #[test]
    fn test_window_never_hides_qualifying_entry() {
        let corpus: MemoryCorpus = [("ab", 1u64), ("abcdef", 1)]
            .into_iter()
            .map(CorpusEntry::from)
            .collect();
        let engine = ScanEngine::new().with_length_window(0);
        let query = Query::new("ab", 5, Threshold::MaxDistance(4)).unwrap();
        let outcome = engine.scan(&corpus, &query).unwrap();
        assert_eq!(outcome.results.len(), 2);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_sharded_matches_sequential() {
        let corpus: MemoryCorpus = (0..500u64)
            .map(|i| CorpusEntry::new(format!("w{}", i % 37), i % 11))
            .collect();
        let query = Query::new("w12", 7, Threshold::MaxDistance(2)).unwrap();
        let engine = ScanEngine::new();

        let sequential = engine.scan(&corpus, &query).unwrap();
        let sharded = engine
            .scan_sharded(corpus.as_slice(), &query, &CancelToken::new())
            .unwrap();

        assert_eq!(sequential.results, sharded.results);
        assert_eq!(sequential.stats, sharded.stats);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_sharded_cancelled() {
        let corpus: MemoryCorpus = (0..200u64)
            .map(|i| CorpusEntry::new(format!("w{i}"), i))
            .collect();
        let query = Query::new("w12", 5, Threshold::MaxDistance(1)).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();

        let err = ScanEngine::new()
            .scan_sharded(corpus.as_slice(), &query, &cancel)
            .unwrap_err();
        assert!(matches!(err, SearchError::Cancelled));
    }
}
