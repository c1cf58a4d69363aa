//! Approximate word lookup over frequency corpora.
//!
//! This crate provides:
//! - Levenshtein edit distance in linear memory
//! - Bounded top-K selection with a deterministic total order
//! - A single-pass streaming scan with a length prefilter
//! - Multi-word queries with independent per-term results
//! - Optional sharded scans over preloaded corpora
//!
//! # Example
//!
//! ```
//! use wordfuzz_search::{CorpusEntry, MemoryCorpus, Query, ScanEngine, Threshold};
//!
//! let corpus: MemoryCorpus = [("hello", 5u64), ("hallo", 3), ("hullo", 1), ("world", 9)]
//!     .into_iter()
//!     .map(CorpusEntry::from)
//!     .collect();
//!
//! let query = Query::new("hello", 2, Threshold::MaxDistance(1)).unwrap();
//! let outcome = ScanEngine::new().scan(&corpus, &query).unwrap();
//!
//! let words: Vec<_> = outcome.results.iter().map(|r| r.word.as_str()).collect();
//! assert_eq!(words, ["hello", "hallo"]);
//! ```

mod cancel;
mod corpus;
mod error;
mod fuzzy;
mod multi;
mod prefilter;
mod query;
mod scan;
mod selector;
mod similarity;
mod strategy;

#[cfg(test)]
mod testing;

#[cfg(feature = "wasm")]
mod wasm;

pub use cancel::CancelToken;
pub use corpus::{parse_line, CorpusEntry, CorpusSource, CorpusStream, FileCorpus, MemoryCorpus, TsvLines};
pub use error::{Result, SearchError, SearchErrorCode};
pub use fuzzy::{levenshtein_chars, levenshtein_distance};
pub use multi::MultiTermRunner;
pub use prefilter::{LengthWindow, DEFAULT_LENGTH_WINDOW};
pub use query::{EntryFilter, Query, SearchRequest, Threshold};
pub use scan::{ScanEngine, ScanOutcome, ScanStats};
pub use selector::{Candidate, TopK};
pub use similarity::similarity;
pub use strategy::{strategy_for_file, ScanStrategy, SearchStrategy};
#[cfg(feature = "parallel")]
pub use strategy::ShardedScanStrategy;

use serde::{Deserialize, Serialize};

/// A ranked match returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Matched word
    pub word: String,
    /// Edit distance from the query term
    pub distance: usize,
    /// Corpus frequency
    pub frequency: u64,
    /// Normalized similarity in `[0, 1]` (higher is better)
    pub similarity: f64,
}

/// Results for a single-term query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// The query as searched
    pub query: String,
    /// Results in ranking order
    pub results: Vec<SearchResult>,
    /// Number of results
    pub total_count: usize,
}

impl SearchResponse {
    /// Build a response, counting the results.
    pub fn new(query: impl Into<String>, results: Vec<SearchResult>) -> Self {
        Self {
            query: query.into(),
            total_count: results.len(),
            results,
        }
    }
}

/// Results for one term of a multi-word query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermResults {
    /// The term
    pub term: String,
    /// Results in ranking order
    pub results: Vec<SearchResult>,
}

/// Results for a multi-word query, one list per term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiTermResponse {
    /// The full query
    pub query: String,
    /// Per-term results in query order
    pub terms: Vec<TermResults>,
    /// Number of terms
    pub total_count: usize,
}

impl MultiTermResponse {
    /// Build a response, counting the terms.
    pub fn new(query: impl Into<String>, terms: Vec<TermResults>) -> Self {
        Self {
            query: query.into(),
            total_count: terms.len(),
            terms,
        }
    }
}
