//! Interchangeable retrieval strategies.
//!
//! A storage engine with its own trigram index can answer the same queries
//! by implementing [`SearchStrategy`]; callers only see [`SearchResponse`].

use crate::cancel::CancelToken;
use crate::corpus::{CorpusSource, FileCorpus};
#[cfg(feature = "parallel")]
use crate::corpus::MemoryCorpus;
use crate::error::{Result, SearchError};
use crate::query::Query;
use crate::scan::{ScanEngine, ScanOutcome};
use crate::SearchResponse;
use std::path::Path;

/// A way of answering single-term queries.
pub trait SearchStrategy: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Run `query`, honoring `cancel`.
    fn execute(&self, query: &Query, cancel: &CancelToken) -> Result<ScanOutcome>;

    /// Run `query` and wrap the results in the shared response shape.
    fn search(&self, query: &Query, cancel: &CancelToken) -> Result<SearchResponse> {
        self.execute(query, cancel).map(|outcome| outcome.into_response(query))
    }
}

/// Streams the corpus once per query.
#[derive(Debug, Clone)]
pub struct ScanStrategy<S> {
    corpus: S,
    engine: ScanEngine,
}

impl<S: CorpusSource> ScanStrategy<S> {
    /// Strategy scanning `corpus` with `engine`.
    pub fn new(corpus: S, engine: ScanEngine) -> Self {
        Self { corpus, engine }
    }
}

impl<S: CorpusSource> SearchStrategy for ScanStrategy<S> {
    fn name(&self) -> &'static str {
        "scan"
    }

    fn execute(&self, query: &Query, cancel: &CancelToken) -> Result<ScanOutcome> {
        self.engine.scan_with_cancel(&self.corpus, query, cancel)
    }
}

/// Scans a preloaded corpus in parallel shards.
#[cfg(feature = "parallel")]
#[derive(Debug, Clone)]
pub struct ShardedScanStrategy {
    corpus: MemoryCorpus,
    engine: ScanEngine,
}

#[cfg(feature = "parallel")]
impl ShardedScanStrategy {
    /// Strategy sharding `corpus` across the rayon pool.
    pub fn new(corpus: MemoryCorpus, engine: ScanEngine) -> Self {
        Self { corpus, engine }
    }
}

#[cfg(feature = "parallel")]
impl SearchStrategy for ShardedScanStrategy {
    fn name(&self) -> &'static str {
        "sharded-scan"
    }

    fn execute(&self, query: &Query, cancel: &CancelToken) -> Result<ScanOutcome> {
        self.engine.scan_sharded(self.corpus.as_slice(), query, cancel)
    }
}

/// Pick a strategy for a corpus file by its size.
///
/// Files no larger than `preload_max_bytes` are loaded into memory and
/// scanned in shards (when the `parallel` feature is on); anything larger is
/// streamed. A limit of 0 always streams.
pub fn strategy_for_file(
    path: impl AsRef<Path>,
    engine: ScanEngine,
    preload_max_bytes: u64,
) -> Result<Box<dyn SearchStrategy>> {
    let path = path.as_ref();
    let size = std::fs::metadata(path)
        .map_err(|e| SearchError::corpus_unavailable(path.display().to_string(), e))?
        .len();

    #[cfg(feature = "parallel")]
    {
        if preload_max_bytes > 0 && size <= preload_max_bytes {
            tracing::debug!(path = %path.display(), size, "preloading corpus for sharded scan");
            let corpus = MemoryCorpus::load(path)?;
            return Ok(Box::new(ShardedScanStrategy::new(corpus, engine)));
        }
    }

    #[cfg(not(feature = "parallel"))]
    let _ = preload_max_bytes;

    tracing::debug!(path = %path.display(), size, "streaming corpus");
    Ok(Box::new(ScanStrategy::new(FileCorpus::new(path), engine)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Threshold;
    use std::io::Write;

    fn corpus_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for (word, freq) in [("hello", 5), ("hallo", 3), ("hullo", 1), ("world", 9)] {
            writeln!(file, "{word}\t{freq}").unwrap();
        }
        file
    }

    #[test]
    fn test_streaming_strategy_response() {
        let file = corpus_file();
        let strategy = strategy_for_file(file.path(), ScanEngine::new(), 0).unwrap();
        assert_eq!(strategy.name(), "scan");

        let query = Query::new("hello", 2, Threshold::MaxDistance(1)).unwrap();
        let response = strategy.search(&query, &CancelToken::new()).unwrap();
        assert_eq!(response.query, "hello");
        assert_eq!(response.total_count, 2);
        assert_eq!(response.results[1].word, "hallo");
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_small_file_is_preloaded() {
        let file = corpus_file();
        let strategy = strategy_for_file(file.path(), ScanEngine::new(), 1024 * 1024).unwrap();
        assert_eq!(strategy.name(), "sharded-scan");

        let query = Query::new("hello", 2, Threshold::MaxDistance(1)).unwrap();
        let response = strategy.search(&query, &CancelToken::new()).unwrap();
        let words: Vec<_> = response.results.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["hello", "hallo"]);
    }

    #[test]
    fn test_missing_file() {
        let result = strategy_for_file("/no/such/corpus.tsv", ScanEngine::new(), 0);
        assert!(matches!(result, Err(SearchError::CorpusUnavailable { .. })));
    }
}
