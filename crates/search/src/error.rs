//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Query rejected before any scan work
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Corpus could not be opened or failed mid-stream
    #[error("Corpus unavailable ({corpus}): {source}")]
    CorpusUnavailable {
        /// Description of the corpus source
        corpus: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Caller cancelled the scan before it finished
    #[error("Search cancelled")]
    Cancelled,
}

impl SearchError {
    /// Shorthand for [`SearchError::InvalidQuery`].
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery(message.into())
    }

    /// Shorthand for [`SearchError::CorpusUnavailable`].
    pub fn corpus_unavailable(corpus: impl Into<String>, source: std::io::Error) -> Self {
        Self::CorpusUnavailable {
            corpus: corpus.into(),
            source,
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> SearchErrorCode {
        match self {
            SearchError::InvalidQuery(_) => SearchErrorCode::InvalidQuery,
            SearchError::CorpusUnavailable { .. } => SearchErrorCode::CorpusUnavailable,
            SearchError::Cancelled => SearchErrorCode::Cancelled,
        }
    }
}

/// Error code for integration with wordfuzz-core error handling.
/// Range: 11xxx for search errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Query rejected
    InvalidQuery = 11001,
    /// Corpus retrieval failure
    CorpusUnavailable = 11002,
    /// Scan cancelled
    Cancelled = 11003,
}
