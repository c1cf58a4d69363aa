//! Query construction and validation.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};

/// How far a word may be from the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Threshold {
    /// Maximum edit distance, inclusive
    MaxDistance(u32),
    /// Fractional threshold, floored to a maximum distance
    Fraction(f64),
}

impl Threshold {
    /// Resolve to an inclusive maximum edit distance.
    pub fn max_distance(self) -> Result<usize> {
        match self {
            Threshold::MaxDistance(d) => Ok(d as usize),
            Threshold::Fraction(f) if f.is_finite() && f >= 0.0 => Ok(f.floor() as usize),
            Threshold::Fraction(f) => Err(SearchError::invalid_query(format!(
                "threshold must be a non-negative number, got {f}"
            ))),
        }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold::MaxDistance(2)
    }
}

/// A validated single search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
    limit: usize,
    max_distance: usize,
}

impl Query {
    /// Build a query, trimming `text`.
    ///
    /// Fails with [`SearchError::InvalidQuery`] for blank text or a zero limit.
    pub fn new(text: impl AsRef<str>, limit: usize, threshold: Threshold) -> Result<Self> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(SearchError::invalid_query("query cannot be empty"));
        }
        if limit == 0 {
            return Err(SearchError::invalid_query("limit must be positive"));
        }

        Ok(Self {
            text: text.to_string(),
            limit,
            max_distance: threshold.max_distance()?,
        })
    }

    /// Query text, trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Maximum number of results (K).
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Inclusive maximum edit distance.
    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    /// Whitespace-separated terms, empty terms dropped.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }

    /// Single-term query sharing this query's limit and distance.
    pub(crate) fn for_term(&self, term: &str) -> Self {
        Self {
            text: term.to_string(),
            limit: self.limit,
            max_distance: self.max_distance,
        }
    }
}

/// Wire shape of a search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Query text
    pub query: String,
    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Threshold, floored to a maximum edit distance
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
}

fn default_limit() -> i64 {
    10
}

fn default_similarity_threshold() -> f64 {
    0.3
}

impl SearchRequest {
    /// Validate into a [`Query`].
    pub fn into_query(self) -> Result<Query> {
        let limit = usize::try_from(self.limit)
            .map_err(|_| SearchError::invalid_query("limit must be positive"))?;
        Query::new(&self.query, limit, Threshold::Fraction(self.similarity_threshold))
    }
}

/// Per-entry domain filter applied after the distance test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFilter {
    /// Keep only entries whose frequency is strictly above this floor
    #[serde(default)]
    pub frequency_floor: Option<u64>,
    /// Drop entries identical to the query term
    #[serde(default)]
    pub exclude_exact: bool,
}

impl EntryFilter {
    /// Filter that keeps every entry.
    pub fn none() -> Self {
        Self::default()
    }

    /// Require frequency above `floor`.
    pub fn with_frequency_floor(mut self, floor: u64) -> Self {
        self.frequency_floor = Some(floor);
        self
    }

    /// Drop exact matches of the query term.
    pub fn excluding_exact(mut self, exclude: bool) -> Self {
        self.exclude_exact = exclude;
        self
    }

    /// True if the entry survives the filter.
    #[inline]
    pub fn accepts(&self, term: &str, word: &str, frequency: u64) -> bool {
        if self.frequency_floor.is_some_and(|floor| frequency <= floor) {
            return false;
        }
        !(self.exclude_exact && word == term)
    }
}
