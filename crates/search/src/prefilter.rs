//! Length-window prefilter.
//!
//! `|len(a) - len(b)| <= distance(a, b)` for Levenshtein distance, so a word
//! whose length is further than `max_distance` from the query length can be
//! rejected without running the DP.

/// Default tolerance, matching the distance threshold the corpus is tuned for.
pub const DEFAULT_LENGTH_WINDOW: usize = 2;

/// Accepts lengths within `window` characters of the query length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthWindow {
    query_len: usize,
    window: usize,
}

impl LengthWindow {
    /// Window around `query_len`.
    ///
    /// The effective window is never narrower than `max_distance`; a
    /// narrower one could reject entries that qualify.
    pub fn new(query_len: usize, window: usize, max_distance: usize) -> Self {
        Self {
            query_len,
            window: window.max(max_distance),
        }
    }

    /// Effective tolerance in characters.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Smallest accepted length.
    pub fn min_len(&self) -> usize {
        self.query_len.saturating_sub(self.window)
    }

    /// Largest accepted length.
    pub fn max_len(&self) -> usize {
        self.query_len.saturating_add(self.window)
    }

    /// True if a word of `len` characters may still be within range.
    #[inline]
    pub fn accepts(&self, len: usize) -> bool {
        len.abs_diff(self.query_len) <= self.window
    }
}
