//! Bounded top-K selection.
//!
//! Candidates are ranked by ascending distance, descending frequency,
//! ascending word, then ascending insertion sequence. The selector keeps a
//! max-heap under that order, so the root is always the worst retained
//! candidate and eviction is `O(log K)`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A match under consideration.
///
/// `sequence` only breaks ties between otherwise identical candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Matched word
    pub word: String,
    /// Edit distance from the query
    pub distance: usize,
    /// Corpus frequency
    pub frequency: u64,
    /// Insertion order, assigned by the selector
    pub sequence: u64,
}

impl Ord for Candidate {
    /// Best first: `Less` means `self` ranks ahead of `other`.
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| other.frequency.cmp(&self.frequency))
            .then_with(|| self.word.cmp(&other.word))
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Keeps the `K` best candidates offered so far.
#[derive(Debug)]
pub struct TopK {
    limit: usize,
    next_sequence: u64,
    heap: BinaryHeap<Candidate>,
}

impl TopK {
    /// Selector retaining at most `limit` candidates.
    ///
    /// # Panics
    /// If `limit` is zero. [`Query`](crate::Query) rejects that before a
    /// selector is ever built.
    pub fn new(limit: usize) -> Self {
        assert!(limit > 0, "top-k limit must be positive");
        Self {
            limit,
            next_sequence: 0,
            heap: BinaryHeap::with_capacity(limit + 1),
        }
    }

    /// Capacity K.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of retained candidates.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True if nothing has been retained.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Offer a match, assigning it the next sequence number.
    ///
    /// Returns true if the candidate was retained.
    pub fn offer(&mut self, word: &str, distance: usize, frequency: u64) -> bool {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        // A full selector rejects anything not strictly better than its worst.
        // Checked before allocating the word.
        if self.heap.len() == self.limit {
            if let Some(worst) = self.heap.peek() {
                let beats_worst = distance
                    .cmp(&worst.distance)
                    .then_with(|| worst.frequency.cmp(&frequency))
                    .then_with(|| word.cmp(worst.word.as_str()))
                    .then_with(|| sequence.cmp(&worst.sequence))
                    .is_lt();
                if !beats_worst {
                    return false;
                }
            }
        }

        self.insert(Candidate {
            word: word.to_string(),
            distance,
            frequency,
            sequence,
        })
    }

    /// Offer a candidate that already carries its sequence number.
    ///
    /// Used when merging shard selectors whose sequences are global indices.
    pub fn offer_candidate(&mut self, candidate: Candidate) -> bool {
        self.next_sequence = self.next_sequence.max(candidate.sequence + 1);
        self.insert(candidate)
    }

    /// Fold another selector's retained candidates into this one.
    pub fn merge(&mut self, other: TopK) {
        for candidate in other.heap {
            self.offer_candidate(candidate);
        }
    }

    /// Retained candidates, best first.
    pub fn drain(self) -> Vec<Candidate> {
        self.heap.into_sorted_vec()
    }

    fn insert(&mut self, candidate: Candidate) -> bool {
        let sequence = candidate.sequence;
        self.heap.push(candidate);
        if self.heap.len() > self.limit {
            let evicted = self.heap.pop();
            return evicted.is_some_and(|c| c.sequence != sequence);
        }
        true
    }
}
