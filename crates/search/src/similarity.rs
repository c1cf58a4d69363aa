//! Normalized similarity derived from edit distance.

/// Similarity score in `[0, 1]` for a match at `distance`.
///
/// `1 - distance / max(len_query, len_word)`. Two empty operands are
/// identical, so the score is 1.
///
/// # Arguments
/// * `distance` - Edit distance between query and word
/// * `len_query` - Query length in characters
/// * `len_word` - Word length in characters
pub fn similarity(distance: usize, len_query: usize, len_word: usize) -> f64 {
    let longest = len_query.max(len_word);
    if longest == 0 {
        return 1.0;
    }

    // Levenshtein never exceeds the longer operand; clamp keeps misuse in range.
    (1.0 - distance as f64 / longest as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_one() {
        assert_eq!(similarity(0, 5, 5), 1.0);
    }

    #[test]
    fn test_single_substitution() {
        assert!((similarity(1, 5, 5) - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_uses_longer_operand() {
        assert!((similarity(2, 3, 5) - 0.6).abs() < f64::EPSILON);
        assert!((similarity(2, 5, 3) - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_both_empty() {
        assert_eq!(similarity(0, 0, 0), 1.0);
    }

    #[test]
    fn test_completely_different() {
        assert_eq!(similarity(4, 4, 4), 0.0);
    }
}
