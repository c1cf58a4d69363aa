//! Edit distance.

/// Calculate Levenshtein edit distance between two strings.
///
/// Counts single-character insertions, deletions and substitutions, where a
/// character is a Unicode scalar value. Only two rows of the DP table are
/// kept, each sized to the shorter operand.
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
///
/// # Returns
/// Number of single-character edits needed to transform a into b
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    levenshtein_chars(&a_chars, &b_chars)
}

/// Levenshtein distance over pre-decoded character slices.
///
/// The scan engine decodes the query once and calls this per corpus entry.
pub fn levenshtein_chars(a: &[char], b: &[char]) -> usize {
    // Columns follow the shorter operand.
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let m = long.len();
    let n = short.len();

    if n == 0 {
        return m;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(long[i - 1] != short[j - 1]);
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
