//! WASM bindings for word lookup.

use wasm_bindgen::prelude::*;

/// Calculate Levenshtein edit distance between two strings.
#[wasm_bindgen]
pub fn edit_distance(a: &str, b: &str) -> usize {
    crate::levenshtein_distance(a, b)
}

/// Similarity in `[0, 1]` for a match at `distance`.
#[wasm_bindgen]
pub fn similarity_score(distance: usize, len_query: usize, len_word: usize) -> f64 {
    crate::similarity(distance, len_query, len_word)
}

/// Search a TSV corpus held in a string.
///
/// # Arguments
/// * `query` - Search query
/// * `corpus_tsv` - Corpus text, one `word<TAB>frequency` per line
/// * `limit` - Maximum results to return
/// * `max_distance` - Maximum edit distance
///
/// # Returns
/// JSON `SearchResponse`, or `[]` if the query is invalid
#[wasm_bindgen]
pub fn search_corpus(query: &str, corpus_tsv: &str, limit: usize, max_distance: u32) -> String {
    let query = match crate::Query::new(query, limit, crate::Threshold::MaxDistance(max_distance)) {
        Ok(query) => query,
        Err(_) => return "[]".to_string(),
    };

    let entries = corpus_tsv.lines().filter_map(crate::parse_line).map(Ok);
    let outcome = crate::ScanEngine::new().scan_stream(
        entries,
        "wasm",
        &query,
        &crate::CancelToken::new(),
    );

    match outcome {
        Ok(outcome) => serde_json::to_string(&outcome.into_response(&query))
            .unwrap_or_else(|_| "[]".to_string()),
        Err(_) => "[]".to_string(),
    }
}
