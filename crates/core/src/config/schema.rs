//! Configuration schema definitions
//!
//! Every section and field has a serde default, so a partial file (or no
//! file at all) yields a complete configuration.

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub sentence: SentenceConfig,

    #[serde(default)]
    pub corpus: CorpusConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Single-word search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Results returned when the caller gives no limit
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Maximum edit distance when the caller gives no threshold
    #[serde(default = "default_max_distance")]
    pub max_distance: u32,

    /// Length prefilter tolerance (widened to the max distance at scan time)
    #[serde(default = "default_length_window")]
    pub length_window: usize,

    /// Drop the query word itself from its results
    #[serde(default)]
    pub exclude_exact: bool,

    /// Keep only words with frequency strictly above this floor
    #[serde(default)]
    pub frequency_floor: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_distance: default_max_distance(),
            length_window: default_length_window(),
            exclude_exact: false,
            frequency_floor: None,
        }
    }
}

fn default_limit() -> usize {
    10
}

fn default_max_distance() -> u32 {
    2
}

fn default_length_window() -> usize {
    2
}

/// Multi-word (sentence) search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceConfig {
    /// Per-term frequency floor; rare words are dropped from suggestions (0 disables)
    #[serde(default = "default_sentence_floor")]
    pub frequency_floor: Option<u64>,
}

impl Default for SentenceConfig {
    fn default() -> Self {
        Self {
            frequency_floor: default_sentence_floor(),
        }
    }
}

fn default_sentence_floor() -> Option<u64> {
    Some(10_000_000)
}

/// Corpus location and loading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Path of the `word<TAB>frequency` corpus file (`~` and `$VAR` expanded)
    #[serde(default = "default_corpus_path")]
    pub path: String,

    /// Files up to this size are preloaded and scanned in parallel (0 = always stream)
    #[serde(default)]
    pub preload_max_bytes: u64,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
            preload_max_bytes: 0,
        }
    }
}

fn default_corpus_path() -> String {
    "count_1w.txt".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily-rolling JSON log files
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
