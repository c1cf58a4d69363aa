//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding the corpus path
pub const CORPUS_ENV: &str = "WORDFUZZ_CORPUS";

/// Environment variable overriding the log level
pub const LOG_ENV: &str = "WORDFUZZ_LOG";

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist; otherwise the standard locations are
    /// searched and defaults apply when none exists. Environment overrides
    /// are applied last.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !Path::new(p).exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_string()),
            None => find_config_file(),
        };

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        let mut config = Self {
            schema,
            path: config_path,
        };
        config.apply_overrides(
            std::env::var(CORPUS_ENV).ok(),
            std::env::var(LOG_ENV).ok(),
        );
        config.validate()?;

        tracing::debug!(path = ?config.path, "configuration loaded");
        Ok(config)
    }

    /// Load with defaults only (no file)
    pub fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = Self {
            schema: toml::from_str(content)?,
            path: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply corpus and log-level overrides
    pub fn apply_overrides(&mut self, corpus: Option<String>, log_level: Option<String>) {
        if let Some(corpus) = corpus.filter(|c| !c.trim().is_empty()) {
            self.schema.corpus.path = corpus;
        }
        if let Some(level) = log_level.filter(|l| !l.trim().is_empty()) {
            self.schema.logging.level = level;
        }
    }

    /// Reject values no search could run with
    pub fn validate(&self) -> Result<()> {
        if self.schema.search.default_limit == 0 {
            return Err(Error::new(
                ErrorCode::ConfigValidationError,
                "search.default_limit must be positive",
            ));
        }
        if self.schema.corpus.path.trim().is_empty() {
            return Err(Error::new(
                ErrorCode::ConfigValidationError,
                "corpus.path must not be empty",
            ));
        }
        Ok(())
    }

    /// Corpus path with `~` and environment variables expanded
    pub fn corpus_path(&self) -> Result<PathBuf> {
        expand_path(&self.schema.corpus.path)
    }

    /// Log directory with `~` and environment variables expanded
    pub fn log_directory(&self) -> Result<Option<PathBuf>> {
        self.schema
            .logging
            .directory
            .as_deref()
            .map(expand_path)
            .transpose()
    }
}

fn expand_path(raw: &str) -> Result<PathBuf> {
    shellexpand::full(raw)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|e| Error::config(format!("Failed to expand path {}: {}", raw, e)))
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let mut candidates = vec![
        PathBuf::from(".wordfuzz.toml"),
        PathBuf::from("wordfuzz.toml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("wordfuzz").join("config.toml"));
    }

    candidates
        .into_iter()
        .find(|candidate| candidate.exists())
        .map(|candidate| candidate.to_string_lossy().into_owned())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file {}: {}", path, e)))?;

    toml::from_str(&content).map_err(|e| {
        Error::new(
            ErrorCode::ConfigParseError,
            format!("Failed to parse config file {}: {}", path, e),
        )
    })
}
