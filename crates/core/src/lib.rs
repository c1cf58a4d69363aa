//! Core utilities for the wordfuzz tools
//!
//! This crate provides shared functionality used by the command-line front end:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults and environment overrides
//!
//! # Example
//!
//! ```rust,no_run
//! use wordfuzz_core::config::Config;
//!
//! let config = Config::load(None).expect("Invalid configuration");
//! let corpus = config.corpus_path().expect("Bad corpus path");
//! println!("Searching {}", corpus.display());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, ErrorReport, Result, ResultExt};
}
