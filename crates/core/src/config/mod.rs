//! Configuration loading and schema definitions
//!
//! TOML configuration for searches, corpus location and logging.

mod loader;
mod schema;

pub use loader::{Config, CORPUS_ENV, LOG_ENV};
pub use schema::*;
