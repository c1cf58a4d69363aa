//! wordfuzz - approximate word lookup
//!
//! Finds the corpus words closest to a query by edit distance, ranked by
//! distance and then by frequency.

use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::ExitCode;
use wordfuzz_core::config::Config;
use wordfuzz_core::error::{exit_codes, Error, ResultExt};
use wordfuzz_telemetry::TelemetryConfig;

mod commands;
mod output;

use commands::{distance, request, search, sentence, Context};

/// Approximate word lookup over frequency corpora
#[derive(Parser)]
#[command(name = "wordfuzz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Corpus file (word<TAB>frequency per line)
    #[arg(short, long, global = true)]
    corpus: Option<String>,

    /// Configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Print collected metrics to stderr on exit
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Result-size and threshold flags shared by the search commands
#[derive(Args, Debug, Clone)]
pub struct MatchArgs {
    /// Maximum number of results (per term for sentences)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Maximum edit distance
    #[arg(short = 'd', long, conflicts_with = "threshold")]
    pub max_distance: Option<u32>,

    /// Distance threshold, floored to a maximum edit distance
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Keep only words with frequency above this value
    #[arg(long)]
    pub min_frequency: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the closest words to a single query
    Search {
        /// Query word
        query: String,

        #[command(flatten)]
        matching: MatchArgs,

        /// Leave the query word itself out of the results
        #[arg(long)]
        exclude_exact: bool,

        /// Load the corpus into memory and scan it in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Find the closest words for every word of a sentence
    Sentence {
        /// Whitespace-separated words
        text: String,

        #[command(flatten)]
        matching: MatchArgs,

        /// Keep rare words too (ignore the configured frequency floor)
        #[arg(long, conflicts_with = "min_frequency")]
        no_floor: bool,
    },

    /// Print the edit distance and similarity of two words
    Distance {
        /// First word
        a: String,

        /// Second word
        b: String,
    },

    /// Run a JSON search request ({"query": ..., "limit": ..., "similarityThreshold": ...})
    Request {
        /// Request body
        json: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = Config::load(cli.config.as_deref()).context("While loading configuration");
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => return report_error(&e, &cli.format),
    };
    config.apply_overrides(cli.corpus.clone(), None);

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.schema.logging.level.clone()
    };
    let log_directory = match config.log_directory() {
        Ok(dir) => dir,
        Err(e) => return report_error(&e, &cli.format),
    };
    let _telemetry = match wordfuzz_telemetry::init_with_config(
        TelemetryConfig::default()
            .with_level(level)
            .with_log_directory(log_directory),
    ) {
        Ok(guard) => Some(guard),
        Err(e) => {
            output::Status::warning(&format!("Logging disabled: {}", e));
            None
        }
    };

    let ctx = Context::new(config, &cli.format);

    let result = match cli.command {
        Commands::Search {
            query,
            matching,
            exclude_exact,
            parallel,
        } => search::run(&ctx, &query, &matching, exclude_exact, parallel).await,

        Commands::Sentence {
            text,
            matching,
            no_floor,
        } => sentence::run(&ctx, &text, &matching, no_floor).await,

        Commands::Distance { a, b } => distance::run(&ctx, &a, &b),

        Commands::Request { json } => request::run(&ctx, &json).await,
    };

    if cli.metrics {
        let export = wordfuzz_telemetry::metrics().export_json();
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&export).unwrap_or_else(|_| export.to_string())
        );
    }

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => report_error(&e, &cli.format),
    }
}

fn report_error(err: &Error, format: &str) -> ExitCode {
    tracing::debug!(code = %err.code, "command failed");
    if format == "json" {
        match serde_json::to_string_pretty(&err.to_report()) {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("{}", err),
        }
    } else {
        eprintln!("{} {}", "Error:".red().bold(), err);
    }
    ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
}
