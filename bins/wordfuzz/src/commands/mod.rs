//! Command implementations

pub mod distance;
pub mod request;
pub mod search;
pub mod sentence;

use crate::MatchArgs;
use wordfuzz_core::config::Config;
use wordfuzz_core::error::{Error, ErrorCode, Result};
use wordfuzz_search::{CancelToken, EntryFilter, ScanEngine, ScanStats, Threshold};

/// State shared by every command
pub struct Context {
    pub config: Config,
    pub format: String,
    pub cancel: CancelToken,
}

impl Context {
    pub fn new(config: Config, format: &str) -> Self {
        Self {
            config,
            format: format.to_string(),
            cancel: CancelToken::new(),
        }
    }

    pub fn json(&self) -> bool {
        self.format == "json"
    }

    /// Result limit from the flags, falling back to the configured default
    pub fn limit(&self, args: &MatchArgs) -> usize {
        args.limit.unwrap_or(self.config.schema.search.default_limit)
    }

    /// Threshold from the flags, falling back to the configured distance
    pub fn threshold(&self, args: &MatchArgs) -> Threshold {
        match (args.threshold, args.max_distance) {
            (Some(fraction), _) => Threshold::Fraction(fraction),
            (None, Some(distance)) => Threshold::MaxDistance(distance),
            (None, None) => Threshold::MaxDistance(self.config.schema.search.max_distance),
        }
    }

    /// Engine with the configured length window and `filter`
    pub fn engine(&self, filter: EntryFilter) -> ScanEngine {
        ScanEngine::new()
            .with_length_window(self.config.schema.search.length_window)
            .with_filter(filter)
    }

    /// Run a blocking scan off the async runtime; Ctrl-C cancels it.
    pub async fn run_cancellable<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce(CancelToken) -> wordfuzz_search::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let token = self.cancel.clone();
        let mut handle = tokio::task::spawn_blocking(move || job(token));

        let joined = tokio::select! {
            joined = &mut handle => joined,
            Ok(()) = tokio::signal::ctrl_c() => {
                tracing::warn!("interrupt received, cancelling scan");
                self.cancel.cancel();
                handle.await
            }
        };

        let outcome = joined
            .map_err(|e| Error::new(ErrorCode::Internal, format!("Search task failed: {}", e)))?;
        Ok(outcome?)
    }
}

/// Search filter from the configured defaults and flags
pub fn search_filter(ctx: &Context, min_frequency: Option<u64>, exclude_exact: bool) -> EntryFilter {
    let search = &ctx.config.schema.search;
    let mut filter = EntryFilter::none().excluding_exact(exclude_exact || search.exclude_exact);
    if let Some(floor) = min_frequency.or(search.frequency_floor) {
        filter = filter.with_frequency_floor(floor);
    }
    filter
}

/// Sentence frequency floor; `no_floor` or a configured 0 means none
pub fn sentence_floor(ctx: &Context, min_frequency: Option<u64>, no_floor: bool) -> Option<u64> {
    if no_floor {
        return None;
    }
    min_frequency.or(ctx.config.schema.sentence.frequency_floor.filter(|&floor| floor > 0))
}

/// Feed scan counters into the metrics registry
pub fn record_stats(stats: &ScanStats) {
    let metrics = wordfuzz_telemetry::metrics();
    metrics.increment("scans");
    metrics.increment_by("entries_examined", stats.examined);
    metrics.increment_by("entries_length_rejected", stats.length_rejected);
    metrics.increment_by("entries_passed_threshold", stats.passed_threshold);
    metrics.increment_by("entries_filtered", stats.filtered);
}
