//! Single-word search command

use super::{record_stats, search_filter, Context};
use crate::output::{format_count, format_duration, print_results, Status};
use crate::MatchArgs;
use wordfuzz_core::error::Result;
use wordfuzz_search::{strategy_for_file, Query};
use wordfuzz_telemetry::{Event, Timer};

/// Search the corpus for the words closest to `query`
pub async fn run(
    ctx: &Context,
    query: &str,
    matching: &MatchArgs,
    exclude_exact: bool,
    parallel: bool,
) -> Result<()> {
    let query = Query::new(query, ctx.limit(matching), ctx.threshold(matching))?;
    let engine = ctx.engine(search_filter(ctx, matching.min_frequency, exclude_exact));
    let path = ctx.config.corpus_path()?;
    let preload_max_bytes = if parallel {
        u64::MAX
    } else {
        ctx.config.schema.corpus.preload_max_bytes
    };

    let timer = Timer::start("search");
    let job_query = query.clone();
    let outcome = ctx
        .run_cancellable(move |cancel| {
            let strategy = strategy_for_file(&path, engine, preload_max_bytes)?;
            tracing::debug!(strategy = strategy.name(), "running search");
            strategy.execute(&job_query, &cancel)
        })
        .await?;
    timer.stop();

    record_stats(&outcome.stats);
    Event::new(
        "search",
        serde_json::json!({
            "query": query.text(),
            "maxDistance": query.max_distance(),
            "examined": outcome.stats.examined,
            "results": outcome.results.len(),
        }),
    )
    .log();
    let elapsed = outcome.elapsed;
    let response = outcome.into_response(&query);

    if ctx.json() {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    Status::header(&format!("Matches for \"{}\"", response.query));
    print_results(&response.results);
    println!();
    Status::info(&format!(
        "{} in {}",
        format_count(response.total_count, "match", "matches"),
        format_duration(elapsed)
    ));
    Ok(())
}
