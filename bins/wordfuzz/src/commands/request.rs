//! JSON search request command

use super::{record_stats, search_filter, Context};
use crate::output::print_results;
use wordfuzz_core::error::{Result, ResultExt};
use wordfuzz_search::{strategy_for_file, SearchRequest};

/// Run a `SearchRequest` body against the configured corpus
pub async fn run(ctx: &Context, body: &str) -> Result<()> {
    let request: SearchRequest = serde_json::from_str::<SearchRequest>(body)
        .map_err(wordfuzz_core::Error::from)
        .with_suggestion(r#"Expected {"query": "...", "limit": 10, "similarityThreshold": 0.3}"#)?;
    let query = request.into_query()?;

    let engine = ctx.engine(search_filter(ctx, None, false));
    let path = ctx.config.corpus_path()?;
    let preload_max_bytes = ctx.config.schema.corpus.preload_max_bytes;

    let job_query = query.clone();
    let outcome = ctx
        .run_cancellable(move |cancel| {
            strategy_for_file(&path, engine, preload_max_bytes)?.execute(&job_query, &cancel)
        })
        .await?;
    record_stats(&outcome.stats);
    let response = outcome.into_response(&query);

    if ctx.json() {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_results(&response.results);
    }
    Ok(())
}
