//! Multi-word (sentence) search command

use super::{sentence_floor, Context};
use crate::output::{format_count, print_results, Status};
use crate::MatchArgs;
use wordfuzz_core::error::Result;
use wordfuzz_search::{EntryFilter, FileCorpus, MultiTermRunner, Query};
use wordfuzz_telemetry::{metrics, Timer};

/// Suggest corrections for every word of `text`
pub async fn run(ctx: &Context, text: &str, matching: &MatchArgs, no_floor: bool) -> Result<()> {
    let query = Query::new(text, ctx.limit(matching), ctx.threshold(matching))?;

    let mut filter = EntryFilter::none();
    if let Some(floor) = sentence_floor(ctx, matching.min_frequency, no_floor) {
        filter = filter.with_frequency_floor(floor);
    }
    let runner = MultiTermRunner::new()
        .with_length_window(ctx.config.schema.search.length_window)
        .with_filter(filter);
    let corpus = FileCorpus::new(ctx.config.corpus_path()?);

    let timer = Timer::start("sentence");
    let job_query = query.clone();
    let response = ctx
        .run_cancellable(move |cancel| runner.run_with_cancel(&corpus, &job_query, &cancel))
        .await?;
    timer.stop();
    metrics().increment("sentences");

    if ctx.json() {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    Status::header(&format!("Suggestions for \"{}\"", response.query));
    for term in &response.terms {
        Status::subheader(&term.term);
        print_results(&term.results);
    }
    println!();
    Status::info(&format_count(response.total_count, "term", "terms"));
    Ok(())
}
