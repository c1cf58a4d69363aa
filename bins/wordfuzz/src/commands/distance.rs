//! Edit distance between two words

use super::Context;
use owo_colors::OwoColorize;
use serde::Serialize;
use wordfuzz_core::error::Result;
use wordfuzz_search::{levenshtein_distance, similarity};

#[derive(Debug, Serialize)]
struct DistanceReport<'a> {
    a: &'a str,
    b: &'a str,
    distance: usize,
    similarity: f64,
}

impl<'a> DistanceReport<'a> {
    fn new(a: &'a str, b: &'a str) -> Self {
        let distance = levenshtein_distance(a, b);
        Self {
            a,
            b,
            distance,
            similarity: similarity(distance, a.chars().count(), b.chars().count()),
        }
    }
}

/// Print the distance and similarity of `a` and `b`
pub fn run(ctx: &Context, a: &str, b: &str) -> Result<()> {
    let report = DistanceReport::new(a, b);

    if ctx.json() {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} → {}: distance {}, similarity {}",
            a.bold(),
            b.bold(),
            report.distance.to_string().yellow(),
            format!("{:.3}", report.similarity).cyan()
        );
    }
    Ok(())
}
