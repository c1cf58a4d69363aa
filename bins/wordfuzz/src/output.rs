//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;
use std::time::Duration;
use wordfuzz_search::SearchResult;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print a subheader
    pub fn subheader(message: &str) {
        println!();
        println!("{}", message.bold().dimmed());
    }
}

/// Print ranked results, one per line
pub fn print_results(results: &[SearchResult]) {
    if results.is_empty() {
        println!("  {}", "no matches".dimmed());
        return;
    }
    for (rank, result) in results.iter().enumerate() {
        println!("{}", format_result(rank + 1, result));
    }
}

fn format_result(rank: usize, result: &SearchResult) -> String {
    format!(
        "{:>3}. {:<20} {} {} {}",
        rank,
        result.word,
        format!("d={}", result.distance).yellow(),
        format!("sim={:.2}", result.similarity).cyan(),
        format!("freq={}", result.frequency).dimmed()
    )
}

/// Format a duration for display
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        let d = Duration::from_millis(500);
        assert_eq!(format_duration(d), "500ms");
    }

    #[test]
    fn test_format_duration_secs() {
        let d = Duration::from_secs_f32(5.5);
        assert_eq!(format_duration(d), "5.5s");
    }

    #[test]
    fn test_format_duration_mins() {
        let d = Duration::from_secs(125);
        assert_eq!(format_duration(d), "2m 5s");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "match", "matches"), "1 match");
        assert_eq!(format_count(0, "match", "matches"), "0 matches");
    }

    #[test]
    fn test_format_result_line() {
        let result = SearchResult {
            word: "hallo".into(),
            distance: 1,
            frequency: 3,
            similarity: 0.8,
        };
        let line = format_result(2, &result);
        assert!(line.starts_with("  2. hallo"));
        assert!(line.contains("d=1"));
        assert!(line.contains("sim=0.80"));
        assert!(line.contains("freq=3"));
    }
}
