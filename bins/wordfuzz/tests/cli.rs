//! End-to-end tests for the wordfuzz binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut corpus = std::fs::File::create(dir.path().join("words.tsv")).unwrap();
        for (word, freq) in [
            ("hello", 500),
            ("hallo", 300),
            ("hullo", 100),
            ("help", 800),
            ("world", 900),
            ("word", 50),
            ("hela", 0),
        ] {
            writeln!(corpus, "{word}\t{freq}").unwrap();
        }
        Self { dir }
    }

    /// Command isolated from the user's config and environment
    fn bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("wordfuzz").unwrap();
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path())
            .env_remove("WORDFUZZ_CORPUS")
            .env_remove("WORDFUZZ_LOG")
            .env_remove("RUST_LOG");
        cmd
    }

    fn cmd(&self) -> Command {
        let mut cmd = self.bare();
        cmd.arg("--corpus").arg(self.dir.path().join("words.tsv"));
        cmd
    }
}

fn stdout_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}

#[test]
fn test_search_json() {
    let fixture = Fixture::new();
    let output = fixture
        .cmd()
        .args(["--format", "json", "search", "hello", "--limit", "3", "-d", "1"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let response = stdout_json(&output);
    assert_eq!(response["query"], "hello");
    assert_eq!(response["totalCount"], 3);
    let words: Vec<_> = response["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["word"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(words, ["hello", "hallo", "hullo"]);
    assert_eq!(response["results"][0]["similarity"], 1.0);
}

#[test]
fn test_search_text() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .args(["search", "helo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("help"))
        .stdout(predicate::str::contains("hello"));
}

#[test]
fn test_search_parallel_matches_streaming() {
    let fixture = Fixture::new();
    let streamed = fixture
        .cmd()
        .args(["-f", "json", "search", "word"])
        .output()
        .unwrap();
    let sharded = fixture
        .cmd()
        .args(["-f", "json", "search", "word", "--parallel"])
        .output()
        .unwrap();

    assert!(streamed.status.success());
    assert_eq!(stdout_json(&streamed.stdout), stdout_json(&sharded.stdout));
}

#[test]
fn test_exclude_exact_and_min_frequency() {
    let fixture = Fixture::new();
    let output = fixture
        .cmd()
        .args([
            "-f",
            "json",
            "search",
            "hello",
            "-d",
            "1",
            "--exclude-exact",
            "--min-frequency",
            "150",
        ])
        .output()
        .unwrap();

    let response = stdout_json(&output.stdout);
    assert_eq!(response["totalCount"], 1);
    assert_eq!(response["results"][0]["word"], "hallo");
}

#[test]
fn test_no_matches_is_success() {
    let fixture = Fixture::new();
    let output = fixture
        .cmd()
        .args(["-f", "json", "search", "zzzzzzzzzz", "-d", "1"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_json(&output.stdout)["totalCount"], 0);
}

#[test]
fn test_sentence_json() {
    let fixture = Fixture::new();
    let output = fixture
        .cmd()
        .args([
            "-f",
            "json",
            "sentence",
            "helo wrld",
            "--limit",
            "1",
            "--min-frequency",
            "0",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let response = stdout_json(&output.stdout);
    assert_eq!(response["totalCount"], 2);
    assert_eq!(response["terms"][0]["term"], "helo");
    assert_eq!(response["terms"][0]["results"][0]["word"], "help");
    assert_eq!(response["terms"][1]["term"], "wrld");
    assert_eq!(response["terms"][1]["results"][0]["word"], "world");
}

#[test]
fn test_sentence_default_floor_drops_rare_words() {
    let fixture = Fixture::new();
    let output = fixture
        .cmd()
        .args(["-f", "json", "sentence", "helo"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let response = stdout_json(&output.stdout);
    assert_eq!(response["terms"][0]["results"].as_array().unwrap().len(), 0);
}

#[test]
fn test_sentence_no_floor_keeps_zero_frequency_words() {
    let fixture = Fixture::new();
    let output = fixture
        .cmd()
        .args(["-f", "json", "sentence", "helo", "--no-floor", "-d", "1"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let response = stdout_json(&output.stdout);
    let words: Vec<_> = response["terms"][0]["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["word"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(words, ["help", "hello", "hela"]);
}

#[test]
fn test_distance() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .args(["-f", "json", "distance", "kitten", "sitting"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"distance\": 3"));
}

#[test]
fn test_request() {
    let fixture = Fixture::new();
    let output = fixture
        .cmd()
        .args(["-f", "json", "request", r#"{"query": "wordd", "limit": 5, "similarityThreshold": 1.5}"#])
        .output()
        .unwrap();

    assert!(output.status.success());
    let response = stdout_json(&output.stdout);
    assert_eq!(response["query"], "wordd");
    // Both at distance 1; the more frequent word ranks first
    assert_eq!(response["results"][0]["word"], "world");
    assert_eq!(response["results"][1]["word"], "word");
}

#[test]
fn test_malformed_request_is_invalid_query() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .args(["request", "{not json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("E4001"));
}

#[test]
fn test_empty_query_exit_code() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .args(["-f", "json", "search", "   "])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("INVALID_QUERY"));
}

#[test]
fn test_missing_corpus_exit_code() {
    let fixture = Fixture::new();
    fixture
        .bare()
        .args(["--corpus", "/no/such/words.tsv", "search", "hello"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("E5001"));
}

#[test]
fn test_missing_config_exit_code() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .args(["--config", "/no/such/wordfuzz.toml", "search", "hello"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("While loading configuration"));
}

#[test]
fn test_config_file_defaults() {
    let fixture = Fixture::new();
    let config = fixture.dir.path().join(".wordfuzz.toml");
    std::fs::write(&config, "[search]\ndefault_limit = 1\nmax_distance = 1\n").unwrap();

    let output = fixture
        .cmd()
        .args(["-f", "json", "search", "hello"])
        .output()
        .unwrap();

    let response = stdout_json(&output.stdout);
    assert_eq!(response["totalCount"], 1);
    assert_eq!(response["results"][0]["word"], "hello");
}
