//! CLI tests: command functions and the `qtally` binary end to end.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

use query_tally::cli::commands::{cmd_count, cmd_lookup, cmd_popular, cmd_stats, load_engine};
use query_tally::config::TallyConfig;
use query_tally::types::TallyError;

// ==================== Helpers ====================

const DATASET: &str = "\
2015-08-01 00:03:43\thttp://www.example.com/
2015-08-01 00:03:50\trust borrow checker
2015-08-01 00:04:12\trust borrow checker
2015-08-01 09:15:00\tweather
2015-08-01 09:15:30\trust borrow checker
2015-08-01 23:59:59\tweather
2015-08-02 00:00:00\tmidnight
2016-01-01 00:00:00\tnew year
";

fn write_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut tmp = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    tmp.write_all(content.as_bytes()).unwrap();
    tmp.flush().unwrap();
    tmp
}

fn dataset() -> NamedTempFile {
    write_file(DATASET, ".tsv")
}

fn mmap_config() -> TallyConfig {
    let mut config = TallyConfig::default();
    config.load.use_mmap = true;
    config
}

fn output_of(run: impl FnOnce(&mut Vec<u8>) -> Result<(), TallyError>) -> String {
    let mut out = Vec::new();
    run(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

/// Run the `qtally` binary with the given arguments.
fn run_qtally(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qtally"))
        .args(args)
        .output()
        .expect("Failed to run qtally")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "qtally failed with status {:?}\nstdout: {}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );
}

fn stdout_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ==================== Command Tests ====================

#[test]
fn test_count_command() {
    let tmp = dataset();
    let config = TallyConfig::default();

    let text = output_of(|out| cmd_count(out, tmp.path(), "2015-08-01", &config, false));
    assert_eq!(text, "6\n");

    let text = output_of(|out| cmd_count(out, tmp.path(), "2015", &config, false));
    assert_eq!(text, "7\n");

    let json = output_of(|out| cmd_count(out, tmp.path(), "2015-08-01 09", &config, true));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["count"], 2);
}

#[test]
fn test_popular_command_text() {
    let tmp = dataset();
    let config = TallyConfig::default();

    let text =
        output_of(|out| cmd_popular(out, tmp.path(), "2015-08-01", Some(2), &config, false));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, ["       3  rust borrow checker", "       2  weather"]);
}

#[test]
fn test_popular_command_json_default_size() {
    let tmp = dataset();
    let config = TallyConfig::default();

    let json = output_of(|out| cmd_popular(out, tmp.path(), "2015-08", None, &config, true));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let queries = value["queries"].as_array().unwrap();
    assert_eq!(queries.len(), 3);
    assert_eq!(queries[0]["query"], "rust borrow checker");
    assert_eq!(queries[0]["count"], 3);
    assert_eq!(queries[1]["query"], "weather");
    assert_eq!(queries[1]["count"], 2);
    // One-count ties rank by first appearance in time.
    assert_eq!(queries[2]["query"], "http://www.example.com/");
    assert_eq!(queries[2]["count"], 1);
}

#[test]
fn test_popular_command_rejects_zero_size() {
    let tmp = dataset();
    let mut out = Vec::new();
    match cmd_popular(&mut out, tmp.path(), "2015", Some(0), &TallyConfig::default(), false) {
        Err(TallyError::InvalidSize(size)) => assert_eq!(size, 0),
        other => panic!("Expected InvalidSize error, got {:?}", other),
    }
    assert!(out.is_empty());
}

#[test]
fn test_bad_prefix_checked_before_loading() {
    let mut out = Vec::new();
    let missing = Path::new("/nonexistent/queries.tsv");
    match cmd_count(&mut out, missing, "2015-3", &TallyConfig::default(), false) {
        Err(TallyError::InvalidFormat(prefix)) => assert_eq!(prefix, "2015-3"),
        other => panic!("Expected InvalidFormat error, got {:?}", other),
    }
    match cmd_popular(&mut out, missing, "2015-02-30", None, &TallyConfig::default(), false) {
        Err(TallyError::InvalidDate(_)) => {}
        other => panic!("Expected InvalidDate error, got {:?}", other),
    }
}

#[test]
fn test_lookup_command() {
    let tmp = dataset();
    let config = TallyConfig::default();

    let text = output_of(|out| cmd_lookup(out, tmp.path(), "2015-08-01 00:03", &config, false));
    assert_eq!(text, "http://www.example.com/\nrust borrow checker\n");

    let json = output_of(|out| cmd_lookup(out, tmp.path(), "2015-08-01 00:05:00", &config, true));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["timestamp"], "2015-08-01 00:05");
    assert!(value["values"].as_array().unwrap().is_empty());
}

#[test]
fn test_stats_command() {
    let tmp = dataset();
    let config = TallyConfig::default();

    let text = output_of(|out| cmd_stats(out, tmp.path(), &config, false));
    assert!(text.contains("Records: 8"));
    assert!(text.contains("Skipped lines: 0"));
    assert!(text.contains("Years: 2"));
    assert!(text.contains("First minute: 2015-08-01 00:03"));
    assert!(text.contains("Last minute: 2016-01-01 00:00"));

    let json = output_of(|out| cmd_stats(out, tmp.path(), &config, true));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["records"], 8);
    assert_eq!(value["years"], 2);
}

#[test]
fn test_mmap_load_matches_buffered() {
    let tmp = dataset();
    let (buffered, _) = load_engine(tmp.path(), &TallyConfig::default()).unwrap();
    let (mapped, _) = load_engine(tmp.path(), &mmap_config()).unwrap();

    assert_eq!(buffered.record_count(), mapped.record_count());
    let day = query_tally::parse_date_prefix("2015-08-01").unwrap();
    assert_eq!(buffered.popular(&day, 5), mapped.popular(&day, 5));
}

#[test]
fn test_malformed_dataset() {
    let tmp = write_file(
        "2015-08-01 00:03:43\tok\nno tab here\n2015-08-01 00:04:00\talso ok\n",
        ".tsv",
    );

    match load_engine(tmp.path(), &TallyConfig::default()) {
        Err(TallyError::MalformedRecord { line, .. }) => assert_eq!(line, 2),
        Err(e) => panic!("Expected MalformedRecord error, got {:?}", e),
        Ok(_) => panic!("Expected MalformedRecord error, got an engine"),
    }

    let mut config = TallyConfig::default();
    config.load.skip_malformed = true;
    let (engine, report) = load_engine(tmp.path(), &config).unwrap();
    assert_eq!(engine.record_count(), 2);
    assert_eq!(report.skipped, 1);
}

// ==================== Binary Tests ====================

#[test]
fn test_cli_count() {
    let tmp = dataset();
    let output = run_qtally(&["count", path_str(tmp.path()), "2015-08-01"]);
    assert_success(&output);
    assert_eq!(stdout_str(&output).trim(), "6");
}

#[test]
fn test_cli_popular_json() {
    let tmp = dataset();
    let output = run_qtally(&[
        "--format",
        "json",
        "--mmap",
        "popular",
        path_str(tmp.path()),
        "2015-08-01",
        "--size",
        "1",
    ]);
    assert_success(&output);
    let value: serde_json::Value = serde_json::from_str(&stdout_str(&output)).unwrap();
    let queries = value["queries"].as_array().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0]["query"], "rust borrow checker");
}

#[test]
fn test_cli_config_default_size() {
    let tmp = dataset();
    let config = write_file(r#"{"query": {"default_popular_size": 1}}"#, ".json");
    let output = run_qtally(&[
        "--config",
        path_str(config.path()),
        "popular",
        path_str(tmp.path()),
        "2015",
    ]);
    assert_success(&output);
    assert_eq!(stdout_str(&output).lines().count(), 1);
}

#[test]
fn test_cli_exit_codes() {
    let tmp = dataset();

    let output = run_qtally(&["count", path_str(tmp.path()), "2015-13"]);
    assert_eq!(output.status.code(), Some(3));

    let output = run_qtally(&["popular", path_str(tmp.path()), "2015", "--size", "0"]);
    assert_eq!(output.status.code(), Some(3));

    let output = run_qtally(&["count", "/nonexistent/queries.tsv", "2015"]);
    assert_eq!(output.status.code(), Some(1));

    let broken = write_file("not a record\n", ".tsv");
    let output = run_qtally(&["stats", path_str(broken.path())]);
    assert_eq!(output.status.code(), Some(2));
}
