//! Integration tests for the bonex binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn bonex() -> Command {
    Command::cargo_bin("bonex").unwrap()
}

#[test]
fn test_help_lists_commands() {
    bonex()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_extract_rejects_missing_input_file() {
    bonex()
        .args(["extract", "no-such-receipt.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_extract_requires_api_key() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("receipt.txt");
    std::fs::write(&input, "БИЛЛА\nМляко 2.50\nОбщо 2.50").unwrap();

    bonex()
        .env_remove("GEMINI_API_KEY")
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn test_stats_aggregates_saved_receipts() {
    let dir = tempfile::tempdir().unwrap();

    let first = r#"{"store_name":"Billa","total_amount":"3.70","date":"2025-08-09","category":"food","products":[]}"#;
    let second = r#"{"store_name":"Lidl","total_amount":"2.30","date":"2025-08-12","category":"food","products":[]}"#;
    std::fs::write(dir.path().join("a.json"), first).unwrap();
    std::fs::write(dir.path().join("b.json"), second).unwrap();

    let pattern = format!("{}/*.json", dir.path().display());

    bonex()
        .args(["stats", &pattern, "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("category,food,6.00,2"))
        .stdout(predicate::str::contains("period,8,6.00,"));
}

#[test]
fn test_stats_fails_when_nothing_matches() {
    bonex()
        .args(["stats", "/nonexistent/*.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn test_config_path_prints_location() {
    bonex()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"));
}

#[test]
fn test_config_get_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();

    bonex()
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .args(["config", "get", "engine.temperature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("extraction.language"));
}

#[test]
fn test_config_set_then_get_roundtrip() {
    let dir = tempfile::tempdir().unwrap();

    bonex()
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .args(["config", "set", "engine.model", "gemini-1.5-pro"])
        .assert()
        .success();

    bonex()
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .args(["config", "get", "engine.model"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gemini-1.5-pro"));
}
