//! Exit statuses and output of the `apimap` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn apimap() -> Command {
    Command::cargo_bin("apimap").unwrap()
}

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../test-fixtures/nextjs-shop")
}

#[test]
fn test_missing_root_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    apimap()
        .arg(dir.path().join("nope"))
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("[INPUT_ERROR]").and(predicate::str::contains("does not exist")));
}

#[test]
fn test_file_root_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.ts");
    fs::write(&file, "").unwrap();
    apimap().arg(&file).assert().code(1).stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_empty_project_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    apimap()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("# API Inventory").and(predicate::str::contains("| **Total** | 0 |")));
}

#[test]
fn test_raw_output_is_a_record_array() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.js"), "axios.get('/api/users');\n").unwrap();

    let output = apimap().arg(dir.path()).args(["--output", "raw"]).output().unwrap();
    assert!(output.status.success());
    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["origin"], "client_call");
    assert_eq!(records[0]["method"], "GET");
    assert_eq!(records[0]["path"], "/api/users");
    assert_eq!(records[0]["library"], "axios");
    assert_eq!(records[0]["source_line"], 1);
}

#[test]
fn test_compact_output_on_fixture() {
    apimap()
        .arg(fixture_root())
        .args(["--output", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": \"get_api_products_id\""));
}

#[test]
fn test_ignore_flag_and_out_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("gen")).unwrap();
    fs::write(dir.path().join("gen/client.js"), "fetch('/api/generated');\n").unwrap();
    fs::write(dir.path().join("main.js"), "fetch('/api/main');\n").unwrap();
    let out = dir.path().join("report.md");

    apimap()
        .arg(dir.path())
        .args(["--ignore", "gen/", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let report = fs::read_to_string(&out).unwrap();
    assert!(report.contains("/api/main"));
    assert!(!report.contains("/api/generated"));
}

#[test]
fn test_invalid_config_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("apimap.toml"), "[scan]\nmax_file_size = 0\n").unwrap();
    apimap()
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[CONFIG_ERROR]"));
}

#[test]
fn test_unknown_output_format_rejected_by_parser() {
    let dir = tempfile::tempdir().unwrap();
    apimap().arg(dir.path()).args(["--output", "yaml"]).assert().failure();
}
