//! Input validation tests
//!
//! Malformed result files and out-of-range options must fail with a
//! categorized error and a non-zero exit code, before any figure is
//! written.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn create_test_cmd() -> Command {
    Command::cargo_bin("dbp").unwrap()
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_malformed_row_value() {
    let temp = TempDir::new().unwrap();
    let input = write_file(temp.path(), "r.csv", "1000,abc,3000\n");

    create_test_cmd()
        .args(["summary", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a number"))
        .stderr(predicate::str::contains("abc"));
}

#[test]
fn test_negative_duration_rejected() {
    let temp = TempDir::new().unwrap();
    let input = write_file(temp.path(), "r.csv", "1000,-5,3000\n");

    create_test_cmd()
        .args(["summary", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-negative"));
}

#[test]
fn test_empty_file_rejected() {
    let temp = TempDir::new().unwrap();
    let input = write_file(temp.path(), "empty.csv", "\n\n");

    create_test_cmd()
        .args(["summary", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn test_pairs_without_colon_rejected() {
    let temp = TempDir::new().unwrap();
    let input = write_file(temp.path(), "pairs.csv", "100:2000,300\n");
    let output = temp.path().join("t.svg");

    create_test_cmd()
        .args([
            "timeseries",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("offset:latency"));

    assert!(!output.exists());
}

#[test]
fn test_timeseries_row_out_of_range() {
    let temp = TempDir::new().unwrap();
    let input = write_file(temp.path(), "pairs.csv", "100:2000,300:2500\n");
    let output = temp.path().join("t.svg");

    create_test_cmd()
        .args([
            "timeseries",
            input.to_str().unwrap(),
            "--row",
            "3",
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("row 3"));
}

#[test]
fn test_width_out_of_range() {
    let temp = TempDir::new().unwrap();
    let input = write_file(temp.path(), "r.csv", "1000\n");

    create_test_cmd()
        .args(["--width", "10", "summary", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("width"));
}

#[test]
fn test_negative_ymax_rejected() {
    let temp = TempDir::new().unwrap();
    let input = write_file(temp.path(), "r.csv", "1000\n");

    create_test_cmd()
        .args(["--ymax=-1", "summary", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ymax"));
}

#[test]
fn test_ragged_table_rejected() {
    let temp = TempDir::new().unwrap();
    let input = write_file(temp.path(), "t.csv", "1,10\n2\n");
    let output = temp.path().join("cdf.svg");

    create_test_cmd()
        .args([
            "cdf",
            input.to_str().unwrap(),
            "--format",
            "table",
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("columns"));
}

#[test]
fn test_exit_code_for_parse_errors() {
    let temp = TempDir::new().unwrap();
    let input = write_file(temp.path(), "r.csv", "1000,abc\n");

    create_test_cmd()
        .args(["summary", input.to_str().unwrap()])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn test_exit_code_for_usage_errors() {
    create_test_cmd()
        .args(["--color", "--no-color", "--help-topic", "formats"])
        .assert()
        .failure()
        .code(1);
}
