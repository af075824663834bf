//! CLI options interaction tests
//!
//! These tests validate argument handling, flag conflicts and the help
//! system without touching real benchmark data.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// Helper function to create a test command
fn create_test_cmd() -> Command {
    Command::cargo_bin("dbp").unwrap()
}

#[test]
fn test_no_subcommand_fails() {
    create_test_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("subcommand"));
}

#[test]
fn test_color_flag_conflict() {
    create_test_cmd()
        .args(["--color", "--no-color", "summary", "whatever.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--color"));
}

#[test]
fn test_help_topic_formats() {
    create_test_cmd()
        .args(["--help-topic", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bracketed"))
        .stdout(predicate::str::contains("offset:latency"));
}

#[test]
fn test_help_topic_unknown_falls_back() {
    create_test_cmd()
        .args(["--help-topic", "nonsense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown help topic"))
        .stdout(predicate::str::contains("op-stats"));
}

#[test]
fn test_version_flag() {
    create_test_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dbp 0.1.0"));
}

#[test]
fn test_summary_missing_file() {
    create_test_cmd()
        .args(["summary", "/nonexistent/results.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_invalid_unit_rejected() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("r.csv");
    fs::write(&input, "1,2,3\n").unwrap();

    create_test_cmd()
        .args(["--unit", "parsecs", "summary", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unit"));
}

#[test]
fn test_invalid_output_extension_rejected() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("r.csv");
    fs::write(&input, "1,2,3\n").unwrap();

    create_test_cmd()
        .args([
            "hist",
            input.to_str().unwrap(),
            "-o",
            temp.path().join("fig.gif").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(".svg or .png"));
}

#[test]
fn test_scaling_x_values_mismatch() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("r.csv");
    fs::write(&input, "1,2,3\n").unwrap();

    create_test_cmd()
        .args([
            "scaling",
            input.to_str().unwrap(),
            "--x-values",
            "1,2,3",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--x-values"));
}

#[test]
fn test_format_override_rejected_when_unknown() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("r.csv");
    fs::write(&input, "1,2,3\n").unwrap();

    create_test_cmd()
        .args([
            "summary",
            input.to_str().unwrap(),
            "--format",
            "yaml",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown input format"));
}

#[test]
fn test_debug_banner() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("r.csv");
    fs::write(&input, "1000,2000,3000\n").unwrap();

    create_test_cmd()
        .args(["--debug", "--no-color", "summary", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("disguise-bench-plotter v"));
}

#[test]
fn test_env_var_layer() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("r.csv");
    fs::write(&input, "1000,2000,3000\n").unwrap();

    // Values are microseconds; DBP_UNIT=us keeps them unscaled.
    create_test_cmd()
        .env("DBP_UNIT", "us")
        .args(["--no-color", "summary", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("(values in us)"));
}

#[test]
fn test_cli_unit_beats_env_var() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("r.csv");
    fs::write(&input, "1000,2000,3000\n").unwrap();

    create_test_cmd()
        .env("DBP_UNIT", "us")
        .args([
            "--unit",
            "ms",
            "--no-color",
            "summary",
            input.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("(values in ms)"));
}
