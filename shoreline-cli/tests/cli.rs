//! Integration tests for the shoreline CLI surface.
//!
//! These tests verify that the CLI binary behaves correctly, including
//! argument parsing, help text, and version output.

use assert_cmd::Command;
use predicates::prelude::*;

/// Test that the binary runs without arguments and displays help/error.
#[test]
fn test_cli_no_arguments() {
    let mut cmd = Command::cargo_bin("shoreline").expect("Failed to find shoreline binary");

    // With clap subcommands required, no arguments should fail and show usage
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

/// Test that the --version flag displays version information.
#[test]
fn test_cli_version_flag() {
    let mut cmd = Command::cargo_bin("shoreline").expect("Failed to find shoreline binary");

    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("shoreline"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Test that the --help flag displays help text.
#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::cargo_bin("shoreline").expect("Failed to find shoreline binary");

    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("book"))
        .stdout(predicate::str::contains("dates"));
}

/// Test that an invalid subcommand produces an error.
#[test]
fn test_cli_invalid_subcommand() {
    let mut cmd = Command::cargo_bin("shoreline").expect("Failed to find shoreline binary");

    cmd.arg("invalid-command");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

/// Test that subcommand help text is available.
#[test]
fn test_cli_book_help() {
    let mut cmd = Command::cargo_bin("shoreline").expect("Failed to find shoreline binary");

    cmd.arg("book").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--check-in"))
        .stdout(predicate::str::contains("--check-out"))
        .stdout(predicate::str::contains("--rate"));
}
