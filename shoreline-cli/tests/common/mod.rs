//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with isolated data directories
//! - Command builder helpers for common patterns
//! - A booking fixture used by most lifecycle tests

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with isolated data directory.
///
/// Each test gets its own temporary data directory so tests can run
/// in parallel without sharing a database.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the shoreline data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory path is not created here; shoreline creates
    /// it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("shoreline-data");

        Self { temp_dir, data_dir }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// Use this when a test needs full control over the global flags,
    /// for example to omit --data-dir entirely.
    pub fn command_bare(&self) -> Command {
        Command::cargo_bin("shoreline").expect("Failed to find shoreline binary")
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        // Keep tests hermetic: ignore any configuration in the caller's env.
        cmd.env_remove("SHORELINE_DATA_DIR")
            .env_remove("SHORELINE_LISTING_ID")
            .env_remove("SHORELINE_NIGHTLY_RATE")
            .env_remove("SHORELINE_CLEANING_FEE")
            .env_remove("SHORELINE_SERVICE_FEE")
            .env_remove("SHORELINE_OUTPUT_FORMAT");
        cmd
    }

    /// Book a stay for a fixture guest and return the stdout output.
    ///
    /// Panics if the booking fails; tests that expect booking failures
    /// should drive `command()` directly.
    pub fn book(&self, check_in: &str, check_out: &str) -> String {
        let output = self
            .command()
            .arg("book")
            .arg("--guest")
            .arg("Avery Stone")
            .arg("--email")
            .arg("avery@example.com")
            .arg("--check-in")
            .arg(check_in)
            .arg("--check-out")
            .arg(check_out)
            .arg("--rate")
            .arg("300")
            .output()
            .expect("Failed to run shoreline book");

        assert!(
            output.status.success(),
            "book {check_in}..{check_out} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run `list` in table format and return the stdout output.
    pub fn list(&self) -> String {
        let output = self
            .command()
            .arg("list")
            .output()
            .expect("Failed to run shoreline list");

        assert!(output.status.success(), "list failed");
        String::from_utf8_lossy(&output.stdout).to_string()
    }
}
