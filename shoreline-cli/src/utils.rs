//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including database management, configuration loading, date parsing, and
//! output formatting.

use std::path::PathBuf;

use chrono::NaiveDate;
use shoreline::{BookingManager, Config, Database, DatabaseConfig, DateRange};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    #[allow(dead_code)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[allow(dead_code)]
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory from global options.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    if let Some(ref data_dir) = global.data_dir {
        return Ok(data_dir.clone());
    }

    // Default: ~/.shoreline
    let home_dir = home::home_dir()
        .ok_or_else(|| CliError::Config("Could not determine home directory".to_string()))?;
    Ok(home_dir.join(".shoreline"))
}

/// Load property configuration from the data directory, with
/// environment overrides applied.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;
    Config::load_with_env(&data_dir).map_err(CliError::from)
}

/// Open the reservation database.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init
/// is disabled.
pub fn open_database(global: &GlobalOptions) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join("shoreline.db");

    if !db_path.exists() && global.disable_autoinit {
        return Err(CliError::NoDataDirectory);
    }

    let mut db_config = DatabaseConfig::new(db_path);

    if let Some(timeout_seconds) = global.busy_timeout {
        db_config =
            db_config.with_busy_timeout(std::time::Duration::from_secs(timeout_seconds.into()));
    }

    Database::open(db_config).map_err(CliError::from)
}

/// Open the database and wrap it in a booking manager.
///
/// The CLI runs without payment or calendar collaborators; operations
/// that need them are library-level concerns.
pub fn open_manager(global: &GlobalOptions) -> Result<BookingManager, CliError> {
    Ok(BookingManager::new(open_database(global)?))
}

/// Parse an ISO-8601 date argument.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        CliError::InvalidArguments(format!("{field}: '{value}' is not a date (YYYY-MM-DD)"))
    })
}

/// Build a validated stay from check-in and check-out arguments.
pub fn parse_stay(check_in: &str, check_out: &str) -> Result<DateRange, CliError> {
    let check_in = parse_date("check-in", check_in)?;
    let check_out = parse_date("check-out", check_out)?;
    DateRange::new(check_in, check_out)
        .map_err(|e| CliError::InvalidArguments(e.to_string()))
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
