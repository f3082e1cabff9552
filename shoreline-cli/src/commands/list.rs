//! List command implementation.
//!
//! This module implements the `list` command, which displays
//! reservations in various formats (table, JSON).

use std::io::Write;

use clap::{Args, ValueEnum};
use shoreline::{Reservation, Status};

use crate::error::CliError;
use crate::utils::{format_timestamp, open_manager, GlobalOptions};

/// List reservations, newest first.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "SHORELINE_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Filter by listing
    #[arg(long, value_name = "ID")]
    pub listing: Option<i64>,

    /// Filter by booking status
    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,
}

/// Output format for list command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let manager = open_manager(global)?;
        let mut reservations = manager.list()?;

        if let Some(listing) = self.listing {
            reservations.retain(|r| r.listing_id() == listing);
        }
        if let Some(ref status) = self.status {
            let status = Status::parse(status)
                .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
            reservations.retain(|r| r.status() == status);
        }

        match self.format {
            OutputFormat::Table => format_as_table(&reservations)?,
            OutputFormat::Json => format_as_json(&reservations)?,
        }

        Ok(())
    }
}

/// Format reservations as a human-readable table.
fn format_as_table(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(
        handle,
        "ID\tLISTING\tGUEST\tSTAY\tSTATUS\tPAYMENT\tTOTAL\tCREATED"
    )?;

    for res in reservations {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            res.id(),
            res.listing_id(),
            res.guest().name,
            res.stay(),
            res.status(),
            res.payment_status(),
            res.quote().total,
            format_timestamp(res.created_at()),
        )?;
    }

    Ok(())
}

/// Format reservations as JSON.
fn format_as_json(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json = serde_json::to_string_pretty(reservations)
        .map_err(|e| CliError::Config(e.to_string()))?;
    writeln!(handle, "{json}")?;

    Ok(())
}
