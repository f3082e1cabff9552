//! Dates command implementation.
//!
//! This module implements the `dates` command, which shows the occupied
//! date ranges for a listing, earliest first.

use clap::Args;
use shoreline::api::booked_periods;

use crate::error::CliError;
use crate::utils::{load_configuration, open_manager, GlobalOptions};

/// Show booked date ranges for a listing.
#[derive(Args)]
pub struct DatesCommand {
    /// Listing id (defaults to the configured listing)
    #[arg(value_name = "LISTING")]
    listing: Option<i64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl DatesCommand {
    /// Execute the dates command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let listing_id = self.listing.unwrap_or_else(|| config.effective_listing_id());

        let manager = open_manager(global)?;
        let ranges = manager.booked_ranges(listing_id)?;

        if self.json {
            let json = serde_json::to_string_pretty(&booked_periods(&ranges))
                .map_err(|e| CliError::Config(e.to_string()))?;
            println!("{json}");
            return Ok(());
        }

        if ranges.is_empty() {
            println!("No booked dates for listing {listing_id}");
            return Ok(());
        }

        println!("Booked dates for listing {listing_id}:");
        for range in &ranges {
            println!("  {range}");
        }
        Ok(())
    }
}
