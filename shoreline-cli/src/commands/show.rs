//! Show command implementation.
//!
//! This module implements the `show` command, which displays a single
//! reservation in full.

use clap::Args;

use crate::error::CliError;
use crate::utils::{format_timestamp, open_manager, GlobalOptions};

/// Show a single reservation.
#[derive(Args)]
pub struct ShowCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    id: i64,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let manager = open_manager(global)?;
        let reservation = manager.get(self.id)?;

        if self.json {
            let json = serde_json::to_string_pretty(&reservation)
                .map_err(|e| CliError::Config(e.to_string()))?;
            println!("{json}");
            return Ok(());
        }

        let quote = reservation.quote();
        println!("Reservation {}", reservation.id());
        println!("  Listing:   {}", reservation.listing_id());
        println!("  Guest:     {}", reservation.guest().name);
        println!("  Email:     {}", reservation.guest().email);
        if let Some(phone) = &reservation.guest().phone {
            println!("  Phone:     {phone}");
        }
        println!("  Stay:      {} ({} nights)", reservation.stay(), quote.nights);
        let occ = reservation.occupancy();
        println!(
            "  Guests:    {} adults, {} children, {} infants, {} pets",
            occ.adults, occ.children, occ.infants, occ.pets
        );
        println!("  Status:    {}", reservation.status());
        println!("  Payment:   {}", reservation.payment_status());
        if let Some(intent) = reservation.payment_intent_id() {
            println!("  Intent:    {intent}");
        }
        if let Some(method) = reservation.payment_method() {
            println!("  Method:    {method}");
        }
        if let Some(event) = reservation.calendar_event_id() {
            println!("  Calendar:  {event}");
        }
        if let Some(requests) = reservation.special_requests() {
            println!("  Requests:  {requests}");
        }
        println!("  Rate:      {} / night", quote.nightly_rate);
        println!("  Subtotal:  {}", quote.subtotal);
        println!("  Cleaning:  {}", quote.cleaning_fee);
        println!("  Service:   {}", quote.service_fee);
        println!("  Tax:       {}", quote.tax);
        println!("  Total:     {}", quote.total);
        println!("  Created:   {}", format_timestamp(reservation.created_at()));

        Ok(())
    }
}
