//! Book command implementation.
//!
//! This module implements the `book` command, which quotes a stay,
//! checks availability, and creates a pending reservation.

use clap::Args;
use rust_decimal::Decimal;
use shoreline::{BookingRequest, Error, Guest, Occupancy};

use crate::error::CliError;
use crate::utils::{load_configuration, open_manager, parse_stay, GlobalOptions};

/// Book a stay.
#[derive(Args)]
pub struct BookCommand {
    /// Guest name
    #[arg(long, value_name = "NAME")]
    guest: String,

    /// Guest email
    #[arg(long, value_name = "EMAIL")]
    email: String,

    /// Guest phone number
    #[arg(long, value_name = "PHONE")]
    phone: Option<String>,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    check_in: String,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    check_out: String,

    /// Listing to book (defaults to the configured listing)
    #[arg(long, value_name = "ID")]
    listing: Option<i64>,

    /// Nightly rate (defaults to the configured rate)
    #[arg(long, value_name = "AMOUNT")]
    rate: Option<Decimal>,

    /// Cleaning fee override
    #[arg(long, value_name = "AMOUNT")]
    cleaning_fee: Option<Decimal>,

    /// Service fee override
    #[arg(long, value_name = "AMOUNT")]
    service_fee: Option<Decimal>,

    /// Number of adults
    #[arg(long, default_value_t = 1)]
    adults: u32,

    /// Number of children
    #[arg(long, default_value_t = 0)]
    children: u32,

    /// Number of infants
    #[arg(long, default_value_t = 0)]
    infants: u32,

    /// Number of pets
    #[arg(long, default_value_t = 0)]
    pets: u32,

    /// Special requests from the guest
    #[arg(long, value_name = "TEXT")]
    requests: Option<String>,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let manager = open_manager(global)?;

        let stay = parse_stay(&self.check_in, &self.check_out)?;
        let guest = Guest::new(self.guest, self.email, self.phone)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
        let occupancy = Occupancy::new(self.adults, self.children, self.infants, self.pets)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let rate = self
            .rate
            .or(config.nightly_rate)
            .ok_or_else(|| {
                CliError::InvalidArguments(
                    "no nightly rate given and none configured (use --rate)".to_string(),
                )
            })?;

        let listing_id = self.listing.unwrap_or_else(|| config.effective_listing_id());

        let mut request = BookingRequest::new(listing_id, guest, stay, rate)
            .with_occupancy(occupancy)
            .with_cleaning_fee(self.cleaning_fee.unwrap_or_else(|| config.effective_cleaning_fee()))
            .with_service_fee(self.service_fee.unwrap_or_else(|| config.effective_service_fee()));
        if let Some(requests) = self.requests {
            request = request.with_special_requests(requests);
        }

        match manager.create(&request) {
            Ok(reservation) => {
                let quote = reservation.quote();
                println!("Reservation {} created", reservation.id());
                println!("  Listing:  {}", reservation.listing_id());
                println!("  Stay:     {} ({} nights)", reservation.stay(), quote.nights);
                println!("  Guest:    {}", reservation.guest().name);
                println!("  Subtotal: {}", quote.subtotal);
                println!("  Cleaning: {}", quote.cleaning_fee);
                println!("  Service:  {}", quote.service_fee);
                println!("  Tax:      {}", quote.tax);
                println!("  Total:    {}", quote.total);
                Ok(())
            }
            Err(Error::DateConflict { conflicts, .. }) => {
                eprintln!("Selected dates are not available; conflicting stays:");
                for range in &conflicts {
                    eprintln!("  {range}");
                }
                Err(CliError::Library(Error::DateConflict {
                    listing_id,
                    conflicts,
                }))
            }
            Err(e) => Err(e.into()),
        }
    }
}
