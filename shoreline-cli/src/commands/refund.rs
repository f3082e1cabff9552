//! Refund command implementation.
//!
//! This module implements the `refund` command, which records a refund
//! processed outside the tool (the CLI carries no payment gateway) and
//! cancels the reservation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{open_manager, GlobalOptions};

/// Record a refund and cancel the reservation.
#[derive(Args)]
pub struct RefundCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    id: i64,
}

impl RefundCommand {
    /// Execute the refund command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let manager = open_manager(global)?;
        let updated = manager.record_refund(self.id)?;

        println!(
            "Reservation {} refunded and cancelled (payment: {})",
            updated.id(),
            updated.payment_status()
        );
        Ok(())
    }
}
