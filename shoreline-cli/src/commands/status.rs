//! Status command implementation.
//!
//! This module implements the `status` command, which moves a
//! reservation through the booking state machine.

use clap::Args;
use shoreline::Status;

use crate::error::CliError;
use crate::utils::{open_manager, GlobalOptions};

/// Change a reservation's booking status.
#[derive(Args)]
pub struct StatusCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    id: i64,

    /// New status (pending, confirmed, cancelled, completed)
    #[arg(value_name = "STATUS")]
    status: String,
}

impl StatusCommand {
    /// Execute the status command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let status = Status::parse(&self.status)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let manager = open_manager(global)?;
        let updated = manager.transition(self.id, status)?;

        println!("Reservation {} is now {}", updated.id(), updated.status());
        Ok(())
    }
}
