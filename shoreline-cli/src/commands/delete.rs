//! Delete command implementation.
//!
//! This module implements the `delete` command, which permanently
//! removes a reservation from the store. No refund is issued.

use clap::Args;

use crate::error::CliError;
use crate::utils::{open_manager, GlobalOptions};

/// Permanently delete a reservation.
#[derive(Args)]
pub struct DeleteCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    id: i64,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let manager = open_manager(global)?;
        manager.delete(self.id)?;

        println!("Reservation {} deleted", self.id);
        Ok(())
    }
}
