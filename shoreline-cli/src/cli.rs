//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    BookCommand, DatesCommand, DeleteCommand, InitCommand, ListCommand, RefundCommand,
    ShowCommand, StatusCommand,
};

/// Command-line tool for managing vacation-rental reservations.
#[derive(Parser)]
#[command(name = "shoreline")]
#[command(version, about = "Manage vacation-rental reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "SHORELINE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(
        long,
        value_name = "SECONDS",
        global = true,
        env = "SHORELINE_BUSY_TIMEOUT"
    )]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "SHORELINE_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Book a stay
    Book(BookCommand),

    /// List reservations, newest first
    List(ListCommand),

    /// Show a single reservation
    Show(ShowCommand),

    /// Change a reservation's booking status
    Status(StatusCommand),

    /// Permanently delete a reservation
    Delete(DeleteCommand),

    /// Record a refund and cancel the reservation
    Refund(RefundCommand),

    /// Show booked date ranges for a listing
    Dates(DatesCommand),
}
