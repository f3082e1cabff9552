//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Initialize the data directory and database
//! - `book`: Book a stay for a guest
//! - `list`: List reservations, newest first
//! - `show`: Show a single reservation
//! - `status`: Change a reservation's booking status
//! - `delete`: Permanently delete a reservation
//! - `refund`: Record a refund and cancel the reservation
//! - `dates`: Show booked date ranges for a listing

pub mod book;
pub mod dates;
pub mod delete;
pub mod init;
pub mod list;
pub mod refund;
pub mod show;
pub mod status;

pub use book::BookCommand;
pub use dates::DatesCommand;
pub use delete::DeleteCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use refund::RefundCommand;
pub use show::ShowCommand;
pub use status::StatusCommand;
