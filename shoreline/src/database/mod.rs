//! Database layer for persistent storage of reservations.
//!
//! This module provides a SQLite-based storage layer for managing guest
//! reservations, including connection management, schema versioning,
//! and CRUD operations.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//! use shoreline::database::{Database, DatabaseConfig};
//! use shoreline::{pricing, DateRange, Guest, Reservation};
//!
//! // Open a database
//! let config = DatabaseConfig::new("/tmp/shoreline.db");
//! let mut db = Database::open(config).unwrap();
//!
//! // Create a reservation
//! let stay = DateRange::new(
//!     NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 7, 3).unwrap(),
//! )
//! .unwrap();
//! let guest = Guest::new("Ada Lovelace", "ada@example.com", None).unwrap();
//! let quote = pricing::quote(Decimal::new(300, 0), &stay, Decimal::ZERO, Decimal::ZERO);
//! let reservation = Reservation::builder(49599459, guest, stay, quote)
//!     .build()
//!     .unwrap();
//! let id = db.insert_reservation(&reservation).unwrap();
//!
//! // List all reservations
//! let all = Database::list_all_reservations(db.connection()).unwrap();
//! for reservation in all {
//!     println!("{:?}", reservation);
//! }
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;

#[cfg(test)]
pub(crate) mod test_util;

pub(crate) use operations::{date_to_sql, row_to_reservation};

// Re-export public API
pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
