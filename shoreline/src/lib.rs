#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # shoreline
//!
//! A library for managing vacation-rental reservations.
//!
//! This library provides the full booking lifecycle for a rental
//! property: availability checks over half-open date ranges, exact
//! decimal pricing, durable SQLite storage, status transitions, and
//! optional payment and calendar collaborators.
//!
//! ## Core Types
//!
//! - [`DateRange`]: Validated half-open check-in/check-out interval
//! - [`Reservation`], [`Guest`], [`Status`]: Reservation records
//! - [`BookingManager`] and [`BookingRequest`]: Lifecycle coordination
//! - [`Error`] and [`Result`]: Error handling types
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//! use shoreline::{pricing, DateRange};
//!
//! let stay = DateRange::new(
//!     NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
//! )
//! .unwrap();
//! assert_eq!(stay.nights(), 2);
//!
//! let quote = pricing::quote(
//!     Decimal::new(300, 0),
//!     &stay,
//!     pricing::default_cleaning_fee(),
//!     Decimal::ZERO,
//! );
//! assert_eq!(quote.total.to_string(), "906.87");
//! ```

pub mod api;
pub mod availability;
pub mod booking;
pub mod config;
pub mod database;
pub mod error;
pub mod integrations;
pub mod logging;
pub mod pricing;
pub mod reservation;
pub mod stay;

// Re-export key types at crate root for convenience
pub use api::{BookedPeriod, ErrorBody, ReservationEnvelope};
pub use booking::{BookingManager, BookingRequest};
pub use config::Config;
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use integrations::{CalendarSync, PaymentGateway, PaymentIntent, PaymentMetadata};
pub use logging::{init_logger, LogLevel};
pub use pricing::Quote;
pub use reservation::{Guest, Occupancy, PaymentStatus, Reservation, Status};
pub use stay::DateRange;
