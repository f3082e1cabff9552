//! JSON response shapes for REST front ends.
//!
//! The library does not run an HTTP server; these types define the
//! bodies a front end serializes so every surface speaks the same
//! contract. Pair them with [`Error::http_status`](crate::Error::http_status)
//! for the status code.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::reservation::Reservation;
use crate::stay::DateRange;

/// Success body wrapping a reservation with a human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationEnvelope {
    /// Human-readable outcome, e.g. "Reservation created successfully".
    pub message: String,
    /// The reservation the operation produced or mutated.
    pub reservation: Reservation,
}

impl ReservationEnvelope {
    /// Wraps a reservation with a message.
    #[must_use]
    pub fn new(message: impl Into<String>, reservation: Reservation) -> Self {
        Self {
            message: message.into(),
            reservation,
        }
    }
}

/// Error body for failed operations.
///
/// Conflict responses carry the occupied ranges so a client can offer
/// alternative dates. Internal errors are reported with a generic
/// message and no detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
    /// Occupied date ranges, present only for date conflicts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<Vec<DateRange>>,
}

impl From<&Error> for ErrorBody {
    fn from(err: &Error) -> Self {
        match err {
            Error::DateConflict { conflicts, .. } => Self {
                error: "Selected dates are not available".into(),
                conflicts: Some(conflicts.clone()),
            },
            e if e.http_status() == 500 => Self {
                // Never leak internals to clients
                error: "Internal server error".into(),
                conflicts: None,
            },
            e => Self {
                error: e.to_string(),
                conflicts: None,
            },
        }
    }
}

/// A booked period as a client-facing pair of ISO-8601 dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedPeriod {
    /// Check-in date.
    pub check_in: String,
    /// Check-out date.
    pub check_out: String,
}

impl From<&DateRange> for BookedPeriod {
    fn from(range: &DateRange) -> Self {
        Self {
            check_in: range.check_in().format("%Y-%m-%d").to_string(),
            check_out: range.check_out().format("%Y-%m-%d").to_string(),
        }
    }
}

/// Converts occupied ranges into the booked-dates response body.
#[must_use]
pub fn booked_periods(ranges: &[DateRange]) -> Vec<BookedPeriod> {
    ranges.iter().map(BookedPeriod::from).collect()
}
