//! Error types for the shoreline library.
//!
//! This module provides the error hierarchy for all reservation
//! operations, using `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::stay::DateRange;

/// Result type alias for operations that may fail with a shoreline error.
///
/// # Examples
///
/// ```
/// use shoreline::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the shoreline library.
///
/// This enum encompasses all error conditions that can occur during
/// reservation lifecycle operations, from request validation through
/// persistence and collaborator calls.
#[derive(Debug, Error)]
pub enum Error {
    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested dates overlap an existing reservation.
    #[error("dates are already booked for listing {listing_id} ({} conflicting reservation(s))", conflicts.len())]
    DateConflict {
        /// The listing the booking was attempted against.
        listing_id: i64,
        /// The occupied date ranges that overlap the request.
        conflicts: Vec<DateRange>,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// An illegal status transition was attempted.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// The current status.
        from: crate::reservation::Status,
        /// The requested status.
        to: crate::reservation::Status,
    },

    /// The payment collaborator reported failure or could not verify a charge.
    #[error("payment verification failed: {reason}")]
    PaymentVerification {
        /// Why the payment could not be verified.
        reason: String,
    },

    /// A refund was requested for a reservation that is already refunded.
    #[error("reservation {id} has already been refunded")]
    AlreadyRefunded {
        /// The reservation id.
        id: i64,
    },

    /// A required external collaborator is not configured.
    #[error("{capability} is not configured")]
    CollaboratorUnavailable {
        /// The missing capability ("payment processing", "calendar sync").
        capability: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },

    /// The store's write lock was poisoned by a panicking writer.
    #[error("reservation store lock poisoned")]
    LockPoisoned,
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl From<crate::stay::InvalidDateRangeError> for Error {
    fn from(err: crate::stay::InvalidDateRangeError) -> Self {
        Self::Validation {
            field: "dates".into(),
            message: err.reason,
        }
    }
}

impl Error {
    /// Check if the error indicates a missing resource.
    ///
    /// # Examples
    ///
    /// ```
    /// use shoreline::Error;
    ///
    /// let err = Error::NotFound { resource: "reservation 7".into() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the error is a booking-date conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DateConflict { .. })
    }

    /// The HTTP status code a REST front end should answer with.
    ///
    /// Validation failures, illegal transitions, and payment problems map
    /// to 400; unknown ids to 404; date overlaps to 409; everything else
    /// is an internal error and reported as 500 without detail.
    ///
    /// # Examples
    ///
    /// ```
    /// use shoreline::Error;
    ///
    /// let err = Error::NotFound { resource: "reservation 7".into() };
    /// assert_eq!(err.http_status(), 404);
    /// ```
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation { .. }
            | Self::InvalidTransition { .. }
            | Self::PaymentVerification { .. }
            | Self::AlreadyRefunded { .. }
            | Self::CollaboratorUnavailable { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::DateConflict { .. } => 409,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Io(_)
            | Self::DatabaseCorruption { .. }
            | Self::UnsupportedSchemaVersion { .. }
            | Self::LockPoisoned => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation::Status;
    use chrono::NaiveDate;

    fn range(a: (i32, u32, u32), b: (i32, u32, u32)) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(a.0, a.1, a.2).unwrap(),
            NaiveDate::from_ymd_opt(b.0, b.1, b.2).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_validation_error_display() {
        let err = Error::Validation {
            field: "guest_email".to_string(),
            message: "must be non-empty".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("guest_email"));
        assert!(display.contains("must be non-empty"));
    }

    #[test]
    fn test_date_conflict_error_display() {
        let err = Error::DateConflict {
            listing_id: 49599459,
            conflicts: vec![range((2024, 6, 10), (2024, 6, 12))],
        };
        let display = format!("{err}");
        assert!(display.contains("already booked"));
        assert!(display.contains("49599459"));
        assert!(display.contains("1 conflicting"));
    }

    #[test]
    fn test_not_found_error() {
        let err = Error::NotFound {
            resource: "reservation 99".to_string(),
        };
        assert!(err.is_not_found());
        assert!(format!("{err}").contains("not found"));
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = Error::InvalidTransition {
            from: Status::Cancelled,
            to: Status::Confirmed,
        };
        let display = format!("{err}");
        assert!(display.contains("cancelled"));
        assert!(display.contains("confirmed"));
    }

    #[test]
    fn test_http_status_mapping() {
        let validation = Error::Validation {
            field: "guest_name".into(),
            message: "missing".into(),
        };
        assert_eq!(validation.http_status(), 400);

        let not_found = Error::NotFound {
            resource: "reservation 1".into(),
        };
        assert_eq!(not_found.http_status(), 404);

        let conflict = Error::DateConflict {
            listing_id: 1,
            conflicts: vec![],
        };
        assert_eq!(conflict.http_status(), 409);
        assert!(conflict.is_conflict());

        let io = Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(io.http_status(), 500);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i64> {
            Err(Error::AlreadyRefunded { id: 3 })
        }

        let err = returns_result().unwrap_err();
        assert!(format!("{err}").contains("already been refunded"));
        assert_eq!(err.http_status(), 400);
    }
}
