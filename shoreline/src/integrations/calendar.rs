//! Calendar synchronization abstraction.

use crate::error::Result;
use crate::reservation::Reservation;

/// External calendar synchronization.
///
/// Calendar sync is best-effort: a failed upsert never fails the booking
/// that triggered it. The manager records the returned event id so the
/// event can be removed when the reservation is cancelled or deleted.
#[cfg_attr(test, mockall::automock)]
pub trait CalendarSync: Send + Sync {
    /// Creates or updates the calendar event for a reservation.
    ///
    /// Returns the event id, or `None` if the provider accepted the
    /// request without assigning one.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the event or cannot be
    /// reached. Callers treat this as non-fatal.
    fn upsert_event(&self, reservation: &Reservation) -> Result<Option<String>>;

    /// Deletes the calendar event with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be reached. Deleting an
    /// already-missing event is not an error.
    fn delete_event(&self, event_id: &str) -> Result<()>;
}
