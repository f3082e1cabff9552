//! Conflict detection for requested date ranges.
//!
//! Two stays conflict when their half-open date intervals intersect.
//! A check-out on the same day as another booking's check-in is not a
//! conflict, which is what allows back-to-back turnovers. Cancelled
//! reservations never conflict.
//!
//! Dates are stored as ISO-8601 text, so the SQL comparisons below are
//! lexicographic and agree with chronological order.

use rusqlite::{params, Connection};

use crate::database::date_to_sql;
use crate::error::Result;
use crate::reservation::Reservation;
use crate::stay::DateRange;

const SELECT_CONFLICTS: &str = r"
    SELECT id, listing_id, guest_name, guest_email, guest_phone,
           check_in, check_out, adults, children, infants, pets,
           nightly_rate, subtotal, cleaning_fee, service_fee, tax, total,
           special_requests, status, payment_status,
           payment_intent_id, payment_method, calendar_event_id, created_at
    FROM reservations
    WHERE listing_id = ?1
      AND status != 'cancelled'
      AND id != ?2
      AND check_in < ?3
      AND check_out > ?4
    ORDER BY check_in
";

/// Returns the reservations whose stays overlap the requested range.
///
/// Pass `exclude_id` when re-checking availability for an existing
/// reservation so it does not conflict with itself.
///
/// # Errors
///
/// Returns an error if the database query fails.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use shoreline::availability::conflicting_reservations;
/// use shoreline::database::{Database, DatabaseConfig};
/// use shoreline::DateRange;
///
/// let db = Database::open(DatabaseConfig::new("/tmp/shoreline.db")).unwrap();
/// let requested = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
/// )
/// .unwrap();
/// let conflicts =
///     conflicting_reservations(db.connection(), 49599459, &requested, None).unwrap();
/// ```
pub fn conflicting_reservations(
    conn: &Connection,
    listing_id: i64,
    requested: &DateRange,
    exclude_id: Option<i64>,
) -> Result<Vec<Reservation>> {
    let mut stmt = conn.prepare(SELECT_CONFLICTS)?;
    let rows = stmt.query_map(
        params![
            listing_id,
            // id 0 is never assigned, so excluding it excludes nothing
            exclude_id.unwrap_or(0),
            date_to_sql(requested.check_out()),
            date_to_sql(requested.check_in()),
        ],
        crate::database::row_to_reservation,
    )?;

    let mut conflicts = Vec::new();
    for row in rows {
        conflicts.push(row?);
    }
    Ok(conflicts)
}

/// Whether any active reservation overlaps the requested range.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn has_conflict(
    conn: &Connection,
    listing_id: i64,
    requested: &DateRange,
    exclude_id: Option<i64>,
) -> Result<bool> {
    let count: i64 = conn.query_row(
        r"
        SELECT COUNT(*)
        FROM reservations
        WHERE listing_id = ?1
          AND status != 'cancelled'
          AND id != ?2
          AND check_in < ?3
          AND check_out > ?4
        ",
        params![
            listing_id,
            exclude_id.unwrap_or(0),
            date_to_sql(requested.check_out()),
            date_to_sql(requested.check_in()),
        ],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
