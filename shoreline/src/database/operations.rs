//! Database CRUD operations for reservations.
//!
//! This module implements all create, read, update, and delete operations
//! for guest reservations in the database.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, TransactionBehavior};
use rust_decimal::Decimal;

use crate::error::Result;
use crate::reservation::{Guest, Occupancy, PaymentStatus, Reservation, Status};
use crate::stay::DateRange;
use crate::pricing::Quote;

use super::connection::Database;
use super::schema::{DELETE_RESERVATION, INSERT_RESERVATION};

/// Formats a date for database storage as ISO-8601 text.
pub(crate) fn date_to_sql(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses an ISO-8601 date from database text.
fn sql_to_date(text: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Formats a money amount for database storage as an exact decimal string.
fn decimal_to_sql(amount: Decimal) -> String {
    amount.to_string()
}

/// Parses a money amount from database text.
fn sql_to_decimal(text: &str) -> rusqlite::Result<Decimal> {
    Decimal::from_str(text).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Converts Unix epoch seconds from the database to a UTC timestamp.
fn unix_secs_to_datetime(secs: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or(rusqlite::Error::IntegralValueOutOfRange(23, secs))
}

/// Helper function to deserialize a reservation from a database row.
///
/// Expects row fields in the order produced by `SELECT_RESERVATION`.
pub(crate) fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let listing_id: i64 = row.get(1)?;
    let guest_name: String = row.get(2)?;
    let guest_email: String = row.get(3)?;
    let guest_phone: Option<String> = row.get(4)?;
    let check_in: String = row.get(5)?;
    let check_out: String = row.get(6)?;
    let adults: u32 = row.get(7)?;
    let children: u32 = row.get(8)?;
    let infants: u32 = row.get(9)?;
    let pets: u32 = row.get(10)?;
    let nightly_rate: String = row.get(11)?;
    let subtotal: String = row.get(12)?;
    let cleaning_fee: String = row.get(13)?;
    let service_fee: String = row.get(14)?;
    let tax: String = row.get(15)?;
    let total: String = row.get(16)?;
    let special_requests: Option<String> = row.get(17)?;
    let status: String = row.get(18)?;
    let payment_status: String = row.get(19)?;
    let payment_intent_id: Option<String> = row.get(20)?;
    let payment_method: Option<String> = row.get(21)?;
    let calendar_event_id: Option<String> = row.get(22)?;
    let created_secs: i64 = row.get(23)?;

    let guest = Guest::new(guest_name, guest_email, guest_phone)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let stay = DateRange::new(sql_to_date(&check_in)?, sql_to_date(&check_out)?)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let occupancy = Occupancy::new(adults, children, infants, pets)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let quote = Quote {
        nights: stay.nights(),
        nightly_rate: sql_to_decimal(&nightly_rate)?,
        subtotal: sql_to_decimal(&subtotal)?,
        cleaning_fee: sql_to_decimal(&cleaning_fee)?,
        service_fee: sql_to_decimal(&service_fee)?,
        tax: sql_to_decimal(&tax)?,
        total: sql_to_decimal(&total)?,
    };

    let status = Status::parse(&status)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let payment_status = PaymentStatus::parse(&payment_status)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Reservation::builder(listing_id, guest, stay, quote)
        .id(id)
        .occupancy(occupancy)
        .special_requests(special_requests)
        .status(status)
        .payment_status(payment_status)
        .payment_intent_id(payment_intent_id)
        .payment_method(payment_method)
        .calendar_event_id(calendar_event_id)
        .created_at(unix_secs_to_datetime(created_secs)?)
        .build()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

// SQL statements for CRUD operations
const SELECT_RESERVATION: &str = r"
    SELECT id, listing_id, guest_name, guest_email, guest_phone,
           check_in, check_out, adults, children, infants, pets,
           nightly_rate, subtotal, cleaning_fee, service_fee, tax, total,
           special_requests, status, payment_status,
           payment_intent_id, payment_method, calendar_event_id, created_at
    FROM reservations
    WHERE id = ?
";

const LIST_RESERVATIONS: &str = r"
    SELECT id, listing_id, guest_name, guest_email, guest_phone,
           check_in, check_out, adults, children, infants, pets,
           nightly_rate, subtotal, cleaning_fee, service_fee, tax, total,
           special_requests, status, payment_status,
           payment_intent_id, payment_method, calendar_event_id, created_at
    FROM reservations
    ORDER BY created_at DESC, id DESC
";

impl Database {
    /// Inserts a new reservation and returns its assigned id.
    ///
    /// This operation uses a transaction with IMMEDIATE mode to ensure
    /// atomicity under concurrent writers.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The transaction cannot be started
    /// - The insert fails
    /// - The transaction cannot be committed
    pub fn insert_reservation(&mut self, reservation: &Reservation) -> Result<i64> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            INSERT_RESERVATION,
            params![
                reservation.listing_id(),
                reservation.guest().name,
                reservation.guest().email,
                reservation.guest().phone,
                date_to_sql(reservation.stay().check_in()),
                date_to_sql(reservation.stay().check_out()),
                reservation.occupancy().adults,
                reservation.occupancy().children,
                reservation.occupancy().infants,
                reservation.occupancy().pets,
                decimal_to_sql(reservation.quote().nightly_rate),
                decimal_to_sql(reservation.quote().subtotal),
                decimal_to_sql(reservation.quote().cleaning_fee),
                decimal_to_sql(reservation.quote().service_fee),
                decimal_to_sql(reservation.quote().tax),
                decimal_to_sql(reservation.quote().total),
                reservation.special_requests(),
                reservation.status().as_str(),
                reservation.payment_status().as_str(),
                reservation.payment_intent_id(),
                reservation.payment_method(),
                reservation.calendar_event_id(),
                reservation.created_at().timestamp(),
            ],
        )?;

        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    /// Retrieves a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    ///
    /// # Returns
    ///
    /// - `Ok(Some(reservation))` if the reservation exists
    /// - `Ok(None)` if the reservation doesn't exist
    /// - `Err(_)` if a database error occurs
    pub fn get_reservation(conn: &Connection, id: i64) -> Result<Option<Reservation>> {
        let mut stmt = conn.prepare(SELECT_RESERVATION)?;

        match stmt.query_row(params![id], row_to_reservation) {
            Ok(reservation) => Ok(Some(reservation)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all reservations, newest first.
    ///
    /// Ties on `created_at` (one-second resolution) fall back to id order
    /// so the listing is deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_all_reservations(conn: &Connection) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(LIST_RESERVATIONS)?;
        let rows = stmt.query_map([], row_to_reservation)?;

        let mut reservations = Vec::new();
        for row in rows {
            reservations.push(row?);
        }
        Ok(reservations)
    }

    /// Updates the booking status of a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or update fails.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(reservation))` with the updated row if it exists
    /// - `Ok(None)` if the reservation was not found
    pub fn update_status(&mut self, id: i64, status: Status) -> Result<Option<Reservation>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let rows_affected = tx.execute(
            "UPDATE reservations SET status = ? WHERE id = ?",
            params![status.as_str(), id],
        )?;
        tx.commit()?;

        if rows_affected == 0 {
            return Ok(None);
        }
        Self::get_reservation(&self.conn, id)
    }

    /// Marks a reservation refunded, cancelling it in the same write.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or update fails.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(reservation))` with the updated row if it exists
    /// - `Ok(None)` if the reservation was not found
    pub fn mark_refunded(&mut self, id: i64) -> Result<Option<Reservation>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let rows_affected = tx.execute(
            "UPDATE reservations SET status = ?, payment_status = ? WHERE id = ?",
            params![
                Status::Cancelled.as_str(),
                PaymentStatus::Refunded.as_str(),
                id
            ],
        )?;
        tx.commit()?;

        if rows_affected == 0 {
            return Ok(None);
        }
        Self::get_reservation(&self.conn, id)
    }

    /// Updates a reservation's payment fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or update fails.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(reservation))` with the updated row if it exists
    /// - `Ok(None)` if the reservation was not found
    pub fn update_payment(
        &mut self,
        id: i64,
        payment_status: PaymentStatus,
        payment_intent_id: Option<&str>,
        payment_method: Option<&str>,
    ) -> Result<Option<Reservation>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let rows_affected = tx.execute(
            "UPDATE reservations
             SET payment_status = ?, payment_intent_id = ?, payment_method = ?
             WHERE id = ?",
            params![
                payment_status.as_str(),
                payment_intent_id,
                payment_method,
                id
            ],
        )?;
        tx.commit()?;

        if rows_affected == 0 {
            return Ok(None);
        }
        Self::get_reservation(&self.conn, id)
    }

    /// Records or clears the external calendar event reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the reservation was found and updated
    /// - `Ok(false)` if the reservation was not found
    pub fn set_calendar_event(&mut self, id: i64, event_id: Option<&str>) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE reservations SET calendar_event_id = ? WHERE id = ?",
            params![event_id, id],
        )?;
        Ok(rows_affected > 0)
    }

    /// Deletes a reservation from the database.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or delete fails.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the reservation was found and deleted
    /// - `Ok(false)` if the reservation was not found
    pub fn delete_reservation(&mut self, id: i64) -> Result<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let rows_affected = tx.execute(DELETE_RESERVATION, params![id])?;

        tx.commit()?;
        Ok(rows_affected > 0)
    }

    /// Lists the occupied date ranges for a listing, earliest first.
    ///
    /// Cancelled reservations do not occupy dates and are excluded.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_active_ranges(conn: &Connection, listing_id: i64) -> Result<Vec<DateRange>> {
        let mut stmt = conn.prepare(
            r"
            SELECT check_in, check_out
            FROM reservations
            WHERE listing_id = ? AND status != 'cancelled'
            ORDER BY check_in
        ",
        )?;
        let rows = stmt.query_map(params![listing_id], |row| {
            let check_in: String = row.get(0)?;
            let check_out: String = row.get(1)?;
            DateRange::new(sql_to_date(&check_in)?, sql_to_date(&check_out)?)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
        })?;

        let mut ranges = Vec::new();
        for row in rows {
            ranges.push(row?);
        }
        Ok(ranges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;
    use crate::pricing;

    fn test_stay(check_in: &str, check_out: &str) -> DateRange {
        DateRange::new(
            NaiveDate::parse_from_str(check_in, "%Y-%m-%d").unwrap(),
            NaiveDate::parse_from_str(check_out, "%Y-%m-%d").unwrap(),
        )
        .unwrap()
    }

    fn test_reservation(listing_id: i64, check_in: &str, check_out: &str) -> Reservation {
        let stay = test_stay(check_in, check_out);
        let guest = Guest::new("Ada Lovelace", "ada@example.com", None).unwrap();
        let quote = pricing::quote(
            Decimal::new(300, 0),
            &stay,
            pricing::default_cleaning_fee(),
            Decimal::ZERO,
        );
        Reservation::builder(listing_id, guest, stay, quote)
            .build()
            .unwrap()
    }

    #[test]
    fn test_insert_and_get_round_trip() {
        let mut db = create_test_database();
        let reservation = test_reservation(49599459, "2024-06-10", "2024-06-12");

        let id = db.insert_reservation(&reservation).unwrap();
        assert!(id > 0);

        let loaded = Database::get_reservation(db.connection(), id)
            .unwrap()
            .unwrap();
        assert_eq!(loaded.id(), id);
        assert_eq!(loaded.listing_id(), 49599459);
        assert_eq!(loaded.guest(), reservation.guest());
        assert_eq!(loaded.stay(), reservation.stay());
        assert_eq!(loaded.quote(), reservation.quote());
        assert_eq!(loaded.status(), Status::Pending);
        assert_eq!(loaded.payment_status(), PaymentStatus::Pending);
    }

    #[test]
    fn test_get_nonexistent() {
        let db = create_test_database();
        let result = Database::get_reservation(db.connection(), 999).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut db = create_test_database();
        let first = db
            .insert_reservation(&test_reservation(1, "2024-06-10", "2024-06-12"))
            .unwrap();
        let second = db
            .insert_reservation(&test_reservation(1, "2024-06-12", "2024-06-14"))
            .unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_list_newest_first() {
        let mut db = create_test_database();
        let first = db
            .insert_reservation(&test_reservation(1, "2024-06-10", "2024-06-12"))
            .unwrap();
        let second = db
            .insert_reservation(&test_reservation(1, "2024-06-12", "2024-06-14"))
            .unwrap();

        let all = Database::list_all_reservations(db.connection()).unwrap();
        assert_eq!(all.len(), 2);
        // Same creation second, so id order breaks the tie
        assert_eq!(all[0].id(), second);
        assert_eq!(all[1].id(), first);
    }

    #[test]
    fn test_update_status() {
        let mut db = create_test_database();
        let id = db
            .insert_reservation(&test_reservation(1, "2024-06-10", "2024-06-12"))
            .unwrap();

        let updated = db.update_status(id, Status::Confirmed).unwrap().unwrap();
        assert_eq!(updated.status(), Status::Confirmed);

        let missing = db.update_status(999, Status::Confirmed).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_mark_refunded() {
        let mut db = create_test_database();
        let id = db
            .insert_reservation(&test_reservation(1, "2024-06-10", "2024-06-12"))
            .unwrap();

        let updated = db.mark_refunded(id).unwrap().unwrap();
        assert_eq!(updated.status(), Status::Cancelled);
        assert_eq!(updated.payment_status(), PaymentStatus::Refunded);
    }

    #[test]
    fn test_update_payment() {
        let mut db = create_test_database();
        let id = db
            .insert_reservation(&test_reservation(1, "2024-06-10", "2024-06-12"))
            .unwrap();
        db.update_status(id, Status::Confirmed).unwrap();

        let updated = db
            .update_payment(id, PaymentStatus::Paid, Some("pi_1"), Some("card"))
            .unwrap()
            .unwrap();
        assert_eq!(updated.payment_status(), PaymentStatus::Paid);
        assert_eq!(updated.payment_intent_id(), Some("pi_1"));
        assert_eq!(updated.payment_method(), Some("card"));

        let missing = db
            .update_payment(999, PaymentStatus::Paid, Some("pi_1"), None)
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_set_calendar_event() {
        let mut db = create_test_database();
        let id = db
            .insert_reservation(&test_reservation(1, "2024-06-10", "2024-06-12"))
            .unwrap();

        assert!(db.set_calendar_event(id, Some("evt_42")).unwrap());
        let loaded = Database::get_reservation(db.connection(), id)
            .unwrap()
            .unwrap();
        assert_eq!(loaded.calendar_event_id(), Some("evt_42"));

        assert!(db.set_calendar_event(id, None).unwrap());
        let loaded = Database::get_reservation(db.connection(), id)
            .unwrap()
            .unwrap();
        assert_eq!(loaded.calendar_event_id(), None);
    }

    #[test]
    fn test_delete_reservation() {
        let mut db = create_test_database();
        let id = db
            .insert_reservation(&test_reservation(1, "2024-06-10", "2024-06-12"))
            .unwrap();

        assert!(db.delete_reservation(id).unwrap());
        assert!(!db.delete_reservation(id).unwrap());
        assert!(Database::get_reservation(db.connection(), id)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_list_active_ranges_excludes_cancelled() {
        let mut db = create_test_database();
        let first = db
            .insert_reservation(&test_reservation(7, "2024-06-12", "2024-06-14"))
            .unwrap();
        db.insert_reservation(&test_reservation(7, "2024-06-10", "2024-06-12"))
            .unwrap();
        db.insert_reservation(&test_reservation(8, "2024-06-01", "2024-06-05"))
            .unwrap();

        db.update_status(first, Status::Cancelled).unwrap();

        let ranges = Database::list_active_ranges(db.connection(), 7).unwrap();
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0], test_stay("2024-06-10", "2024-06-12"));
    }

    #[test]
    fn test_list_active_ranges_sorted_by_check_in() {
        let mut db = create_test_database();
        db.insert_reservation(&test_reservation(7, "2024-08-01", "2024-08-03"))
            .unwrap();
        db.insert_reservation(&test_reservation(7, "2024-06-10", "2024-06-12"))
            .unwrap();
        db.insert_reservation(&test_reservation(7, "2024-07-04", "2024-07-08"))
            .unwrap();

        let ranges = Database::list_active_ranges(db.connection(), 7).unwrap();
        let check_ins: Vec<_> = ranges.iter().map(|r| r.check_in()).collect();
        let mut sorted = check_ins.clone();
        sorted.sort();
        assert_eq!(check_ins, sorted);
    }
}
