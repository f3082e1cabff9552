//! Reservation lifecycle management.
//!
//! The [`BookingManager`] owns the reservation store and coordinates the
//! full lifecycle: quoting, availability checks, persistence, status
//! transitions, refunds, and best-effort calendar synchronization.
//!
//! All writes go through a single mutex so that the availability check
//! and the insert that depends on it are atomic with respect to other
//! bookings in this process. Collaborator calls that may block on the
//! network happen outside the lock.

use std::sync::{Mutex, MutexGuard};

use rust_decimal::Decimal;

use crate::availability;
use crate::database::{date_to_sql, Database};
use crate::error::{Error, Result};
use crate::integrations::{CalendarSync, PaymentGateway, PaymentIntent, PaymentMetadata};
use crate::pricing::{self, Quote};
use crate::reservation::{Guest, Occupancy, PaymentStatus, Reservation, Status};
use crate::stay::DateRange;

/// A request to book a stay.
///
/// Fees left unset fall back to house defaults: the standard cleaning
/// fee and no service fee.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use shoreline::{BookingRequest, DateRange, Guest};
///
/// let stay = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 7, 3).unwrap(),
/// )
/// .unwrap();
/// let guest = Guest::new("Ada Lovelace", "ada@example.com", None).unwrap();
///
/// let request = BookingRequest::new(49599459, guest, stay, Decimal::new(300, 0))
///     .with_cleaning_fee(Decimal::new(150, 0))
///     .with_special_requests("late arrival");
/// ```
#[derive(Debug, Clone)]
pub struct BookingRequest {
    /// The listing to book.
    pub listing_id: i64,
    /// Who is staying.
    pub guest: Guest,
    /// The requested date range.
    pub stay: DateRange,
    /// Occupant counts; defaults to one adult.
    pub occupancy: Occupancy,
    /// Price per night.
    pub nightly_rate: Decimal,
    /// Cleaning fee override; `None` uses the house default.
    pub cleaning_fee: Option<Decimal>,
    /// Service fee override; `None` means no service fee.
    pub service_fee: Option<Decimal>,
    /// Free-form guest notes.
    pub special_requests: Option<String>,
}

impl BookingRequest {
    /// Creates a booking request with default occupancy and fees.
    #[must_use]
    pub fn new(listing_id: i64, guest: Guest, stay: DateRange, nightly_rate: Decimal) -> Self {
        Self {
            listing_id,
            guest,
            stay,
            occupancy: Occupancy {
                adults: 1,
                children: 0,
                infants: 0,
                pets: 0,
            },
            nightly_rate,
            cleaning_fee: None,
            service_fee: None,
            special_requests: None,
        }
    }

    /// Sets the occupant counts.
    #[must_use]
    pub fn with_occupancy(mut self, occupancy: Occupancy) -> Self {
        self.occupancy = occupancy;
        self
    }

    /// Overrides the cleaning fee.
    #[must_use]
    pub fn with_cleaning_fee(mut self, fee: Decimal) -> Self {
        self.cleaning_fee = Some(fee);
        self
    }

    /// Sets the service fee.
    #[must_use]
    pub fn with_service_fee(mut self, fee: Decimal) -> Self {
        self.service_fee = Some(fee);
        self
    }

    /// Attaches free-form guest notes.
    #[must_use]
    pub fn with_special_requests(mut self, requests: impl Into<String>) -> Self {
        self.special_requests = Some(requests.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.nightly_rate < Decimal::ZERO {
            return Err(Error::Validation {
                field: "nightly_rate".into(),
                message: "nightly rate cannot be negative".into(),
            });
        }
        for (field, fee) in [("cleaning_fee", self.cleaning_fee), ("service_fee", self.service_fee)]
        {
            if let Some(fee) = fee {
                if fee < Decimal::ZERO {
                    return Err(Error::Validation {
                        field: field.into(),
                        message: "fees cannot be negative".into(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The price breakdown this request would be charged.
    #[must_use]
    pub fn quote(&self) -> Quote {
        pricing::quote(
            self.nightly_rate,
            &self.stay,
            self.cleaning_fee.unwrap_or_else(pricing::default_cleaning_fee),
            self.service_fee.unwrap_or(Decimal::ZERO),
        )
    }
}

/// Coordinates reservations, availability, payments, and calendar sync.
///
/// The manager is `Send + Sync` and designed to be shared across request
/// handlers behind an `Arc`.
pub struct BookingManager {
    db: Mutex<Database>,
    payment: Option<Box<dyn PaymentGateway>>,
    calendar: Option<Box<dyn CalendarSync>>,
}

impl std::fmt::Debug for BookingManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingManager")
            .field("payment", &self.payment.is_some())
            .field("calendar", &self.calendar.is_some())
            .finish_non_exhaustive()
    }
}

impl BookingManager {
    /// Creates a manager with no external collaborators.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self {
            db: Mutex::new(db),
            payment: None,
            calendar: None,
        }
    }

    /// Wires in a payment gateway.
    #[must_use]
    pub fn with_payment_gateway(mut self, gateway: Box<dyn PaymentGateway>) -> Self {
        self.payment = Some(gateway);
        self
    }

    /// Wires in calendar synchronization.
    #[must_use]
    pub fn with_calendar_sync(mut self, calendar: Box<dyn CalendarSync>) -> Self {
        self.calendar = Some(calendar);
        self
    }

    fn lock_db(&self) -> Result<MutexGuard<'_, Database>> {
        self.db.lock().map_err(|_| Error::LockPoisoned)
    }

    fn payment_gateway(&self) -> Result<&dyn PaymentGateway> {
        self.payment
            .as_deref()
            .ok_or_else(|| Error::CollaboratorUnavailable {
                capability: "payment processing".into(),
            })
    }

    /// Creates a pending reservation without payment.
    ///
    /// The availability check and the insert happen under one lock, so
    /// two overlapping requests cannot both succeed. Calendar sync runs
    /// after the reservation is durable and never fails the booking.
    ///
    /// # Errors
    ///
    /// Returns `Error::DateConflict` if the requested dates overlap an
    /// active reservation, `Error::Validation` for bad inputs, or a
    /// database error.
    pub fn create(&self, request: &BookingRequest) -> Result<Reservation> {
        request.validate()?;
        let reservation = self.persist(request, Status::Pending, PaymentStatus::Pending, None, None)?;
        Ok(self.sync_calendar(reservation))
    }

    /// Creates a confirmed reservation backed by a verified charge.
    ///
    /// The charge is verified with the gateway before the lock is taken.
    /// If the dates were taken while the charge settled, the charge is
    /// refunded and the conflict reported.
    ///
    /// # Errors
    ///
    /// Returns `Error::CollaboratorUnavailable` if no gateway is wired,
    /// `Error::PaymentVerification` if the charge did not succeed, and
    /// `Error::DateConflict` if the dates were lost to another booking.
    pub fn create_with_payment(
        &self,
        request: &BookingRequest,
        intent_id: &str,
        payment_method: Option<String>,
    ) -> Result<Reservation> {
        request.validate()?;
        let gateway = self.payment_gateway()?;

        if !gateway.verify_succeeded(intent_id)? {
            return Err(Error::PaymentVerification {
                reason: format!("payment intent '{intent_id}' has not succeeded"),
            });
        }

        let result = self.persist(
            request,
            Status::Confirmed,
            PaymentStatus::Paid,
            Some(intent_id.to_string()),
            payment_method,
        );

        match result {
            Ok(reservation) => Ok(self.sync_calendar(reservation)),
            Err(err @ Error::DateConflict { .. }) => {
                // The dates were taken while the charge settled; give the
                // money back before reporting the conflict.
                match gateway.refund(intent_id) {
                    Ok(refund_id) => {
                        log::info!("refunded intent {intent_id} after late conflict: {refund_id}");
                    }
                    Err(refund_err) => {
                        log::warn!(
                            "failed to refund intent {intent_id} after late conflict: {refund_err}"
                        );
                    }
                }
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Creates a payment intent for the quoted total of a request.
    ///
    /// # Errors
    ///
    /// Returns `Error::CollaboratorUnavailable` if no gateway is wired,
    /// or whatever error the gateway reports.
    pub fn create_payment_intent(
        &self,
        request: &BookingRequest,
        currency: &str,
    ) -> Result<PaymentIntent> {
        request.validate()?;
        let gateway = self.payment_gateway()?;
        let quote = request.quote();
        let metadata = PaymentMetadata {
            listing_id: request.listing_id,
            guest_name: request.guest.name.clone(),
            check_in: date_to_sql(request.stay.check_in()),
            check_out: date_to_sql(request.stay.check_out()),
        };
        gateway.create_intent(quote.total, currency, &metadata)
    }

    /// Conflict-checks and inserts under one lock.
    fn persist(
        &self,
        request: &BookingRequest,
        status: Status,
        payment_status: PaymentStatus,
        payment_intent_id: Option<String>,
        payment_method: Option<String>,
    ) -> Result<Reservation> {
        let reservation = Reservation::builder(
            request.listing_id,
            request.guest.clone(),
            request.stay,
            request.quote(),
        )
        .occupancy(request.occupancy)
        .special_requests(request.special_requests.clone())
        .status(status)
        .payment_status(payment_status)
        .payment_intent_id(payment_intent_id)
        .payment_method(payment_method)
        .build()?;

        let mut db = self.lock_db()?;

        let conflicts = availability::conflicting_reservations(
            db.connection(),
            request.listing_id,
            &request.stay,
            None,
        )?;
        if !conflicts.is_empty() {
            return Err(Error::DateConflict {
                listing_id: request.listing_id,
                conflicts: conflicts.iter().map(|r| *r.stay()).collect(),
            });
        }

        let id = db.insert_reservation(&reservation)?;
        Database::get_reservation(db.connection(), id)?.ok_or_else(|| Error::NotFound {
            resource: format!("reservation {id}"),
        })
    }

    /// Best-effort calendar upsert for a fresh reservation.
    ///
    /// Failures are logged and leave the reservation without an event id.
    fn sync_calendar(&self, reservation: Reservation) -> Reservation {
        let Some(calendar) = self.calendar.as_deref() else {
            return reservation;
        };

        match calendar.upsert_event(&reservation) {
            Ok(Some(event_id)) => {
                match self.record_calendar_event(reservation.id(), Some(&event_id)) {
                    Ok(updated) => updated,
                    Err(e) => {
                        log::warn!(
                            "failed to record calendar event for reservation {}: {e}",
                            reservation.id()
                        );
                        reservation
                    }
                }
            }
            Ok(None) => reservation,
            Err(e) => {
                log::warn!(
                    "calendar sync failed for reservation {}: {e}",
                    reservation.id()
                );
                reservation
            }
        }
    }

    fn record_calendar_event(&self, id: i64, event_id: Option<&str>) -> Result<Reservation> {
        let mut db = self.lock_db()?;
        db.set_calendar_event(id, event_id)?;
        Database::get_reservation(db.connection(), id)?.ok_or_else(|| Error::NotFound {
            resource: format!("reservation {id}"),
        })
    }

    /// Best-effort removal of a reservation's calendar event.
    fn remove_calendar_event(&self, reservation: &Reservation) {
        let (Some(calendar), Some(event_id)) =
            (self.calendar.as_deref(), reservation.calendar_event_id())
        else {
            return;
        };

        if let Err(e) = calendar.delete_event(event_id) {
            log::warn!(
                "failed to delete calendar event {event_id} for reservation {}: {e}",
                reservation.id()
            );
        }
    }

    /// Retrieves a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no reservation has this id.
    pub fn get(&self, id: i64) -> Result<Reservation> {
        let db = self.lock_db()?;
        Database::get_reservation(db.connection(), id)?.ok_or_else(|| Error::NotFound {
            resource: format!("reservation {id}"),
        })
    }

    /// Lists all reservations, newest first.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn list(&self) -> Result<Vec<Reservation>> {
        let db = self.lock_db()?;
        Database::list_all_reservations(db.connection())
    }

    /// Lists the occupied date ranges for a listing, earliest first.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn booked_ranges(&self, listing_id: i64) -> Result<Vec<DateRange>> {
        let db = self.lock_db()?;
        Database::list_active_ranges(db.connection(), listing_id)
    }

    /// Moves a reservation to a new booking status.
    ///
    /// Cancelling also removes the reservation's calendar event, best
    /// effort. Refund-driven transitions go through [`Self::refund`].
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` for unknown ids and
    /// `Error::InvalidTransition` for edges the state machine forbids.
    pub fn transition(&self, id: i64, next: Status) -> Result<Reservation> {
        let updated = {
            let mut db = self.lock_db()?;

            let current =
                Database::get_reservation(db.connection(), id)?.ok_or_else(|| Error::NotFound {
                    resource: format!("reservation {id}"),
                })?;

            if !current.status().can_transition_to(next) {
                return Err(Error::InvalidTransition {
                    from: current.status(),
                    to: next,
                });
            }

            db.update_status(id, next)?.ok_or_else(|| Error::NotFound {
                resource: format!("reservation {id}"),
            })?
        };

        if next == Status::Cancelled {
            self.remove_calendar_event(&updated);
            return self.record_calendar_event(id, None);
        }
        Ok(updated)
    }

    /// Refunds a reservation's payment and cancels it.
    ///
    /// This is the only path out of `Completed`, and it requires a
    /// payment on record.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` for unknown ids,
    /// `Error::AlreadyRefunded` if the payment was already returned,
    /// `Error::Validation` if the reservation has no payment on record,
    /// and `Error::CollaboratorUnavailable` if no gateway is wired.
    pub fn refund(&self, id: i64) -> Result<Reservation> {
        let current = self.get(id)?;

        if current.payment_status() == PaymentStatus::Refunded {
            return Err(Error::AlreadyRefunded { id });
        }
        let Some(intent_id) = current.payment_intent_id() else {
            return Err(Error::Validation {
                field: "payment_intent_id".into(),
                message: format!("reservation {id} has no payment on record"),
            });
        };

        let gateway = self.payment_gateway()?;
        let refund_id = gateway.refund(intent_id)?;
        log::info!("refunded reservation {id}: {refund_id}");

        let updated = {
            let mut db = self.lock_db()?;
            db.mark_refunded(id)?.ok_or_else(|| Error::NotFound {
                resource: format!("reservation {id}"),
            })?
        };

        self.remove_calendar_event(&updated);
        if updated.calendar_event_id().is_some() {
            return self.record_calendar_event(id, None);
        }
        Ok(updated)
    }

    /// Records a refund that was processed outside any wired gateway.
    ///
    /// Same state checks as [`Self::refund`], but no money moves; use
    /// this when the charge was returned out of band.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` for unknown ids,
    /// `Error::AlreadyRefunded` if already refunded, and
    /// `Error::Validation` if the reservation was never paid.
    pub fn record_refund(&self, id: i64) -> Result<Reservation> {
        let current = self.get(id)?;

        if current.payment_status() == PaymentStatus::Refunded {
            return Err(Error::AlreadyRefunded { id });
        }
        if current.payment_status() != PaymentStatus::Paid {
            return Err(Error::Validation {
                field: "payment_status".into(),
                message: format!("reservation {id} has no payment on record"),
            });
        }

        let updated = {
            let mut db = self.lock_db()?;
            db.mark_refunded(id)?.ok_or_else(|| Error::NotFound {
                resource: format!("reservation {id}"),
            })?
        };

        self.remove_calendar_event(&updated);
        if updated.calendar_event_id().is_some() {
            return self.record_calendar_event(id, None);
        }
        Ok(updated)
    }

    /// Permanently deletes a reservation.
    ///
    /// No refund is issued; use [`Self::refund`] first if money should
    /// move. The calendar event, if any, is removed best effort.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` for unknown ids.
    pub fn delete(&self, id: i64) -> Result<()> {
        let current = self.get(id)?;
        self.remove_calendar_event(&current);

        let mut db = self.lock_db()?;
        if !db.delete_reservation(id)? {
            return Err(Error::NotFound {
                resource: format!("reservation {id}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;
    use crate::integrations::{MockCalendarSync, MockPaymentGateway};
    use chrono::NaiveDate;

    fn range(check_in: &str, check_out: &str) -> DateRange {
        DateRange::new(
            NaiveDate::parse_from_str(check_in, "%Y-%m-%d").unwrap(),
            NaiveDate::parse_from_str(check_out, "%Y-%m-%d").unwrap(),
        )
        .unwrap()
    }

    fn request(listing_id: i64, check_in: &str, check_out: &str) -> BookingRequest {
        let guest = Guest::new("Ada Lovelace", "ada@example.com", None).unwrap();
        BookingRequest::new(
            listing_id,
            guest,
            range(check_in, check_out),
            Decimal::new(300, 0),
        )
    }

    fn manager() -> BookingManager {
        BookingManager::new(create_test_database())
    }

    #[test]
    fn test_create_pending_reservation() {
        let manager = manager();
        let created = manager.create(&request(7, "2024-06-10", "2024-06-12")).unwrap();

        assert!(created.id() > 0);
        assert_eq!(created.status(), Status::Pending);
        assert_eq!(created.payment_status(), PaymentStatus::Pending);
        assert_eq!(created.quote().total.to_string(), "906.87");
    }

    #[test]
    fn test_create_rejects_overlap() {
        let manager = manager();
        manager.create(&request(7, "2024-06-10", "2024-06-14")).unwrap();

        let err = manager
            .create(&request(7, "2024-06-12", "2024-06-16"))
            .unwrap_err();
        match err {
            Error::DateConflict { listing_id, conflicts } => {
                assert_eq!(listing_id, 7);
                assert_eq!(conflicts, vec![range("2024-06-10", "2024-06-14")]);
            }
            other => panic!("expected DateConflict, got {other:?}"),
        }
    }

    #[test]
    fn test_create_allows_back_to_back() {
        let manager = manager();
        manager.create(&request(7, "2024-06-10", "2024-06-12")).unwrap();
        manager.create(&request(7, "2024-06-12", "2024-06-14")).unwrap();
    }

    #[test]
    fn test_create_rejects_negative_rate() {
        let manager = manager();
        let mut bad = request(7, "2024-06-10", "2024-06-12");
        bad.nightly_rate = Decimal::new(-1, 0);
        let err = manager.create(&bad).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_create_records_calendar_event() {
        let mut calendar = MockCalendarSync::new();
        calendar
            .expect_upsert_event()
            .returning(|_| Ok(Some("evt_1".into())));

        let manager = manager().with_calendar_sync(Box::new(calendar));
        let created = manager.create(&request(7, "2024-06-10", "2024-06-12")).unwrap();
        assert_eq!(created.calendar_event_id(), Some("evt_1"));
    }

    #[test]
    fn test_calendar_failure_does_not_fail_booking() {
        let mut calendar = MockCalendarSync::new();
        calendar.expect_upsert_event().returning(|_| {
            Err(Error::Validation {
                field: "calendar".into(),
                message: "provider down".into(),
            })
        });

        let manager = manager().with_calendar_sync(Box::new(calendar));
        let created = manager.create(&request(7, "2024-06-10", "2024-06-12")).unwrap();
        assert_eq!(created.calendar_event_id(), None);
        assert_eq!(manager.get(created.id()).unwrap().status(), Status::Pending);
    }

    #[test]
    fn test_create_with_payment_requires_gateway() {
        let manager = manager();
        let err = manager
            .create_with_payment(&request(7, "2024-06-10", "2024-06-12"), "pi_1", None)
            .unwrap_err();
        assert!(matches!(err, Error::CollaboratorUnavailable { .. }));
    }

    #[test]
    fn test_create_with_payment_rejects_unverified_charge() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_verify_succeeded().returning(|_| Ok(false));

        let manager = manager().with_payment_gateway(Box::new(gateway));
        let err = manager
            .create_with_payment(&request(7, "2024-06-10", "2024-06-12"), "pi_1", None)
            .unwrap_err();
        assert!(matches!(err, Error::PaymentVerification { .. }));
        assert!(manager.list().unwrap().is_empty());
    }

    #[test]
    fn test_create_with_payment_happy_path() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_verify_succeeded().returning(|_| Ok(true));

        let manager = manager().with_payment_gateway(Box::new(gateway));
        let created = manager
            .create_with_payment(
                &request(7, "2024-06-10", "2024-06-12"),
                "pi_1",
                Some("card".into()),
            )
            .unwrap();

        assert_eq!(created.status(), Status::Confirmed);
        assert_eq!(created.payment_status(), PaymentStatus::Paid);
        assert_eq!(created.payment_intent_id(), Some("pi_1"));
        assert_eq!(created.payment_method(), Some("card"));
    }

    #[test]
    fn test_create_with_payment_refunds_on_late_conflict() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_verify_succeeded().returning(|_| Ok(true));
        gateway
            .expect_refund()
            .times(1)
            .returning(|_| Ok("re_1".into()));

        let manager = manager().with_payment_gateway(Box::new(gateway));
        manager.create(&request(7, "2024-06-10", "2024-06-14")).unwrap();

        let err = manager
            .create_with_payment(&request(7, "2024-06-12", "2024-06-16"), "pi_1", None)
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(manager.list().unwrap().len(), 1);
    }

    #[test]
    fn test_create_payment_intent_uses_quoted_total() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_intent()
            .withf(|amount, currency, metadata| {
                amount.to_string() == "906.87" && currency == "usd" && metadata.listing_id == 7
            })
            .returning(|_, _, _| {
                Ok(PaymentIntent {
                    id: "pi_1".into(),
                    client_secret: "secret".into(),
                })
            });

        let manager = manager().with_payment_gateway(Box::new(gateway));
        let intent = manager
            .create_payment_intent(&request(7, "2024-06-10", "2024-06-12"), "usd")
            .unwrap();
        assert_eq!(intent.id, "pi_1");
    }

    #[test]
    fn test_transition_confirm_then_complete() {
        let manager = manager();
        let id = manager
            .create(&request(7, "2024-06-10", "2024-06-12"))
            .unwrap()
            .id();

        let confirmed = manager.transition(id, Status::Confirmed).unwrap();
        assert_eq!(confirmed.status(), Status::Confirmed);

        let completed = manager.transition(id, Status::Completed).unwrap();
        assert_eq!(completed.status(), Status::Completed);
    }

    #[test]
    fn test_transition_rejects_illegal_edge() {
        let manager = manager();
        let id = manager
            .create(&request(7, "2024-06-10", "2024-06-12"))
            .unwrap()
            .id();
        manager.transition(id, Status::Cancelled).unwrap();

        let err = manager.transition(id, Status::Confirmed).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTransition {
                from: Status::Cancelled,
                to: Status::Confirmed,
            }
        ));
    }

    #[test]
    fn test_transition_unknown_id() {
        let manager = manager();
        let err = manager.transition(999, Status::Confirmed).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_cancel_frees_dates() {
        let manager = manager();
        let id = manager
            .create(&request(7, "2024-06-10", "2024-06-14"))
            .unwrap()
            .id();
        manager.transition(id, Status::Cancelled).unwrap();

        // Same dates are bookable again
        manager.create(&request(7, "2024-06-10", "2024-06-14")).unwrap();
    }

    #[test]
    fn test_cancel_removes_calendar_event() {
        let mut calendar = MockCalendarSync::new();
        calendar
            .expect_upsert_event()
            .returning(|_| Ok(Some("evt_1".into())));
        calendar
            .expect_delete_event()
            .withf(|event_id| event_id == "evt_1")
            .times(1)
            .returning(|_| Ok(()));

        let manager = manager().with_calendar_sync(Box::new(calendar));
        let id = manager
            .create(&request(7, "2024-06-10", "2024-06-12"))
            .unwrap()
            .id();

        let cancelled = manager.transition(id, Status::Cancelled).unwrap();
        assert_eq!(cancelled.calendar_event_id(), None);
    }

    #[test]
    fn test_refund_cancels_and_marks_refunded() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_verify_succeeded().returning(|_| Ok(true));
        gateway.expect_refund().returning(|_| Ok("re_1".into()));

        let manager = manager().with_payment_gateway(Box::new(gateway));
        let id = manager
            .create_with_payment(&request(7, "2024-06-10", "2024-06-12"), "pi_1", None)
            .unwrap()
            .id();

        let refunded = manager.refund(id).unwrap();
        assert_eq!(refunded.status(), Status::Cancelled);
        assert_eq!(refunded.payment_status(), PaymentStatus::Refunded);
    }

    #[test]
    fn test_refund_is_the_path_out_of_completed() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_verify_succeeded().returning(|_| Ok(true));
        gateway.expect_refund().returning(|_| Ok("re_1".into()));

        let manager = manager().with_payment_gateway(Box::new(gateway));
        let id = manager
            .create_with_payment(&request(7, "2024-06-10", "2024-06-12"), "pi_1", None)
            .unwrap()
            .id();
        manager.transition(id, Status::Completed).unwrap();

        let refunded = manager.refund(id).unwrap();
        assert_eq!(refunded.status(), Status::Cancelled);
    }

    #[test]
    fn test_double_refund_rejected() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_verify_succeeded().returning(|_| Ok(true));
        gateway.expect_refund().times(1).returning(|_| Ok("re_1".into()));

        let manager = manager().with_payment_gateway(Box::new(gateway));
        let id = manager
            .create_with_payment(&request(7, "2024-06-10", "2024-06-12"), "pi_1", None)
            .unwrap()
            .id();

        manager.refund(id).unwrap();
        let err = manager.refund(id).unwrap_err();
        assert!(matches!(err, Error::AlreadyRefunded { id: got } if got == id));
    }

    #[test]
    fn test_refund_requires_payment_on_record() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_refund().times(0);

        let manager = manager().with_payment_gateway(Box::new(gateway));
        let id = manager
            .create(&request(7, "2024-06-10", "2024-06-12"))
            .unwrap()
            .id();

        let err = manager.refund(id).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_record_refund_without_gateway() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_verify_succeeded().returning(|_| Ok(true));
        gateway.expect_refund().times(0);

        let manager = manager().with_payment_gateway(Box::new(gateway));
        let id = manager
            .create_with_payment(&request(7, "2024-06-10", "2024-06-12"), "pi_1", None)
            .unwrap()
            .id();

        let refunded = manager.record_refund(id).unwrap();
        assert_eq!(refunded.status(), Status::Cancelled);
        assert_eq!(refunded.payment_status(), PaymentStatus::Refunded);
    }

    #[test]
    fn test_record_refund_requires_paid() {
        let manager = manager();
        let id = manager
            .create(&request(7, "2024-06-10", "2024-06-12"))
            .unwrap()
            .id();

        let err = manager.record_refund(id).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_delete_removes_reservation() {
        let manager = manager();
        let id = manager
            .create(&request(7, "2024-06-10", "2024-06-12"))
            .unwrap()
            .id();

        manager.delete(id).unwrap();
        assert!(manager.get(id).unwrap_err().is_not_found());
        assert!(manager.delete(id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_and_booked_ranges() {
        let manager = manager();
        manager.create(&request(7, "2024-06-10", "2024-06-12")).unwrap();
        manager.create(&request(7, "2024-06-14", "2024-06-16")).unwrap();
        manager.create(&request(8, "2024-06-10", "2024-06-12")).unwrap();

        assert_eq!(manager.list().unwrap().len(), 3);

        let ranges = manager.booked_ranges(7).unwrap();
        assert_eq!(
            ranges,
            vec![
                range("2024-06-10", "2024-06-12"),
                range("2024-06-14", "2024-06-16"),
            ]
        );
    }
}
