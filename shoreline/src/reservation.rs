//! Reservation records and the booking status state machine.
//!
//! This module provides the core `Reservation` entity together with
//! its guest, occupancy, and status types, and a builder for
//! validated construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pricing::Quote;
use crate::stay::DateRange;

/// Booking status of a reservation.
///
/// Transitions are one-directional: `Cancelled` and `Completed` are
/// terminal for administrative transitions. The only way out of
/// `Completed` is a refund, which writes `Cancelled` together with
/// `PaymentStatus::Refunded` in a single operation.
///
/// # Examples
///
/// ```
/// use shoreline::Status;
///
/// assert!(Status::Pending.can_transition_to(Status::Confirmed));
/// assert!(Status::Confirmed.can_transition_to(Status::Completed));
/// assert!(!Status::Cancelled.can_transition_to(Status::Confirmed));
/// assert!(Status::Completed.is_terminal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Created without verified payment; awaiting admin confirmation.
    Pending,
    /// Confirmed by an admin or by synchronous payment verification.
    Confirmed,
    /// Cancelled; its dates no longer block availability.
    Cancelled,
    /// The stay happened.
    Completed,
}

impl Status {
    /// Returns the lowercase wire representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Parses a status from its wire representation.
    ///
    /// # Errors
    ///
    /// Returns a validation error for anything other than
    /// `pending`, `confirmed`, `cancelled`, or `completed`.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            _ => Err(ValidationError {
                field: "status".into(),
                message: format!(
                    "invalid status '{s}': must be pending, confirmed, cancelled, or completed"
                ),
            }),
        }
    }

    /// Whether this status admits no further administrative transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Whether an administrative transition to `next` is legal.
    ///
    /// Refund-driven cancellation of a completed stay is handled by the
    /// refund operation, not here.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Pending, Self::Confirmed | Self::Cancelled)
            | (Self::Confirmed, Self::Cancelled | Self::Completed) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment status of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// No verified payment on record.
    Pending,
    /// A charge was verified before the reservation was persisted.
    Paid,
    /// The charge was refunded; the reservation is cancelled.
    Refunded,
}

impl PaymentStatus {
    /// Returns the lowercase wire representation of this payment status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Refunded => "refunded",
        }
    }

    /// Parses a payment status from its wire representation.
    ///
    /// # Errors
    ///
    /// Returns a validation error for unknown values.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "refunded" => Ok(Self::Refunded),
            _ => Err(ValidationError {
                field: "payment_status".into(),
                message: format!("invalid payment status '{s}'"),
            }),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guest identity attached to a reservation.
///
/// Name and email are required; phone is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    /// Full name of the guest.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Optional contact phone number.
    pub phone: Option<String>,
}

impl Guest {
    /// Creates a guest, trimming whitespace from all fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, or the email is empty or
    /// not addressable (no `@`).
    ///
    /// # Examples
    ///
    /// ```
    /// use shoreline::Guest;
    ///
    /// let guest = Guest::new("Ada Lovelace", "ada@example.com", None).unwrap();
    /// assert_eq!(guest.name, "Ada Lovelace");
    ///
    /// assert!(Guest::new("", "ada@example.com", None).is_err());
    /// assert!(Guest::new("Ada", "not-an-email", None).is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError {
                field: "guest_name".into(),
                message: "guest name is required".into(),
            });
        }

        let email = email.into().trim().to_string();
        if email.is_empty() {
            return Err(ValidationError {
                field: "guest_email".into(),
                message: "guest email is required".into(),
            });
        }
        if !email.contains('@') {
            return Err(ValidationError {
                field: "guest_email".into(),
                message: format!("'{email}' is not a valid email address"),
            });
        }

        let phone = phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(Self { name, email, phone })
    }
}

/// Occupant counts for a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    /// Number of adults; at least 1.
    pub adults: u32,
    /// Number of children.
    pub children: u32,
    /// Number of infants.
    pub infants: u32,
    /// Number of pets.
    pub pets: u32,
}

impl Occupancy {
    /// Creates an occupancy record.
    ///
    /// # Errors
    ///
    /// Returns an error if `adults` is zero; a reservation always has
    /// at least one adult guest.
    pub fn new(adults: u32, children: u32, infants: u32, pets: u32) -> Result<Self, ValidationError> {
        if adults == 0 {
            return Err(ValidationError {
                field: "adults".into(),
                message: "at least one adult is required".into(),
            });
        }
        Ok(Self {
            adults,
            children,
            infants,
            pets,
        })
    }
}

impl Default for Occupancy {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            infants: 0,
            pets: 0,
        }
    }
}

/// A persisted reservation record.
///
/// Reservations are the single source of truth for booked date ranges.
/// The price breakdown is a snapshot frozen at creation time; only the
/// status fields and collaborator references are ever mutated.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use shoreline::{pricing, DateRange, Guest, Reservation};
///
/// let stay = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 7, 3).unwrap(),
/// )
/// .unwrap();
/// let guest = Guest::new("Ada Lovelace", "ada@example.com", None).unwrap();
/// let quote = pricing::quote(Decimal::new(300, 0), &stay, Decimal::ZERO, Decimal::ZERO);
///
/// let reservation = Reservation::builder(49599459, guest, stay, quote)
///     .build()
///     .unwrap();
/// assert_eq!(reservation.listing_id(), 49599459);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    id: i64,
    listing_id: i64,
    guest: Guest,
    stay: DateRange,
    occupancy: Occupancy,
    quote: Quote,
    special_requests: Option<String>,
    status: Status,
    payment_status: PaymentStatus,
    payment_intent_id: Option<String>,
    payment_method: Option<String>,
    calendar_event_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a new reservation builder.
    ///
    /// The id defaults to 0 until the store assigns one on insert.
    #[must_use]
    pub fn builder(listing_id: i64, guest: Guest, stay: DateRange, quote: Quote) -> ReservationBuilder {
        ReservationBuilder {
            id: 0,
            listing_id,
            guest,
            stay,
            occupancy: Occupancy::default(),
            quote,
            special_requests: None,
            status: Status::Pending,
            payment_status: PaymentStatus::Pending,
            payment_intent_id: None,
            payment_method: None,
            calendar_event_id: None,
            created_at: None,
        }
    }

    /// Returns the store-assigned id (0 before insertion).
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Returns the listing this reservation belongs to.
    #[must_use]
    pub const fn listing_id(&self) -> i64 {
        self.listing_id
    }

    /// Returns the guest identity.
    #[must_use]
    pub const fn guest(&self) -> &Guest {
        &self.guest
    }

    /// Returns the booked date range.
    #[must_use]
    pub const fn stay(&self) -> &DateRange {
        &self.stay
    }

    /// Returns the occupant counts.
    #[must_use]
    pub const fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    /// Returns the frozen price snapshot.
    #[must_use]
    pub const fn quote(&self) -> &Quote {
        &self.quote
    }

    /// Returns the optional special-requests text.
    #[must_use]
    pub fn special_requests(&self) -> Option<&str> {
        self.special_requests.as_deref()
    }

    /// Returns the booking status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the payment status.
    #[must_use]
    pub const fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    /// Returns the external payment reference, if a charge was captured.
    #[must_use]
    pub fn payment_intent_id(&self) -> Option<&str> {
        self.payment_intent_id.as_deref()
    }

    /// Returns the payment method descriptor, if known.
    #[must_use]
    pub fn payment_method(&self) -> Option<&str> {
        self.payment_method.as_deref()
    }

    /// Returns the external calendar event reference, if sync succeeded.
    #[must_use]
    pub fn calendar_event_id(&self) -> Option<&str> {
        self.calendar_event_id.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether this reservation's dates still block availability.
    #[must_use]
    pub const fn blocks_dates(&self) -> bool {
        !matches!(self.status, Status::Cancelled)
    }
}

/// Builder for creating `Reservation` instances.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: i64,
    listing_id: i64,
    guest: Guest,
    stay: DateRange,
    occupancy: Occupancy,
    quote: Quote,
    special_requests: Option<String>,
    status: Status,
    payment_status: PaymentStatus,
    payment_intent_id: Option<String>,
    payment_method: Option<String>,
    calendar_event_id: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl ReservationBuilder {
    /// Sets the store-assigned id (used when loading rows).
    #[must_use]
    pub const fn id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Sets the occupant counts.
    #[must_use]
    pub const fn occupancy(mut self, occupancy: Occupancy) -> Self {
        self.occupancy = occupancy;
        self
    }

    /// Sets the special-requests text; blank strings become `None`.
    #[must_use]
    pub fn special_requests(mut self, requests: Option<String>) -> Self {
        self.special_requests = requests
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        self
    }

    /// Sets the booking status.
    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Sets the payment status.
    #[must_use]
    pub const fn payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = payment_status;
        self
    }

    /// Sets the external payment reference.
    #[must_use]
    pub fn payment_intent_id(mut self, reference: Option<String>) -> Self {
        self.payment_intent_id = reference;
        self
    }

    /// Sets the payment method descriptor.
    #[must_use]
    pub fn payment_method(mut self, method: Option<String>) -> Self {
        self.payment_method = method;
        self
    }

    /// Sets the external calendar event reference.
    #[must_use]
    pub fn calendar_event_id(mut self, reference: Option<String>) -> Self {
        self.calendar_event_id = reference;
        self
    }

    /// Sets the creation timestamp (used when loading rows).
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if `payment_status` is `Paid` but `status` is
    /// `Pending` (a verified payment always starts a reservation as
    /// confirmed), or if a paid reservation has no payment reference.
    pub fn build(self) -> Result<Reservation, ValidationError> {
        if self.payment_status == PaymentStatus::Paid && self.status == Status::Pending {
            return Err(ValidationError {
                field: "status".into(),
                message: "a paid reservation cannot start as pending".into(),
            });
        }
        if self.payment_status == PaymentStatus::Paid && self.payment_intent_id.is_none() {
            return Err(ValidationError {
                field: "payment_intent_id".into(),
                message: "paid reservations require a payment reference".into(),
            });
        }

        Ok(Reservation {
            id: self.id,
            listing_id: self.listing_id,
            guest: self.guest,
            stay: self.stay,
            occupancy: self.occupancy,
            quote: self.quote,
            special_requests: self.special_requests,
            status: self.status,
            payment_status: self.payment_status,
            payment_intent_id: self.payment_intent_id,
            payment_method: self.payment_method,
            calendar_event_id: self.calendar_event_id,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
