//! Pricing calculator for reservation quotes.
//!
//! Quotes are computed once at booking time and frozen onto the
//! reservation record; nothing recomputes prices on read. The math is
//! deliberately simple: nights times rate, plus cleaning and service
//! fees, plus a flat 13.5% occupancy tax on the taxable amount
//! (subtotal + cleaning fee), rounded half-up to cents.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::stay::DateRange;

/// Flat occupancy tax rate applied to (subtotal + cleaning fee).
#[must_use]
pub fn tax_rate() -> Decimal {
    // 13.5%
    Decimal::new(135, 3)
}

/// Default cleaning fee when a booking does not override it.
#[must_use]
pub fn default_cleaning_fee() -> Decimal {
    Decimal::new(199, 0)
}

/// A frozen price breakdown for a stay.
///
/// Every monetary field is an exact decimal; the snapshot is persisted
/// verbatim with the reservation and never recomputed.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use shoreline::{pricing, DateRange};
///
/// let stay = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 7, 3).unwrap(),
/// )
/// .unwrap();
///
/// let quote = pricing::quote(
///     Decimal::new(300, 0),
///     &stay,
///     pricing::default_cleaning_fee(),
///     Decimal::ZERO,
/// );
///
/// assert_eq!(quote.nights, 2);
/// assert_eq!(quote.subtotal, Decimal::new(600, 0));
/// assert_eq!(quote.tax, Decimal::new(10787, 2)); // (600 + 199) * 0.135
/// assert_eq!(quote.total, Decimal::new(90687, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Number of nights in the stay.
    pub nights: i64,
    /// The nightly rate the quote was computed from.
    pub nightly_rate: Decimal,
    /// `nights * nightly_rate`.
    pub subtotal: Decimal,
    /// Flat cleaning fee.
    pub cleaning_fee: Decimal,
    /// Flat service fee.
    pub service_fee: Decimal,
    /// Tax on (subtotal + cleaning fee), rounded half-up to cents.
    pub tax: Decimal,
    /// `subtotal + cleaning_fee + service_fee + tax`.
    pub total: Decimal,
}

/// Computes a price quote for a stay.
///
/// This function is pure and deterministic: identical inputs always
/// produce an identical breakdown, which is what makes the persisted
/// snapshot trustworthy.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use shoreline::{pricing, DateRange};
///
/// let stay = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 11).unwrap(),
/// )
/// .unwrap();
/// let quote = pricing::quote(Decimal::new(350, 0), &stay, Decimal::ZERO, Decimal::ZERO);
/// assert_eq!(quote.total, Decimal::new(39725, 2)); // 350 + 47.25 tax
/// ```
#[must_use]
pub fn quote(
    nightly_rate: Decimal,
    stay: &DateRange,
    cleaning_fee: Decimal,
    service_fee: Decimal,
) -> Quote {
    let nights = stay.nights();
    let subtotal = nightly_rate * Decimal::from(nights);
    let taxable = subtotal + cleaning_fee;
    let tax = (taxable * tax_rate())
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let total = subtotal + cleaning_fee + service_fee + tax;

    Quote {
        nights,
        nightly_rate,
        subtotal,
        cleaning_fee,
        service_fee,
        tax,
        total,
    }
}
