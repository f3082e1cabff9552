//! Date-range types for reservation stays.
//!
//! A stay is a half-open calendar interval `[check_in, check_out)`:
//! the checkout day itself is not occupied, which is what allows
//! back-to-back bookings where one guest leaves the morning another
//! arrives.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A validated half-open date interval `[check_in, check_out)`.
///
/// Construction enforces `check_in < check_out`, so a `DateRange`
/// always covers at least one night.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use shoreline::DateRange;
///
/// let check_in = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// let check_out = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
/// let stay = DateRange::new(check_in, check_out).unwrap();
///
/// assert_eq!(stay.nights(), 2);
/// assert_eq!(format!("{stay}"), "2024-06-10..2024-06-12");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl DateRange {
    /// Creates a new date range.
    ///
    /// # Errors
    ///
    /// Returns an error if `check_in >= check_out`. Zero-night stays
    /// are invalid input and never reach the availability engine.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use shoreline::DateRange;
    ///
    /// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
    ///
    /// assert!(DateRange::new(d(2024, 6, 10), d(2024, 6, 12)).is_ok());
    /// assert!(DateRange::new(d(2024, 6, 10), d(2024, 6, 10)).is_err());
    /// assert!(DateRange::new(d(2024, 6, 12), d(2024, 6, 10)).is_err());
    /// ```
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, InvalidDateRangeError> {
        if check_in >= check_out {
            return Err(InvalidDateRangeError {
                check_in,
                check_out,
                reason: "check_out must be after check_in".to_string(),
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Returns the check-in date (inclusive lower bound).
    #[must_use]
    pub const fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Returns the check-out date (exclusive upper bound).
    #[must_use]
    pub const fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Returns the number of nights covered by this range.
    ///
    /// Always at least 1 for a validly constructed range.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Checks whether two half-open intervals overlap.
    ///
    /// `[a, b)` and `[c, d)` overlap iff `a < d && b > c`. A checkout
    /// date equal to another stay's check-in is NOT an overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use shoreline::DateRange;
    ///
    /// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
    /// let june_10_12 = DateRange::new(d(2024, 6, 10), d(2024, 6, 12)).unwrap();
    /// let june_12_14 = DateRange::new(d(2024, 6, 12), d(2024, 6, 14)).unwrap();
    /// let june_11_13 = DateRange::new(d(2024, 6, 11), d(2024, 6, 13)).unwrap();
    ///
    /// // Back-to-back stays do not conflict
    /// assert!(!june_10_12.overlaps(&june_12_14));
    /// // A shared night does
    /// assert!(june_10_12.overlaps(&june_11_13));
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.check_in, self.check_out)
    }
}

/// Error type for invalid date ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDateRangeError {
    /// The offending check-in date.
    pub check_in: NaiveDate,
    /// The offending check-out date.
    pub check_out: NaiveDate,
    /// Why the range is invalid.
    pub reason: String,
}

impl std::fmt::Display for InvalidDateRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid date range {}..{}: {}",
            self.check_in, self.check_out, self.reason
        )
    }
}

impl std::error::Error for InvalidDateRangeError {}
