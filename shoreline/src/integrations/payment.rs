//! Payment gateway abstraction.

use rust_decimal::Decimal;

use crate::error::Result;

/// A payment intent created with the gateway before a charge is captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    /// The gateway's identifier for this intent.
    pub id: String,
    /// Secret the front end uses to complete the charge.
    pub client_secret: String,
}

/// Booking context attached to a payment intent for reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMetadata {
    /// The listing being booked.
    pub listing_id: i64,
    /// Guest name as entered at checkout.
    pub guest_name: String,
    /// Check-in date, ISO-8601.
    pub check_in: String,
    /// Check-out date, ISO-8601.
    pub check_out: String,
}

/// External payment processing.
///
/// The booking manager verifies a charge succeeded before persisting a
/// paid reservation and issues refunds on cancellation. Implementations
/// talk to a real processor; tests use generated mocks.
#[cfg_attr(test, mockall::automock)]
pub trait PaymentGateway: Send + Sync {
    /// Creates a payment intent for the given amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway rejects the request or cannot
    /// be reached.
    fn create_intent(
        &self,
        amount: Decimal,
        currency: &str,
        metadata: &PaymentMetadata,
    ) -> Result<PaymentIntent>;

    /// Whether the charge behind `intent_id` has actually succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the intent is unknown or the gateway cannot
    /// be reached.
    fn verify_succeeded(&self, intent_id: &str) -> Result<bool>;

    /// Refunds the charge behind `intent_id`, returning the refund id.
    ///
    /// # Errors
    ///
    /// Returns an error if the refund is rejected or the gateway cannot
    /// be reached.
    fn refund(&self, intent_id: &str) -> Result<String>;
}
