//! Traits for external collaborators.
//!
//! Payment processing and calendar synchronization live behind traits so
//! the booking manager can be wired with real gateways in production and
//! with test doubles in unit tests. Both collaborators are optional;
//! operations that can proceed without one degrade gracefully, and
//! operations that cannot report the missing capability.

mod calendar;
mod payment;

pub use calendar::CalendarSync;
pub use payment::{PaymentGateway, PaymentIntent, PaymentMetadata};

#[cfg(test)]
pub(crate) use calendar::MockCalendarSync;
#[cfg(test)]
pub(crate) use payment::MockPaymentGateway;
