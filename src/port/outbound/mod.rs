//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies such as the record
//! store, the wall clock and the payment gateway.

pub mod clock;
pub mod payment;
pub mod store;
