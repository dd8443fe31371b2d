//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`clock`]: [`ManualClock`](clock::ManualClock), a settable [`Clock`](crate::port::Clock).
//! - [`domain`]: Builders for products, orders and checkout requests.
//! - [`store`]: [`FailingStore`](store::FailingStore), a record store whose every call errors.

pub mod clock;
pub mod domain;
pub mod store;
