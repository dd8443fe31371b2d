//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate the store, clock
//! and payment ports to implement the storefront's use cases.

pub mod auth;
pub mod cache;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod state;
pub mod statistics;
pub mod wishlist;

pub use state::AppServices;
