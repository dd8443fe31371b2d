//! Storefront - catalog, carts, orders, accounts and cached statistics.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Pure types and rules: products, reviews, carts, orders,
//!   users and the month-over-month statistics aggregation.
//! - [`port`] - Traits for the record store, the clock and the payment gateway.
//! - [`application`] - Services composing domain and ports, including the
//!   TTL statistics cache that catalog and order writes invalidate.
//! - [`adapter`] - The CLI and JSON-lines server on the inbound side;
//!   SQLite, in-memory, clock and HMAC payment adapters on the outbound side.
//! - [`infrastructure`] - Configuration, logging, wiring and health checks.
//!
//! # Example
//!
//! ```no_run
//! use storefront::infrastructure::bootstrap;
//! use storefront::infrastructure::config::Config;
//!
//! # async fn demo() -> storefront::error::Result<()> {
//! let config = Config::load_or_default("config.toml")?;
//! let services = bootstrap::bootstrap(&config, None)?;
//! let stats = services.statistics.product_stats().await?;
//! println!("{} products", stats.stats.total_products);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
