//! Response caches used by application services.
//!
//! - [`ttl::TtlCache`]: Keyed snapshots with a fixed expiry measured from `set`
//! - [`sweeper::spawn_sweeper`]: Background eviction of expired entries

pub mod sweeper;
pub mod ttl;

pub use sweeper::{spawn_sweeper, SweeperHandle};
pub use ttl::TtlCache;

/// Cache key of the product statistics snapshot.
pub const PRODUCT_STATS_KEY: &str = "product:stats";

/// Cache key of the order statistics snapshot.
pub const ORDER_STATS_KEY: &str = "order:stats";

/// Prefix cleared by every product write.
pub const PRODUCT_PREFIX: &str = "product:";

/// Prefix cleared by every order write.
pub const ORDER_PREFIX: &str = "order:";
