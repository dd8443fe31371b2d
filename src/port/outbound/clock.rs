//! Wall-clock port.

use chrono::{DateTime, Utc};

/// Source of the current instant.
///
/// Injected so cache expiry and month windows can be driven in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
