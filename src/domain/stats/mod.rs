//! Month-over-month statistics over products and orders.
//!
//! Records are bucketed into the current and previous calendar month
//! ([`window`]), reduced into fixed snapshots ([`snapshot`]) and compared
//! with [`trend::percent_change`].

pub mod aggregate;
pub mod snapshot;
pub mod trend;
pub mod window;

pub use aggregate::{Dated, Partition};
pub use snapshot::{OrderStats, ProductStats};
pub use trend::{count_change, percent_change, ZERO_BASELINE_GROWTH};
pub use window::{MonthWindows, Window};
