//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │  Clock  │            │   Store     │              │  Payment  │
//! │ Adapter │            │   Adapter   │              │  Gateway  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`ProductStore`], [`OrderStore`], [`UserStore`] - Record persistence
//! - [`Clock`] - Source of "now" for windows, expiry and timestamps
//! - [`PaymentGateway`] - Online payment order requests and signature checks

pub mod outbound;

pub use outbound::clock::Clock;
pub use outbound::payment::{GatewayOrderRequest, PaymentGateway};
pub use outbound::store::{OrderStore, ProductStore, UserStore};
