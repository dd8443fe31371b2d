//! Domain validation errors for catalog, cart, order and account types.
//!
//! These errors are returned when a domain invariant is violated, e.g. a
//! review rating outside 1..=5 or a cancellation requested after dispatch.
//!
//! # Examples
//!
//! ```
//! use storefront::domain::error::DomainError;
//! use storefront::domain::product::Review;
//! use storefront::domain::id::UserId;
//!
//! let result = Review::new(UserId::new("u1"), 7, None, chrono::Utc::now());
//! assert!(matches!(result, Err(DomainError::InvalidRating { rating: 7 })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required text field was empty.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the empty field.
        field: &'static str,
    },

    /// Review ratings are whole stars between 1 and 5.
    #[error("rating must be between 1 and 5, got {rating}")]
    InvalidRating {
        /// The rejected rating.
        rating: i64,
    },

    /// Review feedback is capped in length.
    #[error("feedback must be at most {max} characters")]
    FeedbackTooLong {
        /// Maximum accepted length.
        max: usize,
    },

    /// Cart quantities cannot go below zero.
    #[error("quantity must be a non-negative number, got {quantity}")]
    NegativeQuantity {
        /// The rejected quantity.
        quantity: i64,
    },

    /// Orders need at least one line item.
    #[error("order must contain at least one item")]
    EmptyOrder,

    /// Order totals must be positive.
    #[error("order amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The rejected amount.
        amount: rust_decimal::Decimal,
    },

    /// Status string did not match any known order status.
    #[error("unknown order status: {0}")]
    UnknownStatus(String),

    /// Orders that left the warehouse cannot be cancelled.
    #[error("order cannot be cancelled at this stage ({status})")]
    NotCancellable {
        /// Current status of the order.
        status: String,
    },

    /// Email addresses must look like `local@domain.tld`.
    #[error("please enter a valid email")]
    InvalidEmail,

    /// Passwords shorter than the minimum are rejected at registration.
    #[error("please enter a strong password (at least {min} characters)")]
    WeakPassword {
        /// Minimum accepted length.
        min: usize,
    },

    /// Display names must have a minimum length after trimming.
    #[error("name must be at least {min} characters long")]
    NameTooShort {
        /// Minimum accepted length.
        min: usize,
    },
}
