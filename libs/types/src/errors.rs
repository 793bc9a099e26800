//! Validation error taxonomy
//!
//! The matching core itself is infallible: every defined input succeeds.
//! These errors exist only at the order-construction boundary, where a
//! caller can hand in values the book could never hold.

use thiserror::Error;

/// Order construction errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("invalid price: limit orders require a positive tick price, got {0}")]
    InvalidPrice(i64),

    #[error("invalid quantity: order quantity must be positive")]
    InvalidQuantity,
}
