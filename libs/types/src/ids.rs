//! Unique identifier types for engine entities
//!
//! Order ids are chosen by the submitter and carried through to emitted
//! trades untouched; the engine never interprets them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for an order.
///
/// A plain 64-bit value assigned by the submitter. Uniqueness is the
/// submitter's responsibility; the engine only copies it into trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Create an OrderId from a raw 64-bit value.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw 64-bit value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
