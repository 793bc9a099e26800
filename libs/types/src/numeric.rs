//! Tick-scaled integer types for prices and quantities
//!
//! Prices are expressed in scaled integer ticks (e.g. hundredths of a
//! currency unit) and quantities as unsigned 64-bit counts, so all
//! arithmetic is exact. Overflow and underflow are checked in debug builds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Price in scaled integer ticks.
///
/// Signed so that spread-like instruments with negative ticks remain
/// representable; order validation enforces positivity where it applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Zero ticks. Used as the placeholder price of market orders.
    pub const ZERO: Price = Price(0);

    /// Create a Price from a raw tick count.
    pub const fn new(ticks: i64) -> Self {
        Self(ticks)
    }

    /// Get the raw tick count.
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quantity as an unsigned 64-bit count.
///
/// A resting order's quantity is its unfilled residual; the matching loop
/// decrements it in place as slices fill.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    /// Zero quantity.
    pub const ZERO: Quantity = Quantity(0);

    /// Create a Quantity from a raw count.
    pub const fn new(count: u64) -> Self {
        Self(count)
    }

    /// Get the raw count.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Check if the quantity is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The smaller of two quantities.
    pub fn min(self, other: Quantity) -> Quantity {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        debug_assert!(self.0.checked_add(rhs.0).is_some(), "quantity overflow");
        Quantity(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Quantity) {
        *self = *self + rhs;
    }
}

impl Sub for Quantity {
    type Output = Quantity;

    fn sub(self, rhs: Quantity) -> Quantity {
        debug_assert!(self.0 >= rhs.0, "quantity underflow");
        Quantity(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for Quantity {
    fn sub_assign(&mut self, rhs: Quantity) {
        *self = *self - rhs;
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
