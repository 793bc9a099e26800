//! Order input records
//!
//! An order is created outside the engine and ownership transfers in on
//! submission. The engine decrements `quantity` in place as the order
//! matches; a resting order's `quantity` is always its unfilled residual.

use crate::errors::OrderError;
use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }
}

/// Order entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Rests at its limit price when not immediately matched
    LIMIT,
    /// Consumes available liquidity; never rests
    MARKET,
}

/// An order instruction.
///
/// `timestamp` is a monotonic sequence number, not wall-clock time. Zero
/// means "unstamped": the engine assigns the next counter value on
/// submission. A non-zero value supplied by the caller is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub side: Side,
    pub order_type: OrderType,
    /// Limit price in ticks. `Price::ZERO` and unused for market orders.
    pub price: Price,
    /// Unfilled residual. Mutated in place by the matching loop.
    pub quantity: Quantity,
    pub timestamp: u64,
}

impl Order {
    /// Create a limit order.
    ///
    /// # Panics
    /// Panics if the price is not positive or the quantity is zero.
    pub fn limit(order_id: impl Into<OrderId>, side: Side, price: Price, quantity: Quantity) -> Self {
        match Self::try_limit(order_id, side, price, quantity) {
            Ok(order) => order,
            Err(err) => panic!("{err}"),
        }
    }

    /// Try to create a limit order, validating price and quantity.
    pub fn try_limit(
        order_id: impl Into<OrderId>,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<Self, OrderError> {
        if price.as_i64() <= 0 {
            return Err(OrderError::InvalidPrice(price.as_i64()));
        }
        if quantity.is_zero() {
            return Err(OrderError::InvalidQuantity);
        }
        Ok(Self {
            order_id: order_id.into(),
            side,
            order_type: OrderType::LIMIT,
            price,
            quantity,
            timestamp: 0,
        })
    }

    /// Create a market order.
    ///
    /// # Panics
    /// Panics if the quantity is zero.
    pub fn market(order_id: impl Into<OrderId>, side: Side, quantity: Quantity) -> Self {
        match Self::try_market(order_id, side, quantity) {
            Ok(order) => order,
            Err(err) => panic!("{err}"),
        }
    }

    /// Try to create a market order, validating quantity.
    pub fn try_market(
        order_id: impl Into<OrderId>,
        side: Side,
        quantity: Quantity,
    ) -> Result<Self, OrderError> {
        if quantity.is_zero() {
            return Err(OrderError::InvalidQuantity);
        }
        Ok(Self {
            order_id: order_id.into(),
            side,
            order_type: OrderType::MARKET,
            price: Price::ZERO,
            quantity,
            timestamp: 0,
        })
    }

    /// Stamp the order with an externally chosen sequence number.
    ///
    /// The engine preserves non-zero timestamps; supplying values out of
    /// order with the engine's counter breaks global time priority and is a
    /// contract violation on the caller's side.
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Check if the order has no residual quantity left.
    pub fn is_filled(&self) -> bool {
        self.quantity.is_zero()
    }
}
