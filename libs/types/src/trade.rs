//! Emitted trade events
//!
//! One trade per matched slice. Trades are transient: the engine hands them
//! to the installed sink and retains nothing.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// An executed trade between one buy and one sell order.
///
/// The price is the maker's resting price (the aggressor trades at the
/// maker's price, never at its own limit). The timestamp comes from the
/// same engine counter that stamps orders and is strictly greater than any
/// previously emitted value from that engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
    pub timestamp: u64,
}

impl Trade {
    /// Create a new trade record.
    pub fn new(
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        price: Price,
        quantity: Quantity,
        timestamp: u64,
    ) -> Self {
        Self {
            buy_order_id,
            sell_order_id,
            price,
            quantity,
            timestamp,
        }
    }
}
