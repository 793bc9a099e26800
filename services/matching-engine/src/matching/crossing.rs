//! Crossing detection logic
//!
//! Determines when an incoming order's price constraint admits a match
//! against the resting side.

use types::numeric::Price;
use types::order::Side;

/// Check if a bid and ask cross: a buy matches a sell when the bid price
/// is at or above the ask price.
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Check the cross predicate from the aggressor's side: an incoming buy
/// crosses when its limit reaches the resting ask, an incoming sell when
/// the resting bid reaches its limit.
pub fn incoming_can_match(incoming_side: Side, incoming_price: Price, resting_price: Price) -> bool {
    match incoming_side {
        Side::BUY => can_match(incoming_price, resting_price),
        Side::SELL => can_match(resting_price, incoming_price),
    }
}
