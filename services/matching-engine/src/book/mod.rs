//! Order book infrastructure module
//!
//! Contains the per-price FIFO level and the bid and ask half-books.

pub mod ask_book;
pub mod bid_book;
pub mod price_level;

pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use price_level::PriceLevel;

use types::ids::OrderId;
use types::numeric::{Price, Quantity};

/// One matched slice taken from the head of a half-book's best level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    /// The maker (resting) order.
    pub order_id: OrderId,
    /// The maker's resting price; trades execute here.
    pub price: Price,
    /// Quantity filled by this slice.
    pub quantity: Quantity,
}
