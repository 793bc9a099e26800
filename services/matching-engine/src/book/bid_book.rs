//! Bid (buy-side) half-book
//!
//! Price levels keyed by price in a `BTreeMap`, best bid = highest key.
//! A scalar cache tracks the current best price so the matching loop can
//! inspect the top of book without touching the map.

use std::collections::BTreeMap;
use types::numeric::{Price, Quantity};
use types::order::Order;

use super::price_level::PriceLevel;
use super::Fill;

/// Buy-side half-book with a best-price cache.
///
/// At most one level exists per price, and a level is present only while it
/// holds orders. The cache, when set, always names the maximum key.
#[derive(Debug, Clone)]
pub struct BidBook {
    /// Price levels; iteration order ascending, so best is the last key.
    levels: BTreeMap<Price, PriceLevel>,
    /// Price of the best non-empty level, absent when the book is empty.
    best_price: Option<Price>,
    /// Initial queue capacity for newly created levels.
    level_capacity: usize,
}

impl BidBook {
    /// Create a new empty bid book.
    pub fn new() -> Self {
        Self::with_level_capacity(0)
    }

    /// Create an empty bid book whose levels pre-size their queues.
    pub fn with_level_capacity(level_capacity: usize) -> Self {
        Self {
            levels: BTreeMap::new(),
            best_price: None,
            level_capacity,
        }
    }

    /// Insert a resting order at its price level, creating the level if
    /// absent and raising the cache when the price improves on it.
    pub fn insert(&mut self, order: Order) {
        let price = order.price;
        if self.best_price.map_or(true, |best| price > best) {
            self.best_price = Some(price);
        }

        let capacity = self.level_capacity;
        self.levels
            .entry(price)
            .or_insert_with(|| PriceLevel::with_capacity(capacity))
            .push_back(order);
    }

    /// Best (highest) bid price, from the cache.
    pub fn best_price(&self) -> Option<Price> {
        self.best_price
    }

    /// Head order of the best level: the next bid to be matched.
    pub fn best_order(&self) -> Option<&Order> {
        self.levels.get(&self.best_price?)?.front()
    }

    /// Best bid price and the total resting quantity at that level.
    pub fn best(&self) -> Option<(Price, Quantity)> {
        let price = self.best_price?;
        let level = self.levels.get(&price)?;
        Some((price, level.total_quantity()))
    }

    /// Fill up to `take` against the head of the best level.
    ///
    /// When the slice drains the level, the level is erased and the cache
    /// advances to the next-highest remaining key (or clears on an empty
    /// book). Returns None when the book is empty.
    pub(crate) fn fill_best(&mut self, take: Quantity) -> Option<Fill> {
        let price = self.best_price?;
        let level = self.levels.get_mut(&price)?;
        let (order_id, quantity) = level.fill_front(take)?;

        if level.is_empty() {
            self.levels.remove(&price);
            self.best_price = self.levels.keys().next_back().copied();
        }

        Some(Fill {
            order_id,
            price,
            quantity,
        })
    }

    /// Number of non-empty price levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Check if the book holds no orders.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Top `depth` levels, best first, as `(price, total_quantity)` pairs.
    pub fn depth(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.levels
            .iter()
            .rev()
            .take(depth)
            .map(|(price, level)| (*price, level.total_quantity()))
            .collect()
    }
}

impl Default for BidBook {
    fn default() -> Self {
        Self::new()
    }
}
