//! Matching engine core
//!
//! Owns both half-books, the monotonic timestamp counter, and the optional
//! trade sink. `submit` runs the full matching loop for one order on the
//! calling thread and returns only when the order is fully consumed,
//! resting, or discarded.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderType, Side};
use types::trade::Trade;

use crate::book::{AskBook, BidBook, Fill};
use crate::events::TradeSink;
use crate::matching::crossing;

/// Engine tuning parameters.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Initial queue capacity of newly created price levels. Queues grow
    /// geometrically beyond this, preserving arrival order.
    pub level_queue_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            level_queue_capacity: 128,
        }
    }
}

/// Depth view of both sides of the book, best price first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub name: String,
    pub bids: Vec<(Price, Quantity)>,
    pub asks: Vec<(Price, Quantity)>,
}

/// Price-time priority matching engine for a single instrument.
///
/// Not safe for concurrent submissions: callers serialize externally or
/// run one engine instance per partition.
pub struct MatchingEngine {
    /// Diagnostic label for this engine instance.
    name: String,
    bids: BidBook,
    asks: AskBook,
    /// Last issued timestamp. Orders stamped on submission and emitted
    /// trades share this counter, so both advance one clock.
    clock: u64,
    sink: Option<Box<dyn TradeSink>>,
    orders_submitted: u64,
    trades_emitted: u64,
}

impl MatchingEngine {
    /// Create an engine with default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, EngineConfig::default())
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(name: impl Into<String>, config: EngineConfig) -> Self {
        let name = name.into();
        info!(
            engine = %name,
            level_queue_capacity = config.level_queue_capacity,
            "matching engine initialized"
        );

        Self {
            bids: BidBook::with_level_capacity(config.level_queue_capacity),
            asks: AskBook::with_level_capacity(config.level_queue_capacity),
            clock: 0,
            sink: None,
            orders_submitted: 0,
            trades_emitted: 0,
            name,
        }
    }

    /// Diagnostic name of this engine instance.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Install or replace the trade sink.
    ///
    /// Without a sink, emitted trades are silently dropped.
    pub fn set_trade_sink<S: TradeSink + 'static>(&mut self, sink: S) {
        self.sink = Some(Box::new(sink));
    }

    /// Submit an order.
    ///
    /// An unstamped order (`timestamp == 0`) receives the next counter
    /// value; a caller-supplied timestamp is preserved. The order is
    /// matched greedily against the opposite side; a limit residual rests
    /// on its own side, a market residual is discarded.
    pub fn submit(&mut self, mut order: Order) {
        debug_assert!(!order.quantity.is_zero(), "zero-quantity order submitted");

        if order.timestamp == 0 {
            order.timestamp = self.next_timestamp();
        }
        self.orders_submitted += 1;

        trace!(
            order_id = %order.order_id,
            side = ?order.side,
            order_type = ?order.order_type,
            price = %order.price,
            quantity = %order.quantity,
            timestamp = order.timestamp,
            "order submitted"
        );

        match order.order_type {
            OrderType::MARKET => self.match_market_order(order),
            OrderType::LIMIT => self.match_limit_order(order),
        }
    }

    /// Number of non-empty bid price levels.
    pub fn buy_level_count(&self) -> usize {
        self.bids.level_count()
    }

    /// Number of non-empty ask price levels.
    pub fn sell_level_count(&self) -> usize {
        self.asks.level_count()
    }

    /// Best bid price and resting quantity at that level.
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.bids.best()
    }

    /// Best ask price and resting quantity at that level.
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.asks.best()
    }

    /// Depth view of the top `depth` levels on each side.
    pub fn depth(&self, depth: usize) -> BookSnapshot {
        BookSnapshot {
            name: self.name.clone(),
            bids: self.bids.depth(depth),
            asks: self.asks.depth(depth),
        }
    }

    /// Total orders accepted since creation.
    pub fn orders_submitted(&self) -> u64 {
        self.orders_submitted
    }

    /// Total trades emitted since creation.
    pub fn trades_emitted(&self) -> u64 {
        self.trades_emitted
    }

    fn next_timestamp(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Drain the opposite side while liquidity lasts; any residual is
    /// discarded.
    fn match_market_order(&mut self, mut order: Order) {
        while !order.is_filled() {
            let Some(fill) = self.fill_opposite_best(order.side, order.quantity) else {
                debug!(
                    order_id = %order.order_id,
                    residual = %order.quantity,
                    "market order exhausted the book, residual discarded"
                );
                return;
            };
            order.quantity -= fill.quantity;
            self.emit_trade(&order, fill);
        }
    }

    /// Drain the opposite side while the cross predicate holds; any
    /// residual rests on the order's own side.
    fn match_limit_order(&mut self, mut order: Order) {
        while !order.is_filled() {
            let Some(resting_price) = self.opposite_best_price(order.side) else {
                break;
            };
            if !crossing::incoming_can_match(order.side, order.price, resting_price) {
                break;
            }
            let Some(fill) = self.fill_opposite_best(order.side, order.quantity) else {
                break;
            };
            order.quantity -= fill.quantity;
            self.emit_trade(&order, fill);
        }

        if !order.is_filled() {
            self.rest(order);
        }
    }

    fn opposite_best_price(&self, side: Side) -> Option<Price> {
        match side {
            Side::BUY => self.asks.best_price(),
            Side::SELL => self.bids.best_price(),
        }
    }

    fn fill_opposite_best(&mut self, side: Side, take: Quantity) -> Option<Fill> {
        match side {
            Side::BUY => self.asks.fill_best(take),
            Side::SELL => self.bids.fill_best(take),
        }
    }

    fn rest(&mut self, order: Order) {
        debug!(
            order_id = %order.order_id,
            side = ?order.side,
            price = %order.price,
            quantity = %order.quantity,
            "order resting"
        );
        match order.side {
            Side::BUY => self.bids.insert(order),
            Side::SELL => self.asks.insert(order),
        }
    }

    /// Stamp one matched slice from the engine clock and deliver it.
    ///
    /// The taker's side decides which id is the buyer and which the
    /// seller; the price is always the maker's resting price.
    fn emit_trade(&mut self, taker: &Order, fill: Fill) {
        let timestamp = self.next_timestamp();
        let (buy_order_id, sell_order_id) = match taker.side {
            Side::BUY => (taker.order_id, fill.order_id),
            Side::SELL => (fill.order_id, taker.order_id),
        };

        let trade = Trade::new(
            buy_order_id,
            sell_order_id,
            fill.price,
            fill.quantity,
            timestamp,
        );
        self.trades_emitted += 1;

        trace!(
            buy_order_id = %trade.buy_order_id,
            sell_order_id = %trade.sell_order_id,
            price = %trade.price,
            quantity = %trade.quantity,
            timestamp = trade.timestamp,
            "trade executed"
        );

        if let Some(sink) = self.sink.as_mut() {
            sink.on_trade(&trade);
        }
    }
}
