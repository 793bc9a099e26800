//! End-to-end matching scenarios
//!
//! Drives the engine through the public API only: literal order sequences
//! with exact expected trade streams, the priority and conservation laws,
//! and a seeded randomized run that checks book invariants after every
//! submission.

use matching_engine::{MatchingEngine, TradeRecorder};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};
use types::trade::Trade;

fn limit(id: u64, side: Side, price: i64, qty: u64) -> Order {
    Order::limit(id, side, Price::new(price), Quantity::new(qty))
}

fn market(id: u64, side: Side, qty: u64) -> Order {
    Order::market(id, side, Quantity::new(qty))
}

fn recorded_engine(name: &str) -> (MatchingEngine, TradeRecorder) {
    let mut engine = MatchingEngine::new(name);
    let recorder = TradeRecorder::new();
    engine.set_trade_sink(recorder.clone());
    (engine, recorder)
}

fn assert_trade(trade: &Trade, buy: u64, sell: u64, price: i64, qty: u64) {
    assert_eq!(trade.buy_order_id, OrderId::new(buy));
    assert_eq!(trade.sell_order_id, OrderId::new(sell));
    assert_eq!(trade.price, Price::new(price));
    assert_eq!(trade.quantity, Quantity::new(qty));
}

/// Observable book invariants: the best-price caches agree with the depth
/// view, every present level holds positive quantity, and the resting
/// books never cross.
fn assert_book_invariants(engine: &MatchingEngine) {
    let snapshot = engine.depth(usize::MAX);

    assert_eq!(
        engine.best_bid(),
        snapshot.bids.first().copied(),
        "bid cache disagrees with the bid map"
    );
    assert_eq!(
        engine.best_ask(),
        snapshot.asks.first().copied(),
        "ask cache disagrees with the ask map"
    );
    assert_eq!(engine.buy_level_count(), snapshot.bids.len());
    assert_eq!(engine.sell_level_count(), snapshot.asks.len());

    for (price, quantity) in snapshot.bids.iter().chain(snapshot.asks.iter()) {
        assert!(
            !quantity.is_zero(),
            "empty level {price} present in the book"
        );
    }

    if let (Some((bid, _)), Some((ask, _))) = (engine.best_bid(), engine.best_ask()) {
        assert!(bid < ask, "resting books cross: bid {bid} >= ask {ask}");
    }
}

#[test]
fn simple_limit_match() {
    let (mut engine, recorder) = recorded_engine("simple-match");

    engine.submit(limit(1, Side::BUY, 100, 10));
    engine.submit(limit(2, Side::SELL, 100, 10));

    let trades = recorder.trades();
    assert_eq!(trades.len(), 1);
    assert_trade(&trades[0], 1, 2, 100, 10);
    assert_eq!(engine.buy_level_count(), 0);
    assert_eq!(engine.sell_level_count(), 0);
}

#[test]
fn partial_fill() {
    let (mut engine, recorder) = recorded_engine("partial-fill");

    engine.submit(limit(1, Side::BUY, 100, 15));
    engine.submit(limit(2, Side::SELL, 100, 10));

    let trades = recorder.trades();
    assert_eq!(trades.len(), 1);
    assert_trade(&trades[0], 1, 2, 100, 10);

    assert_eq!(engine.buy_level_count(), 1);
    assert_eq!(engine.best_bid(), Some((Price::new(100), Quantity::new(5))));
    assert_eq!(engine.sell_level_count(), 0);
}

#[test]
fn price_priority_overrides_time() {
    let (mut engine, recorder) = recorded_engine("price-priority");

    engine.submit(limit(1, Side::BUY, 99, 10).with_timestamp(1));
    engine.submit(limit(2, Side::BUY, 101, 10).with_timestamp(2));
    engine.submit(limit(3, Side::SELL, 100, 10).with_timestamp(3));

    let trades = recorder.trades();
    assert_eq!(trades.len(), 1);
    assert_trade(&trades[0], 2, 3, 101, 10);

    // The worse-priced, earlier bid is untouched.
    assert_eq!(engine.best_bid(), Some((Price::new(99), Quantity::new(10))));
}

#[test]
fn time_priority_at_equal_price() {
    let (mut engine, recorder) = recorded_engine("time-priority");

    engine.submit(limit(1, Side::BUY, 100, 10).with_timestamp(1));
    engine.submit(limit(2, Side::BUY, 100, 10).with_timestamp(2));
    engine.submit(limit(3, Side::SELL, 100, 10).with_timestamp(3));

    let trades = recorder.trades();
    assert_eq!(trades.len(), 1);
    assert_trade(&trades[0], 1, 3, 100, 10);
    assert_eq!(engine.best_bid(), Some((Price::new(100), Quantity::new(10))));
}

#[test]
fn market_order_walks_the_book() {
    let (mut engine, recorder) = recorded_engine("market-walk");

    engine.submit(limit(1, Side::SELL, 100, 5));
    engine.submit(limit(2, Side::SELL, 101, 5));
    engine.submit(market(3, Side::BUY, 8));

    let trades = recorder.trades();
    assert_eq!(trades.len(), 2);
    assert_trade(&trades[0], 3, 1, 100, 5);
    assert_trade(&trades[1], 3, 2, 101, 3);

    assert_eq!(engine.sell_level_count(), 1);
    assert_eq!(engine.best_ask(), Some((Price::new(101), Quantity::new(2))));
    assert_eq!(engine.buy_level_count(), 0);
}

#[test]
fn market_sell_walks_bids_downward() {
    let (mut engine, recorder) = recorded_engine("market-sell-walk");

    engine.submit(limit(1, Side::BUY, 101, 5));
    engine.submit(limit(2, Side::BUY, 100, 5));
    engine.submit(market(3, Side::SELL, 8));

    let trades = recorder.trades();
    assert_eq!(trades.len(), 2);
    assert_trade(&trades[0], 1, 3, 101, 5);
    assert_trade(&trades[1], 2, 3, 100, 3);
    assert_eq!(engine.best_bid(), Some((Price::new(100), Quantity::new(2))));
}

#[test]
fn no_cross_leaves_both_resting() {
    let (mut engine, recorder) = recorded_engine("no-cross");

    engine.submit(limit(1, Side::BUY, 99, 10));
    engine.submit(limit(2, Side::SELL, 101, 10));

    assert!(recorder.is_empty());
    assert_eq!(engine.buy_level_count(), 1);
    assert_eq!(engine.sell_level_count(), 1);
    assert_book_invariants(&engine);
}

#[test]
fn sweep_emits_in_priority_order() {
    let (mut engine, recorder) = recorded_engine("sweep-order");

    engine.submit(limit(1, Side::SELL, 100, 5));
    engine.submit(limit(2, Side::SELL, 100, 5));
    engine.submit(limit(3, Side::SELL, 100, 5));
    engine.submit(limit(4, Side::BUY, 100, 12));

    let trades = recorder.trades();
    assert_eq!(trades.len(), 3);
    assert_trade(&trades[0], 4, 1, 100, 5);
    assert_trade(&trades[1], 4, 2, 100, 5);
    assert_trade(&trades[2], 4, 3, 100, 2);

    // The partially consumed third ask keeps its residual.
    assert_eq!(engine.best_ask(), Some((Price::new(100), Quantity::new(3))));
    assert_eq!(engine.buy_level_count(), 0);
}

#[test]
fn aggressive_limit_sweeps_multiple_levels() {
    let (mut engine, recorder) = recorded_engine("level-sweep");

    engine.submit(limit(1, Side::SELL, 100, 5));
    engine.submit(limit(2, Side::SELL, 102, 5));
    engine.submit(limit(3, Side::SELL, 104, 5));
    engine.submit(limit(4, Side::BUY, 102, 12));

    // Sweeps 100 then 102 at the makers' prices, then rests the residual
    // at its own limit; the 104 ask is out of reach.
    let trades = recorder.trades();
    assert_eq!(trades.len(), 2);
    assert_trade(&trades[0], 4, 1, 100, 5);
    assert_trade(&trades[1], 4, 2, 102, 5);

    assert_eq!(engine.best_bid(), Some((Price::new(102), Quantity::new(2))));
    assert_eq!(engine.best_ask(), Some((Price::new(104), Quantity::new(5))));
    assert_book_invariants(&engine);
}

#[test]
fn trade_timestamps_strictly_increase() {
    let (mut engine, recorder) = recorded_engine("monotonic-stamps");

    engine.submit(limit(1, Side::SELL, 100, 5));
    engine.submit(limit(2, Side::SELL, 101, 5));
    engine.submit(market(3, Side::BUY, 10));
    engine.submit(limit(4, Side::BUY, 100, 5));
    engine.submit(limit(5, Side::SELL, 100, 5));

    let trades = recorder.trades();
    assert_eq!(trades.len(), 3);
    for pair in trades.windows(2) {
        assert!(
            pair[0].timestamp < pair[1].timestamp,
            "trade timestamps not strictly increasing"
        );
    }
}

#[test]
fn conservation_over_scripted_sequence() {
    let (mut engine, recorder) = recorded_engine("conservation");

    engine.submit(limit(1, Side::BUY, 100, 30));
    engine.submit(limit(2, Side::SELL, 99, 10));
    engine.submit(limit(3, Side::SELL, 100, 10));
    engine.submit(market(4, Side::SELL, 5));
    engine.submit(limit(5, Side::BUY, 101, 20));
    engine.submit(limit(6, Side::SELL, 98, 40));

    let mut bought = HashMap::new();
    let mut sold = HashMap::new();
    for trade in recorder.trades() {
        *bought.entry(trade.buy_order_id).or_insert(0u64) += trade.quantity.as_u64();
        *sold.entry(trade.sell_order_id).or_insert(0u64) += trade.quantity.as_u64();
    }

    let total_bought: u64 = bought.values().sum();
    let total_sold: u64 = sold.values().sum();
    assert_eq!(total_bought, total_sold);
    assert!(total_bought > 0);
    assert_book_invariants(&engine);
}

#[test]
fn snapshot_serializes() {
    let (mut engine, _recorder) = recorded_engine("snapshot");

    engine.submit(limit(1, Side::BUY, 100, 10));
    engine.submit(limit(2, Side::SELL, 103, 4));

    let snapshot = engine.depth(4);
    let json = serde_json::to_string(&snapshot).unwrap();
    let roundtrip: matching_engine::BookSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot, roundtrip);
}

#[test]
fn randomized_flow_preserves_invariants() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let (mut engine, recorder) = recorded_engine("randomized");

    let mut original_quantity: HashMap<OrderId, u64> = HashMap::new();

    for id in 1..=2000u64 {
        let side = if rng.gen_bool(0.5) { Side::BUY } else { Side::SELL };
        let qty = rng.gen_range(1..=20);
        let order = if rng.gen_bool(0.2) {
            market(id, side, qty)
        } else {
            limit(id, side, rng.gen_range(95..=105), qty)
        };

        original_quantity.insert(order.order_id, qty);
        engine.submit(order);
        assert_book_invariants(&engine);
    }

    let trades = recorder.trades();
    assert!(!trades.is_empty());

    // Strictly increasing timestamps across the whole run.
    for pair in trades.windows(2) {
        assert!(pair[0].timestamp < pair[1].timestamp);
    }

    // No order trades more than its original quantity, and every traded
    // unit pairs one buy with one sell.
    let mut filled: HashMap<OrderId, u64> = HashMap::new();
    let mut total_bought = 0u64;
    let mut total_sold = 0u64;
    for trade in &trades {
        let qty = trade.quantity.as_u64();
        assert!(qty > 0);
        *filled.entry(trade.buy_order_id).or_insert(0) += qty;
        *filled.entry(trade.sell_order_id).or_insert(0) += qty;
        total_bought += qty;
        total_sold += qty;
    }
    assert_eq!(total_bought, total_sold);
    for (order_id, traded) in &filled {
        assert!(
            traded <= &original_quantity[order_id],
            "order {order_id} overfilled: traded {traded}"
        );
    }
}

#[test]
fn identical_input_produces_identical_trades() {
    let run = |seed: u64| -> Vec<Trade> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (mut engine, recorder) = recorded_engine("replay");
        for id in 1..=500u64 {
            let side = if rng.gen_bool(0.5) { Side::BUY } else { Side::SELL };
            let qty = rng.gen_range(1..=20);
            let order = if rng.gen_bool(0.2) {
                market(id, side, qty)
            } else {
                limit(id, side, rng.gen_range(95..=105), qty)
            };
            engine.submit(order);
        }
        recorder.trades()
    };

    assert_eq!(run(42), run(42));
}
