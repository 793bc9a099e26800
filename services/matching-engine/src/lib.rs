//! Matching Engine
//!
//! Continuous double-auction matching engine for a single instrument,
//! implementing strict price-time priority.
//!
//! **Key invariants:**
//! - Price-time priority strictly enforced: better price first, earlier
//!   arrival first at equal price
//! - Deterministic matching (same inputs → same outputs)
//! - Conservation of quantity: every traded unit is one buy and one sell
//! - Trades execute at the maker's resting price
//!
//! Submissions are serialized by the caller; the engine performs no internal
//! synchronization and is not safe for concurrent use.

pub mod book;
pub mod engine;
pub mod events;
pub mod matching;

pub use engine::{BookSnapshot, EngineConfig, MatchingEngine};
pub use events::{TradeRecorder, TradeSink};
