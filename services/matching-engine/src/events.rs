//! Trade emission
//!
//! The engine delivers each matched slice to an installed sink,
//! synchronously, from inside `submit`. The core retains no trades of its
//! own; a caller that wants history installs a recording sink.

use std::cell::RefCell;
use std::rc::Rc;
use types::trade::Trade;

/// Capability consumed by the engine: receives every emitted trade.
///
/// Invoked synchronously while the engine is mid-mutation; a sink must not
/// re-enter the engine. Installing or replacing the sink between
/// submissions is permitted.
pub trait TradeSink {
    fn on_trade(&mut self, trade: &Trade);
}

impl<F: FnMut(&Trade)> TradeSink for F {
    fn on_trade(&mut self, trade: &Trade) {
        self(trade)
    }
}

/// Recording sink that keeps every trade it receives.
///
/// Clones share one backing store, so a caller can hand one handle to the
/// engine and read emissions through another. Single-threaded by the
/// engine's concurrency contract, hence the `Rc<RefCell<…>>` backing.
#[derive(Debug, Clone, Default)]
pub struct TradeRecorder {
    trades: Rc<RefCell<Vec<Trade>>>,
}

impl TradeRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every recorded trade, in emission order.
    pub fn trades(&self) -> Vec<Trade> {
        self.trades.borrow().clone()
    }

    /// The most recently recorded trade.
    pub fn last(&self) -> Option<Trade> {
        self.trades.borrow().last().cloned()
    }

    /// Number of recorded trades.
    pub fn len(&self) -> usize {
        self.trades.borrow().len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.trades.borrow().is_empty()
    }

    /// Discard all recorded trades.
    pub fn clear(&self) {
        self.trades.borrow_mut().clear();
    }
}

impl TradeSink for TradeRecorder {
    fn on_trade(&mut self, trade: &Trade) {
        self.trades.borrow_mut().push(trade.clone());
    }
}
