//! Core data types for tick events and book state.
//!
//! These types are designed to be:
//! - Small and `Copy` where the hot path touches them (`OrderRecord`, `BestLevel`)
//! - Faithful to the line format (`TickEvent` keeps the source time verbatim)
//! - Explicit about "nothing here" (`Side::None`, `Action::None`) so that
//!   unrecognized feed codes stay representable instead of failing decode

use serde::{Deserialize, Serialize};

/// Event action (what happened to the book).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Action {
    /// Empty or unrecognized action code
    #[default]
    None,
    /// Wipe both sides of the book (`Y` or `F`)
    Clear,
    /// Add a new order (`A`)
    Add,
    /// Change price and/or quantity of an order (`M`)
    Modify,
    /// Remove an order (`D`)
    Delete,
}

impl Action {
    /// Parse an action from its feed code.
    ///
    /// Unknown codes map to `Action::None`, which the engine ignores.
    pub fn from_code(code: &str) -> Self {
        match code {
            "Y" | "F" => Action::Clear,
            "A" => Action::Add,
            "M" => Action::Modify,
            "D" => Action::Delete,
            _ => Action::None,
        }
    }

    /// Canonical feed code, or an empty string for `None`.
    pub fn code(self) -> &'static str {
        match self {
            Action::None => "",
            Action::Clear => "Y",
            Action::Add => "A",
            Action::Modify => "M",
            Action::Delete => "D",
        }
    }
}

/// Order side (bid or ask).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Side {
    /// Empty or unrecognized side code
    #[default]
    None,
    /// Buy order (`1`)
    Bid,
    /// Sell order (`2`)
    Ask,
}

impl Side {
    /// Parse a side from its numeric feed code. Anything but 1 or 2 is `None`.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Side::Bid,
            2 => Side::Ask,
            _ => Side::None,
        }
    }

    /// Numeric feed code, if any.
    pub fn code(self) -> Option<u8> {
        match self {
            Side::Bid => Some(1),
            Side::Ask => Some(2),
            Side::None => None,
        }
    }

    /// Whether `price` is at least as good as `reference` on this side.
    ///
    /// Asks improve downwards, bids upwards. Always false for `Side::None`.
    #[inline(always)]
    pub fn at_least_as_good(self, price: i64, reference: i64) -> bool {
        match self {
            Side::Bid => price >= reference,
            Side::Ask => price <= reference,
            Side::None => false,
        }
    }
}

/// Aggregate of the best price level on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BestLevel {
    /// Price tick
    pub price: i64,
    /// Sum of live quantity at this price
    pub qty: u64,
    /// Number of live orders at this price
    pub count: u32,
}

impl BestLevel {
    /// Create a new best-level snapshot.
    pub fn new(price: i64, qty: u64, count: u32) -> Self {
        Self { price, qty, count }
    }
}

/// One input record plus its top-of-book annotation.
///
/// The order fields are read-only for the engine; only `best_bid` and
/// `best_ask` are written during replay.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickEvent {
    /// Source timestamp, kept exactly as read
    pub source_time: String,

    /// Order side
    pub side: Side,

    /// Book action
    pub action: Action,

    /// Order identifier (unique among live orders)
    pub order_id: u64,

    /// Price in integer ticks
    pub price: i64,

    /// Order quantity
    pub qty: u32,

    /// Best bid after this event (set when the bid side is non-empty)
    pub best_bid: Option<BestLevel>,

    /// Best ask after this event (set when the ask side is non-empty)
    pub best_ask: Option<BestLevel>,
}

impl TickEvent {
    /// Create a new event without source time or annotation.
    pub fn new(action: Action, side: Side, order_id: u64, price: i64, qty: u32) -> Self {
        Self {
            action,
            side,
            order_id,
            price,
            qty,
            ..Default::default()
        }
    }

    /// Create a clear event.
    pub fn clear() -> Self {
        Self::new(Action::Clear, Side::None, 0, 0, 0)
    }

    /// Set the source time.
    pub fn with_source_time(mut self, source_time: impl Into<String>) -> Self {
        self.source_time = source_time.into();
        self
    }

    /// Drop any previous annotation.
    #[inline]
    pub fn clear_annotation(&mut self) {
        self.best_bid = None;
        self.best_ask = None;
    }

    /// Spread in ticks, when both sides are annotated.
    pub fn spread(&self) -> Option<i64> {
        match (self.best_bid, self.best_ask) {
            (Some(bid), Some(ask)) => Some(ask.price - bid.price),
            _ => None,
        }
    }
}

/// Live order stored in the order index.
///
/// Minimal representation to save memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRecord {
    pub order_id: u64,
    pub side: Side,
    pub price: i64,
    pub qty: u32,
}

impl OrderRecord {
    /// Build a record from an event's order fields.
    #[inline]
    pub fn from_event(event: &TickEvent) -> Self {
        Self {
            order_id: event.order_id,
            side: event.side,
            price: event.price,
            qty: event.qty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_codes() {
        assert_eq!(Action::from_code("Y"), Action::Clear);
        assert_eq!(Action::from_code("F"), Action::Clear);
        assert_eq!(Action::from_code("A"), Action::Add);
        assert_eq!(Action::from_code("M"), Action::Modify);
        assert_eq!(Action::from_code("D"), Action::Delete);
        assert_eq!(Action::from_code(""), Action::None);
        assert_eq!(Action::from_code("X"), Action::None);

        // Both clear codes serialize canonically
        assert_eq!(Action::from_code("F").code(), "Y");
        assert_eq!(Action::None.code(), "");
    }

    #[test]
    fn test_side_codes() {
        assert_eq!(Side::from_code(1), Side::Bid);
        assert_eq!(Side::from_code(2), Side::Ask);
        assert_eq!(Side::from_code(0), Side::None);
        assert_eq!(Side::from_code(7), Side::None);
        assert_eq!(Side::Bid.code(), Some(1));
        assert_eq!(Side::None.code(), None);
    }

    #[test]
    fn test_at_least_as_good() {
        assert!(Side::Bid.at_least_as_good(101, 100));
        assert!(Side::Bid.at_least_as_good(100, 100));
        assert!(!Side::Bid.at_least_as_good(99, 100));

        assert!(Side::Ask.at_least_as_good(99, 100));
        assert!(Side::Ask.at_least_as_good(100, 100));
        assert!(!Side::Ask.at_least_as_good(101, 100));

        assert!(!Side::None.at_least_as_good(100, 100));
    }

    #[test]
    fn test_event_builders() {
        let ev = TickEvent::new(Action::Add, Side::Bid, 7, 100, 5).with_source_time("0930");
        assert_eq!(ev.source_time, "0930");
        assert_eq!(ev.order_id, 7);
        assert!(ev.best_bid.is_none());

        let clear = TickEvent::clear();
        assert_eq!(clear.action, Action::Clear);
        assert_eq!(clear.side, Side::None);
    }

    #[test]
    fn test_spread() {
        let mut ev = TickEvent::default();
        assert_eq!(ev.spread(), None);

        ev.best_bid = Some(BestLevel::new(99, 10, 1));
        ev.best_ask = Some(BestLevel::new(101, 4, 2));
        assert_eq!(ev.spread(), Some(2));

        ev.clear_annotation();
        assert_eq!(ev.spread(), None);
    }
}
