//! Single-book top-of-book replay engine.
//!
//! High-performance implementation using:
//! - ahash HashMap for order lookups and exact-price level access
//! - BTreeMap price multiset for best bid/ask retrieval
//! - Lazily refreshed best-level caches with O(1) write-time invalidation
//! - No allocation on the hot path once the maps have grown
//!
//! The engine is total over well-typed events: unknown ids, unknown sides and
//! unknown actions degrade to upserts or no-ops and are counted in
//! [`EngineStats`], never returned as errors.

use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use super::order_index::OrderIndex;
use super::price_level::PriceLevelIndex;
use super::top_of_book::TopOfBookCache;
use crate::error::{BboError, Result};
use crate::types::{Action, BestLevel, OrderRecord, Side, TickEvent};

/// Configuration for engine behavior.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Whether to log feed anomalies (unknown ids, upserts) at debug level
    pub log_anomalies: bool,

    /// Whether to run the full invariant check after every event (slow)
    pub verify_invariants: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_anomalies: true,
            verify_invariants: false,
        }
    }
}

impl EngineConfig {
    /// Create the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable/disable anomaly logs.
    pub fn with_logging(mut self, log: bool) -> Self {
        self.log_anomalies = log;
        self
    }

    /// Enable/disable per-event invariant verification.
    pub fn with_invariant_checks(mut self, verify: bool) -> Self {
        self.verify_invariants = verify;
        self
    }
}

/// Statistics for monitoring a replay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Total events applied
    pub events_processed: u64,

    /// Clear events applied
    pub clears: u64,

    /// Add events applied
    pub adds: u64,

    /// Modify events applied
    pub modifies: u64,

    /// Delete events applied
    pub deletes: u64,

    /// Events with no action, or with no side where one was needed
    pub ignored_events: u64,

    /// Adds on an id that was already live (handled as updates)
    pub add_upserts: u64,

    /// Modifies on an unknown id (handled as adds)
    pub modify_fallback_adds: u64,

    /// Deletes on an unknown id (no-ops)
    pub missing_deletes: u64,

    /// Best-level recomputations across both sides
    pub cache_refreshes: u64,

    /// Failed invariant checks (only with `verify_invariants`)
    pub invariant_failures: u64,

    /// Number of live orders
    pub active_orders: usize,

    /// Number of price levels (bid side)
    pub bid_levels: usize,

    /// Number of price levels (ask side)
    pub ask_levels: usize,
}

impl EngineStats {
    /// Save as pretty-printed JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Level index and best-level cache of one side, mutated together.
#[derive(Debug, Clone)]
struct BookSide {
    levels: PriceLevelIndex,
    cache: TopOfBookCache,
}

impl BookSide {
    fn new(side: Side) -> Self {
        Self {
            levels: PriceLevelIndex::new(side),
            cache: TopOfBookCache::new(side),
        }
    }

    #[inline(always)]
    fn add(&mut self, price: i64, qty: u32) {
        self.levels.add_qty(price, qty);
        self.cache.note_insert(price);
    }

    #[inline(always)]
    fn remove(&mut self, price: i64, qty: u32) {
        self.levels.remove_qty(price, qty);
        self.cache.note_change(price);
    }

    #[inline(always)]
    fn adjust(&mut self, price: i64, delta: i64) {
        self.levels.adjust_qty(price, delta);
        self.cache.note_change(price);
    }

    #[inline(always)]
    fn best(&mut self) -> Option<BestLevel> {
        self.cache.read(&self.levels)
    }

    fn clear(&mut self) {
        self.levels.clear();
        self.cache.invalidate();
    }

    fn reset(&mut self) {
        self.levels.clear();
        self.cache.reset();
    }
}

/// Top-of-book reconstruction engine for one instrument.
///
/// Owns the order index and both book sides for one replay session.
/// Design goals:
/// - Constant work per event apart from O(log n) level bookkeeping
/// - Best level recomputed only when it may have changed
/// - Deterministic, restartable replays
#[derive(Debug, Clone)]
pub struct BookEngine {
    /// Configuration
    config: EngineConfig,

    /// Live orders: order_id -> OrderRecord
    orders: OrderIndex,

    /// Bid levels, best = highest price
    bids: BookSide,

    /// Ask levels, best = lowest price
    asks: BookSide,

    /// Statistics (for monitoring)
    stats: EngineStats,
}

impl Default for BookEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BookEngine {
    /// Create an engine with the default configuration.
    ///
    /// # Example
    /// ```
    /// use bbo_reconstructor::BookEngine;
    ///
    /// let engine = BookEngine::new();
    /// assert_eq!(engine.order_count(), 0);
    /// ```
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with custom configuration.
    ///
    /// # Example
    /// ```
    /// use bbo_reconstructor::{BookEngine, EngineConfig};
    ///
    /// let config = EngineConfig::new().with_logging(false);
    /// let engine = BookEngine::with_config(config);
    /// ```
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            orders: OrderIndex::new(),
            bids: BookSide::new(Side::Bid),
            asks: BookSide::new(Side::Ask),
            stats: EngineStats::default(),
        }
    }

    /// Get a reference to the current configuration.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply one event and write the resulting top of book into it.
    ///
    /// This is the main entry point. It:
    /// 1. Mutates the order index and the affected side's levels
    /// 2. Marks the side's cache stale if the best level may have moved
    /// 3. Annotates the event with both sides' best levels (refreshing
    ///    stale caches), or clears the annotation when the book is empty
    #[inline]
    pub fn apply(&mut self, event: &mut TickEvent) {
        match event.action {
            Action::Clear => self.clear_book(),
            Action::Add => self.add_order(event),
            Action::Modify => self.modify_order(event),
            Action::Delete => self.delete_order(event),
            Action::None => self.stats.ignored_events += 1,
        }

        self.stats.events_processed += 1;

        if self.config.verify_invariants {
            if let Err(e) = self.check_invariants() {
                self.stats.invariant_failures += 1;
                log::error!(
                    "Invariant check failed after event #{} (order {}): {e}",
                    self.stats.events_processed,
                    event.order_id
                );
            }
        }

        self.annotate(event);
        self.refresh_stats();
    }

    /// Apply an owned event and return it annotated.
    #[inline]
    pub fn process(&mut self, mut event: TickEvent) -> TickEvent {
        self.apply(&mut event);
        event
    }

    /// Reset, then apply every event in order.
    ///
    /// Repeated calls over the same slice produce identical annotations.
    pub fn replay(&mut self, events: &mut [TickEvent]) {
        self.reset();
        for event in events.iter_mut() {
            self.apply(event);
        }
    }

    /// Reset the engine to an empty book with stale caches and zeroed stats.
    pub fn reset(&mut self) {
        self.orders.clear();
        self.bids.reset();
        self.asks.reset();
        self.stats = EngineStats::default();
    }

    /// Current best bid, refreshing the cache if needed.
    #[inline]
    pub fn best_bid(&mut self) -> Option<BestLevel> {
        self.bids.best()
    }

    /// Current best ask, refreshing the cache if needed.
    #[inline]
    pub fn best_ask(&mut self) -> Option<BestLevel> {
        self.asks.best()
    }

    /// Live order by id.
    pub fn order(&self, order_id: u64) -> Option<&OrderRecord> {
        self.orders.lookup(order_id)
    }

    /// Get number of live orders.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Get number of price levels on bid side.
    pub fn bid_levels(&self) -> usize {
        self.bids.levels.level_count()
    }

    /// Get number of price levels on ask side.
    pub fn ask_levels(&self) -> usize {
        self.asks.levels.level_count()
    }

    /// Level index of one side, for inspection.
    pub fn levels(&self, side: Side) -> Option<&PriceLevelIndex> {
        match side {
            Side::Bid => Some(&self.bids.levels),
            Side::Ask => Some(&self.asks.levels),
            Side::None => None,
        }
    }

    /// Get current statistics.
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Verify book invariants against a brute-force recomputation.
    ///
    /// Checks, per side:
    /// - level map and price multiset agree
    /// - level counts and quantities equal the sums over live orders
    /// - a fresh cache holds the true extreme level
    pub fn check_invariants(&self) -> Result<()> {
        let mut expected: AHashMap<(Side, i64), (u32, u64)> = AHashMap::new();
        for order in self.orders.iter() {
            if order.side == Side::None {
                return Err(BboError::InconsistentState(format!(
                    "order {} stored without a side",
                    order.order_id
                )));
            }
            let entry = expected.entry((order.side, order.price)).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += order.qty as u64;
        }

        for book in [&self.bids, &self.asks] {
            let side = book.levels.side();
            book.levels.verify_invariant()?;

            let live = self.orders.count_side(side);
            if book.levels.order_count() != live {
                return Err(BboError::InconsistentState(format!(
                    "{side:?}: levels hold {} orders but index holds {live}",
                    book.levels.order_count()
                )));
            }

            for (price, level) in book.levels.iter() {
                let (count, qty) = expected.get(&(side, price)).copied().unwrap_or((0, 0));
                if level.order_count() != count || level.total_qty() != qty {
                    return Err(BboError::InconsistentState(format!(
                        "{side:?} level {price}: cached ({}, {}) but orders sum to ({count}, {qty})",
                        level.order_count(),
                        level.total_qty()
                    )));
                }
            }

            if !book.cache.is_stale() && book.cache.peek() != book.levels.scan_best() {
                return Err(BboError::InconsistentState(format!(
                    "{side:?}: fresh cache {:?} differs from true best {:?}",
                    book.cache.peek(),
                    book.levels.scan_best()
                )));
            }
        }

        Ok(())
    }

    #[inline(always)]
    fn side_mut(&mut self, side: Side) -> Option<&mut BookSide> {
        match side {
            Side::Bid => Some(&mut self.bids),
            Side::Ask => Some(&mut self.asks),
            Side::None => None,
        }
    }

    /// Wipe both sides of the book.
    fn clear_book(&mut self) {
        self.stats.clears += 1;
        self.orders.clear();
        self.bids.clear();
        self.asks.clear();
    }

    /// Add an order; an id that is already live is treated as an update.
    #[inline]
    fn add_order(&mut self, event: &TickEvent) {
        self.stats.adds += 1;

        if let Some(existing) = self.orders.lookup(event.order_id).copied() {
            self.stats.add_upserts += 1;
            if self.config.log_anomalies {
                log::debug!(
                    "Add for live order {} treated as update (event #{})",
                    event.order_id,
                    self.stats.events_processed + 1
                );
            }
            self.reprice(existing, event.price, event.qty);
            return;
        }

        self.insert_new(event);
    }

    /// Modify an order; an unknown id is treated as an add.
    #[inline]
    fn modify_order(&mut self, event: &TickEvent) {
        self.stats.modifies += 1;

        match self.orders.lookup(event.order_id).copied() {
            Some(existing) => self.reprice(existing, event.price, event.qty),
            None => {
                self.stats.modify_fallback_adds += 1;
                if self.config.log_anomalies {
                    log::debug!(
                        "Modify for unknown order {} treated as add (event #{})",
                        event.order_id,
                        self.stats.events_processed + 1
                    );
                }
                self.insert_new(event);
            }
        }
    }

    /// Delete an order; an unknown id is a no-op.
    #[inline]
    fn delete_order(&mut self, event: &TickEvent) {
        self.stats.deletes += 1;

        let Some(order) = self.orders.remove(event.order_id) else {
            self.stats.missing_deletes += 1;
            if self.config.log_anomalies {
                log::debug!(
                    "Delete for unknown order {} ignored (event #{})",
                    event.order_id,
                    self.stats.events_processed + 1
                );
            }
            return;
        };

        if let Some(book) = self.side_mut(order.side) {
            book.remove(order.price, order.qty);
        }
    }

    /// Insert a brand new order from the event's fields.
    #[inline(always)]
    fn insert_new(&mut self, event: &TickEvent) {
        let Some(book) = self.side_mut(event.side) else {
            // Non-directional orders are ignored
            self.stats.ignored_events += 1;
            return;
        };

        book.add(event.price, event.qty);
        self.orders.insert(event.order_id, OrderRecord::from_event(event));
    }

    /// Move a live order to a new price/qty on its recorded side.
    #[inline(always)]
    fn reprice(&mut self, existing: OrderRecord, price: i64, qty: u32) {
        let Some(book) = self.side_mut(existing.side) else {
            return;
        };

        if existing.price == price {
            book.adjust(price, qty as i64 - existing.qty as i64);
        } else {
            book.remove(existing.price, existing.qty);
            book.add(price, qty);
        }

        self.orders.update(existing.order_id, price, qty);
    }

    #[inline(always)]
    fn annotate(&mut self, event: &mut TickEvent) {
        if self.orders.is_empty() {
            event.clear_annotation();
            return;
        }
        event.best_bid = self.bids.best();
        event.best_ask = self.asks.best();
    }

    #[inline(always)]
    fn refresh_stats(&mut self) {
        self.stats.active_orders = self.orders.len();
        self.stats.bid_levels = self.bids.levels.level_count();
        self.stats.ask_levels = self.asks.levels.level_count();
        self.stats.cache_refreshes = self.bids.cache.refreshes() + self.asks.cache.refreshes();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(action: Action, side: Side, order_id: u64, price: i64, qty: u32) -> TickEvent {
        TickEvent::new(action, side, order_id, price, qty)
    }

    fn engine() -> BookEngine {
        BookEngine::with_config(
            EngineConfig::new()
                .with_logging(false)
                .with_invariant_checks(true),
        )
    }

    #[test]
    fn test_new_engine() {
        let engine = BookEngine::new();
        assert_eq!(engine.order_count(), 0);
        assert_eq!(engine.bid_levels(), 0);
        assert_eq!(engine.ask_levels(), 0);
    }

    #[test]
    fn test_bid_aggregation_and_delete() {
        let mut engine = engine();

        let state = engine.process(ev(Action::Add, Side::Bid, 1, 100, 5));
        assert_eq!(state.best_bid, Some(BestLevel::new(100, 5, 1)));
        assert_eq!(state.best_ask, None);

        let state = engine.process(ev(Action::Add, Side::Bid, 2, 100, 3));
        assert_eq!(state.best_bid, Some(BestLevel::new(100, 8, 2)));

        let state = engine.process(ev(Action::Delete, Side::Bid, 1, 100, 5));
        assert_eq!(state.best_bid, Some(BestLevel::new(100, 3, 1)));

        assert_eq!(engine.stats().invariant_failures, 0);
    }

    #[test]
    fn test_better_ask_takes_top() {
        let mut engine = engine();
        engine.process(ev(Action::Add, Side::Ask, 10, 50, 1));
        let state = engine.process(ev(Action::Add, Side::Ask, 11, 49, 2));
        assert_eq!(state.best_ask, Some(BestLevel::new(49, 2, 1)));
    }

    #[test]
    fn test_modify_price_improves_ask() {
        let mut engine = engine();
        engine.process(ev(Action::Add, Side::Ask, 10, 50, 1));
        engine.process(ev(Action::Add, Side::Ask, 11, 49, 2));

        let state = engine.process(ev(Action::Modify, Side::Ask, 10, 48, 1));
        assert_eq!(state.best_ask, Some(BestLevel::new(48, 1, 1)));
        assert_eq!(engine.ask_levels(), 2);
        assert!(engine.asks.levels.level(50).is_none());
    }

    #[test]
    fn test_modify_away_from_best_falls_back() {
        let mut engine = engine();
        engine.process(ev(Action::Add, Side::Bid, 1, 100, 5));
        engine.process(ev(Action::Add, Side::Bid, 2, 99, 7));

        let state = engine.process(ev(Action::Modify, Side::Bid, 1, 95, 5));
        assert_eq!(state.best_bid, Some(BestLevel::new(99, 7, 1)));
    }

    #[test]
    fn test_modify_same_price_adjusts_qty() {
        let mut engine = engine();
        engine.process(ev(Action::Add, Side::Bid, 1, 100, 5));
        engine.process(ev(Action::Add, Side::Bid, 2, 100, 3));

        let state = engine.process(ev(Action::Modify, Side::Bid, 1, 100, 1));
        assert_eq!(state.best_bid, Some(BestLevel::new(100, 4, 2)));

        let state = engine.process(ev(Action::Modify, Side::Bid, 2, 100, 10));
        assert_eq!(state.best_bid, Some(BestLevel::new(100, 11, 2)));
    }

    #[test]
    fn test_clear_unsets_both_sides() {
        let mut engine = engine();
        engine.process(ev(Action::Add, Side::Bid, 1, 100, 5));
        engine.process(ev(Action::Add, Side::Ask, 2, 101, 5));

        let state = engine.process(TickEvent::clear());
        assert_eq!(state.best_bid, None);
        assert_eq!(state.best_ask, None);
        assert_eq!(engine.order_count(), 0);
        assert_eq!(engine.bid_levels(), 0);
        assert_eq!(engine.ask_levels(), 0);

        let state = engine.process(ev(Action::Add, Side::Ask, 3, 105, 2));
        assert_eq!(state.best_bid, None);
        assert_eq!(state.best_ask, Some(BestLevel::new(105, 2, 1)));
    }

    #[test]
    fn test_empty_after_clear_regardless_of_cache_flag() {
        let mut engine = engine();
        engine.process(ev(Action::Add, Side::Bid, 1, 100, 5));
        engine.clear_book();

        // Whatever the flag says, both sides must read empty
        assert_eq!(engine.best_bid(), None);
        assert_eq!(engine.best_ask(), None);
        assert_eq!(engine.bids.levels.best(), None);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut engine = engine();
        let before = engine.process(ev(Action::Add, Side::Bid, 1, 100, 5));

        let after = engine.process(ev(Action::Delete, Side::Bid, 999, 100, 5));
        assert_eq!(after.best_bid, before.best_bid);
        assert_eq!(after.best_ask, before.best_ask);
        assert_eq!(engine.order_count(), 1);
        assert_eq!(engine.stats().missing_deletes, 1);
    }

    #[test]
    fn test_modify_unknown_is_add() {
        let mut modified = engine();
        let mut added = engine();

        let a = modified.process(ev(Action::Modify, Side::Ask, 5, 70, 4));
        let b = added.process(ev(Action::Add, Side::Ask, 5, 70, 4));

        assert_eq!(a.best_ask, b.best_ask);
        assert_eq!(a.best_bid, b.best_bid);
        assert_eq!(modified.order(5), added.order(5));
        assert_eq!(modified.stats().modify_fallback_adds, 1);
    }

    #[test]
    fn test_add_existing_id_is_update() {
        let mut engine = engine();
        engine.process(ev(Action::Add, Side::Bid, 1, 100, 5));
        let state = engine.process(ev(Action::Add, Side::Bid, 1, 102, 6));

        assert_eq!(engine.order_count(), 1);
        assert_eq!(engine.bid_levels(), 1);
        assert_eq!(state.best_bid, Some(BestLevel::new(102, 6, 1)));
        assert_eq!(engine.stats().add_upserts, 1);
    }

    #[test]
    fn test_update_keeps_recorded_side() {
        let mut engine = engine();
        engine.process(ev(Action::Add, Side::Bid, 1, 100, 5));

        // Wrong side on the modify: the order stays a bid
        let state = engine.process(ev(Action::Modify, Side::Ask, 1, 101, 5));
        assert_eq!(state.best_bid, Some(BestLevel::new(101, 5, 1)));
        assert_eq!(state.best_ask, None);
        assert_eq!(engine.order(1).unwrap().side, Side::Bid);
    }

    #[test]
    fn test_sideless_and_unknown_events_ignored() {
        let mut engine = engine();
        engine.process(ev(Action::Add, Side::Bid, 1, 100, 5));

        let state = engine.process(ev(Action::Add, Side::None, 2, 200, 5));
        assert_eq!(state.best_bid, Some(BestLevel::new(100, 5, 1)));
        assert!(engine.order(2).is_none());

        let state = engine.process(ev(Action::None, Side::Bid, 3, 300, 5));
        assert_eq!(state.best_bid, Some(BestLevel::new(100, 5, 1)));
        assert_eq!(engine.stats().ignored_events, 2);
    }

    #[test]
    fn test_no_annotation_on_empty_book() {
        let mut engine = engine();
        let mut event = ev(Action::Delete, Side::Bid, 1, 100, 5);
        event.best_bid = Some(BestLevel::new(1, 1, 1));
        engine.apply(&mut event);
        assert_eq!(event.best_bid, None);
        assert_eq!(event.best_ask, None);
    }

    #[test]
    fn test_replay_is_idempotent() {
        let mut events = vec![
            ev(Action::Add, Side::Bid, 1, 100, 5),
            ev(Action::Add, Side::Ask, 2, 103, 1),
            ev(Action::Add, Side::Ask, 3, 102, 4),
            ev(Action::Modify, Side::Ask, 3, 104, 4),
            TickEvent::clear(),
            ev(Action::Add, Side::Bid, 4, 98, 9),
            ev(Action::Delete, Side::Bid, 4, 98, 9),
        ];

        let mut engine = engine();
        engine.replay(&mut events);
        let first = events.clone();
        let first_stats = engine.stats().clone();

        engine.replay(&mut events);
        assert_eq!(events, first);
        assert_eq!(engine.stats(), &first_stats);
        assert_eq!(first_stats.events_processed, 7);
    }

    #[test]
    fn test_cache_refreshes_are_lazy() {
        let mut engine = engine();
        engine.process(ev(Action::Add, Side::Bid, 1, 100, 5));
        engine.process(ev(Action::Add, Side::Ask, 2, 110, 5));
        let refreshes = engine.stats().cache_refreshes;

        // Worse-than-best inserts must not trigger recomputation
        for id in 10..20 {
            engine.process(ev(Action::Add, Side::Bid, id, 90 - id as i64, 1));
            engine.process(ev(Action::Add, Side::Ask, id + 100, 120 + id as i64, 1));
        }
        assert_eq!(engine.stats().cache_refreshes, refreshes);
        engine.check_invariants().unwrap();
    }

    #[test]
    fn test_statistics() {
        let mut engine = engine();
        engine.process(ev(Action::Add, Side::Bid, 1, 100, 5));
        engine.process(ev(Action::Add, Side::Ask, 2, 101, 5));
        engine.process(ev(Action::Modify, Side::Ask, 2, 102, 5));
        engine.process(ev(Action::Delete, Side::Bid, 1, 100, 5));

        let stats = engine.stats();
        assert_eq!(stats.events_processed, 4);
        assert_eq!(stats.adds, 2);
        assert_eq!(stats.modifies, 1);
        assert_eq!(stats.deletes, 1);
        assert_eq!(stats.active_orders, 1);
        assert_eq!(stats.bid_levels, 0);
        assert_eq!(stats.ask_levels, 1);
    }

    #[test]
    fn test_stats_json_round_trip() {
        let mut engine = engine();
        engine.process(ev(Action::Add, Side::Bid, 1, 100, 5));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        engine.stats().save_json(&path).unwrap();
        let loaded = EngineStats::load_json(&path).unwrap();
        assert_eq!(&loaded, engine.stats());
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        engine.process(ev(Action::Add, Side::Bid, 1, 100, 5));
        engine.process(ev(Action::Add, Side::Ask, 2, 101, 5));
        engine.reset();

        assert_eq!(engine.order_count(), 0);
        assert_eq!(engine.stats(), &EngineStats::default());
        assert!(engine.bids.cache.is_stale());
        assert!(engine.asks.cache.is_stale());
    }

    #[test]
    fn test_config_builder() {
        let config = EngineConfig::new()
            .with_logging(false)
            .with_invariant_checks(true);
        assert!(!config.log_anomalies);
        assert!(config.verify_invariants);

        let default = EngineConfig::default();
        assert!(default.log_anomalies);
        assert!(!default.verify_invariants);
    }
}
