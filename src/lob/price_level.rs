//! Per-side price level aggregates.
//!
//! This module provides `PriceLevel`, a live order count plus cached
//! aggregate quantity for one price, and `PriceLevelIndex`, which keeps all
//! levels of one side in two synchronized structures:
//!
//! - an `AHashMap<price, PriceLevel>` for exact-price mutation
//! - a [`PriceSet`] multiset for best-price retrieval
//!
//! # Invariant
//!
//! For every price, the multiset multiplicity MUST equal the level's order
//! count, and no level with a zero count may exist. Each mutating method
//! updates both structures before returning; debug builds assert the
//! per-price invariant after every mutation, and `verify_invariant()`
//! checks the whole side.
//!
//! # Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `add_qty` | O(log n) |
//! | `remove_qty` | O(log n) |
//! | `adjust_qty` | O(1) |
//! | `best` | O(log n) |

use ahash::AHashMap;

use super::price_set::PriceSet;
use crate::error::{BboError, Result};
use crate::types::{BestLevel, Side};

/// Aggregate of all live orders sharing one price on one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceLevel {
    /// Number of live orders
    count: u32,
    /// Cached total quantity
    total_qty: u64,
}

impl PriceLevel {
    /// Create a new empty price level.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of orders at this price level.
    #[inline]
    pub fn order_count(&self) -> u32 {
        self.count
    }

    /// Get the cached total quantity (O(1)).
    #[inline]
    pub fn total_qty(&self) -> u64 {
        self.total_qty
    }

    /// Check if the price level has no orders.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    fn push(&mut self, qty: u32) {
        self.count += 1;
        self.total_qty = self.total_qty.saturating_add(qty as u64);
    }

    #[inline]
    fn pop(&mut self, qty: u32) {
        self.count = self.count.saturating_sub(1);
        self.total_qty = self.total_qty.saturating_sub(qty as u64);
    }

    #[inline]
    fn adjust(&mut self, delta: i64) {
        self.total_qty = self.total_qty.saturating_add_signed(delta);
    }
}

/// All price levels of one book side.
#[derive(Debug, Clone)]
pub struct PriceLevelIndex {
    side: Side,
    levels: AHashMap<i64, PriceLevel>,
    prices: PriceSet,
}

impl PriceLevelIndex {
    /// Create an empty index for `side`.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: AHashMap::new(),
            prices: PriceSet::new(),
        }
    }

    /// Side this index aggregates.
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Add one order of `qty` at `price`, creating the level if needed.
    #[inline]
    pub fn add_qty(&mut self, price: i64, qty: u32) {
        self.levels.entry(price).or_default().push(qty);
        self.prices.insert(price);

        #[cfg(debug_assertions)]
        self.verify_price(price);
    }

    /// Remove one order of `qty` at `price`, dropping the level when empty.
    ///
    /// Returns `false` when no level exists at `price`; the index is left
    /// untouched in that case.
    #[inline]
    pub fn remove_qty(&mut self, price: i64, qty: u32) -> bool {
        let Some(level) = self.levels.get_mut(&price) else {
            log::warn!(
                "{:?} level {} not found while removing qty {}",
                self.side,
                price,
                qty
            );
            return false;
        };

        level.pop(qty);
        if level.is_empty() {
            self.levels.remove(&price);
            self.prices.remove_all(price);
        } else {
            self.prices.remove(price);
        }

        #[cfg(debug_assertions)]
        self.verify_price(price);

        true
    }

    /// Change the aggregate quantity at `price` without touching its count.
    ///
    /// Returns `false` when no level exists at `price`.
    #[inline]
    pub fn adjust_qty(&mut self, price: i64, delta: i64) -> bool {
        match self.levels.get_mut(&price) {
            Some(level) => {
                level.adjust(delta);
                true
            }
            None => false,
        }
    }

    /// Best level: lowest price for asks, highest for bids.
    #[inline]
    pub fn best(&self) -> Option<BestLevel> {
        let price = match self.side {
            Side::Ask => self.prices.min()?,
            Side::Bid => self.prices.max()?,
            Side::None => return None,
        };
        self.levels
            .get(&price)
            .map(|level| BestLevel::new(price, level.total_qty, level.count))
    }

    /// Level at an exact price.
    #[inline]
    pub fn level(&self, price: i64) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    /// Number of distinct price levels.
    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Number of live orders across all levels.
    #[inline]
    pub fn order_count(&self) -> usize {
        self.prices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Drop every level.
    pub fn clear(&mut self) {
        self.levels.clear();
        self.prices.clear();
    }

    /// Iterate levels in ascending price order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &PriceLevel)> + '_ {
        self.prices
            .iter()
            .filter_map(move |(price, _)| self.levels.get(&price).map(|level| (price, level)))
    }

    /// Brute-force best level, scanning every level (O(n)).
    pub fn scan_best(&self) -> Option<BestLevel> {
        let levels = self.levels.iter();
        let best = match self.side {
            Side::Ask => levels.min_by_key(|&(&price, _)| price),
            Side::Bid => levels.max_by_key(|&(&price, _)| price),
            Side::None => None,
        };
        best.map(|(&price, level)| BestLevel::new(price, level.total_qty, level.count))
    }

    /// Check that map and multiset agree for every price.
    pub fn verify_invariant(&self) -> Result<()> {
        if self.levels.len() != self.prices.distinct() {
            return Err(BboError::InconsistentState(format!(
                "{:?}: {} levels but {} registered prices",
                self.side,
                self.levels.len(),
                self.prices.distinct()
            )));
        }

        for (&price, level) in &self.levels {
            if level.is_empty() {
                return Err(BboError::InconsistentState(format!(
                    "{:?}: empty level left at {}",
                    self.side, price
                )));
            }
            let registered = self.prices.multiplicity(price);
            if registered != level.count {
                return Err(BboError::InconsistentState(format!(
                    "{:?}: level {} has count {} but {} registrations",
                    self.side, price, level.count, registered
                )));
            }
        }

        Ok(())
    }

    #[cfg(debug_assertions)]
    #[inline]
    fn verify_price(&self, price: i64) {
        let count = self.levels.get(&price).map_or(0, |level| level.count);
        debug_assert_eq!(
            self.prices.multiplicity(price),
            count,
            "PriceLevelIndex invariant violated at price {price}"
        );
    }
}
