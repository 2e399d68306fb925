//! Memoized best level for one side of the book.
//!
//! The cache is invalidated at write time by an O(1) predicate that only
//! compares the mutated price with the cached best price, and refreshed
//! lazily on the next read. The predicate may over-invalidate but must never
//! leave a changed best level marked fresh:
//!
//! - a change at the cached best price marks the cache stale
//! - an insertion at a price at least as good as the cached best marks it stale
//! - an insertion into a side with no cached best marks it stale
//!
//! Anything strictly worse than the cached best cannot move the top of book.

use super::price_level::PriceLevelIndex;
use crate::types::{BestLevel, Side};

/// Cached best (price, qty, count) with a dirty flag.
#[derive(Debug, Clone)]
pub struct TopOfBookCache {
    side: Side,
    best: Option<BestLevel>,
    stale: bool,
    refreshes: u64,
}

impl TopOfBookCache {
    /// Create a stale, empty cache for `side`.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            best: None,
            stale: true,
            refreshes: 0,
        }
    }

    /// Record an order added at `price`, or a quantity increase there.
    #[inline(always)]
    pub fn note_insert(&mut self, price: i64) {
        if self.stale {
            return;
        }
        self.stale = match self.best {
            Some(best) => self.side.at_least_as_good(price, best.price),
            None => true,
        };
    }

    /// Record a removal or quantity change at `price`.
    #[inline(always)]
    pub fn note_change(&mut self, price: i64) {
        if let Some(best) = self.best {
            if best.price == price {
                self.stale = true;
            }
        }
    }

    /// Force a refresh on the next read.
    #[inline]
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    #[inline]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Last cached value, without refreshing. May be out of date when stale.
    #[inline]
    pub fn peek(&self) -> Option<BestLevel> {
        self.best
    }

    /// Current best level, recomputed from `levels` if the cache is stale.
    #[inline]
    pub fn read(&mut self, levels: &PriceLevelIndex) -> Option<BestLevel> {
        if self.stale {
            self.best = levels.best();
            self.stale = false;
            self.refreshes += 1;
        }
        self.best
    }

    /// Number of refreshes since creation or the last reset.
    #[inline]
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    /// Return to the initial (empty, stale) state.
    pub fn reset(&mut self) {
        self.best = None;
        self.stale = true;
        self.refreshes = 0;
    }
}
