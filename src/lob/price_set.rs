//! Ordered multiset of active prices.
//!
//! Each registration of a price bumps its multiplicity; the key disappears
//! only when the multiplicity drops back to zero. This gives O(log n)
//! minimum/maximum lookups that an exact-key hash map cannot provide.
//!
//! # Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `insert` | O(log n) |
//! | `remove` | O(log n) |
//! | `min` / `max` | O(log n) |
//! | `multiplicity` | O(log n) |

use std::collections::BTreeMap;

/// Sorted multiset of price ticks.
#[derive(Debug, Clone, Default)]
pub struct PriceSet {
    /// price -> number of registrations
    counts: BTreeMap<i64, u32>,
    /// Sum of all multiplicities
    total: usize,
}

impl PriceSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one occurrence of `price`.
    #[inline]
    pub fn insert(&mut self, price: i64) {
        *self.counts.entry(price).or_insert(0) += 1;
        self.total += 1;
    }

    /// Unregister one occurrence of `price`.
    ///
    /// Returns `false` if the price was not registered.
    #[inline]
    pub fn remove(&mut self, price: i64) -> bool {
        match self.counts.get_mut(&price) {
            Some(count) => {
                *count -= 1;
                if *count == 0 {
                    self.counts.remove(&price);
                }
                self.total -= 1;
                true
            }
            None => false,
        }
    }

    /// Drop every occurrence of `price`, returning how many were removed.
    #[inline]
    pub fn remove_all(&mut self, price: i64) -> u32 {
        let removed = self.counts.remove(&price).unwrap_or(0);
        self.total -= removed as usize;
        removed
    }

    /// Lowest registered price.
    #[inline]
    pub fn min(&self) -> Option<i64> {
        self.counts.first_key_value().map(|(&price, _)| price)
    }

    /// Highest registered price.
    #[inline]
    pub fn max(&self) -> Option<i64> {
        self.counts.last_key_value().map(|(&price, _)| price)
    }

    /// Number of registrations of `price`.
    #[inline]
    pub fn multiplicity(&self, price: i64) -> u32 {
        self.counts.get(&price).copied().unwrap_or(0)
    }

    #[inline]
    pub fn contains(&self, price: i64) -> bool {
        self.counts.contains_key(&price)
    }

    /// Number of distinct prices.
    #[inline]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total registrations across all prices.
    #[inline]
    pub fn len(&self) -> usize {
        self.total
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
        self.total = 0;
    }

    /// Iterate (price, multiplicity) in ascending price order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, u32)> + '_ {
        self.counts.iter().map(|(&price, &count)| (price, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set() {
        let set = PriceSet::new();
        assert!(set.is_empty());
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_min_max() {
        let mut set = PriceSet::new();
        set.insert(50);
        set.insert(49);
        set.insert(52);
        assert_eq!(set.min(), Some(49));
        assert_eq!(set.max(), Some(52));
        assert_eq!(set.distinct(), 3);
    }

    #[test]
    fn test_duplicates_survive_single_remove() {
        let mut set = PriceSet::new();
        set.insert(100);
        set.insert(100);
        set.insert(101);
        assert_eq!(set.multiplicity(100), 2);
        assert_eq!(set.len(), 3);

        assert!(set.remove(100));
        assert!(set.contains(100));
        assert_eq!(set.min(), Some(100));

        assert!(set.remove(100));
        assert!(!set.contains(100));
        assert_eq!(set.min(), Some(101));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_unknown_price() {
        let mut set = PriceSet::new();
        set.insert(10);
        assert!(!set.remove(11));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_all() {
        let mut set = PriceSet::new();
        set.insert(7);
        set.insert(7);
        set.insert(7);
        set.insert(8);
        assert_eq!(set.remove_all(7), 3);
        assert_eq!(set.remove_all(7), 0);
        assert_eq!(set.len(), 1);
        assert_eq!(set.min(), Some(8));
    }

    #[test]
    fn test_negative_prices_order() {
        let mut set = PriceSet::new();
        set.insert(-5);
        set.insert(3);
        set.insert(-12);
        assert_eq!(set.min(), Some(-12));
        assert_eq!(set.max(), Some(3));
        let ordered: Vec<i64> = set.iter().map(|(p, _)| p).collect();
        assert_eq!(ordered, vec![-12, -5, 3]);
    }

    #[test]
    fn test_clear() {
        let mut set = PriceSet::new();
        set.insert(1);
        set.insert(2);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
