//! Live order store keyed by order id.
//!
//! The index exclusively owns every `OrderRecord`. It is deliberately dumb:
//! upsert and fallback policies belong to the engine, which decides when an
//! add becomes an update and when a modify becomes an add.

use ahash::AHashMap;

use crate::types::{OrderRecord, Side};

/// Order tracking: order_id -> OrderRecord.
#[derive(Debug, Clone, Default)]
pub struct OrderIndex {
    orders: AHashMap<u64, OrderRecord>,
}

impl OrderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record` under `order_id`, returning any record it replaced.
    #[inline]
    pub fn insert(&mut self, order_id: u64, record: OrderRecord) -> Option<OrderRecord> {
        self.orders.insert(order_id, record)
    }

    #[inline]
    pub fn lookup(&self, order_id: u64) -> Option<&OrderRecord> {
        self.orders.get(&order_id)
    }

    /// Remove an order, if present.
    #[inline]
    pub fn remove(&mut self, order_id: u64) -> Option<OrderRecord> {
        self.orders.remove(&order_id)
    }

    /// Update price and quantity of an existing order in place.
    ///
    /// The side is never changed. Returns the previous record, or `None`
    /// when the id is unknown.
    #[inline]
    pub fn update(&mut self, order_id: u64, price: i64, qty: u32) -> Option<OrderRecord> {
        let record = self.orders.get_mut(&order_id)?;
        let previous = *record;
        record.price = price;
        record.qty = qty;
        Some(previous)
    }

    /// Number of live orders.
    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Count live orders on one side (O(n)).
    pub fn count_side(&self, side: Side) -> usize {
        self.orders.values().filter(|order| order.side == side).count()
    }

    /// Remove every order on both sides.
    pub fn clear(&mut self) {
        self.orders.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrderRecord> + '_ {
        self.orders.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(order_id: u64, side: Side, price: i64, qty: u32) -> OrderRecord {
        OrderRecord {
            order_id,
            side,
            price,
            qty,
        }
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut index = OrderIndex::new();
        assert!(index.insert(1, record(1, Side::Bid, 100, 5)).is_none());
        assert_eq!(index.lookup(1).map(|o| o.qty), Some(5));
        assert!(index.lookup(2).is_none());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_insert_replaces() {
        let mut index = OrderIndex::new();
        index.insert(1, record(1, Side::Bid, 100, 5));
        let old = index.insert(1, record(1, Side::Bid, 101, 6));
        assert_eq!(old.map(|o| o.price), Some(100));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_update_keeps_side() {
        let mut index = OrderIndex::new();
        index.insert(3, record(3, Side::Ask, 50, 1));

        let previous = index.update(3, 48, 2).unwrap();
        assert_eq!(previous.price, 50);
        assert_eq!(previous.qty, 1);

        let current = index.lookup(3).unwrap();
        assert_eq!(current.side, Side::Ask);
        assert_eq!(current.price, 48);
        assert_eq!(current.qty, 2);
    }

    #[test]
    fn test_update_unknown_id() {
        let mut index = OrderIndex::new();
        assert!(index.update(9, 1, 1).is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut index = OrderIndex::new();
        index.insert(1, record(1, Side::Bid, 100, 5));
        assert!(index.remove(1).is_some());
        assert!(index.remove(1).is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn test_count_side_and_clear() {
        let mut index = OrderIndex::new();
        index.insert(1, record(1, Side::Bid, 100, 5));
        index.insert(2, record(2, Side::Bid, 99, 5));
        index.insert(3, record(3, Side::Ask, 101, 5));
        assert_eq!(index.count_side(Side::Bid), 2);
        assert_eq!(index.count_side(Side::Ask), 1);

        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.count_side(Side::Bid), 0);
    }
}
