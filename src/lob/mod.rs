//! Order book maintenance module.
//!
//! This module provides incremental top-of-book reconstruction from
//! order-level events.

pub mod engine;
mod order_index;
pub mod price_level;
mod price_set;
mod top_of_book;

pub use engine::{BookEngine, EngineConfig, EngineStats};
pub use order_index::OrderIndex;
pub use price_level::{PriceLevel, PriceLevelIndex};
pub use price_set::PriceSet;
pub use top_of_book::TopOfBookCache;
