//! # BBO-Reconstructor
//!
//! Incremental top-of-book reconstruction from order-level event logs, for
//! offline analytics and backtesting pipelines that need a best bid/offer
//! snapshot after every tick.
//!
//! Each input event adds, modifies, deletes an order, or clears the book.
//! After applying it, the engine annotates the event with the best bid and
//! best ask price together with the aggregate live quantity and order count
//! at that price.
//!
//! ## Features
//!
//! - **Two-structure indexing**: exact-price `AHashMap` levels plus an
//!   ordered price multiset for O(log n) best-price lookups
//! - **Lazy best-of-book cache**: O(1) conservative invalidation at write
//!   time, recomputation only on the next read
//! - **Tolerant replay**: adds on live ids update, modifies on unknown ids add,
//!   deletes on unknown ids do nothing; the engine never aborts mid-replay
//! - **Restartable**: `replay()` resets state first, so repeated runs over the
//!   same events give identical annotations
//!
//! ## Quick Start
//!
//! ```rust
//! use bbo_reconstructor::{Action, BestLevel, BookEngine, Side, TickEvent};
//!
//! let mut engine = BookEngine::new();
//!
//! let state = engine.process(TickEvent::new(Action::Add, Side::Bid, 1, 100, 5));
//! assert_eq!(state.best_bid, Some(BestLevel::new(100, 5, 1)));
//!
//! let state = engine.process(TickEvent::new(Action::Add, Side::Bid, 2, 100, 3));
//! assert_eq!(state.best_bid, Some(BestLevel::new(100, 8, 2)));
//!
//! let state = engine.process(TickEvent::new(Action::Delete, Side::Bid, 1, 0, 0));
//! assert_eq!(state.best_bid, Some(BestLevel::new(100, 3, 1)));
//! ```
//!
//! ### Replaying a File
//!
//! ```ignore
//! use bbo_reconstructor::{codec, BookEngine, CsvSource, EventSource};
//!
//! let mut events = CsvSource::new("ticks.csv")?.collect_events()?;
//!
//! let mut engine = BookEngine::new();
//! engine.replay(&mut events);
//!
//! codec::save_events("ticks_bbo.csv", &events)?;
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Core types: `TickEvent`, `BestLevel`, `OrderRecord`, `Action`, `Side` |
//! | [`lob`] | Book maintenance: `BookEngine`, `PriceLevelIndex`, `TopOfBookCache` |
//! | [`codec`] | Semicolon-delimited line decoding and encoding |
//! | [`source`] | Event sources: `EventSource`, `CsvSource`, `VecSource` |
//! | [`error`] | `BboError` and `Result` |

pub mod codec;
pub mod error;
pub mod lob;
pub mod source;
pub mod types;

// Re-exports - Core types
pub use error::{BboError, Result};
pub use types::{Action, BestLevel, OrderRecord, Side, TickEvent};

// Re-exports - Book maintenance
pub use lob::{
    BookEngine, EngineConfig, EngineStats, OrderIndex, PriceLevel, PriceLevelIndex, PriceSet,
    TopOfBookCache,
};

// Re-exports - Sources
pub use source::{CsvSource, EventSource, SourceMetadata, VecSource};
