//! Basic usage example for the BBO reconstructor.
//!
//! Run with: cargo run --example basic_usage

use bbo_reconstructor::{Action, BestLevel, BookEngine, Side, TickEvent};

fn describe(level: Option<BestLevel>) -> String {
    match level {
        Some(level) => format!("{} x {} ({} orders)", level.price, level.qty, level.count),
        None => "-".to_string(),
    }
}

fn main() {
    println!("=================================================================");
    println!("BBO Reconstructor - Basic Usage Example");
    println!("=================================================================\n");

    let mut engine = BookEngine::new();

    let events = vec![
        ("Add BID 1 @ 100 x 5", TickEvent::new(Action::Add, Side::Bid, 1, 100, 5)),
        ("Add BID 2 @ 100 x 3", TickEvent::new(Action::Add, Side::Bid, 2, 100, 3)),
        ("Add ASK 10 @ 50 x 1", TickEvent::new(Action::Add, Side::Ask, 10, 50, 1)),
        ("Add ASK 11 @ 49 x 2", TickEvent::new(Action::Add, Side::Ask, 11, 49, 2)),
        ("Modify ASK 10 -> 48 x 1", TickEvent::new(Action::Modify, Side::Ask, 10, 48, 1)),
        ("Delete BID 1", TickEvent::new(Action::Delete, Side::Bid, 1, 100, 5)),
        ("Delete unknown 999", TickEvent::new(Action::Delete, Side::Bid, 999, 0, 0)),
        ("Clear", TickEvent::clear()),
    ];

    for (i, (label, event)) in events.into_iter().enumerate() {
        let state = engine.process(event);
        println!("Event {}: {}", i + 1, label);
        println!("  Best bid: {}", describe(state.best_bid));
        println!("  Best ask: {}", describe(state.best_ask));
        println!();
    }

    let stats = engine.stats();
    println!("Events processed: {}", stats.events_processed);
    println!("Cache refreshes:  {}", stats.cache_refreshes);
    println!("Missing deletes:  {}", stats.missing_deletes);
}
