//! Cache Session Walkthrough
//!
//! Replays the interactive PUT / GET / CLEAR flow of a cache visualizer as
//! plain text: after each action it prints the log line, the slots from most
//! to least recently used, the occupancy, and the hit/miss statistics.
//!
//! Run with: cargo run --example session_walkthrough

extern crate lru_engine;

use lru_engine::session::{CacheSession, SlotTag};
use lru_engine::stats::CacheMetrics;

enum Action {
    Put(u32, &'static str),
    Get(u32),
    Clear,
}

fn main() {
    println!("LRU Cache Session Walkthrough");
    println!("=============================");

    let mut session: CacheSession<u32, String> = CacheSession::default();
    println!(
        "Capacity {} (default session), log keeps the last 100 operations.\n",
        session.occupancy().capacity
    );

    let script = [
        Action::Put(1, "apple"),
        Action::Put(2, "banana"),
        Action::Put(3, "cherry"),
        Action::Get(1),
        Action::Put(4, "date"),
        Action::Put(5, "elderberry"),
        Action::Put(6, "fig"),
        Action::Get(2),
        Action::Put(3, "cranberry"),
        Action::Put(7, ""),
        Action::Get(9),
        Action::Clear,
        Action::Put(8, "grape"),
    ];

    for action in script {
        match action {
            Action::Put(key, value) => match session.put(key, value.to_string()) {
                Ok(outcome) => {
                    if let Some((k, v)) = outcome.evicted {
                        println!("  (evicted {}:{})", k, v);
                    }
                }
                Err(err) => {
                    println!("{}", err);
                    continue;
                }
            },
            Action::Get(key) => {
                session.get(&key);
            }
            Action::Clear => session.clear(),
        }

        if let Some(line) = session.log().next_back() {
            println!("{}", line);
        }
        render(&session);
    }

    println!("Final metrics:");
    for (name, value) in session.stats().metrics() {
        println!("  {:<14} {:>8.2}", name, value);
    }
}

fn render(session: &CacheSession<u32, String>) {
    let cells: Vec<String> = session
        .slots()
        .map(|slot| {
            let marker = match slot.tag {
                SlotTag::Mru => " (MRU)",
                SlotTag::Middle => "",
                SlotTag::Lru => " (LRU)",
            };
            format!("[{}:{}{}]", slot.key, slot.value, marker)
        })
        .collect();

    if cells.is_empty() {
        println!("  <empty>");
    } else {
        println!("  {}", cells.join(" -> "));
    }
    println!("  {}", session.occupancy());
    println!("  {}\n", session.stats());
}
