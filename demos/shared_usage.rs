//! Shared Cache Usage
//!
//! Multi-threaded usage of `SharedLruCache`: several workers share one cache,
//! then a multi-step update runs atomically under `with_lock`.
//!
//! Run with: cargo run --example shared_usage --features concurrent

extern crate lru_engine;

use lru_engine::config::LruCacheConfig;
use lru_engine::SharedLruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

const NUM_THREADS: usize = 4;
const OPS_PER_THREAD: usize = 10_000;

fn main() {
    println!("Shared Cache Usage");
    println!("==================\n");

    let config = LruCacheConfig::new(NonZeroUsize::new(1_000).unwrap());
    let cache: Arc<SharedLruCache<String, usize>> = Arc::new(SharedLruCache::init(config, None));

    let start = Instant::now();
    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let mut hits = 0usize;
                for i in 0..OPS_PER_THREAD {
                    let key = format!("key_{}", (i * 17 + t) % 1_500);
                    if cache.get(&key).is_some() {
                        hits += 1;
                    } else {
                        cache.put(key, i);
                    }
                }
                hits
            })
        })
        .collect();

    let hits: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    let total = NUM_THREADS * OPS_PER_THREAD;
    println!(
        "{} threads x {} ops in {:?}",
        NUM_THREADS,
        OPS_PER_THREAD,
        start.elapsed()
    );
    println!(
        "hits: {} / {} ({:.2}%)",
        hits,
        total,
        hits as f64 * 100.0 / total as f64
    );
    println!("entries: {} / {}\n", cache.len(), cache.capacity());

    // Read-modify-write as one step.
    let counter = cache.with_lock(|c| {
        let next = c.peek("counter").copied().unwrap_or(0) + 1;
        c.put("counter".to_string(), next);
        next
    });
    println!("counter after atomic increment: {}", counter);

    let newest: Vec<String> = cache
        .snapshot()
        .into_iter()
        .take(3)
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    println!("most recently used: {}", newest.join(", "));
}
