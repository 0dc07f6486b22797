#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## How the Engine Is Built
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                         LruCache<K, V>                         │
//! │                                                                │
//! │   KeyIndex (hash map)          RecencyList (arena)             │
//! │  ┌─────────┬────────┐        ┌───────────────────────────────┐ │
//! │  │ key "a" │ slot 2 │──────▶ │ head ─▶ [a] ⇄ [c] ⇄ [b] ◀─ tail│ │
//! │  │ key "b" │ slot 0 │──────▶ │  MRU                      LRU │ │
//! │  │ key "c" │ slot 1 │──────▶ │                               │ │
//! │  └─────────┴────────┘        └───────────────────────────────┘ │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every key in the index points at exactly one live slot of the recency list,
//! and every live slot is indexed by its own key. All mutations go through
//! [`LruCache`], which updates both halves together.
//!
//! ## Quick Reference
//!
//! | Type | Description |
//! |------|-------------|
//! | [`LruCache`] | The single-threaded engine |
//! | [`CacheSession`] | Engine plus hit/miss statistics, input checks and an operation log |
//! | [`AccessStats`] | Hit/miss counters kept outside the engine |
//! | `SharedLruCache` | The engine behind one `parking_lot` mutex (`concurrent` feature) |
//!
//! ## Code Examples
//!
//! ```rust
//! use lru_engine::LruCache;
//! use lru_engine::config::LruCacheConfig;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(2).unwrap(),
//! };
//! let mut cache = LruCache::init(config, None);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");      // "a" becomes most recently used
//! cache.put("c", 3);    // "b" evicted (least recently used)
//! assert!(cache.get(&"b").is_none());
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: The LRU cache engine
//! - [`config`]: Cache configuration
//! - [`error`]: Configuration errors and invariant violations
//! - [`stats`]: Hit/miss statistics
//! - [`session`]: Interactive session on top of the engine
//! - `shared`: Thread-safe wrapper (requires `concurrent` feature)

#![no_std]

extern crate alloc;

#[cfg(any(feature = "std", not(feature = "hashbrown"), test))]
extern crate std;

#[cfg(test)]
extern crate scoped_threadpool;

/// Cache entry type.
///
/// Holds one key-value pair together with its recency-list links.
pub(crate) mod entry;

/// Arena-backed doubly linked list ordering entries by recency.
///
/// Entries live in a slot vector and link to each other by slot index, so the
/// list needs no raw pointers. Freed slots are reused by later insertions.
pub(crate) mod list;

/// Hash index from key to recency-list slot.
pub(crate) mod index;

/// Cache configuration structures.
pub mod config;

/// Error types.
pub mod error;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used items when
/// the capacity is reached.
pub mod lru;

/// Hit/miss statistics.
pub mod stats;

/// Interactive session driving an [`LruCache`].
pub mod session;

/// Thread-safe wrapper around a single [`LruCache`].
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod shared;

pub use config::LruCacheConfig;
pub use error::{ConfigError, InvariantViolation};
pub use index::DefaultHashBuilder;
pub use lru::{Iter, LruCache, PutResult};
pub use session::CacheSession;
pub use stats::{AccessStats, CacheMetrics};

#[cfg(feature = "concurrent")]
pub use shared::SharedLruCache;
