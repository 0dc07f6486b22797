//! Access Statistics
//!
//! Hit/miss counting for code that drives an [`LruCache`](crate::LruCache).
//! The cache engine itself keeps no counters: whether a lookup counts as a hit,
//! and when counters reset, is decided by the caller. [`CacheSession`] is the
//! caller shipped with this crate.
//!
//! Metrics are reported as a `BTreeMap` so the keys always come out in the same
//! order, which keeps logs and test output stable.
//!
//! [`CacheSession`]: crate::session::CacheSession

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::fmt;

/// Common interface for reporting cache metrics.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Name of the eviction policy the metrics describe.
    fn algorithm_name(&self) -> &'static str;
}

/// Hit and miss counters for one cache.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AccessStats {
    /// Lookups that found their key.
    pub hits: u64,
    /// Lookups that did not find their key.
    pub misses: u64,
    /// New keys inserted.
    pub insertions: u64,
    /// Present keys whose value was replaced.
    pub updates: u64,
    /// Entries evicted to make room for a new key.
    pub evictions: u64,
}

impl AccessStats {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    #[inline]
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    #[inline]
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    #[inline]
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    #[inline]
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Total lookups (hits + misses).
    #[inline]
    pub fn requests(&self) -> u64 {
        self.hits + self.misses
    }

    /// Hit rate as a percentage (0.0 to 100.0). 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let requests = self.requests();
        if requests == 0 {
            0.0
        } else {
            (self.hits as f64 * 100.0) / requests as f64
        }
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Converts the counters to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();
        metrics.insert("requests".to_string(), self.requests() as f64);
        metrics.insert("cache_hits".to_string(), self.hits as f64);
        metrics.insert("cache_misses".to_string(), self.misses as f64);
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("updates".to_string(), self.updates as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics
    }
}

impl CacheMetrics for AccessStats {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}

impl fmt::Display for AccessStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hits: {} | Misses: {} | Hit Rate: {:.2}%",
            self.hits,
            self.misses,
            self.hit_rate()
        )
    }
}
