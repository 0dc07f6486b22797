//! Correctness Tests for the LRU Engine
//!
//! These tests validate the eviction policy using simple, predictable access
//! patterns. Every test that triggers an eviction checks exactly which key was
//! evicted.
//!
//! ## Test Strategy
//! - Small cache sizes (1-5 entries) for predictable behavior
//! - Simple, deterministic access patterns
//! - Explicit checks for which key was evicted after each put
//! - A longer mixed workload checked step by step against a naive model

use lru_engine::config::LruCacheConfig;
use lru_engine::{ConfigError, LruCache, PutResult};
use std::num::NonZeroUsize;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Helper to create an LruCache with the given capacity
fn make_lru<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
    let config = LruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    LruCache::init(config, None)
}

/// Keys in MRU-to-LRU order.
fn order<K: std::hash::Hash + Eq + Copy, V>(cache: &LruCache<K, V>) -> Vec<K> {
    cache.keys().copied().collect()
}

// ============================================================================
// CONCRETE SCENARIOS
// ============================================================================

#[test]
fn test_scenario_capacity_three() {
    let mut cache = make_lru(3);
    cache.put(1, "a");
    cache.put(2, "b");
    cache.put(3, "c");
    assert_eq!(order(&cache), [3, 2, 1]);

    assert_eq!(cache.get(&1), Some(&"a"));
    assert_eq!(order(&cache), [1, 3, 2]);

    let evicted = cache.put(4, "d");
    assert_eq!(evicted, Some((2, "b")));
    assert_eq!(order(&cache), [4, 1, 3]);
    assert!(!cache.contains(&2));
    assert_eq!(cache.validate(), Ok(()));
}

#[test]
fn test_scenario_capacity_one() {
    let mut cache = make_lru(1);
    cache.put(1, "a");
    assert_eq!(cache.put(2, "b"), Some((1, "a")));
    assert!(!cache.contains(&1));
    assert!(cache.contains(&2));
    assert_eq!(cache.size(), 1);
}

// ============================================================================
// EVICTION ORDER
// ============================================================================

#[test]
fn test_overflow_evicts_first_inserted() {
    for cap in 1..=5 {
        let mut cache = make_lru(cap);
        for k in 0..cap {
            assert_eq!(cache.put(k, k * 10), None);
        }
        assert_eq!(cache.put(cap, cap * 10), Some((0, 0)));
        assert!(!cache.contains(&0));
        for k in 1..=cap {
            assert!(cache.contains(&k), "key {} missing at cap {}", k, cap);
        }
        assert_eq!(cache.len(), cap);
    }
}

#[test]
fn test_get_protects_from_eviction() {
    let mut cache = make_lru(3);
    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("c", 3);

    cache.get(&"a");
    assert_eq!(cache.put("d", 4), Some(("b", 2)));

    cache.get(&"c");
    assert_eq!(cache.put("e", 5), Some(("a", 1)));
    assert_eq!(order(&cache), ["e", "c", "d"]);
}

#[test]
fn test_update_protects_from_eviction() {
    let mut cache = make_lru(3);
    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("c", 3);

    assert_eq!(cache.put("a", 10), None);
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.put("d", 4), Some(("b", 2)));
    assert_eq!(cache.peek(&"a"), Some(&10));
}

#[test]
fn test_update_never_evicts_when_full() {
    let mut cache = make_lru(2);
    cache.put(1, "a");
    cache.put(2, "b");
    assert_eq!(cache.push(1, "z"), PutResult::Updated { old_value: "a" });
    assert_eq!(cache.push(2, "y"), PutResult::Updated { old_value: "b" });
    assert_eq!(order(&cache), [2, 1]);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_peek_does_not_protect_from_eviction() {
    let mut cache = make_lru(2);
    cache.put(1, "a");
    cache.put(2, "b");
    assert_eq!(cache.peek(&1), Some(&"a"));
    assert_eq!(cache.put(3, "c"), Some((1, "a")));
}

#[test]
fn test_removed_slot_is_reused_without_eviction() {
    let mut cache = make_lru(3);
    cache.put(1, "a");
    cache.put(2, "b");
    cache.put(3, "c");
    assert_eq!(cache.remove(&2), Some("b"));
    assert_eq!(cache.put(4, "d"), None);
    assert_eq!(order(&cache), [4, 3, 1]);
    assert_eq!(cache.put(5, "e"), Some((1, "a")));
    assert_eq!(cache.validate(), Ok(()));
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[test]
fn test_put_then_get_returns_value_at_mru() {
    let mut cache = make_lru(4);
    for k in 0..10 {
        cache.put(k, k + 100);
        assert_eq!(cache.get(&k), Some(&(k + 100)));
        assert_eq!(cache.peek_mru(), Some((&k, &(k + 100))));
    }
}

#[test]
fn test_get_promotes_to_mru() {
    let mut cache = make_lru(5);
    for k in 0..5 {
        cache.put(k, ());
    }
    for k in [3, 0, 4, 0, 2] {
        cache.get(&k);
        assert_eq!(order(&cache)[0], k);
    }
    assert_eq!(order(&cache), [2, 0, 4, 3, 1]);
}

#[test]
fn test_clear_empties_everything() {
    let mut cache = make_lru(4);
    for k in 0..6 {
        cache.put(k, k);
    }
    cache.clear();
    assert_eq!(cache.size(), 0);
    for k in 0..6 {
        assert!(!cache.contains(&k));
    }
    assert_eq!(cache.iter().next(), None);
    assert_eq!(cache.cap().get(), 4);
    assert_eq!(cache.validate(), Ok(()));
}

#[test]
fn test_contains_is_idempotent() {
    let mut cache = make_lru(3);
    cache.put(1, "a");
    cache.put(2, "b");
    cache.put(3, "c");
    let before = order(&cache);
    for _ in 0..100 {
        assert!(cache.contains(&1));
        assert!(!cache.contains(&9));
    }
    assert_eq!(order(&cache), before);
    assert_eq!(cache.size(), 3);
    // 1 is still the LRU and goes first.
    assert_eq!(cache.put(4, "d"), Some((1, "a")));
}

#[test]
fn test_iteration_is_reversible() {
    let mut cache = make_lru(4);
    cache.extend([(1, 'a'), (2, 'b'), (3, 'c')]);
    let forward: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
    let mut backward: Vec<_> = cache.iter().rev().map(|(k, _)| *k).collect();
    backward.reverse();
    assert_eq!(forward, backward);
    assert_eq!(cache.iter().len(), 3);

    let mut iter = cache.iter();
    assert_eq!(iter.next(), Some((&3, &'c')));
    assert_eq!(iter.next_back(), Some((&1, &'a')));
    assert_eq!(iter.next(), Some((&2, &'b')));
    assert_eq!(iter.next_back(), None);
    assert_eq!(iter.next(), None);
}

/// Tiny deterministic generator so the workload is reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

#[test]
fn test_mixed_workload_matches_model() {
    for cap in [1usize, 2, 3, 7, 16] {
        let mut cache = make_lru(cap);
        // Model: keys in MRU-to-LRU order with their values.
        let mut model: Vec<(u64, u64)> = Vec::new();
        let mut rng = Lcg(cap as u64);
        let mut inserted = 0usize;
        let mut evicted = 0usize;

        for step in 0..2_000u64 {
            let key = rng.next() % (cap as u64 * 2 + 1);
            match rng.next() % 4 {
                0 => {
                    let hit = cache.get(&key).copied();
                    let model_hit = model.iter().position(|(k, _)| *k == key).map(|i| {
                        let pair = model.remove(i);
                        model.insert(0, pair);
                        pair.1
                    });
                    assert_eq!(hit, model_hit);
                }
                1 => {
                    assert_eq!(
                        cache.contains(&key),
                        model.iter().any(|(k, _)| *k == key)
                    );
                }
                _ => {
                    let got = cache.put(key, step);
                    let expected = match model.iter().position(|(k, _)| *k == key) {
                        Some(i) => {
                            model.remove(i);
                            model.insert(0, (key, step));
                            None
                        }
                        None => {
                            inserted += 1;
                            let victim = if model.len() == cap { model.pop() } else { None };
                            if victim.is_some() {
                                evicted += 1;
                            }
                            model.insert(0, (key, step));
                            victim
                        }
                    };
                    assert_eq!(got, expected);
                }
            }

            assert!(cache.len() <= cap);
            assert_eq!(cache.len(), inserted - evicted);
            let actual: Vec<(u64, u64)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
            assert_eq!(actual, model);
        }
        assert_eq!(cache.validate(), Ok(()));
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn test_zero_capacity_is_rejected() {
    assert_eq!(
        LruCacheConfig::try_from_capacity(0),
        Err(ConfigError::ZeroCapacity)
    );
    assert!(LruCache::<u8, u8>::try_new(0).is_err());
    assert_eq!(
        ConfigError::ZeroCapacity.to_string(),
        "cache capacity must be at least 1"
    );
}

#[test]
fn test_custom_hasher() {
    use std::collections::hash_map::RandomState;

    let mut cache: LruCache<&str, i32, RandomState> =
        LruCache::with_hasher(NonZeroUsize::new(2).unwrap(), RandomState::new());
    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("c", 3);
    assert!(!cache.contains(&"a"));
    assert_eq!(cache.get(&"c"), Some(&3));
}
