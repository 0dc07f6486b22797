//! Shared LRU Cache
//!
//! A thread-safe handle to one [`LruCache`], for callers that need to share a
//! cache between threads.
//!
//! # How It Works
//!
//! The engine has no internal synchronization. `SharedLruCache` puts the whole
//! engine behind a single `parking_lot::Mutex`, and every method holds that
//! lock for the full operation. The recency list and the key index therefore
//! always change together, and recency order is global across all threads.
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │             SharedLruCache                │
//! │  ┌─────────────────────────────────────┐  │
//! │  │               Mutex                 │  │
//! │  │  ┌───────────────────────────────┐  │  │
//! │  │  │ LruCache                      │  │  │
//! │  │  │   RecencyList  +  KeyIndex    │  │  │
//! │  │  └───────────────────────────────┘  │  │
//! │  └─────────────────────────────────────┘  │
//! └───────────────────────────────────────────┘
//! ```
//!
//! There is no lock striping. Splitting the key space across segments would
//! make each segment evict by its own local recency, which is not LRU.
//!
//! ## Why Mutex Instead of RwLock?
//!
//! `get` moves the entry to the head of the recency list, so even a read needs
//! exclusive access. An `RwLock` would take the write lock on every call anyway.
//!
//! # Example
//!
//! ```rust
//! use lru_engine::SharedLruCache;
//! use std::num::NonZeroUsize;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(SharedLruCache::new(NonZeroUsize::new(1000).unwrap()));
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for i in 0..100 {
//!             let key = format!("key_{}_{}", t, i);
//!             cache.put(key.clone(), i);
//!             let _ = cache.get(&key);
//!         }
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 400);
//! ```

use crate::config::LruCacheConfig;
use crate::index::DefaultHashBuilder;
use crate::lru::LruCache;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use parking_lot::Mutex;

/// An [`LruCache`] behind one lock, safe to share across threads.
///
/// Values are returned by clone so the lock is never held past a call. Use
/// [`get_with`](Self::get_with) to read a value in place, or
/// [`with_lock`](Self::with_lock) to run several operations as one atomic
/// step.
pub struct SharedLruCache<K, V, S = DefaultHashBuilder> {
    inner: Mutex<LruCache<K, V, S>>,
}

impl<K: Hash + Eq, V> SharedLruCache<K, V, DefaultHashBuilder> {
    /// Creates a shared cache holding at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> Self {
        SharedLruCache::from_cache(LruCache::new(cap))
    }

    /// Creates a shared cache from a configuration with an optional hasher.
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        SharedLruCache::from_cache(LruCache::init(config, hasher))
    }
}

impl<K, V, S> SharedLruCache<K, V, S> {
    /// Wraps an existing cache.
    pub fn from_cache(cache: LruCache<K, V, S>) -> Self {
        SharedLruCache {
            inner: Mutex::new(cache),
        }
    }

    /// Unwraps the cache.
    pub fn into_inner(self) -> LruCache<K, V, S> {
        self.inner.into_inner()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> SharedLruCache<K, V, S> {
    /// Runs `f` with exclusive access to the cache.
    ///
    /// Everything `f` does is atomic with respect to other callers.
    ///
    /// ```rust
    /// use lru_engine::SharedLruCache;
    /// use std::num::NonZeroUsize;
    ///
    /// let cache = SharedLruCache::new(NonZeroUsize::new(2).unwrap());
    /// let was_present = cache.with_lock(|cache| {
    ///     let present = cache.contains(&"a");
    ///     cache.put("a", 1);
    ///     present
    /// });
    /// assert!(!was_present);
    /// ```
    pub fn with_lock<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut LruCache<K, V, S>) -> R,
    {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.inner.lock().cap()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns `true` if `key` is present. Does not change recency order.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().contains(key)
    }

    /// Retrieves a clone of the value for `key`, promoting it to MRU.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Applies `f` to the value for `key` while holding the lock, promoting
    /// the entry to MRU.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().remove(key)
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Copies the contents in MRU-to-LRU order.
    pub fn snapshot(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.inner
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> SharedLruCache<K, V, S> {
    /// Inserts or updates `key`. Returns the evicted pair, if any.
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        self.inner.lock().put(key, value)
    }
}

impl<K, V, S> fmt::Debug for SharedLruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("SharedLruCache");
        match self.inner.try_lock() {
            Some(guard) => debug.field("cache", &*guard),
            None => debug.field("cache", &format_args!("<locked>")),
        };
        debug.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoped_threadpool::Pool;
    use std::format;
    use std::string::String;

    #[test]
    fn test_shared_basic_operations() {
        let cache = SharedLruCache::new(NonZeroUsize::new(2).unwrap());
        assert_eq!(cache.put("a", 1), None);
        assert_eq!(cache.put("b", 2), None);
        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.put("c", 3), Some(("b", 2)));
        assert!(!cache.contains(&"b"));
        assert_eq!(cache.snapshot(), [("c", 3), ("a", 1)]);
        assert_eq!(cache.get_with(&"a", |v| v * 10), Some(10));
        assert_eq!(cache.remove(&"a"), Some(1));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity().get(), 2);
    }

    #[test]
    fn test_shared_with_lock_is_atomic() {
        let cache = SharedLruCache::new(NonZeroUsize::new(64).unwrap());
        let mut pool = Pool::new(4);
        pool.scoped(|scope| {
            for t in 0..4u64 {
                let cache = &cache;
                scope.execute(move || {
                    for _ in 0..250 {
                        cache.with_lock(|c| {
                            let next = c.peek(&"counter").copied().unwrap_or(0) + 1;
                            c.put("counter", next);
                        });
                        cache.put("last_writer", t);
                    }
                });
            }
        });
        assert_eq!(cache.get(&"counter"), Some(1000));
        assert!(cache.with_lock(|c| c.validate()).is_ok());
    }

    #[test]
    fn test_shared_never_exceeds_capacity() {
        let cache: SharedLruCache<String, usize> =
            SharedLruCache::new(NonZeroUsize::new(50).unwrap());
        let mut pool = Pool::new(8);
        pool.scoped(|scope| {
            for t in 0..8 {
                let cache = &cache;
                scope.execute(move || {
                    for i in 0..500 {
                        let key = format!("key_{}", (i * 7 + t) % 120);
                        if i % 3 == 0 {
                            let _ = cache.get(&key);
                        } else {
                            cache.put(key, i);
                        }
                    }
                });
            }
        });
        assert!(cache.len() <= 50);
        let inner = cache.into_inner();
        assert_eq!(inner.validate(), Ok(()));
    }

    #[test]
    fn test_shared_debug_shows_lock_state() {
        let cache: SharedLruCache<u32, u32> = SharedLruCache::new(NonZeroUsize::new(3).unwrap());
        assert_eq!(
            format!("{:?}", cache),
            "SharedLruCache { cache: LruCache { capacity: 3, len: 0 } }"
        );
        cache.with_lock(|_| {
            assert_eq!(
                format!("{:?}", cache),
                "SharedLruCache { cache: <locked> }"
            );
        });
    }
}
