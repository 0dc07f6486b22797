//! Least Recently Used (LRU) Cache Engine
//!
//! This module provides a fixed-capacity LRU cache with O(1) lookup, insertion,
//! update, and eviction. It is built from two cooperating structures:
//!
//! - a **recency list**: an arena-backed doubly linked list of entries ordered
//!   from most recently used (head) to least recently used (tail);
//! - a **key index**: a hash map from key to the arena handle of its entry.
//!
//! Every public operation consults the key index first and then adjusts the
//! recency list, so the two are always updated as a pair.
//!
//! # Algorithm
//!
//! - `get` of a present key moves its entry to the head.
//! - `put` of a present key replaces the value in the existing entry and moves
//!   it to the head. The size does not change, so nothing is evicted.
//! - `put` of a new key into a full cache first evicts the tail entry (from both
//!   structures), then inserts the new entry at the head.
//! - `contains`, `peek`, and `iter` never change the recency order.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Get: O(1)
//!   - Put: O(1)
//!   - Remove: O(1)
//!   - Clear: O(n)
//!
//! - **Space Complexity**:
//!   - O(n) where n is the capacity of the cache. Evicted slots are reused, so
//!     a full cache performs no further allocation on the recency list.
//!
//! # Thread Safety
//!
//! The engine has no internal synchronization. To share one cache between
//! threads, guard it with a single lock covering whole operations, for example
//! `Mutex<LruCache<K, V>>` or [`SharedLruCache`](crate::SharedLruCache) with the
//! `concurrent` feature.

use crate::config::LruCacheConfig;
use crate::error::{ConfigError, InvariantViolation};
use crate::index::{DefaultHashBuilder, KeyIndex};
use crate::list::RecencyList;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

pub use crate::list::Iter;

/// What a [`LruCache::push`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutResult<K, V> {
    /// A new key was inserted without evicting anything.
    Inserted,
    /// The key was already present. Its value was replaced in place.
    Updated {
        /// The value that was replaced.
        old_value: V,
    },
    /// A new key was inserted into a full cache, evicting the least recently
    /// used entry.
    Evicted {
        /// Key of the evicted entry.
        key: K,
        /// Value of the evicted entry.
        value: V,
    },
}

impl<K, V> PutResult<K, V> {
    /// Returns `true` if the put replaced the value of a present key.
    #[inline]
    pub fn is_update(&self) -> bool {
        matches!(self, PutResult::Updated { .. })
    }

    /// Returns the evicted pair, if the put evicted one.
    #[inline]
    pub fn into_evicted(self) -> Option<(K, V)> {
        match self {
            PutResult::Evicted { key, value } => Some((key, value)),
            _ => None,
        }
    }
}

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for
/// inserting, retrieving, and updating entries. When the cache reaches capacity,
/// the least recently used entry will be evicted to make room for new entries.
///
/// # Examples
///
/// ```
/// use lru_engine::LruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// // Add items to the cache
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: RecencyList<K, V>,
    index: KeyIndex<K, S>,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a new LRU cache holding at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(cap, DefaultHashBuilder::default())
    }

    /// Creates a new LRU cache from a configuration with an optional hasher.
    ///
    /// If `hasher` is `None`, the default hash builder is used.
    ///
    /// # Example
    ///
    /// ```
    /// use lru_engine::LruCache;
    /// use lru_engine::config::LruCacheConfig;
    /// use core::num::NonZeroUsize;
    ///
    /// let config = LruCacheConfig {
    ///     capacity: NonZeroUsize::new(100).unwrap(),
    /// };
    /// let cache: LruCache<String, i32> = LruCache::init(config, None);
    /// assert!(cache.is_empty());
    /// ```
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        LruCache::init_with_hasher(config, hasher.unwrap_or_default())
    }

    /// Creates a new LRU cache from a plain integer capacity.
    ///
    /// A capacity of 0 is a configuration error and is rejected here rather
    /// than producing a cache that can never hold anything.
    ///
    /// ```
    /// use lru_engine::{ConfigError, LruCache};
    ///
    /// let cache = LruCache::<u32, &str>::try_new(3).unwrap();
    /// assert_eq!(cache.cap().get(), 3);
    /// assert_eq!(LruCache::<u32, &str>::try_new(0).unwrap_err(), ConfigError::ZeroCapacity);
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        let config = LruCacheConfig::try_from_capacity(capacity)?;
        Ok(LruCache::init(config, None))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a new LRU cache with the specified capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        LruCache::init_with_hasher(LruCacheConfig::new(cap), hash_builder)
    }

    /// Creates a new LRU cache from a configuration and a custom hash builder.
    pub fn init_with_hasher(config: LruCacheConfig, hash_builder: S) -> Self {
        let cap = config.capacity.get();
        LruCache {
            config,
            list: RecencyList::with_capacity(cap),
            index: KeyIndex::with_capacity_and_hasher(cap, hash_builder),
        }
    }

    /// Returns the maximum number of entries the cache can hold.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Returns the number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns the number of live entries. Same as [`len`](Self::len).
    #[inline]
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns `true` if the cache holds no free slot.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.cap().get()
    }

    /// Returns `true` if `key` is present. Does not change recency order.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains(key)
    }

    /// Returns the value for `key` without promoting it.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.index.get(key)?;
        self.list.get(handle).map(|entry| entry.value())
    }

    /// Returns the value for `key` and makes it the most recently used entry.
    ///
    /// Returns `None` on a miss, leaving the cache untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.index.get(key)?;
        self.list.move_to_front(handle);
        self.list.get(handle).map(|entry| entry.value())
    }

    /// Like [`get`](Self::get), but returns a mutable reference.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.index.get(key)?;
        self.list.move_to_front(handle);
        self.list.get_mut(handle).map(|entry| entry.value_mut())
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.index.remove(key)?;
        let (_, value) = self.list.remove(handle)?;
        self.debug_check();
        Some(value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_back()?;
        self.index.remove(&key);
        self.debug_check();
        Some((key, value))
    }

    /// Returns the least recently used entry without promoting it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let handle = self.list.back()?;
        self.list.get(handle).map(|entry| (entry.key(), entry.value()))
    }

    /// Returns the most recently used entry.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        let handle = self.list.front()?;
        self.list.get(handle).map(|entry| (entry.key(), entry.value()))
    }

    /// Removes every entry. The capacity is unchanged.
    pub fn clear(&mut self) {
        let dropped = self.len();
        self.index.clear();
        self.list.clear();
        tracing::debug!(dropped, capacity = self.cap().get(), "cleared lru cache");
        self.debug_check();
    }

    /// Iterates over entries from most to least recently used.
    ///
    /// Iteration does not change recency order.
    ///
    /// ```
    /// use lru_engine::LruCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let mut cache = LruCache::new(NonZeroUsize::new(3).unwrap());
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    /// cache.put(3, "c");
    /// cache.get(&1);
    ///
    /// let order: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
    /// assert_eq!(order, [1, 3, 2]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.list.iter()
    }

    /// Iterates over keys from most to least recently used.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Iterates over values from most to least recently used.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Checks every structural invariant of the cache.
    ///
    /// Walks the whole recency list and every index entry, so this is O(n).
    /// An `Err` always means a bug in this crate.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let len = self.list.len();
        let capacity = self.cap().get();
        if len > capacity {
            return Err(InvariantViolation::SizeExceedsCapacity { len, capacity });
        }
        if self.index.len() != len {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.index.len(),
                found: len,
            });
        }
        self.list.validate()?;
        for (key, handle) in self.index.iter() {
            match self.list.get(handle) {
                Some(entry) if entry.key() == key => {}
                _ => return Err(InvariantViolation::StaleHandle { slot: handle.slot() }),
            }
        }
        Ok(())
    }

    /// O(1) invariant checks after every mutation; the full walk runs only in
    /// this crate's unit tests.
    #[inline]
    fn debug_check(&self) {
        debug_assert!(self.list.len() <= self.cap().get());
        debug_assert_eq!(self.index.len(), self.list.len());
        #[cfg(test)]
        debug_assert_eq!(self.validate(), Ok(()));
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// Returns the evicted least recently used pair when inserting a new key
    /// into a full cache. Updating a present key never evicts and returns
    /// `None`.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.push(key, value).into_evicted()
    }

    /// Inserts or updates `key` and reports exactly what happened.
    ///
    /// ```
    /// use lru_engine::{LruCache, PutResult};
    /// use core::num::NonZeroUsize;
    ///
    /// let mut cache = LruCache::new(NonZeroUsize::new(1).unwrap());
    /// assert_eq!(cache.push(1, "a"), PutResult::Inserted);
    /// assert_eq!(cache.push(1, "b"), PutResult::Updated { old_value: "a" });
    /// assert_eq!(cache.push(2, "c"), PutResult::Evicted { key: 1, value: "b" });
    /// ```
    pub fn push(&mut self, key: K, value: V) -> PutResult<K, V> {
        if let Some(handle) = self.index.get(&key) {
            if let Some(entry) = self.list.get_mut(handle) {
                let old_value = entry.replace_value(value);
                self.list.move_to_front(handle);
                self.debug_check();
                return PutResult::Updated { old_value };
            }
        }

        let evicted = if self.is_full() {
            self.evict_lru()
        } else {
            None
        };

        let handle = self.list.push_front(key.clone(), value);
        self.index.insert(key, handle);
        self.debug_check();

        match evicted {
            Some((key, value)) => PutResult::Evicted { key, value },
            None => PutResult::Inserted,
        }
    }

    /// Removes the tail entry from both structures.
    fn evict_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_back()?;
        self.index.remove(&key);
        tracing::trace!(
            capacity = self.cap().get(),
            len = self.len(),
            "evicted least recently used entry"
        );
        Some((key, value))
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.list.len())
            .finish()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> Extend<(K, V)> for LruCache<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}
