//! Interactive cache session.
//!
//! [`CacheSession`] is the layer between a user-facing front end and the
//! [`LruCache`] engine. It owns what the engine deliberately does not:
//!
//! - hit/miss counters, reset together with the cache on `clear`;
//! - input checks (a blank value is rejected before the engine sees it);
//! - insert vs. update classification of every put;
//! - an operation log and an MRU-to-LRU slot view for rendering.
//!
//! Nothing here draws anything. A front end reads [`CacheSession::slots`],
//! [`CacheSession::occupancy`], [`CacheSession::stats`], and
//! [`CacheSession::log`] after each call and renders them however it likes.
//!
//! ```
//! use lru_engine::session::{CacheSession, Lookup};
//!
//! let mut session = CacheSession::<u32, String>::try_new(3).unwrap();
//! session.put(1, "a".to_string()).unwrap();
//! assert!(session.put(2, String::new()).is_err());
//!
//! assert_eq!(session.get(&1), Lookup::Hit("a".to_string()));
//! assert_eq!(session.get(&2), Lookup::Miss);
//! assert_eq!(session.stats().to_string(), "Hits: 1 | Misses: 1 | Hit Rate: 50.00%");
//! assert_eq!(session.occupancy().to_string(), "Cache Size: 1 / 3");
//! ```

use crate::error::ConfigError;
use crate::lru::{LruCache, PutResult};
use crate::stats::AccessStats;
use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;
use core::num::NonZeroUsize;

/// Capacity used by [`CacheSession::default`].
pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(cap) => cap,
    None => panic!("default capacity must be non-zero"),
};

/// Number of operations kept in the log unless configured otherwise.
pub const DEFAULT_LOG_LIMIT: usize = 100;

/// Decides whether a value counts as empty input.
pub trait Blank {
    /// Returns `true` if the value must not be stored.
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for &str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.is_none()
    }
}

/// Input rejected by the session before it reached the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// A put carried an empty value.
    EmptyValue,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptyValue => write!(f, "Value cannot be empty for PUT operation."),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SessionError {}

/// Whether a put created a new entry or replaced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutKind {
    /// The key was new.
    Inserted,
    /// The key was present and its value was replaced.
    Updated,
}

/// Result of a successful [`CacheSession::put`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutOutcome<K, V> {
    /// Insert or update.
    pub kind: PutKind,
    /// The least recently used pair pushed out by this insert, if any.
    pub evicted: Option<(K, V)>,
}

/// Result of a [`CacheSession::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<V> {
    /// The key was present; the entry is now the most recently used.
    Hit(V),
    /// The key was not present.
    Miss,
}

impl<V> Lookup<V> {
    /// Returns `true` for [`Lookup::Hit`].
    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit(_))
    }

    /// Converts into an `Option`, `None` on a miss.
    pub fn into_option(self) -> Option<V> {
        match self {
            Lookup::Hit(value) => Some(value),
            Lookup::Miss => None,
        }
    }
}

/// Position marker for a rendered slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotTag {
    /// Head of the recency order. A single entry is tagged `Mru`.
    Mru,
    /// Between head and tail.
    Middle,
    /// Tail of the recency order: the next eviction victim.
    Lru,
}

/// One occupied slot in MRU-to-LRU order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a, K, V> {
    /// Zero-based position, 0 being the most recently used.
    pub position: usize,
    /// The entry's key.
    pub key: &'a K,
    /// The entry's value.
    pub value: &'a V,
    /// Head/tail marker.
    pub tag: SlotTag,
}

/// Current size against capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    /// Live entries.
    pub size: usize,
    /// Maximum entries.
    pub capacity: usize,
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cache Size: {} / {}", self.size, self.capacity)
    }
}

/// A logged session operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation<K, V> {
    /// A put that reached the cache.
    Put {
        /// Key written.
        key: K,
        /// Value written.
        value: V,
        /// Insert or update.
        kind: PutKind,
    },
    /// A get that found its key.
    Hit {
        /// Key looked up.
        key: K,
        /// Value returned.
        value: V,
    },
    /// A get that did not find its key.
    Miss {
        /// Key looked up.
        key: K,
    },
    /// The cache was cleared.
    Clear,
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Operation<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Put { key, value, kind } => {
                let extra = match kind {
                    PutKind::Inserted => "Inserted new key.",
                    PutKind::Updated => "Updated existing key.",
                };
                write!(f, "PUT [{}:{}] -> {}", key, value, extra)
            }
            Operation::Hit { key, value } => write!(f, "GET [{}] -> Found: {}", key, value),
            Operation::Miss { key } => write!(f, "GET {} -> Miss (not found)", key),
            Operation::Clear => write!(f, "Cache cleared."),
        }
    }
}

/// An LRU cache plus the caller-side state needed to drive it interactively.
#[derive(Debug)]
pub struct CacheSession<K, V> {
    cache: LruCache<K, V>,
    stats: AccessStats,
    log: VecDeque<Operation<K, V>>,
    log_limit: usize,
}

impl<K: Hash + Eq + Clone, V: Clone + Blank> CacheSession<K, V> {
    /// Creates a session over a new cache holding at most `capacity` entries.
    pub fn new(capacity: NonZeroUsize) -> Self {
        CacheSession {
            cache: LruCache::new(capacity),
            stats: AccessStats::new(),
            log: VecDeque::new(),
            log_limit: DEFAULT_LOG_LIMIT,
        }
    }

    /// Creates a session from a plain integer capacity, rejecting 0.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(capacity)
            .map(Self::new)
            .ok_or(ConfigError::ZeroCapacity)
    }

    /// Keeps at most `limit` operations in the log, dropping the oldest.
    pub fn with_log_limit(mut self, limit: usize) -> Self {
        self.log_limit = limit;
        self.trim_log();
        self
    }

    /// Stores `value` under `key`.
    ///
    /// Blank values are rejected with [`SessionError::EmptyValue`] and leave
    /// the cache, the counters, and the log untouched.
    pub fn put(&mut self, key: K, value: V) -> Result<PutOutcome<K, V>, SessionError> {
        if value.is_blank() {
            tracing::debug!("rejected put with empty value");
            return Err(SessionError::EmptyValue);
        }

        let (kind, evicted) = match self.cache.push(key.clone(), value.clone()) {
            PutResult::Inserted => (PutKind::Inserted, None),
            PutResult::Updated { .. } => (PutKind::Updated, None),
            PutResult::Evicted { key, value } => (PutKind::Inserted, Some((key, value))),
        };

        match kind {
            PutKind::Inserted => self.stats.record_insertion(),
            PutKind::Updated => self.stats.record_update(),
        }
        if evicted.is_some() {
            self.stats.record_eviction();
        }
        tracing::debug!(
            ?kind,
            evicted = evicted.is_some(),
            size = self.cache.len(),
            "session put"
        );

        self.record(Operation::Put { key, value, kind });
        Ok(PutOutcome { kind, evicted })
    }

    /// Looks up `key`, counting a hit or a miss.
    ///
    /// A hit makes the entry the most recently used one.
    pub fn get(&mut self, key: &K) -> Lookup<V> {
        match self.cache.get(key).cloned() {
            Some(value) => {
                self.stats.record_hit();
                tracing::debug!(hits = self.stats.hits, "session get hit");
                self.record(Operation::Hit {
                    key: key.clone(),
                    value: value.clone(),
                });
                Lookup::Hit(value)
            }
            None => {
                self.stats.record_miss();
                tracing::debug!(misses = self.stats.misses, "session get miss");
                self.record(Operation::Miss { key: key.clone() });
                Lookup::Miss
            }
        }
    }

    /// Empties the cache and zeroes the counters. The log keeps its history.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.stats.reset();
        self.record(Operation::Clear);
    }

    /// Returns `true` if `key` is present. Counts nothing, promotes nothing.
    pub fn contains(&self, key: &K) -> bool {
        self.cache.contains(key)
    }

    /// Read-only view of the underlying cache.
    pub fn cache(&self) -> &LruCache<K, V> {
        &self.cache
    }

    pub fn stats(&self) -> &AccessStats {
        &self.stats
    }

    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }

    /// Occupied slots from most to least recently used.
    pub fn slots(&self) -> impl ExactSizeIterator<Item = Slot<'_, K, V>> + '_ {
        let last = self.cache.len().saturating_sub(1);
        self.cache
            .iter()
            .enumerate()
            .map(move |(position, (key, value))| Slot {
                position,
                key,
                value,
                tag: if position == 0 {
                    SlotTag::Mru
                } else if position == last {
                    SlotTag::Lru
                } else {
                    SlotTag::Middle
                },
            })
    }

    /// Logged operations, oldest first.
    pub fn log(&self) -> impl DoubleEndedIterator<Item = &Operation<K, V>> + '_ {
        self.log.iter()
    }

    fn record(&mut self, operation: Operation<K, V>) {
        self.log.push_back(operation);
        self.trim_log();
    }

    fn trim_log(&mut self) {
        while self.log.len() > self.log_limit {
            self.log.pop_front();
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone + Blank> Default for CacheSession<K, V> {
    fn default() -> Self {
        CacheSession::new(DEFAULT_CAPACITY)
    }
}
