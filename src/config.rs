//! Cache Configuration
//!
//! Configuration for [`LruCache`](crate::LruCache). Like the constructors, the
//! config struct has public fields so it can be built in one expression.
//!
//! The capacity is a `NonZeroUsize`, so a zero-capacity cache cannot be
//! described at all. When the capacity comes from user input as a plain
//! integer, use [`LruCacheConfig::try_from_capacity`] to turn it into a
//! config or a [`ConfigError`].
//!
//! # Sizing
//!
//! Each live entry costs one arena slot (key, value, two `Option<Handle>`
//! links) plus one key index bucket (a clone of the key and a handle).
//!
//! ```text
//! Total Memory ≈ capacity × (2 × size_of::<K>() + size_of::<V>() + ~40 bytes)
//! ```
//!
//! # Examples
//!
//! ```
//! use lru_engine::config::LruCacheConfig;
//! use lru_engine::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(5).unwrap(),
//! };
//! let cache: LruCache<u32, String> = LruCache::init(config, None);
//! assert_eq!(cache.cap().get(), 5);
//!
//! assert!(LruCacheConfig::try_from_capacity(0).is_err());
//! ```

use crate::error::ConfigError;
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold. Inserting a new
///   key into a full cache evicts the least recently used entry first.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl LruCacheConfig {
    /// Creates a config for a cache holding at most `capacity` entries.
    #[inline]
    pub const fn new(capacity: NonZeroUsize) -> Self {
        LruCacheConfig { capacity }
    }

    /// Creates a config from a plain integer capacity.
    ///
    /// Returns [`ConfigError::ZeroCapacity`] when `capacity` is 0.
    pub fn try_from_capacity(capacity: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(capacity)
            .map(Self::new)
            .ok_or(ConfigError::ZeroCapacity)
    }

    /// Returns the configured capacity.
    #[inline]
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }
}

impl TryFrom<usize> for LruCacheConfig {
    type Error = ConfigError;

    fn try_from(capacity: usize) -> Result<Self, Self::Error> {
        Self::try_from_capacity(capacity)
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
