//! Recency list entry.
//!
//! An [`Entry`] holds one key-value pair plus its neighbour links in recency
//! order. Links are arena [`Handle`]s rather than references, so an entry
//! never borrows another one and the list can be moved freely.
//!
//! # Lifetime
//!
//! An entry is created the first time its key is inserted and destroyed when
//! it is evicted, removed, or the cache is cleared. Updating the value of a
//! present key reuses the same entry.

use crate::list::Handle;
use core::fmt;
use core::mem;

/// A key-value pair linked into the recency list.
///
/// `prev` points towards the most recently used end (head), `next` towards
/// the least recently used end (tail).
pub struct Entry<K, V> {
    key: K,
    value: V,
    pub(crate) prev: Option<Handle>,
    pub(crate) next: Option<Handle>,
}

impl<K, V> Entry<K, V> {
    /// Creates an unlinked entry.
    pub(crate) fn new(key: K, value: V) -> Self {
        Entry {
            key,
            value,
            prev: None,
            next: None,
        }
    }

    /// Returns the entry's key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the stored value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns a mutable reference to the stored value.
    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Replaces the stored value in place and returns the previous one.
    #[inline]
    pub fn replace_value(&mut self, value: V) -> V {
        mem::replace(&mut self.value, value)
    }

    /// Consumes the entry, returning its key and value.
    #[inline]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }

    #[inline]
    pub(crate) fn pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("prev", &self.prev)
            .field("next", &self.next)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    #[test]
    fn test_entry_starts_unlinked() {
        let entry = Entry::new("k", 1);
        assert_eq!(entry.key(), &"k");
        assert_eq!(entry.value(), &1);
        assert!(entry.prev.is_none());
        assert!(entry.next.is_none());
    }

    #[test]
    fn test_replace_value_keeps_key() {
        let mut entry = Entry::new(7, String::from("old"));
        let previous = entry.replace_value(String::from("new"));
        assert_eq!(previous, "old");
        assert_eq!(entry.key(), &7);
        assert_eq!(entry.value(), "new");
    }

    #[test]
    fn test_value_mut_and_into_parts() {
        let mut entry = Entry::new("k", String::from("v"));
        entry.value_mut().push_str("_modified");
        assert_eq!(entry.pair(), (&"k", &String::from("v_modified")));
        let (k, v) = entry.into_parts();
        assert_eq!(k, "k");
        assert_eq!(v, "v_modified");
    }
}
