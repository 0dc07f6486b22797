//! Arena-backed doubly linked recency list.
//!
//! Entries live in a contiguous `Vec` of slots and link to each other by slot
//! index ([`Handle`]). Vacated slots go on a free stack and are reused by the
//! next insertion, so a full cache churning through keys never reallocates.
//!
//! ```text
//!   head (MRU)                                   tail (LRU)
//!      │                                             │
//!      ▼                                             ▼
//!   ┌──────┐  next  ┌──────┐  next  ┌──────┐
//!   │ k3:c │ ─────▶ │ k2:b │ ─────▶ │ k1:a │
//!   │      │ ◀───── │      │ ◀───── │      │
//!   └──────┘  prev  └──────┘  prev  └──────┘
//!   slot 2          slot 1          slot 0
//! ```
//!
//! Invariants:
//! - `head` and `tail` are both `None` iff `len == 0`.
//! - Walking `next` from `head` visits every live entry exactly once and ends
//!   at `tail`; every `prev` link is the mirror of a `next` link.
//! - Exactly `len` slots are occupied.

use crate::entry::Entry;
use crate::error::InvariantViolation;
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

/// Stable index of an entry in the arena.
///
/// A handle stays valid until its entry is removed from the list. It is never
/// handed to code outside this crate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct Handle(usize);

impl Handle {
    #[inline]
    pub(crate) fn slot(self) -> usize {
        self.0
    }
}

/// Doubly linked list of entries ordered from most to least recently used.
pub(crate) struct RecencyList<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    free: Vec<usize>,
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    /// Creates an empty list with room for `capacity` entries.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        RecencyList {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the number of live entries.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no entries.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the most recently used entry.
    #[inline]
    pub(crate) fn front(&self) -> Option<Handle> {
        self.head
    }

    /// Handle of the least recently used entry.
    #[inline]
    pub(crate) fn back(&self) -> Option<Handle> {
        self.tail
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> Option<&Entry<K, V>> {
        self.slots.get(handle.0).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(handle.0).and_then(Option::as_mut)
    }

    /// Inserts a new entry at the head and returns its handle.
    pub(crate) fn push_front(&mut self, key: K, value: V) -> Handle {
        let entry = Some(Entry::new(key, value));
        let handle = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = entry;
                Handle(slot)
            }
            None => {
                self.slots.push(entry);
                Handle(self.slots.len() - 1)
            }
        };
        self.attach_front(handle);
        self.len += 1;
        handle
    }

    /// Moves a live entry to the head. No-op if it is already there.
    pub(crate) fn move_to_front(&mut self, handle: Handle) {
        if self.head == Some(handle) || self.get(handle).is_none() {
            return;
        }
        self.detach(handle);
        self.attach_front(handle);
    }

    /// Removes the tail entry and returns its key and value.
    pub(crate) fn pop_back(&mut self) -> Option<(K, V)> {
        let tail = self.tail?;
        self.remove(tail)
    }

    /// Unlinks the entry at `handle` and frees its slot.
    pub(crate) fn remove(&mut self, handle: Handle) -> Option<(K, V)> {
        self.get(handle)?;
        self.detach(handle);
        let entry = self.slots.get_mut(handle.0)?.take()?;
        self.free.push(handle.0);
        self.len -= 1;
        Some(entry.into_parts())
    }

    /// Drops every entry. Head, tail, length, and the free stack are reset
    /// together.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates from head (MRU) to tail (LRU).
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Walks the whole chain and checks every structural invariant.
    pub(crate) fn validate(&self) -> Result<(), InvariantViolation> {
        if self.head.is_none() != self.tail.is_none() {
            return Err(InvariantViolation::HeadTailMismatch);
        }

        let mut visited = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            if visited == self.len {
                return Err(InvariantViolation::CycleDetected);
            }
            let entry = self
                .get(handle)
                .ok_or(InvariantViolation::DanglingLink { slot: handle.0 })?;
            if entry.prev != prev {
                return Err(InvariantViolation::BrokenBackLink { slot: handle.0 });
            }
            visited += 1;
            prev = cursor;
            cursor = entry.next;
        }

        if prev != self.tail {
            return Err(InvariantViolation::HeadTailMismatch);
        }
        if visited != self.len {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.len,
                found: visited,
            });
        }
        let occupied = self.slots.iter().filter(|slot| slot.is_some()).count();
        if occupied != self.len {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.len,
                found: occupied,
            });
        }
        Ok(())
    }

    /// Splices an entry out of the chain, leaving it unlinked in its slot.
    ///
    /// When the entry was both head and tail, both become `None`.
    fn detach(&mut self, handle: Handle) {
        let (prev, next) = match self.get_mut(handle) {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(entry) = self.get_mut(p) {
                    entry.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(n) => {
                if let Some(entry) = self.get_mut(n) {
                    entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Links an unlinked entry in at the head.
    fn attach_front(&mut self, handle: Handle) {
        let old_head = self.head;
        if let Some(entry) = self.get_mut(handle) {
            entry.prev = None;
            entry.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(entry) = self.get_mut(h) {
                    entry.prev = Some(handle);
                }
            }
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
    }
}

impl<K, V> fmt::Debug for RecencyList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyList")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .finish()
    }
}

/// Borrowing iterator over a cache's entries, from most to least recently
/// used.
///
/// Created by [`LruCache::iter`](crate::LruCache::iter). Iterating does not
/// change recency order.
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.list.get(self.front?)?;
        self.front = entry.next;
        self.remaining -= 1;
        Some(entry.pair())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.list.get(self.back?)?;
        self.back = entry.prev;
        self.remaining -= 1;
        Some(entry.pair())
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            list: self.list,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}
