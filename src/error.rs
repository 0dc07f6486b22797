//! Error types.
//!
//! Lookups never fail: a miss is `None`. The only error a caller can see is a
//! [`ConfigError`] at construction time. [`InvariantViolation`] is reported by
//! the `validate()` methods and always indicates a defect in this crate.

use core::fmt;

/// Configuration rejected when building a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The requested capacity was zero. A cache must hold at least one entry.
    ZeroCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCapacity => write!(f, "cache capacity must be at least 1"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// A broken structural invariant between the recency list and the key index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// More live entries than the configured capacity.
    SizeExceedsCapacity {
        /// Number of live entries.
        len: usize,
        /// Configured capacity.
        capacity: usize,
    },
    /// Two counts of live entries disagree, e.g. the key index and the
    /// recency list, or the list's counter and a walk from head.
    LengthMismatch {
        /// The count that was expected.
        expected: usize,
        /// The count actually found.
        found: usize,
    },
    /// Head and tail disagree with each other or with the chain between
    /// them (e.g. only one is set, or walking from head ends elsewhere).
    HeadTailMismatch,
    /// An entry's `prev` link does not point back at its predecessor.
    BrokenBackLink {
        /// Arena slot of the entry with the bad link.
        slot: usize,
    },
    /// A link points at a vacant arena slot.
    DanglingLink {
        /// The vacant slot that was referenced.
        slot: usize,
    },
    /// Walking from head visited more entries than are live.
    CycleDetected,
    /// An indexed handle refers to an entry holding a different key, or to
    /// no entry at all.
    StaleHandle {
        /// Arena slot the index pointed at.
        slot: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::SizeExceedsCapacity { len, capacity } => {
                write!(f, "size {} exceeds capacity {}", len, capacity)
            }
            InvariantViolation::LengthMismatch { expected, found } => write!(
                f,
                "expected {} live entries but found {}",
                expected, found
            ),
            InvariantViolation::HeadTailMismatch => {
                write!(f, "head and tail do not bound the recency list")
            }
            InvariantViolation::BrokenBackLink { slot } => {
                write!(f, "entry in slot {} has a broken back link", slot)
            }
            InvariantViolation::DanglingLink { slot } => {
                write!(f, "link points at vacant slot {}", slot)
            }
            InvariantViolation::CycleDetected => write!(f, "recency list contains a cycle"),
            InvariantViolation::StaleHandle { slot } => {
                write!(f, "key index holds a stale handle to slot {}", slot)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvariantViolation {}
