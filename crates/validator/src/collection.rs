//! The collection protocol used by membership rules.
//!
//! Anything that can answer "is this value one of yours?" is a
//! [`Collection`]. Adapters cover the standard containers, `IndexSet`, and
//! ranges; the lookup cost is whatever the container gives.

use std::collections::{BTreeSet, HashSet};
use std::hash::{BuildHasher, Hash};
use std::ops::{Range, RangeInclusive};
use std::sync::Arc;

use indexmap::IndexSet;

/// Membership test over a set of comparable values.
///
/// Implementations must be read-only: a collection shared between validators
/// is queried from many threads at once.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashSet;
/// use verity_validator::collection::Collection;
///
/// let sizes = vec!["s", "m", "l"];
/// assert!(sizes.contains_value(&"m"));
///
/// let codes: HashSet<u16> = [200, 204].into_iter().collect();
/// assert!(!codes.contains_value(&404));
///
/// assert!((1..=10).contains_value(&10));
/// ```
pub trait Collection<T: ?Sized>: Send + Sync {
    /// Returns true when `value` equals one of the collection's elements.
    fn contains_value(&self, value: &T) -> bool;

    /// Number of elements, when the collection knows it.
    fn known_len(&self) -> Option<usize> {
        None
    }
}

/// A collection shared read-only between validators.
pub type SharedCollection<T> = Arc<dyn Collection<T>>;

// ============================================================================
// SEQUENCES (linear scan)
// ============================================================================

impl<T: PartialEq + Send + Sync> Collection<T> for Vec<T> {
    fn contains_value(&self, value: &T) -> bool {
        self.contains(value)
    }

    fn known_len(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T: PartialEq + Send + Sync> Collection<T> for [T] {
    fn contains_value(&self, value: &T) -> bool {
        self.contains(value)
    }

    fn known_len(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T: PartialEq + Send + Sync, const N: usize> Collection<T> for [T; N] {
    fn contains_value(&self, value: &T) -> bool {
        self.contains(value)
    }

    fn known_len(&self) -> Option<usize> {
        Some(N)
    }
}

// ============================================================================
// SETS (indexed lookup)
// ============================================================================

impl<T, S> Collection<T> for HashSet<T, S>
where
    T: Hash + Eq + Send + Sync,
    S: BuildHasher + Send + Sync,
{
    fn contains_value(&self, value: &T) -> bool {
        self.contains(value)
    }

    fn known_len(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T: Ord + Send + Sync> Collection<T> for BTreeSet<T> {
    fn contains_value(&self, value: &T) -> bool {
        self.contains(value)
    }

    fn known_len(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T, S> Collection<T> for IndexSet<T, S>
where
    T: Hash + Eq + Send + Sync,
    S: BuildHasher + Send + Sync,
{
    fn contains_value(&self, value: &T) -> bool {
        self.contains(value)
    }

    fn known_len(&self) -> Option<usize> {
        Some(self.len())
    }
}

// ============================================================================
// RANGES (bounds check)
// ============================================================================

impl<T: PartialOrd + Send + Sync> Collection<T> for RangeInclusive<T> {
    fn contains_value(&self, value: &T) -> bool {
        self.contains(value)
    }
}

impl<T: PartialOrd + Send + Sync> Collection<T> for Range<T> {
    fn contains_value(&self, value: &T) -> bool {
        self.contains(value)
    }
}

// ============================================================================
// FORWARDING
// ============================================================================

impl<T: ?Sized, C: Collection<T> + ?Sized> Collection<T> for Arc<C> {
    fn contains_value(&self, value: &T) -> bool {
        (**self).contains_value(value)
    }

    fn known_len(&self) -> Option<usize> {
        (**self).known_len()
    }
}

impl<T: ?Sized, C: Collection<T> + ?Sized> Collection<T> for &'static C {
    fn contains_value(&self, value: &T) -> bool {
        (**self).contains_value(value)
    }

    fn known_len(&self) -> Option<usize> {
        (**self).known_len()
    }
}

impl<T: ?Sized, C: Collection<T> + ?Sized> Collection<T> for Box<C> {
    fn contains_value(&self, value: &T) -> bool {
        (**self).contains_value(value)
    }

    fn known_len(&self) -> Option<usize> {
        (**self).known_len()
    }
}

// ============================================================================
// TESTS
// ============================================================================
