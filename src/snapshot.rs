//! Detached point-in-time copies of set membership.
//!
//! A [`Snapshot`] is taken under a set's lock (for
//! [`ConcurrentSet`](crate::ConcurrentSet)) or directly (for
//! [`SequentialSet`](crate::SequentialSet)) and is immune to later mutation
//! of its source. It is finite, yields each item exactly once, and can be
//! traversed any number of times through [`Snapshot::iter`].
//!
//! # Examples
//!
//! ```rust
//! use lockset::ConcurrentSet;
//!
//! let set = ConcurrentSet::from_items([1, 2, 3]);
//! let snapshot = set.snapshot();
//! set.add(4);
//!
//! assert_eq!(snapshot.len(), 3);
//! assert_eq!(snapshot.iter().sum::<i32>(), 6);
//! // Restartable: a second pass sees the same items
//! assert_eq!(snapshot.iter().count(), 3);
//! ```

use std::fmt;

/// A detached copy of the items of a set, in unspecified order.
#[derive(Clone)]
pub struct Snapshot<T> {
    items: Vec<T>,
}

impl<T> Snapshot<T> {
    #[inline]
    pub(crate) const fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Returns the number of items captured.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no items were captured.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns a fresh iterator over the captured items.
    ///
    /// Each call restarts from the first item.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Consumes the snapshot, returning the captured items.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> IntoIterator for Snapshot<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Snapshot<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Snapshot<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.items.iter()).finish()
    }
}
