//! Hash-based backing store.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;
use indexmap::set;

use super::{SetStore, StoreHasher};

// =============================================================================
// HashStore Definition
// =============================================================================

/// The default [`SetStore`]: an `indexmap::IndexSet` keyed by item.
///
/// Items live in a dense vector indexed by a hash table, so removal swaps the
/// last item into the freed slot and `pop` takes the last item.
///
/// # Time Complexity
///
/// | Operation  | Complexity     |
/// |------------|----------------|
/// | `add`      | O(1) amortized |
/// | `remove`   | O(1)           |
/// | `contains` | O(1)           |
/// | `pop`      | O(1)           |
/// | `len`      | O(1)           |
/// | `items`    | O(n)           |
///
/// # Examples
///
/// ```rust
/// use lockset::store::{HashStore, SetStore};
///
/// let mut store: HashStore<&str> = HashStore::default();
/// store.add_all(["a", "b", "a"]);
/// assert_eq!(store.len(), 2);
/// assert!(store.remove(&"a"));
/// assert!(!store.remove(&"a"));
/// ```
#[derive(Clone)]
pub struct HashStore<T> {
    items: IndexSet<T, StoreHasher>,
}

/// Borrowing iterator over the items of a [`HashStore`].
pub type HashStoreIter<'a, T> = set::Iter<'a, T>;

impl<T> HashStore<T> {
    /// Returns the number of items the store can hold without reallocating.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }
}

impl<T> Default for HashStore<T> {
    #[inline]
    fn default() -> Self {
        Self {
            items: IndexSet::with_hasher(StoreHasher::default()),
        }
    }
}

impl<T: Hash + Eq> SetStore<T> for HashStore<T> {
    type Iter<'a>
        = HashStoreIter<'a, T>
    where
        T: 'a;

    fn with_capacity(capacity: usize) -> Self {
        Self {
            items: IndexSet::with_capacity_and_hasher(capacity, StoreHasher::default()),
        }
    }

    #[inline]
    fn add(&mut self, item: T) -> bool {
        self.items.insert(item)
    }

    fn add_all<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.items.extend(items);
    }

    #[inline]
    fn remove<Q>(&mut self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.swap_remove(item)
    }

    #[inline]
    fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.contains(item)
    }

    #[inline]
    fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.items.iter()
    }
}

impl<T> IntoIterator for HashStore<T> {
    type Item = T;
    type IntoIter = set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<T: Hash + Eq> FromIterator<T> for HashStore<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut store = Self::default();
        store.add_all(iter);
        store
    }
}

impl<T: fmt::Debug> fmt::Debug for HashStore<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.items.iter()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
