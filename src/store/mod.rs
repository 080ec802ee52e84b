//! Backing stores for sets.
//!
//! A backing store is an unsynchronized mapping from item to presence. It is
//! the unit of true storage underneath [`SequentialSet`](crate::SequentialSet):
//!
//! - [`SetStore`]: the capabilities a set needs from its storage
//! - [`HashStore`]: the default store, an `indexmap::IndexSet<T>`
//!
//! Stores carry no concurrency contract and no ordering guarantee.
//!
//! # Hasher Selection
//!
//! The hasher used by [`HashStore`] is chosen with Cargo features:
//!
//! - default: `std::collections::hash_map::RandomState` (HashDoS-resistant)
//! - `fxhash`: `rustc_hash::FxBuildHasher` (fast, **not** HashDoS-resistant)
//! - `ahash`: `ahash::RandomState`
//!
//! When both `fxhash` and `ahash` are enabled, `fxhash` wins.
//!
//! # Examples
//!
//! ```rust
//! use lockset::store::{HashStore, SetStore};
//!
//! let mut store = HashStore::default();
//! assert!(store.add(1));
//! assert!(!store.add(1));
//! assert!(store.contains(&1));
//! assert_eq!(store.len(), 1);
//! ```

use std::borrow::Borrow;
use std::hash::Hash;

mod hash_store;

pub use hash_store::HashStore;
pub use hash_store::HashStoreIter;

// =============================================================================
// Hasher Type Alias
// =============================================================================

/// Hasher builder used by [`HashStore`].
#[cfg(feature = "fxhash")]
pub type StoreHasher = rustc_hash::FxBuildHasher;

/// Hasher builder used by [`HashStore`].
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type StoreHasher = ahash::RandomState;

/// Hasher builder used by [`HashStore`].
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type StoreHasher = std::collections::hash_map::RandomState;

// =============================================================================
// SetStore Definition
// =============================================================================

/// Storage capabilities consumed by [`SequentialSet`](crate::SequentialSet).
///
/// Implementors own a collection of unique items with no meaningful order.
/// Every method is single-threaded; thread-safety is added by
/// [`ConcurrentSet`](crate::ConcurrentSet).
///
/// Only `with_capacity`, `add`, `remove`, `contains`, `len`, `pop`, `clear`
/// and `iter` are required; the bulk and visitor methods have default
/// implementations in terms of those.
pub trait SetStore<T: Hash + Eq>: Default + IntoIterator<Item = T> {
    /// Borrowing iterator over the stored items.
    type Iter<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// Creates an empty store with room for at least `capacity` items.
    fn with_capacity(capacity: usize) -> Self;

    /// Adds an item, returning `true` if it was not already present.
    fn add(&mut self, item: T) -> bool;

    /// Adds every item of `items`. Duplicates collapse.
    fn add_all<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.add(item);
        }
    }

    /// Removes an item, returning `true` if it was present.
    fn remove<Q>(&mut self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Removes every item of `items` that is present, silently skipping the rest.
    fn discard_all<'a, Q, I>(&mut self, items: I)
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        for item in items {
            self.remove(item);
        }
    }

    /// Returns the number of stored items.
    fn len(&self) -> usize;

    /// Returns `true` if the store holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `item` is stored.
    fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Removes and returns an arbitrary item, or `None` if the store is empty.
    fn pop(&mut self) -> Option<T>;

    /// Removes every item.
    fn clear(&mut self);

    /// Returns an iterator over every item in unspecified order.
    fn iter(&self) -> Self::Iter<'_>;

    /// Returns a snapshot of every item in unspecified order.
    fn items(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut items = Vec::with_capacity(self.len());
        items.extend(self.iter().cloned());
        items
    }

    /// Calls `function` once for every item.
    fn for_each<F: FnMut(&T)>(&self, function: F) {
        self.iter().for_each(function);
    }

    /// Calls `function` for every item until it returns `false`.
    fn for_each_while<F: FnMut(&T) -> bool>(&self, mut function: F) {
        for item in self.iter() {
            if !function(item) {
                break;
            }
        }
    }
}
