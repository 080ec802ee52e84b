//! The sequential set type.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::error::SetError;
use crate::snapshot::Snapshot;
use crate::store::{HashStore, SetStore};

// =============================================================================
// SequentialSet Definition
// =============================================================================

/// An unsynchronized set of unique items built on one [`SetStore`].
///
/// `SequentialSet` has value semantics: [`copy`](Self::copy) (and `Clone`)
/// produces an independent store with identical membership, and no two sets
/// ever share storage.
///
/// # Time Complexity
///
/// With the default [`HashStore`], where n = `self.len()` and m is the total
/// size of the other operands:
///
/// | Operation              | Complexity |
/// |------------------------|------------|
/// | `add`                  | O(1)       |
/// | `remove`               | O(1)       |
/// | `contains`             | O(1)       |
/// | `copy`                 | O(n)       |
/// | `union`                | O(n + m)   |
/// | `intersection`         | O(n * k)   |
/// | `difference`           | O(n * k)   |
/// | `symmetric_difference` | O(n + m)   |
/// | `equal`                | O(n)       |
///
/// where k is the number of other operands.
///
/// # Examples
///
/// ```rust
/// use lockset::SequentialSet;
///
/// let mut set = SequentialSet::new();
/// set.add("a");
/// set.add("b");
/// set.add("a");
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(&"a"));
/// ```
pub struct SequentialSet<T, S = HashStore<T>> {
    store: S,
    marker: PhantomData<T>,
}

impl<T: Hash + Eq> SequentialSet<T> {
    /// Creates an empty set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::SequentialSet;
    ///
    /// let set: SequentialSet<i32> = SequentialSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from_store(HashStore::default())
    }

    /// Creates an empty set with room for at least `capacity` items.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_store(HashStore::with_capacity(capacity))
    }

    /// Creates a set from a list of items. Duplicates collapse.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::SequentialSet;
    ///
    /// let set = SequentialSet::from_items(["a", "b", "a"]);
    /// assert_eq!(set.len(), 2);
    /// ```
    #[must_use]
    pub fn from_items<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut set = Self::new();
        set.extend(items);
        set
    }
}

impl<T: Hash + Eq, S: SetStore<T>> SequentialSet<T, S> {
    /// Wraps an existing store without copying it.
    #[inline]
    #[must_use]
    pub const fn from_store(store: S) -> Self {
        Self {
            store,
            marker: PhantomData,
        }
    }

    /// Consumes the set, returning its backing store.
    #[inline]
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Returns a reference to the backing store.
    #[inline]
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Adds an item, returning `true` if it was not already present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::SequentialSet;
    ///
    /// let mut set = SequentialSet::new();
    /// assert!(set.add(1));
    /// assert!(!set.add(1));
    /// ```
    #[inline]
    pub fn add(&mut self, item: T) -> bool {
        self.store.add(item)
    }

    /// Removes a single item.
    ///
    /// See also [`discard`](Self::discard), which never fails.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::ItemNotFound`] if the item is not in the set. The
    /// set is left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::{SequentialSet, SetError};
    ///
    /// let mut set = SequentialSet::from_items([1, 2]);
    /// assert_eq!(set.remove(&1), Ok(()));
    /// assert_eq!(set.remove(&1), Err(SetError::ItemNotFound));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn remove<Q>(&mut self, item: &Q) -> Result<(), SetError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.store.remove(item) {
            Ok(())
        } else {
            tracing::debug!(error = %SetError::ItemNotFound, "remove failed");
            Err(SetError::ItemNotFound)
        }
    }

    /// Removes an item if it is present.
    #[inline]
    pub fn discard<Q>(&mut self, item: &Q)
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.remove(item);
    }

    /// Removes every listed item that is present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::SequentialSet;
    ///
    /// let mut set = SequentialSet::from_items([1, 2, 3]);
    /// set.discard_all([&1, &3, &10]);
    /// assert_eq!(set, SequentialSet::from_items([2]));
    /// ```
    pub fn discard_all<'a, Q, I>(&mut self, items: I)
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        self.store.discard_all(items);
    }

    /// Removes and returns an arbitrary item.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::EmptySet`] if the set has no items.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::{SequentialSet, SetError};
    ///
    /// let mut set = SequentialSet::from_items([42]);
    /// assert_eq!(set.pop(), Ok(42));
    /// assert_eq!(set.pop(), Err(SetError::EmptySet));
    /// ```
    pub fn pop(&mut self) -> Result<T, SetError> {
        self.store.pop().ok_or_else(|| {
            tracing::debug!(error = %SetError::EmptySet, "pop failed");
            SetError::EmptySet
        })
    }

    /// Removes every item.
    #[inline]
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Returns the number of items in the set.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the set has no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns `true` if the set contains `item`.
    ///
    /// The item may be any borrowed form of the set's item type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::SequentialSet;
    ///
    /// let set = SequentialSet::from_items(["hello".to_string()]);
    /// assert!(set.contains("hello"));
    /// assert!(!set.contains("world"));
    /// ```
    #[inline]
    #[must_use]
    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.contains(item)
    }

    /// Returns an iterator over the items in unspecified order.
    #[inline]
    pub fn iter(&self) -> S::Iter<'_> {
        self.store.iter()
    }

    /// Calls `function` once for every item.
    #[inline]
    pub fn for_each<F: FnMut(&T)>(&self, function: F) {
        self.store.for_each(function);
    }

    /// Calls `function` for every item until it returns `false`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::SequentialSet;
    ///
    /// let set: SequentialSet<i32> = (0..100).collect();
    /// let mut visited = 0;
    /// set.for_each_while(|_| {
    ///     visited += 1;
    ///     visited < 10
    /// });
    /// assert_eq!(visited, 10);
    /// ```
    #[inline]
    pub fn for_each_while<F: FnMut(&T) -> bool>(&self, function: F) {
        self.store.for_each_while(function);
    }

    /// Returns `true` if both sets contain exactly the same items.
    ///
    /// Sizes are compared first; since items are unique, equal sizes plus
    /// every item of `self` being in `other` is sufficient.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::SequentialSet;
    ///
    /// let set_a = SequentialSet::from_items([1, 2]);
    /// let set_b = SequentialSet::from_items([2, 1]);
    /// assert!(set_a.equal(&set_b));
    /// ```
    #[must_use]
    pub fn equal(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }

    /// Returns `true` if every item of `self` is in `other`.
    ///
    /// Equivalent to `self.intersection(&[other]).len() == self.len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::SequentialSet;
    ///
    /// let subset = SequentialSet::from_items([1, 3]);
    /// let superset = SequentialSet::from_items([1, 2, 3]);
    /// assert!(subset.is_subset(&superset));
    /// assert!(!superset.is_subset(&subset));
    /// ```
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        if self.len() > other.len() {
            return false;
        }
        self.iter().all(|item| other.contains(item))
    }

    /// Returns `true` if every item of `other` is in `self`.
    #[inline]
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if the two sets have no item in common.
    ///
    /// Equivalent to `self.intersection(&[other]).is_empty()`.
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        let (smaller, larger) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        !smaller.iter().any(|item| larger.contains(item))
    }
}

impl<T: Hash + Eq + Clone, S: SetStore<T>> SequentialSet<T, S> {
    /// Returns a vector of every item in unspecified order.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.store.items()
    }

    /// Returns a detached, restartable copy of the current items.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot::new(self.items())
    }

    /// Returns a new set with independent storage and identical membership.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::SequentialSet;
    ///
    /// let original = SequentialSet::from_items([1, 2]);
    /// let mut copied = original.copy();
    /// copied.add(3);
    ///
    /// assert_eq!(original.len(), 2);
    /// assert_eq!(copied.len(), 3);
    /// ```
    #[must_use]
    pub fn copy(&self) -> Self {
        let mut store = S::with_capacity(self.len());
        store.add_all(self.iter().cloned());
        Self::from_store(store)
    }

    /// Adds every item of every other set to `self` in place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::SequentialSet;
    ///
    /// let mut set = SequentialSet::from_items([1]);
    /// set.update(&[&SequentialSet::from_items([2]), &SequentialSet::from_items([3])]);
    /// assert_eq!(set, SequentialSet::from_items([1, 2, 3]));
    /// ```
    pub fn update(&mut self, others: &[&Self]) {
        for other in others {
            self.store.add_all(other.iter().cloned());
        }
    }

    /// Returns a new set holding every item of `self` and of every other set.
    ///
    /// With no other operands the result is a copy of `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::SequentialSet;
    ///
    /// let set_a = SequentialSet::from_items(["a"]);
    /// let set_b = SequentialSet::from_items(["b", "c"]);
    /// let set_c = SequentialSet::from_items(["d", "e", "f"]);
    ///
    /// let union = set_a.union(&[&set_b, &set_c]);
    /// assert_eq!(union.len(), 6);
    /// assert_eq!(set_a.len(), 1);
    /// ```
    #[must_use]
    pub fn union(&self, others: &[&Self]) -> Self {
        let mut union = self.copy();
        union.update(others);
        union
    }

    /// Returns a new set holding the items of `self` that are in every other set.
    ///
    /// With no other operands the result is a copy of `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::SequentialSet;
    ///
    /// let set_a = SequentialSet::from_items([1, 2, 3, 4]);
    /// let set_b = SequentialSet::from_items([2, 3, 4]);
    /// let set_c = SequentialSet::from_items([3, 4, 5]);
    ///
    /// let intersection = set_a.intersection(&[&set_b, &set_c]);
    /// assert_eq!(intersection, SequentialSet::from_items([3, 4]));
    /// ```
    #[must_use]
    pub fn intersection(&self, others: &[&Self]) -> Self {
        self.retain_into(|item| others.iter().all(|other| other.contains(item)))
    }

    /// Returns a new set holding the items of `self` that are in no other set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::SequentialSet;
    ///
    /// let set_a = SequentialSet::from_items([1, 2, 3, 4]);
    /// let set_b = SequentialSet::from_items([1]);
    /// let set_c = SequentialSet::from_items([4, 5]);
    ///
    /// let difference = set_a.difference(&[&set_b, &set_c]);
    /// assert_eq!(difference, SequentialSet::from_items([2, 3]));
    /// ```
    #[must_use]
    pub fn difference(&self, others: &[&Self]) -> Self {
        self.retain_into(|item| !others.iter().any(|other| other.contains(item)))
    }

    /// Returns a new set holding the items that are in exactly one of the two sets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::SequentialSet;
    ///
    /// let set_a = SequentialSet::from_items([1, 2, 3]);
    /// let set_b = SequentialSet::from_items([2, 3, 4]);
    ///
    /// let symmetric_difference = set_a.symmetric_difference(&set_b);
    /// assert_eq!(symmetric_difference, SequentialSet::from_items([1, 4]));
    /// ```
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut result = self.retain_into(|item| !other.contains(item));
        result
            .store
            .add_all(other.iter().filter(|item| !self.contains(*item)).cloned());
        result
    }

    fn retain_into<P: FnMut(&T) -> bool>(&self, mut predicate: P) -> Self {
        let mut store = S::default();
        store.add_all(self.iter().filter(|item| predicate(*item)).cloned());
        Self::from_store(store)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T: Hash + Eq, S: SetStore<T>> Default for SequentialSet<T, S> {
    #[inline]
    fn default() -> Self {
        Self::from_store(S::default())
    }
}

impl<T: Hash + Eq + Clone, S: SetStore<T>> Clone for SequentialSet<T, S> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<T: Hash + Eq, S: SetStore<T>> PartialEq for SequentialSet<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T: Hash + Eq, S: SetStore<T>> Eq for SequentialSet<T, S> {}

impl<T: Hash + Eq, S: SetStore<T>> From<S> for SequentialSet<T, S> {
    fn from(store: S) -> Self {
        Self::from_store(store)
    }
}

impl<T: Hash + Eq, S: SetStore<T>> FromIterator<T> for SequentialSet<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T: Hash + Eq, S: SetStore<T>> Extend<T> for SequentialSet<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.store.add_all(iter);
    }
}

impl<T: Hash + Eq, S: SetStore<T>> IntoIterator for SequentialSet<T, S> {
    type Item = T;
    type IntoIter = S::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.store.into_iter()
    }
}

impl<'a, T: Hash + Eq, S: SetStore<T>> IntoIterator for &'a SequentialSet<T, S> {
    type Item = &'a T;
    type IntoIter = S::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Hash + Eq + fmt::Debug, S: SetStore<T>> fmt::Debug for SequentialSet<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "SequentialSet<{}> ", std::any::type_name::<T>())?;
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Hash + Eq + fmt::Display, S: SetStore<T>> fmt::Display for SequentialSet<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for item in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{item}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T, S> serde::Serialize for SequentialSet<T, S>
where
    T: serde::Serialize + Hash + Eq,
    S: SetStore<T>,
{
    fn serialize<Z>(&self, serializer: Z) -> Result<Z::Ok, Z::Error>
    where
        Z: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

/// Decodes a sequence of items and merges it into an existing set.
#[cfg(feature = "serde")]
struct MergeSeed<'a, T, S> {
    target: &'a mut SequentialSet<T, S>,
}

#[cfg(feature = "serde")]
impl<'de, T, S> serde::de::DeserializeSeed<'de> for MergeSeed<'_, T, S>
where
    T: serde::Deserialize<'de> + Hash + Eq,
    S: SetStore<T>,
{
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, S> serde::de::Visitor<'de> for MergeSeed<'_, T, S>
where
    T: serde::Deserialize<'de> + Hash + Eq,
    S: SetStore<T>,
{
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        while let Some(item) = seq.next_element()? {
            self.target.add(item);
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<T: Hash + Eq, S: SetStore<T>> SequentialSet<T, S> {
    /// Decodes a sequence of items and merges it into this set.
    ///
    /// Existing items are kept and duplicates collapse.
    ///
    /// # Errors
    ///
    /// Returns the deserializer's error if the input is not a sequence of
    /// `T`. Items decoded before the error are kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::SequentialSet;
    ///
    /// let mut set = SequentialSet::from_items([1, 2]);
    /// let mut deserializer = serde_json::Deserializer::from_str("[2, 3]");
    /// set.merge_deserialize(&mut deserializer).unwrap();
    /// assert_eq!(set, SequentialSet::from_items([1, 2, 3]));
    /// ```
    pub fn merge_deserialize<'de, D>(&mut self, deserializer: D) -> Result<(), D::Error>
    where
        T: serde::Deserialize<'de>,
        D: serde::Deserializer<'de>,
    {
        use serde::de::DeserializeSeed;
        MergeSeed { target: self }.deserialize(deserializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, S> serde::Deserialize<'de> for SequentialSet<T, S>
where
    T: serde::Deserialize<'de> + Hash + Eq,
    S: SetStore<T>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mut set = Self::default();
        set.merge_deserialize(deserializer)?;
        Ok(set)
    }
}

// =============================================================================
// Tests
// =============================================================================
