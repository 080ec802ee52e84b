//! The concurrent set type.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::ops::{Deref, DerefMut};

use super::sync::{Mutex, MutexGuard};
use crate::error::SetError;
use crate::sequential::SequentialSet;
use crate::snapshot::Snapshot;
use crate::store::{HashStore, SetStore};

// =============================================================================
// ConcurrentSet Definition
// =============================================================================

/// A thread-safe set: one [`SequentialSet`] guarded by one mutex.
///
/// Every method takes `&self`; share an instance between threads with `Arc`.
/// Operations on a single instance are serialized by its lock. Operations
/// that read other instances never hold two locks at once, so they cannot
/// deadlock (see the [module documentation](crate::concurrent)).
///
/// Results of the set algebra are brand-new, independently locked sets.
///
/// # Thread Safety
///
/// `ConcurrentSet<T>` is `Send + Sync` when `T: Send`.
///
/// # Examples
///
/// ```rust
/// use lockset::ConcurrentSet;
///
/// let set_a = ConcurrentSet::from_items([1, 2, 3]);
/// let set_b = ConcurrentSet::from_items([1, 3]);
///
/// assert_eq!(set_a.intersection(&[&set_b]), ConcurrentSet::from_items([1, 3]));
/// assert_eq!(set_a.difference(&[&set_b]), ConcurrentSet::from_items([2]));
/// assert!(set_b.is_subset(&set_a));
/// ```
pub struct ConcurrentSet<T, S = HashStore<T>> {
    inner: Mutex<SequentialSet<T, S>>,
}

static_assertions::assert_impl_all!(ConcurrentSet<i32>: Send, Sync);
static_assertions::assert_impl_all!(ConcurrentSet<String>: Send, Sync);

/// Exclusive access to the [`SequentialSet`] inside a [`ConcurrentSet`].
///
/// Returned by [`ConcurrentSet::lock`]; the lock is released on drop.
pub struct ConcurrentSetGuard<'a, T, S = HashStore<T>> {
    guard: MutexGuard<'a, SequentialSet<T, S>>,
}

impl<T, S> Deref for ConcurrentSetGuard<'_, T, S> {
    type Target = SequentialSet<T, S>;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl<T, S> DerefMut for ConcurrentSetGuard<'_, T, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}

impl<T: Hash + Eq> ConcurrentSet<T> {
    /// Creates an empty set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::ConcurrentSet;
    ///
    /// let set: ConcurrentSet<i32> = ConcurrentSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::from_sequential(SequentialSet::new())
    }

    /// Creates a set from a list of items. Duplicates collapse.
    #[must_use]
    pub fn from_items<I: IntoIterator<Item = T>>(items: I) -> Self {
        Self::from_sequential(SequentialSet::from_items(items))
    }
}

impl<T: Hash + Eq, S: SetStore<T>> ConcurrentSet<T, S> {
    /// Takes ownership of an existing sequential set. Nothing is copied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::{ConcurrentSet, SequentialSet};
    ///
    /// let sequential = SequentialSet::from_items(["a", "b"]);
    /// let set = ConcurrentSet::from_sequential(sequential);
    /// assert_eq!(set.len(), 2);
    /// ```
    #[must_use]
    pub fn from_sequential(set: SequentialSet<T, S>) -> Self {
        Self {
            inner: Mutex::new(set),
        }
    }

    /// Consumes the set, returning the sequential set it owned.
    #[must_use]
    pub fn into_sequential(self) -> SequentialSet<T, S> {
        self.inner.into_inner()
    }

    /// Locks the set and returns direct access to the inner sequential set.
    ///
    /// This is an escape hatch for batching several operations under one
    /// lock acquisition. While the guard is alive:
    ///
    /// - calling any other method on **the same** instance from the same
    ///   thread deadlocks;
    /// - calling a method on **another** instance holds two locks at once,
    ///   which gives up the deadlock-freedom of the set algebra.
    ///
    /// Both are the caller's responsibility.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::ConcurrentSet;
    ///
    /// let set = ConcurrentSet::from_items([1, 2, 3]);
    /// {
    ///     let mut guard = set.lock();
    ///     if guard.contains(&2) {
    ///         guard.discard(&2);
    ///         guard.add(20);
    ///     }
    /// }
    /// assert!(set.contains(&20));
    /// ```
    pub fn lock(&self) -> ConcurrentSetGuard<'_, T, S> {
        ConcurrentSetGuard {
            guard: self.inner.lock(),
        }
    }

    /// Adds an item, returning `true` if it was not already present.
    pub fn add(&self, item: T) -> bool {
        self.inner.lock().add(item)
    }

    /// Adds every item of `items` under a single lock acquisition.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::ConcurrentSet;
    ///
    /// let set = ConcurrentSet::new();
    /// set.add_all(["a", "a", "b"]);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn add_all<I: IntoIterator<Item = T>>(&self, items: I) {
        self.inner.lock().extend(items);
    }

    /// Removes a single item.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::ItemNotFound`] if the item is not in the set. The
    /// set is left unchanged.
    pub fn remove<Q>(&self, item: &Q) -> Result<(), SetError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().remove(item)
    }

    /// Removes an item if it is present.
    pub fn discard<Q>(&self, item: &Q)
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().discard(item);
    }

    /// Removes every listed item that is present, under a single lock acquisition.
    pub fn discard_all<'a, Q, I>(&self, items: I)
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        self.inner.lock().discard_all(items);
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
    /// use lockset::{ConcurrentSet, SetError};
    ///
    /// let set: ConcurrentSet<i32> = ConcurrentSet::new();
    /// assert_eq!(set.pop(), Err(SetError::EmptySet));
    /// ```
    pub fn pop(&self) -> Result<T, SetError> {
        self.inner.lock().pop()
    }

    /// Removes every item.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Returns the number of items in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the set has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns `true` if the set contains `item`.
    #[must_use]
    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains(item)
    }

    /// Decodes a sequence of items and merges it into this set.
    ///
    /// Decoding happens into a detached set before this set's lock is taken,
    /// so the lock is held only for the merge.
    ///
    /// # Errors
    ///
    /// Returns the deserializer's error if the input is not a sequence of
    /// `T`. In that case the set is left unchanged.
    #[cfg(feature = "serde")]
    pub fn merge_deserialize<'de, D>(&self, deserializer: D) -> Result<(), D::Error>
    where
        T: serde::Deserialize<'de>,
        D: serde::Deserializer<'de>,
    {
        let mut decoded: SequentialSet<T, S> = SequentialSet::default();
        decoded.merge_deserialize(deserializer)?;
        self.inner.lock().extend(decoded);
        Ok(())
    }
}

impl<T: Hash + Eq + Clone, S: SetStore<T>> ConcurrentSet<T, S> {
    /// Returns a vector of the current items in unspecified order.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.inner.lock().items()
    }

    /// Returns a detached, restartable copy of the current items.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<T> {
        self.inner.lock().snapshot()
    }

    /// Calls `function` once for every item of a snapshot.
    ///
    /// The lock is released before the first call, so `function` may use
    /// this set.
    pub fn for_each<F: FnMut(&T)>(&self, function: F) {
        self.snapshot().iter().for_each(function);
    }

    /// Calls `function` for every item of a snapshot until it returns `false`.
    ///
    /// The lock is released before the first call, so `function` may use
    /// this set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::ConcurrentSet;
    ///
    /// let set = ConcurrentSet::from_items([1, 2, 3]);
    /// set.for_each_while(|item| {
    ///     set.discard(item);
    ///     set.len() > 1
    /// });
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn for_each_while<F: FnMut(&T) -> bool>(&self, mut function: F) {
        for item in &self.snapshot() {
            if !function(item) {
                break;
            }
        }
    }

    /// Returns a new set with independent storage and identical membership.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self::from_sequential(self.detached_copy())
    }

    /// Returns `true` if both sets contain exactly the same items.
    ///
    /// `other` is copied under its own lock, which is released before this
    /// set's lock is taken. The result reflects `other` as it was at that
    /// instant; a later mutation of `other` does not invalidate it.
    #[must_use]
    pub fn equal(&self, other: &Self) -> bool {
        let other_snapshot = other.detached_copy();
        self.combine("equal", |set| set.equal(&other_snapshot))
    }

    /// Adds every item of every other set to this set.
    ///
    /// Each other set is copied under its own lock and released before this
    /// set's lock is taken, exactly like [`union`](Self::union). Items are
    /// therefore merged from a snapshot of each operand rather than while
    /// all operands are locked together, and two sets updating from each
    /// other concurrently cannot deadlock.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::ConcurrentSet;
    ///
    /// let set = ConcurrentSet::from_items([1]);
    /// set.update(&[&ConcurrentSet::from_items([2]), &ConcurrentSet::from_items([3])]);
    /// assert_eq!(set, ConcurrentSet::from_items([1, 2, 3]));
    /// ```
    pub fn update(&self, others: &[&Self]) {
        let snapshots = Self::collect_snapshots(others);
        let operands: Vec<&SequentialSet<T, S>> = snapshots.iter().collect();
        self.combine("update", |set| set.update(&operands));
    }

    /// Returns a new set holding every item of this set and of every other set.
    #[must_use]
    pub fn union(&self, others: &[&Self]) -> Self {
        let snapshots = Self::collect_snapshots(others);
        let operands: Vec<&SequentialSet<T, S>> = snapshots.iter().collect();
        Self::from_sequential(self.combine("union", |set| set.union(&operands)))
    }

    /// Returns a new set holding the items of this set that are in every other set.
    ///
    /// This set's items are copied first; each item is then checked against
    /// each other set with its own `contains` call.
    #[must_use]
    pub fn intersection(&self, others: &[&Self]) -> Self {
        let intersection: SequentialSet<T, S> = self
            .items()
            .into_iter()
            .filter(|item| others.iter().all(|other| other.contains(item)))
            .collect();
        Self::from_sequential(intersection)
    }

    /// Returns a new set holding the items of this set that are in no other set.
    #[must_use]
    pub fn difference(&self, others: &[&Self]) -> Self {
        let snapshots = Self::collect_snapshots(others);
        let operands: Vec<&SequentialSet<T, S>> = snapshots.iter().collect();
        Self::from_sequential(self.combine("difference", |set| set.difference(&operands)))
    }

    /// Returns a new set holding the items that are in exactly one of the two sets.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let other_snapshot = other.detached_copy();
        Self::from_sequential(self.combine("symmetric_difference", |set| {
            set.symmetric_difference(&other_snapshot)
        }))
    }

    /// Returns `true` if every item of this set is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.items().iter().all(|item| other.contains(item))
    }

    /// Returns `true` if every item of `other` is in this set.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if the two sets have no item in common.
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        !self.items().iter().any(|item| other.contains(item))
    }

    fn detached_copy(&self) -> SequentialSet<T, S> {
        self.inner.lock().copy()
    }

    // One operand locked at a time; each lock is released before the next.
    fn collect_snapshots(others: &[&Self]) -> Vec<SequentialSet<T, S>> {
        others
            .iter()
            .enumerate()
            .map(|(operand, other)| {
                let snapshot = other.detached_copy();
                tracing::trace!(operand, len = snapshot.len(), "collected operand snapshot");
                snapshot
            })
            .collect()
    }

    // Callers must not hold any other instance's lock.
    fn combine<R>(
        &self,
        operation: &'static str,
        function: impl FnOnce(&mut SequentialSet<T, S>) -> R,
    ) -> R {
        let mut guard = self.inner.lock();
        tracing::trace!(operation, len = guard.len(), "combining under own lock");
        function(&mut *guard)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T: Hash + Eq, S: SetStore<T>> Default for ConcurrentSet<T, S> {
    fn default() -> Self {
        Self::from_sequential(SequentialSet::default())
    }
}

impl<T: Hash + Eq + Clone, S: SetStore<T>> Clone for ConcurrentSet<T, S> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<T: Hash + Eq + Clone, S: SetStore<T>> PartialEq for ConcurrentSet<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T: Hash + Eq + Clone, S: SetStore<T>> Eq for ConcurrentSet<T, S> {}

impl<T: Hash + Eq, S: SetStore<T>> From<SequentialSet<T, S>> for ConcurrentSet<T, S> {
    fn from(set: SequentialSet<T, S>) -> Self {
        Self::from_sequential(set)
    }
}

impl<T: Hash + Eq, S: SetStore<T>> FromIterator<T> for ConcurrentSet<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_sequential(iter.into_iter().collect())
    }
}

impl<T: Hash + Eq, S: SetStore<T>> Extend<T> for ConcurrentSet<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<T: Hash + Eq + fmt::Debug, S: SetStore<T>> fmt::Debug for ConcurrentSet<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.inner.lock();
        write!(formatter, "ConcurrentSet<{}> ", std::any::type_name::<T>())?;
        formatter.debug_set().entries(guard.iter()).finish()
    }
}

impl<T: Hash + Eq + fmt::Display, S: SetStore<T>> fmt::Display for ConcurrentSet<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner.lock(), formatter)
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T, S> serde::Serialize for ConcurrentSet<T, S>
where
    T: serde::Serialize + Hash + Eq,
    S: SetStore<T>,
{
    fn serialize<Z>(&self, serializer: Z) -> Result<Z::Ok, Z::Error>
    where
        Z: serde::Serializer,
    {
        serde::Serialize::serialize(&*self.inner.lock(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, S> serde::Deserialize<'de> for ConcurrentSet<T, S>
where
    T: serde::Deserialize<'de> + Hash + Eq,
    S: SetStore<T>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <SequentialSet<T, S> as serde::Deserialize<'de>>::deserialize(deserializer)
            .map(Self::from_sequential)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_new_creates_empty() {
        let set: ConcurrentSet<i32> = ConcurrentSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[rstest]
    fn test_len_counts_unique_items() {
        let set = ConcurrentSet::new();
        set.add_all(["a", "a"]);
        assert_eq!(set.len(), 1);
        set.add_all(["b", "c"]);
        assert_eq!(set.len(), 3);
    }

    #[rstest]
    fn test_from_sequential_transfers_ownership() {
        let set = ConcurrentSet::from_sequential(SequentialSet::from_items([1, 2]));
        let sequential = set.into_sequential();
        assert_eq!(sequential, SequentialSet::from_items([1, 2]));
    }

    #[rstest]
    fn test_remove_and_discard() {
        let set = ConcurrentSet::from_items([1, 2, 3]);
        assert_eq!(set.remove(&1), Ok(()));
        assert_eq!(set.remove(&1), Err(SetError::ItemNotFound));
        assert_eq!(set.len(), 2);
        set.discard(&2);
        set.discard(&2);
        assert_eq!(set.items(), vec![3]);
    }

    #[rstest]
    fn test_discard_all() {
        let set = ConcurrentSet::from_items([1, 2, 3, 4]);
        set.discard_all([&1, &4, &9]);
        assert_eq!(set, ConcurrentSet::from_items([2, 3]));
    }

    #[rstest]
    fn test_pop_on_empty_leaves_size_unchanged() {
        let set: ConcurrentSet<i32> = ConcurrentSet::new();
        assert_eq!(set.pop(), Err(SetError::EmptySet));
        assert_eq!(set.len(), 0);
    }

    #[rstest]
    fn test_pop_returns_member() {
        let set = ConcurrentSet::from_items([5, 6]);
        let popped = set.pop().unwrap();
        assert!(popped == 5 || popped == 6);
        assert!(!set.contains(&popped));
        assert_eq!(set.len(), 1);
    }

    #[rstest]
    fn test_clear() {
        let set = ConcurrentSet::from_items(0..10);
        set.clear();
        assert!(set.is_empty());
    }

    #[rstest]
    fn test_lock_batches_operations() {
        let set = ConcurrentSet::from_items([1, 2]);
        {
            let mut guard = set.lock();
            guard.add(3);
            guard.discard(&1);
        }
        assert_eq!(set, ConcurrentSet::from_items([2, 3]));
    }

    #[rstest]
    fn test_copy_is_independent() {
        let set = ConcurrentSet::from_items(["a", "b"]);
        let copied = set.copy();
        copied.add("c");
        assert_eq!(set.len(), 2);
        assert_eq!(copied.len(), 3);
    }

    #[rstest]
    fn test_equal() {
        let set_a = ConcurrentSet::from_items(["a", "b"]);
        let set_b = ConcurrentSet::from_items(["b", "a"]);
        assert!(set_a.equal(&set_b));
        set_b.discard(&"a");
        assert!(!set_a.equal(&set_b));
        let empty_a: ConcurrentSet<&str> = ConcurrentSet::new();
        let empty_b: ConcurrentSet<&str> = ConcurrentSet::new();
        assert!(empty_a.equal(&empty_b));
        assert!(!empty_a.equal(&set_a));
    }

    #[rstest]
    fn test_equal_with_itself() {
        let set = ConcurrentSet::from_items([1, 2, 3]);
        assert!(set.equal(&set));
    }

    #[rstest]
    fn test_concrete_algebra() {
        let set_a = ConcurrentSet::from_items([1, 2, 3]);
        let set_b = ConcurrentSet::from_items([1, 3]);
        assert_eq!(set_a.intersection(&[&set_b]), ConcurrentSet::from_items([1, 3]));
        assert_eq!(set_a.difference(&[&set_b]), ConcurrentSet::from_items([2]));
        assert_eq!(
            set_a.symmetric_difference(&set_b),
            ConcurrentSet::from_items([2])
        );
        assert!(!set_a.is_subset(&set_b));
        assert!(set_b.is_subset(&set_a));
        assert!(set_a.is_superset(&set_b));
        assert!(!set_a.is_disjoint(&set_b));
    }

    #[rstest]
    fn test_union_of_several() {
        let set_a = ConcurrentSet::from_items(["a"]);
        let set_b = ConcurrentSet::from_items(["b", "c"]);
        let set_c = ConcurrentSet::from_items(["d", "e", "f"]);
        let union = set_a.union(&[&set_b, &set_c]);
        assert_eq!(set_a.len(), 1);
        assert_eq!(set_b.len(), 2);
        assert_eq!(set_c.len(), 3);
        assert_eq!(
            union,
            ConcurrentSet::from_items(["a", "b", "c", "d", "e", "f"])
        );
    }

    #[rstest]
    fn test_operations_with_self_as_operand() {
        let set = ConcurrentSet::from_items([1, 2, 3]);
        assert_eq!(set.union(&[&set]), set);
        assert_eq!(set.intersection(&[&set]), set);
        assert!(set.difference(&[&set]).is_empty());
        assert!(set.symmetric_difference(&set).is_empty());
        assert!(set.is_subset(&set));
        set.update(&[&set]);
        assert_eq!(set.len(), 3);
    }

    #[rstest]
    fn test_update() {
        let set = ConcurrentSet::from_items(["a"]);
        let other_a = ConcurrentSet::from_items(["b"]);
        let other_b = ConcurrentSet::from_items(["c", "a"]);
        set.update(&[&other_a, &other_b]);
        assert_eq!(set, ConcurrentSet::from_items(["a", "b", "c"]));
        assert_eq!(other_b.len(), 2);
    }

    #[rstest]
    fn test_for_each_may_reenter() {
        let set = ConcurrentSet::from_items([1, 2, 3]);
        set.for_each(|item| {
            set.add(item * 10);
        });
        assert_eq!(set.len(), 6);
    }

    #[rstest]
    fn test_for_each_while_stops_early() {
        let set = ConcurrentSet::from_items(0..100);
        let mut visited = 0;
        set.for_each_while(|_| {
            visited += 1;
            visited < 5
        });
        assert_eq!(visited, 5);
    }

    #[rstest]
    fn test_snapshot_is_detached() {
        let set = ConcurrentSet::from_items([1, 2]);
        let snapshot = set.snapshot();
        set.clear();
        assert_eq!(snapshot.len(), 2);
    }

    #[rstest]
    fn test_debug_names_item_type() {
        let set = ConcurrentSet::from_items([7]);
        assert_eq!(format!("{set:?}"), "ConcurrentSet<i32> {7}");
    }

    #[rstest]
    fn test_display() {
        let set = ConcurrentSet::from_items([7]);
        assert_eq!(format!("{set}"), "{7}");
        let empty: ConcurrentSet<i32> = ConcurrentSet::new();
        assert_eq!(format!("{empty}"), "{}");
    }

    #[rstest]
    fn test_clone_and_from_iterator() {
        let set: ConcurrentSet<i32> = (0..5).collect();
        let cloned = set.clone();
        assert_eq!(set, cloned);
        cloned.add(99);
        assert!(!set.contains(&99));
    }

    #[rstest]
    fn test_extend() {
        let mut set = ConcurrentSet::from_items([1]);
        set.extend([1, 2, 3]);
        assert_eq!(set.len(), 3);
    }
}
