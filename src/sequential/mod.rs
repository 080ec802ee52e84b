//! Single-threaded set algebra.
//!
//! This module provides [`SequentialSet`], the set-algebra engine that
//! [`ConcurrentSet`](crate::ConcurrentSet) wraps. Every operation is a
//! deterministic function of its (frozen) inputs and none of them take a
//! lock, so a `SequentialSet` must not be mutated from several threads at
//! once.
//!
//! # Operations
//!
//! | Operation              | Result                                              |
//! |------------------------|-----------------------------------------------------|
//! | `union`                | items of `self` or of any other                     |
//! | `intersection`         | items of `self` that are in every other             |
//! | `difference`           | items of `self` that are in no other                |
//! | `symmetric_difference` | items in exactly one of the two operands            |
//! | `is_subset`            | every item of `self` is in `other`                  |
//! | `is_superset`          | every item of `other` is in `self`                  |
//! | `is_disjoint`          | no item in common                                   |
//! | `equal`                | same size and every item of `self` is in `other`    |
//!
//! N-ary operations take their other operands as a slice of references.
//!
//! # Examples
//!
//! ```rust
//! use lockset::SequentialSet;
//!
//! let set_a = SequentialSet::from_items([1, 2, 3]);
//! let set_b = SequentialSet::from_items([1, 3]);
//!
//! assert_eq!(set_a.intersection(&[&set_b]), SequentialSet::from_items([1, 3]));
//! assert_eq!(set_a.difference(&[&set_b]), SequentialSet::from_items([2]));
//! assert_eq!(set_a.symmetric_difference(&set_b), SequentialSet::from_items([2]));
//! assert!(!set_a.is_subset(&set_b));
//! assert!(set_b.is_subset(&set_a));
//! ```

mod set;

pub use set::SequentialSet;
