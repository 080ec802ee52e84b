//! Lock-guarded set algebra.
//!
//! This module provides [`ConcurrentSet`], which owns one
//! [`SequentialSet`](crate::SequentialSet) behind one mutex and can be shared
//! between threads (typically through `Arc`).
//!
//! # Locking Protocol
//!
//! Every operation that touches only the instance itself (`add`, `remove`,
//! `discard`, `pop`, `len`, `contains`, `copy`, rendering, ...) locks the
//! instance, delegates to the sequential set and unlocks.
//!
//! Operations that also read other instances follow one rule: **a thread
//! never holds more than one instance's lock at a time.** Two sets running a
//! binary operation against each other therefore cannot wait on each other.
//! Two patterns implement the rule:
//!
//! - *collect-then-combine* (`union`, `difference`, `symmetric_difference`,
//!   `update`, `equal`): each other operand is locked, copied and unlocked,
//!   one at a time; only then is the instance's own lock taken to combine
//!   the detached copies.
//! - *per-item queries* (`intersection`, `is_subset`, `is_superset`,
//!   `is_disjoint`): the instance's own items are copied under its lock, the
//!   lock is released, and each item is checked with a separate single-lock
//!   `contains` call on each other operand.
//!
//! Multi-instance operations are therefore not atomic across operands: each
//! operand is observed at the instant its own lock was held.
//!
//! # Examples
//!
//! ```rust
//! use lockset::ConcurrentSet;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let set_a = Arc::new(ConcurrentSet::from_items([1, 2, 3]));
//! let set_b = Arc::new(ConcurrentSet::from_items([2, 3, 4]));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|index| {
//!         let set_a = Arc::clone(&set_a);
//!         let set_b = Arc::clone(&set_b);
//!         thread::spawn(move || {
//!             if index % 2 == 0 {
//!                 set_a.union(&[&set_b]).len()
//!             } else {
//!                 set_b.union(&[&set_a]).len()
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     assert_eq!(handle.join().unwrap(), 4);
//! }
//! ```

mod set;
mod sync;

pub use set::ConcurrentSet;
pub use set::ConcurrentSetGuard;
