//! # lockset
//!
//! Generic hash-based sets with full set algebra, in two flavours:
//!
//! - [`SequentialSet`]: an unsynchronized set for single-threaded use
//! - [`ConcurrentSet`]: a lock-guarded set that can be shared between threads
//!
//! Both offer membership, mutation, snapshot traversal and the n-ary set
//! algebra (union, intersection, difference, symmetric difference, subset,
//! superset, disjointness and equality). Every algebra result is a brand-new
//! set; no two sets ever share storage.
//!
//! The concurrent flavour never holds two instances' locks at once, so binary
//! operations between sets running on different threads cannot deadlock. See
//! the [`concurrent`] module for the locking protocol.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for both set flavours, plus
//!   merge-into-existing decoding
//! - `fxhash`: use `rustc_hash::FxBuildHasher` in the default store
//! - `ahash`: use `ahash::RandomState` in the default store
//! - `loom`: model-check the locking protocol (together with `--cfg loom`)
//! - `full`: enable `serde`
//!
//! ## Example
//!
//! ```rust
//! use lockset::prelude::*;
//!
//! let set_a = ConcurrentSet::from_items([1, 2, 3]);
//! let set_b = ConcurrentSet::from_items([1, 3]);
//!
//! assert_eq!(set_a.intersection(&[&set_b]), ConcurrentSet::from_items([1, 3]));
//! assert_eq!(set_a.difference(&[&set_b]), ConcurrentSet::from_items([2]));
//! assert!(set_b.is_subset(&set_a));
//! assert!(set_a.pop().is_ok());
//!
//! let empty: ConcurrentSet<i32> = ConcurrentSet::new();
//! assert_eq!(empty.pop(), Err(SetError::EmptySet));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use lockset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::concurrent::{ConcurrentSet, ConcurrentSetGuard};
    pub use crate::error::SetError;
    pub use crate::sequential::SequentialSet;
    pub use crate::snapshot::Snapshot;
    pub use crate::store::{HashStore, SetStore};
}

pub mod concurrent;
pub mod error;
pub mod sequential;
pub mod snapshot;
pub mod store;

pub use concurrent::{ConcurrentSet, ConcurrentSetGuard};
pub use error::SetError;
pub use sequential::SequentialSet;
pub use snapshot::Snapshot;
