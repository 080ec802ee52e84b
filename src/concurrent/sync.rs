//! Lock primitive behind [`ConcurrentSet`](super::ConcurrentSet).
//!
//! Normal builds use `parking_lot::Mutex`, which never poisons. Building with
//! `RUSTFLAGS="--cfg loom"` and the `loom` feature swaps in
//! `loom::sync::Mutex` so the locking protocol can be model-checked; the
//! wrapper below gives it the same infallible `lock` signature.

#[cfg(not(all(loom, feature = "loom")))]
pub(crate) use parking_lot::{Mutex, MutexGuard};

#[cfg(all(loom, feature = "loom"))]
pub(crate) use self::loom_mutex::{Mutex, MutexGuard};

#[cfg(all(loom, feature = "loom"))]
mod loom_mutex {
    use std::sync::PoisonError;

    pub(crate) type MutexGuard<'a, T> = loom::sync::MutexGuard<'a, T>;

    pub(crate) struct Mutex<T>(loom::sync::Mutex<T>);

    impl<T> Mutex<T> {
        pub(crate) fn new(value: T) -> Self {
            Self(loom::sync::Mutex::new(value))
        }

        // Poisoning is ignored, matching parking_lot.
        pub(crate) fn lock(&self) -> MutexGuard<'_, T> {
            self.0.lock().unwrap_or_else(PoisonError::into_inner)
        }

        pub(crate) fn into_inner(self) -> T {
            self.0.into_inner().unwrap_or_else(PoisonError::into_inner)
        }
    }
}
