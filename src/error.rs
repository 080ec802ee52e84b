//! Error types for set operations.
//!
//! Only two operations can fail: removing an item that is not present and
//! popping from an empty set. Every other operation, including all of the
//! set algebra and the membership predicates, is total.

/// Represents the recoverable errors returned by set operations.
///
/// Neither error leaves the set in a modified state, and no operation
/// retries internally; callers decide whether to retry.
///
/// # Examples
///
/// ```rust
/// use lockset::{SequentialSet, SetError};
///
/// let mut set: SequentialSet<i32> = SequentialSet::new();
/// assert_eq!(set.pop(), Err(SetError::EmptySet));
/// assert_eq!(set.remove(&1), Err(SetError::ItemNotFound));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetError {
    /// `remove` was called with an item that is not in the set.
    ItemNotFound,
    /// `pop` was called on a set with no items.
    EmptySet,
}

impl std::fmt::Display for SetError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemNotFound => write!(formatter, "item not found in set"),
            Self::EmptySet => write!(formatter, "set is empty"),
        }
    }
}

impl std::error::Error for SetError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SetError::ItemNotFound, "item not found in set")]
    #[case(SetError::EmptySet, "set is empty")]
    fn test_set_error_display(#[case] error: SetError, #[case] expected: &str) {
        assert_eq!(format!("{error}"), expected);
    }

    #[rstest]
    fn test_set_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&SetError::EmptySet);
    }

    #[rstest]
    fn test_set_error_boxes_into_dyn_error() {
        let boxed: Box<dyn std::error::Error> = Box::new(SetError::ItemNotFound);
        assert_eq!(boxed.to_string(), "item not found in set");
    }
}
