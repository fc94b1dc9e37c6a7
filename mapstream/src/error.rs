//! [`Error`] and related items.

use core::fmt::{self, Display, Formatter};

/// Which half of a [`Pair`](crate::Pair) an operation was looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The key half.
    Keys,
    /// The value half.
    Values,
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keys => write!(f, "keys"),
            Self::Values => write!(f, "values"),
        }
    }
}

/// An error surfaced by a terminal operation.
///
/// Building a pipeline never fails; these only appear once a cursor is driven.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Two pairs with equal keys were folded into a single-valued map without a merge function.
    #[error("duplicate key {key} (supply a merge function or deduplicate keys first)")]
    DuplicateKey {
        /// `Debug` rendering of the colliding key.
        key: String,
    },
    /// A natural-order sort met two elements which have no ordering relative to each other.
    #[error("{side} have no natural ordering (supply a comparator)")]
    Comparison {
        /// The half of the pair being sorted on.
        side: Side,
    },
}

/// [`core::result::Result`] defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::DuplicateKey {
            key: format!("{:?}", "key1"),
        };
        assert_eq!(
            "duplicate key \"key1\" (supply a merge function or deduplicate keys first)",
            err.to_string()
        );

        let err = Error::Comparison { side: Side::Values };
        assert_eq!(
            "values have no natural ordering (supply a comparator)",
            err.to_string()
        );
    }
}
