//! Wrappers choosing which half of a [`Pair`](crate::Pair) a user function sees.
//!
//! [`filter`](crate::filter) and [`peek`](crate::peek) are written once against these, so
//! `filter_keys` is just `filter` with a [`ByKey`] predicate.

/// Calls the wrapped function with both the key and the value.
#[derive(Clone, Copy, Debug)]
pub struct ByPair<F>(pub(crate) F);

/// Calls the wrapped function with the key only.
#[derive(Clone, Copy, Debug)]
pub struct ByKey<F>(pub(crate) F);

/// Calls the wrapped function with the value only.
#[derive(Clone, Copy, Debug)]
pub struct ByValue<F>(pub(crate) F);
