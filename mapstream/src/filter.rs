//! [`Filter`] and related items.

use crate::select::{ByKey, ByPair, ByValue};
use crate::{MapStream, Pair, Result};

/// A predicate over a key/value pair, see [`MapStream::filter`].
pub trait PairPredicate<K, V> {
    /// Returns `true` if the pair should pass through.
    fn test(&self, key: &K, value: &V) -> bool;
}

impl<K, V, F> PairPredicate<K, V> for ByPair<F>
where
    F: Fn(&K, &V) -> bool,
{
    fn test(&self, key: &K, value: &V) -> bool {
        (self.0)(key, value)
    }
}

impl<K, V, F> PairPredicate<K, V> for ByKey<F>
where
    F: Fn(&K) -> bool,
{
    fn test(&self, key: &K, _value: &V) -> bool {
        (self.0)(key)
    }
}

impl<K, V, F> PairPredicate<K, V> for ByValue<F>
where
    F: Fn(&V) -> bool,
{
    fn test(&self, _key: &K, value: &V) -> bool {
        (self.0)(value)
    }
}

/// Same as [`core::iter::Filter`] but as a [`MapStream`] stage.
///
/// Passes through the pairs for which the predicate holds, without reordering.
#[must_use = "streams do nothing unless a terminal operation runs them"]
#[derive(Clone, Debug)]
pub struct Filter<S, P> {
    stream: S,
    pred: P,
}

impl<S, P> Filter<S, P> {
    /// Creates with upstream `stream` and predicate `pred`.
    pub fn new(stream: S, pred: P) -> Self
    where
        Self: MapStream,
    {
        Self { stream, pred }
    }
}

impl<S, P> MapStream for Filter<S, P>
where
    S: MapStream,
    P: PairPredicate<S::Key, S::Val>,
{
    type Key = S::Key;
    type Val = S::Val;
    type Cursor<'s>
        = FilterCursor<'s, S::Cursor<'s>, P>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        FilterCursor {
            cursor: self.stream.cursor(),
            pred: &self.pred,
        }
    }
}

/// Cursor of [`Filter`].
#[must_use = "cursors do nothing unless iterated"]
#[derive(Debug)]
pub struct FilterCursor<'s, C, P> {
    cursor: C,
    pred: &'s P,
}

impl<C, P, K, V> Iterator for FilterCursor<'_, C, P>
where
    C: Iterator<Item = Result<Pair<K, V>>>,
    P: PairPredicate<K, V>,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let pred = self.pred;
        self.cursor.find(|item| match item {
            Ok(pair) => pred.test(pair.key(), pair.value()),
            Err(_) => true,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.cursor.size_hint().1)
    }
}
