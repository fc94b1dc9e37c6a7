//! [`Peek`] and related items.

use crate::select::{ByKey, ByPair, ByValue};
use crate::{MapStream, Pair, Result};

/// A side-effecting observer of pairs, see [`MapStream::peek`].
pub trait PairAction<K, V> {
    /// Observes one pair.
    fn act(&self, key: &K, value: &V);
}

impl<K, V, F> PairAction<K, V> for ByPair<F>
where
    F: Fn(&K, &V),
{
    fn act(&self, key: &K, value: &V) {
        (self.0)(key, value)
    }
}

impl<K, V, F> PairAction<K, V> for ByKey<F>
where
    F: Fn(&K),
{
    fn act(&self, key: &K, _value: &V) {
        (self.0)(key)
    }
}

impl<K, V, F> PairAction<K, V> for ByValue<F>
where
    F: Fn(&V),
{
    fn act(&self, _key: &K, value: &V) {
        (self.0)(value)
    }
}

/// Same as [`core::iter::Inspect`] but as a [`MapStream`] stage.
///
/// The action runs exactly once for each pair a terminal operation actually pulls through this
/// stage, and never if nothing runs the stream.
#[must_use = "streams do nothing unless a terminal operation runs them"]
#[derive(Clone, Debug)]
pub struct Peek<S, A> {
    stream: S,
    action: A,
}

impl<S, A> Peek<S, A> {
    /// Creates with upstream `stream` and observing `action`.
    pub fn new(stream: S, action: A) -> Self
    where
        Self: MapStream,
    {
        Self { stream, action }
    }
}

impl<S, A> MapStream for Peek<S, A>
where
    S: MapStream,
    A: PairAction<S::Key, S::Val>,
{
    type Key = S::Key;
    type Val = S::Val;
    type Cursor<'s>
        = PeekCursor<'s, S::Cursor<'s>, A>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        PeekCursor {
            cursor: self.stream.cursor(),
            action: &self.action,
        }
    }
}

/// Cursor of [`Peek`].
#[must_use = "cursors do nothing unless iterated"]
#[derive(Debug)]
pub struct PeekCursor<'s, C, A> {
    cursor: C,
    action: &'s A,
}

impl<C, A, K, V> Iterator for PeekCursor<'_, C, A>
where
    C: Iterator<Item = Result<Pair<K, V>>>,
    A: PairAction<K, V>,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.cursor.next()?;
        if let Ok(pair) = &item {
            self.action.act(pair.key(), pair.value());
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    use crate::{MapStream, of};

    fn source() -> BTreeMap<&'static str, i32> {
        BTreeMap::from([("key1", 1), ("key2", 2), ("key3", 3)])
    }

    #[test]
    fn test_peek_runs_on_terminal_only() {
        let map = source();
        let seen = RefCell::new(Vec::new());
        let stream = of(&map).peek(|k, v| seen.borrow_mut().push((*k, *v)));
        assert!(seen.borrow().is_empty());

        assert_eq!(3, stream.count().unwrap());
        assert_eq!(vec![("key1", 1), ("key2", 2), ("key3", 3)], *seen.borrow());
    }

    #[test]
    fn test_peek_keys() {
        let map = source();
        let seen = RefCell::new(Vec::new());
        let stream = of(&map).peek_keys(|k| seen.borrow_mut().push(*k));
        assert!(seen.borrow().is_empty());

        assert_eq!(3, stream.count().unwrap());
        assert_eq!(vec!["key1", "key2", "key3"], *seen.borrow());
    }

    #[test]
    fn test_peek_values() {
        let map = source();
        let seen = RefCell::new(Vec::new());
        let stream = of(&map).peek_values(|v| seen.borrow_mut().push(*v));
        assert!(seen.borrow().is_empty());

        assert_eq!(3, stream.count().unwrap());
        assert_eq!(vec![1, 2, 3], *seen.borrow());
    }

    #[test]
    fn test_peek_sees_only_pulled_pairs() {
        let map = source();
        let seen = RefCell::new(Vec::new());
        let stream = of(&map)
            .peek_keys(|k| seen.borrow_mut().push(*k))
            .limit(1);

        assert!(stream.any_match(|_k, _v| true).unwrap());
        assert_eq!(vec!["key1"], *seen.borrow());
    }
}
