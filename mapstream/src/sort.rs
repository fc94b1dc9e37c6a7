//! [`Sorted`] and related items.
//!
//! Sorting needs every upstream pair, so the cursor buffers the whole upstream on its first
//! `next()` call, sorts, then emits. Nothing is compared before that first call.

use core::cmp::Ordering;
use core::mem;

use crate::{Error, MapStream, Pair, Result, Side};

/// An ordering over pairs, see [`MapStream::sorted_keys`] and friends.
pub trait PairOrder<K, V> {
    /// The half of the pair this order looks at.
    const SIDE: Side;

    /// Compares two pairs, or returns `None` if they have no ordering relative to each other.
    fn compare(&self, a: &Pair<K, V>, b: &Pair<K, V>) -> Option<Ordering>;
}

/// Natural ([`PartialOrd`]) order of keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalKeys;

impl<K, V> PairOrder<K, V> for NaturalKeys
where
    K: PartialOrd,
{
    const SIDE: Side = Side::Keys;

    fn compare(&self, a: &Pair<K, V>, b: &Pair<K, V>) -> Option<Ordering> {
        a.key().partial_cmp(b.key())
    }
}

/// Natural ([`PartialOrd`]) order of values.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalValues;

impl<K, V> PairOrder<K, V> for NaturalValues
where
    V: PartialOrd,
{
    const SIDE: Side = Side::Values;

    fn compare(&self, a: &Pair<K, V>, b: &Pair<K, V>) -> Option<Ordering> {
        a.value().partial_cmp(b.value())
    }
}

/// Order of keys given by a comparator.
#[derive(Clone, Copy, Debug)]
pub struct KeysBy<F>(pub(crate) F);

impl<K, V, F> PairOrder<K, V> for KeysBy<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    const SIDE: Side = Side::Keys;

    fn compare(&self, a: &Pair<K, V>, b: &Pair<K, V>) -> Option<Ordering> {
        Some((self.0)(a.key(), b.key()))
    }
}

/// Order of values given by a comparator.
#[derive(Clone, Copy, Debug)]
pub struct ValuesBy<F>(pub(crate) F);

impl<K, V, F> PairOrder<K, V> for ValuesBy<F>
where
    F: Fn(&V, &V) -> Ordering,
{
    const SIDE: Side = Side::Values;

    fn compare(&self, a: &Pair<K, V>, b: &Pair<K, V>) -> Option<Ordering> {
        Some((self.0)(a.value(), b.value()))
    }
}

/// [`MapStream`] stage which waits for all upstream pairs, stably sorts them by `O`, then emits
/// them.
#[must_use = "streams do nothing unless a terminal operation runs them"]
#[derive(Clone, Debug)]
pub struct Sorted<S, O> {
    stream: S,
    order: O,
}

impl<S, O> Sorted<S, O> {
    /// Creates with upstream `stream` and pair `order`.
    pub fn new(stream: S, order: O) -> Self
    where
        Self: MapStream,
    {
        Self { stream, order }
    }
}

impl<S, O> MapStream for Sorted<S, O>
where
    S: MapStream,
    O: PairOrder<S::Key, S::Val>,
{
    type Key = S::Key;
    type Val = S::Val;
    type Cursor<'s>
        = SortedCursor<'s, S::Cursor<'s>, O, S::Key, S::Val>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        SortedCursor {
            state: SortedState::Buffering(self.stream.cursor()),
            order: &self.order,
        }
    }
}

#[derive(Debug)]
enum SortedState<C, K, V> {
    Buffering(C),
    Emitting(std::vec::IntoIter<Pair<K, V>>),
    Done,
}

/// Cursor of [`Sorted`].
#[must_use = "cursors do nothing unless iterated"]
#[derive(Debug)]
pub struct SortedCursor<'s, C, O, K, V> {
    state: SortedState<C, K, V>,
    order: &'s O,
}

impl<C, O, K, V> SortedCursor<'_, C, O, K, V>
where
    C: Iterator<Item = Result<Pair<K, V>>>,
    O: PairOrder<K, V>,
{
    fn sort(&self, cursor: C) -> Result<Vec<Pair<K, V>>> {
        let buf = cursor.collect::<Result<Vec<_>>>()?;
        let len = buf.len();

        let Some(sorted) = try_merge_sort(buf, &|a: &Pair<K, V>, b: &Pair<K, V>| {
            self.order.compare(a, b)
        }) else {
            tracing::debug!(side = %O::SIDE, "Sort met incomparable elements.");
            return Err(Error::Comparison { side: O::SIDE });
        };
        tracing::trace!(len, side = %O::SIDE, "Sorted buffered pairs.");
        Ok(sorted)
    }
}

/// Stable merge sort which gives up as soon as `compare` returns `None`.
///
/// `slice::sort_by` requires a total order and may panic otherwise, so it cannot be handed a
/// comparison which might fail midway.
fn try_merge_sort<T>(
    mut items: Vec<T>,
    compare: &impl Fn(&T, &T) -> Option<Ordering>,
) -> Option<Vec<T>> {
    if items.len() <= 1 {
        return Some(items);
    }
    let right = items.split_off(items.len() / 2);
    let left = try_merge_sort(items, compare)?;
    let right = try_merge_sort(right, compare)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        // Ties take from the left run, which keeps the sort stable.
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l)? == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        merged.extend(if take_right { right.next() } else { left.next() });
    }
    Some(merged)
}

impl<C, O, K, V> Iterator for SortedCursor<'_, C, O, K, V>
where
    C: Iterator<Item = Result<Pair<K, V>>>,
    O: PairOrder<K, V>,
{
    type Item = Result<Pair<K, V>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let SortedState::Buffering(_) = &self.state {
            let state = mem::replace(&mut self.state, SortedState::Done);
            if let SortedState::Buffering(cursor) = state {
                match self.sort(cursor) {
                    Ok(buf) => self.state = SortedState::Emitting(buf.into_iter()),
                    // Stays `Done`, the error is the last item.
                    Err(err) => return Some(Err(err)),
                }
            }
        }

        match &mut self.state {
            SortedState::Emitting(into_iter) => into_iter.next().map(Ok),
            SortedState::Buffering(_) | SortedState::Done => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.state {
            SortedState::Buffering(cursor) => (0, cursor.size_hint().1.map(|n| n + 1)),
            SortedState::Emitting(into_iter) => into_iter.size_hint(),
            SortedState::Done => (0, Some(0)),
        }
    }
}
