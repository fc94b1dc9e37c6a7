//! [`Distinct`], [`SeenSet`] and related items.
//!
//! The seen-set is shared state: one logical scan may be split by a host engine into partitions
//! evaluated on different threads, all probing the same set. [`SeenSet`] is therefore always
//! behind a [`Mutex`], and single-threaded callers pay one uncontended lock per pair.

use core::hash::Hash;
use core::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};

use rustc_hash::FxHashSet;

use crate::{MapStream, Pair, Result};

/// A thread-safe set recording which elements a [`Distinct`] stage has already let through.
#[derive(Debug)]
pub struct SeenSet<T> {
    seen: Mutex<FxHashSet<T>>,
}

impl<T> Default for SeenSet<T> {
    fn default() -> Self {
        Self {
            seen: Mutex::new(FxHashSet::default()),
        }
    }
}

impl<T> SeenSet<T>
where
    T: Eq + Hash,
{
    /// Creates a new, empty `SeenSet`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `item`, returning `true` if it had not been seen before.
    pub fn first_sighting(&self, item: T) -> bool {
        // A panic elsewhere cannot leave the set half-updated, so poisoning is ignored.
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        seen.insert(item)
    }

    /// Returns the number of distinct elements seen so far.
    pub fn len(&self) -> usize {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if nothing has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What part of a pair decides whether two pairs are duplicates.
pub trait DedupBy<K, V> {
    /// The element stored in the [`SeenSet`].
    type Seen: Eq + Hash;

    /// Projects `pair` to its dedup element.
    fn seen_of(pair: &Pair<K, V>) -> Self::Seen;
}

/// Pairs are duplicates when both key and value are equal.
#[derive(Clone, Copy, Debug, Default)]
pub struct WholePair;

impl<K, V> DedupBy<K, V> for WholePair
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    type Seen = Pair<K, V>;

    fn seen_of(pair: &Pair<K, V>) -> Self::Seen {
        pair.clone()
    }
}

/// Pairs are duplicates when their keys are equal. The first pair seen for a key wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyOnly;

impl<K, V> DedupBy<K, V> for KeyOnly
where
    K: Eq + Hash + Clone,
{
    type Seen = K;

    fn seen_of(pair: &Pair<K, V>) -> Self::Seen {
        pair.key().clone()
    }
}

/// Pairs are duplicates when their values are equal. The first pair seen for a value wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValueOnly;

impl<K, V> DedupBy<K, V> for ValueOnly
where
    V: Eq + Hash + Clone,
{
    type Seen = V;

    fn seen_of(pair: &Pair<K, V>) -> Self::Seen {
        pair.value().clone()
    }
}

/// [`MapStream`] stage passing only the first occurrence of each pair, as decided by `D`.
///
/// Every cursor gets a fresh [`SeenSet`], so re-running the stream deduplicates from scratch.
#[must_use = "streams do nothing unless a terminal operation runs them"]
#[derive(Clone, Debug)]
pub struct Distinct<S, D> {
    stream: S,
    _by: PhantomData<fn() -> D>,
}

impl<S, D> Distinct<S, D> {
    /// Creates with upstream `stream`.
    pub fn new(stream: S) -> Self
    where
        Self: MapStream,
    {
        Self {
            stream,
            _by: PhantomData,
        }
    }
}

impl<S, D> MapStream for Distinct<S, D>
where
    S: MapStream,
    D: DedupBy<S::Key, S::Val>,
{
    type Key = S::Key;
    type Val = S::Val;
    type Cursor<'s>
        = DistinctCursor<S::Cursor<'s>, D, D::Seen>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        DistinctCursor::with_seen(self.stream.cursor(), Arc::new(SeenSet::new()))
    }
}

/// Cursor of [`Distinct`].
///
/// Several cursors built with [`DistinctCursor::with_seen`] over disjoint partitions of one
/// source, sharing one [`SeenSet`], together behave like a single distinct scan.
#[must_use = "cursors do nothing unless iterated"]
#[derive(Debug)]
pub struct DistinctCursor<C, D, T> {
    cursor: C,
    seen: Arc<SeenSet<T>>,
    _by: PhantomData<fn() -> D>,
}

impl<C, D, T> DistinctCursor<C, D, T> {
    /// Creates a cursor filtering `cursor` against the shared `seen` set.
    pub fn with_seen(cursor: C, seen: Arc<SeenSet<T>>) -> Self {
        Self {
            cursor,
            seen,
            _by: PhantomData,
        }
    }
}

impl<C, D, T, K, V> Iterator for DistinctCursor<C, D, T>
where
    C: Iterator<Item = Result<Pair<K, V>>>,
    D: DedupBy<K, V, Seen = T>,
    T: Eq + Hash,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let seen = &self.seen;
        self.cursor.find(|item| match item {
            Ok(pair) => seen.first_sighting(D::seen_of(pair)),
            Err(_) => true,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.cursor.size_hint().1)
    }
}
