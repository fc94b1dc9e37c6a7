#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

use core::cmp::Ordering;
use core::hash::Hash;

pub mod collector;
pub mod collectors;
pub mod distinct;
mod error;
pub mod filter;
pub mod limit;
pub mod map;
mod pair;
pub mod peek;
pub mod select;
pub mod skip;
pub mod sort;
pub mod source;

pub use collector::{Characteristics, Collector};
use distinct::{Distinct, KeyOnly, ValueOnly, WholePair};
pub use error::{Error, Result, Side};
use filter::Filter;
use limit::Limit;
use map::{
    Keys, MapBoth, MapBothWith, MapKey, MapKeyWith, MapPairs, MapValue, MapValueWith, Mapped,
    Values,
};
pub use pair::Pair;
use peek::Peek;
use select::{ByKey, ByPair, ByValue};
use skip::Skip;
use sort::{KeysBy, NaturalKeys, NaturalValues, Sorted, ValuesBy};
use source::{FnSource, MapSource, MultiMapSource};

use crate::collectors::MultiValued;

/// A lazy, re-runnable pipeline of key/value [`Pair`]s.
///
/// A `MapStream` is a factory: [`MapStream::cursor`] hands out a fresh single-pass cursor each
/// time it is called, and nothing upstream is read until that cursor is advanced. Intermediate
/// operations (`filter`, `map_keys`, `sorted_values`, ...) consume the stream and wrap it in a
/// new stage. Terminal operations (`for_each`, `count`, `collect`, ...) borrow the stream, run
/// one cursor to completion (or until they short-circuit), and return a [`Result`].
///
/// To re-run a stream after chaining more stages onto it, chain onto a reference: `&S` is a
/// `MapStream` too.
pub trait MapStream {
    /// Key type.
    type Key;
    /// Value type.
    type Val;
    /// The single-pass cursor type.
    type Cursor<'s>: Iterator<Item = Result<Pair<Self::Key, Self::Val>>>
    where
        Self: 's;

    /// Creates a fresh cursor, reading the source from the start.
    fn cursor(&self) -> Self::Cursor<'_>;

    /// Passes through only the pairs for which `pred` holds.
    fn filter<Func>(self, pred: Func) -> Filter<Self, ByPair<Func>>
    where
        Self: Sized,
        Func: Fn(&Self::Key, &Self::Val) -> bool,
    {
        Filter::new(self, ByPair(pred))
    }

    /// Passes through only the pairs whose key satisfies `pred`.
    fn filter_keys<Func>(self, pred: Func) -> Filter<Self, ByKey<Func>>
    where
        Self: Sized,
        Func: Fn(&Self::Key) -> bool,
    {
        Filter::new(self, ByKey(pred))
    }

    /// Passes through only the pairs whose value satisfies `pred`.
    fn filter_values<Func>(self, pred: Func) -> Filter<Self, ByValue<Func>>
    where
        Self: Sized,
        Func: Fn(&Self::Val) -> bool,
    {
        Filter::new(self, ByValue(pred))
    }

    /// Runs a new cursor and lazily maps each pair to `func(key, value)`, dropping the pairing.
    ///
    /// The returned iterator is single-use.
    fn map<Func, Out>(&self, func: Func) -> Mapped<Self::Cursor<'_>, Func>
    where
        Func: FnMut(Self::Key, Self::Val) -> Out,
    {
        Mapped::new(self.cursor(), func)
    }

    /// Runs a new cursor, yielding only the keys.
    fn key_stream(&self) -> Keys<Self::Cursor<'_>> {
        Keys::new(self.cursor())
    }

    /// Runs a new cursor, yielding only the values.
    fn value_stream(&self) -> Values<Self::Cursor<'_>> {
        Values::new(self.cursor())
    }

    /// Replaces each key with `func(key)`.
    fn map_keys<Func, Out>(self, func: Func) -> MapPairs<Self, MapKey<Func>>
    where
        Self: Sized,
        Func: Fn(Self::Key) -> Out,
    {
        MapPairs::new(self, MapKey(func))
    }

    /// Replaces each key with `func(&key, &value)`.
    fn map_keys_with<Func, Out>(self, func: Func) -> MapPairs<Self, MapKeyWith<Func>>
    where
        Self: Sized,
        Func: Fn(&Self::Key, &Self::Val) -> Out,
    {
        MapPairs::new(self, MapKeyWith(func))
    }

    /// Replaces each value with `func(value)`.
    fn map_values<Func, Out>(self, func: Func) -> MapPairs<Self, MapValue<Func>>
    where
        Self: Sized,
        Func: Fn(Self::Val) -> Out,
    {
        MapPairs::new(self, MapValue(func))
    }

    /// Replaces each value with `func(&key, &value)`.
    fn map_values_with<Func, Out>(self, func: Func) -> MapPairs<Self, MapValueWith<Func>>
    where
        Self: Sized,
        Func: Fn(&Self::Key, &Self::Val) -> Out,
    {
        MapPairs::new(self, MapValueWith(func))
    }

    /// Replaces each pair `(k, v)` with `(key_fn(k), value_fn(v))`.
    fn map_pairs<KeyFn, ValFn, KeyOut, ValOut>(
        self,
        key_fn: KeyFn,
        value_fn: ValFn,
    ) -> MapPairs<Self, MapBoth<KeyFn, ValFn>>
    where
        Self: Sized,
        KeyFn: Fn(Self::Key) -> KeyOut,
        ValFn: Fn(Self::Val) -> ValOut,
    {
        MapPairs::new(self, MapBoth(key_fn, value_fn))
    }

    /// Replaces each pair `(k, v)` with `(key_fn(&k, &v), value_fn(&k, &v))`.
    fn map_pairs_with<KeyFn, ValFn, KeyOut, ValOut>(
        self,
        key_fn: KeyFn,
        value_fn: ValFn,
    ) -> MapPairs<Self, MapBothWith<KeyFn, ValFn>>
    where
        Self: Sized,
        KeyFn: Fn(&Self::Key, &Self::Val) -> KeyOut,
        ValFn: Fn(&Self::Key, &Self::Val) -> ValOut,
    {
        MapPairs::new(self, MapBothWith(key_fn, value_fn))
    }

    /// Drops every pair equal (in both key and value) to one already passed.
    fn distinct(self) -> Distinct<Self, WholePair>
    where
        Self: Sized,
        Self::Key: Eq + Hash + Clone,
        Self::Val: Eq + Hash + Clone,
    {
        Distinct::new(self)
    }

    /// Drops every pair whose key was already passed. The first pair for each key wins.
    fn distinct_keys(self) -> Distinct<Self, KeyOnly>
    where
        Self: Sized,
        Self::Key: Eq + Hash + Clone,
    {
        Distinct::new(self)
    }

    /// Drops every pair whose value was already passed. The first pair for each value wins.
    fn distinct_values(self) -> Distinct<Self, ValueOnly>
    where
        Self: Sized,
        Self::Val: Eq + Hash + Clone,
    {
        Distinct::new(self)
    }

    /// Stably sorts by the natural order of keys.
    ///
    /// Keys which turn out to be incomparable (e.g. a NaN) surface as [`Error::Comparison`]
    /// when the stream runs, never here.
    fn sorted_keys(self) -> Sorted<Self, NaturalKeys>
    where
        Self: Sized,
        Self::Key: PartialOrd,
    {
        Sorted::new(self, NaturalKeys)
    }

    /// Stably sorts keys by `cmp`.
    fn sorted_keys_by<Func>(self, cmp: Func) -> Sorted<Self, KeysBy<Func>>
    where
        Self: Sized,
        Func: Fn(&Self::Key, &Self::Key) -> Ordering,
    {
        Sorted::new(self, KeysBy(cmp))
    }

    /// Stably sorts by the natural order of values. See [`MapStream::sorted_keys`].
    fn sorted_values(self) -> Sorted<Self, NaturalValues>
    where
        Self: Sized,
        Self::Val: PartialOrd,
    {
        Sorted::new(self, NaturalValues)
    }

    /// Stably sorts values by `cmp`.
    fn sorted_values_by<Func>(self, cmp: Func) -> Sorted<Self, ValuesBy<Func>>
    where
        Self: Sized,
        Func: Fn(&Self::Val, &Self::Val) -> Ordering,
    {
        Sorted::new(self, ValuesBy(cmp))
    }

    /// Calls `func` on each pair as a terminal run pulls it through.
    fn peek<Func>(self, func: Func) -> Peek<Self, ByPair<Func>>
    where
        Self: Sized,
        Func: Fn(&Self::Key, &Self::Val),
    {
        Peek::new(self, ByPair(func))
    }

    /// Calls `func` on each key as a terminal run pulls it through.
    fn peek_keys<Func>(self, func: Func) -> Peek<Self, ByKey<Func>>
    where
        Self: Sized,
        Func: Fn(&Self::Key),
    {
        Peek::new(self, ByKey(func))
    }

    /// Calls `func` on each value as a terminal run pulls it through.
    fn peek_values<Func>(self, func: Func) -> Peek<Self, ByValue<Func>>
    where
        Self: Sized,
        Func: Fn(&Self::Val),
    {
        Peek::new(self, ByValue(func))
    }

    /// Passes at most `max` pairs, then stops pulling upstream.
    fn limit(self, max: usize) -> Limit<Self>
    where
        Self: Sized,
    {
        Limit::new(self, max)
    }

    /// Drops the first `n` pairs.
    fn skip(self, n: usize) -> Skip<Self>
    where
        Self: Sized,
    {
        Skip::new(self, n)
    }

    /// Runs the stream, calling `func` on every pair.
    ///
    /// Makes no promise about order relative to the source when a host engine evaluates
    /// partitions in parallel; use [`MapStream::for_each_ordered`] for that.
    fn for_each<Func>(&self, func: Func) -> Result<()>
    where
        Func: FnMut(Self::Key, Self::Val),
    {
        self.for_each_ordered(func)
    }

    /// Runs the stream, calling `func` on every pair in stream order.
    fn for_each_ordered<Func>(&self, mut func: Func) -> Result<()>
    where
        Func: FnMut(Self::Key, Self::Val),
    {
        for item in self.cursor() {
            let (key, value) = item?.into_tuple();
            let () = func(key, value);
        }
        Ok(())
    }

    /// Runs the stream to the end, counting pairs.
    fn count(&self) -> Result<usize> {
        self.cursor().try_fold(0, |count, item| item.map(|_| count + 1))
    }

    /// Returns true as soon as one pair satisfies `pred`.
    fn any_match<Func>(&self, mut pred: Func) -> Result<bool>
    where
        Func: FnMut(&Self::Key, &Self::Val) -> bool,
    {
        for item in self.cursor() {
            let pair = item?;
            if pred(pair.key(), pair.value()) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Returns false as soon as one pair fails `pred`.
    fn all_match<Func>(&self, mut pred: Func) -> Result<bool>
    where
        Func: FnMut(&Self::Key, &Self::Val) -> bool,
    {
        let failed = self.any_match(|key, value| !pred(key, value))?;
        Ok(!failed)
    }

    /// Returns false as soon as one pair satisfies `pred`.
    fn none_match<Func>(&self, pred: Func) -> Result<bool>
    where
        Func: FnMut(&Self::Key, &Self::Val) -> bool,
    {
        let matched = self.any_match(pred)?;
        Ok(!matched)
    }

    /// Runs the stream, folding every pair with `collector`.
    ///
    /// See [`collectors`] for ready-made collectors.
    fn collect<C>(&self, collector: C) -> Result<C::Output>
    where
        C: Collector<Pair<Self::Key, Self::Val>>,
    {
        collector::collect_items(&collector, self.cursor())
    }
}

impl<S> MapStream for &S
where
    S: MapStream + ?Sized,
{
    type Key = S::Key;
    type Val = S::Val;
    type Cursor<'s>
        = S::Cursor<'s>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        (**self).cursor()
    }
}

/// Creates a [`MapStream`] over a borrowed single-valued map, e.g. a `HashMap` or `BTreeMap`.
pub fn of<M>(map: &M) -> MapSource<'_, M> {
    MapSource::new(map)
}

/// Creates a [`MapStream`] over every association of a borrowed [`MultiValued`] map.
pub fn from_multimap<M>(map: &M) -> MultiMapSource<'_, M>
where
    M: MultiValued,
{
    MultiMapSource::new(map)
}

/// Creates a [`MapStream`] calling `func` for a fresh iterator of `(key, value)` tuples each
/// time the stream runs.
pub fn from_fn<Func, I, K, V>(func: Func) -> FnSource<Func>
where
    Func: Fn() -> I,
    I: IntoIterator<Item = (K, V)>,
{
    FnSource::new(func)
}
