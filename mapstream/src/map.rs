//! [`MapPairs`] and related items, plus the pair-dropping iterators [`Mapped`], [`Keys`] and
//! [`Values`].

use crate::{MapStream, Pair, Result};

/// Rewrites a pair into a new pair, see [`MapStream::map_keys`] and friends.
pub trait PairMapper<K, V> {
    /// Output key type.
    type Key;
    /// Output value type.
    type Val;

    /// Maps one pair.
    fn map_pair(&self, pair: Pair<K, V>) -> Pair<Self::Key, Self::Val>;
}

/// Replaces the key with `F(key)`.
#[derive(Clone, Copy, Debug)]
pub struct MapKey<F>(pub(crate) F);

impl<K, V, K2, F> PairMapper<K, V> for MapKey<F>
where
    F: Fn(K) -> K2,
{
    type Key = K2;
    type Val = V;

    fn map_pair(&self, pair: Pair<K, V>) -> Pair<K2, V> {
        let (key, value) = pair.into_tuple();
        Pair::new((self.0)(key), value)
    }
}

/// Replaces the key with `F(&key, &value)`.
#[derive(Clone, Copy, Debug)]
pub struct MapKeyWith<F>(pub(crate) F);

impl<K, V, K2, F> PairMapper<K, V> for MapKeyWith<F>
where
    F: Fn(&K, &V) -> K2,
{
    type Key = K2;
    type Val = V;

    fn map_pair(&self, pair: Pair<K, V>) -> Pair<K2, V> {
        let key = (self.0)(pair.key(), pair.value());
        Pair::new(key, pair.into_value())
    }
}

/// Replaces the value with `F(value)`.
#[derive(Clone, Copy, Debug)]
pub struct MapValue<F>(pub(crate) F);

impl<K, V, V2, F> PairMapper<K, V> for MapValue<F>
where
    F: Fn(V) -> V2,
{
    type Key = K;
    type Val = V2;

    fn map_pair(&self, pair: Pair<K, V>) -> Pair<K, V2> {
        let (key, value) = pair.into_tuple();
        Pair::new(key, (self.0)(value))
    }
}

/// Replaces the value with `F(&key, &value)`.
#[derive(Clone, Copy, Debug)]
pub struct MapValueWith<F>(pub(crate) F);

impl<K, V, V2, F> PairMapper<K, V> for MapValueWith<F>
where
    F: Fn(&K, &V) -> V2,
{
    type Key = K;
    type Val = V2;

    fn map_pair(&self, pair: Pair<K, V>) -> Pair<K, V2> {
        let value = (self.0)(pair.key(), pair.value());
        Pair::new(pair.into_key(), value)
    }
}

/// Replaces the key with `KF(key)` and the value with `VF(value)`.
#[derive(Clone, Copy, Debug)]
pub struct MapBoth<KF, VF>(pub(crate) KF, pub(crate) VF);

impl<K, V, K2, V2, KF, VF> PairMapper<K, V> for MapBoth<KF, VF>
where
    KF: Fn(K) -> K2,
    VF: Fn(V) -> V2,
{
    type Key = K2;
    type Val = V2;

    fn map_pair(&self, pair: Pair<K, V>) -> Pair<K2, V2> {
        let (key, value) = pair.into_tuple();
        Pair::new((self.0)(key), (self.1)(value))
    }
}

/// Replaces the key with `KF(&key, &value)` and the value with `VF(&key, &value)`.
#[derive(Clone, Copy, Debug)]
pub struct MapBothWith<KF, VF>(pub(crate) KF, pub(crate) VF);

impl<K, V, K2, V2, KF, VF> PairMapper<K, V> for MapBothWith<KF, VF>
where
    KF: Fn(&K, &V) -> K2,
    VF: Fn(&K, &V) -> V2,
{
    type Key = K2;
    type Val = V2;

    fn map_pair(&self, pair: Pair<K, V>) -> Pair<K2, V2> {
        let (key, value) = pair.as_refs();
        Pair::new((self.0)(key, value), (self.1)(key, value))
    }
}

/// Same as [`core::iter::Map`] but as a [`MapStream`] stage which keeps the pairing.
#[must_use = "streams do nothing unless a terminal operation runs them"]
#[derive(Clone, Debug)]
pub struct MapPairs<S, M> {
    stream: S,
    mapper: M,
}

impl<S, M> MapPairs<S, M> {
    /// Creates with upstream `stream` and pair `mapper`.
    pub fn new(stream: S, mapper: M) -> Self
    where
        Self: MapStream,
    {
        Self { stream, mapper }
    }
}

impl<S, M> MapStream for MapPairs<S, M>
where
    S: MapStream,
    M: PairMapper<S::Key, S::Val>,
{
    type Key = M::Key;
    type Val = M::Val;
    type Cursor<'s>
        = MapPairsCursor<'s, S::Cursor<'s>, M>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        MapPairsCursor {
            cursor: self.stream.cursor(),
            mapper: &self.mapper,
        }
    }
}

/// Cursor of [`MapPairs`].
#[must_use = "cursors do nothing unless iterated"]
#[derive(Debug)]
pub struct MapPairsCursor<'s, C, M> {
    cursor: C,
    mapper: &'s M,
}

impl<C, M, K, V> Iterator for MapPairsCursor<'_, C, M>
where
    C: Iterator<Item = Result<Pair<K, V>>>,
    M: PairMapper<K, V>,
{
    type Item = Result<Pair<M::Key, M::Val>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mapper = self.mapper;
        self.cursor
            .next()
            .map(|item| item.map(|pair| mapper.map_pair(pair)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

/// Single-use iterator of `F(key, value)`, see [`MapStream::map`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Debug)]
pub struct Mapped<C, F> {
    cursor: C,
    func: F,
}

impl<C, F> Mapped<C, F> {
    pub(crate) fn new(cursor: C, func: F) -> Self {
        Self { cursor, func }
    }
}

impl<C, F, K, V, R> Iterator for Mapped<C, F>
where
    C: Iterator<Item = Result<Pair<K, V>>>,
    F: FnMut(K, V) -> R,
{
    type Item = Result<R>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.cursor.next()?;
        Some(item.map(|pair| {
            let (key, value) = pair.into_tuple();
            (self.func)(key, value)
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

/// Single-use iterator of keys, see [`MapStream::key_stream`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Debug)]
pub struct Keys<C> {
    cursor: C,
}

impl<C> Keys<C> {
    pub(crate) fn new(cursor: C) -> Self {
        Self { cursor }
    }
}

impl<C, K, V> Iterator for Keys<C>
where
    C: Iterator<Item = Result<Pair<K, V>>>,
{
    type Item = Result<K>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next().map(|item| item.map(Pair::into_key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

/// Single-use iterator of values, see [`MapStream::value_stream`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Debug)]
pub struct Values<C> {
    cursor: C,
}

impl<C> Values<C> {
    pub(crate) fn new(cursor: C) -> Self {
        Self { cursor }
    }
}

impl<C, K, V> Iterator for Values<C>
where
    C: Iterator<Item = Result<Pair<K, V>>>,
{
    type Item = Result<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next().map(|item| item.map(Pair::into_value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}
