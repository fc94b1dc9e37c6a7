//! Sources: adapting containers and factories into a [`MapStream`].
//!
//! A source never reads its container until [`MapStream::cursor`] is called, and every call
//! reads it afresh, so a cursor reflects the container's contents at evaluation time.

use core::iter::Fuse;

use crate::collectors::MultiValued;
use crate::{MapStream, Pair, Result};

/// A [`MapStream`] over a borrowed single-valued map (`HashMap`, `BTreeMap`, ...), yielding a
/// clone of each entry. Created by [`of`](crate::of).
#[derive(Debug)]
pub struct MapSource<'m, M> {
    map: &'m M,
}

impl<M> Clone for MapSource<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<M> Copy for MapSource<'_, M> {}

impl<'m, M> MapSource<'m, M> {
    /// Creates a source reading from `map`.
    pub fn new(map: &'m M) -> Self {
        Self { map }
    }
}

impl<'m, M, K, V> MapStream for MapSource<'m, M>
where
    &'m M: IntoIterator<Item = (&'m K, &'m V)>,
    K: Clone + 'm,
    V: Clone + 'm,
{
    type Key = K;
    type Val = V;
    type Cursor<'s>
        = Cloned<<&'m M as IntoIterator>::IntoIter>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        Cloned {
            iter: self.map.into_iter(),
        }
    }
}

/// A [`MapStream`] over every association of a borrowed multi-valued map. A key held with three
/// values yields three pairs. Created by [`from_multimap`](crate::from_multimap).
#[derive(Debug)]
pub struct MultiMapSource<'m, M> {
    map: &'m M,
}

impl<M> Clone for MultiMapSource<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<M> Copy for MultiMapSource<'_, M> {}

impl<'m, M> MultiMapSource<'m, M> {
    /// Creates a source reading from `map`.
    pub fn new(map: &'m M) -> Self {
        Self { map }
    }
}

impl<'m, M> MapStream for MultiMapSource<'m, M>
where
    M: MultiValued,
    M::Key: Clone,
    M::Val: Clone,
{
    type Key = M::Key;
    type Val = M::Val;
    type Cursor<'s>
        = Cloned<M::Associations<'m>>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        Cloned {
            iter: self.map.associations(),
        }
    }
}

/// A [`MapStream`] whose cursors come from calling a factory closure. Created by
/// [`from_fn`](crate::from_fn).
#[derive(Clone, Debug)]
pub struct FnSource<F> {
    func: F,
}

impl<F> FnSource<F> {
    /// Creates a source calling `func` once per cursor.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F, I, K, V> MapStream for FnSource<F>
where
    F: Fn() -> I,
    I: IntoIterator<Item = (K, V)>,
{
    type Key = K;
    type Val = V;
    type Cursor<'s>
        = Owned<Fuse<I::IntoIter>>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        Owned {
            iter: (self.func)().into_iter().fuse(),
        }
    }
}

/// Cursor of borrowing sources, cloning each `(&K, &V)` into a [`Pair`].
#[must_use = "cursors do nothing unless iterated"]
#[derive(Debug)]
pub struct Cloned<I> {
    iter: I,
}

impl<'a, I, K, V> Iterator for Cloned<I>
where
    I: Iterator<Item = (&'a K, &'a V)>,
    K: Clone + 'a,
    V: Clone + 'a,
{
    type Item = Result<Pair<K, V>>;

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.iter.next()?;
        Some(Ok(Pair::new(key.clone(), value.clone())))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Cursor of [`FnSource`], wrapping each owned `(K, V)` into a [`Pair`].
#[must_use = "cursors do nothing unless iterated"]
#[derive(Debug)]
pub struct Owned<I> {
    iter: I,
}

impl<I, K, V> Iterator for Owned<I>
where
    I: Iterator<Item = (K, V)>,
{
    type Item = Result<Pair<K, V>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|kv| Ok(Pair::from(kv)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}
