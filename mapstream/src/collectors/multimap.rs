//! [`MultiValued`] maps and the [`ToMultiMap`] collector.
//!
//! A multi-valued map holds a collection of values per key, where the collection is any
//! [`cc_traits::Insert`] container: a `Vec` keeps every association in arrival order, a
//! `HashSet` or `BTreeSet` drops repeated values under the same key.

use core::hash::{BuildHasher, Hash};
use std::collections::{BTreeMap, HashMap, HashSet, btree_map, hash_map};

use cc_traits::{Collection, Insert};

use crate::collector::{Characteristics, Collector};
use crate::{Pair, Result};

/// Multi-valued map backed by a [`HashMap`] of [`Vec`]s.
pub type ListMultiMap<K, V> = HashMap<K, Vec<V>>;
/// Multi-valued map backed by a [`HashMap`] of [`HashSet`]s.
pub type SetMultiMap<K, V> = HashMap<K, HashSet<V>>;

/// A map associating each key with zero or more values.
pub trait MultiValued {
    /// Key type.
    type Key;
    /// Type of each associated value.
    type Val;
    /// Iterator over every `(key, value)` association.
    type Associations<'a>: Iterator<Item = (&'a Self::Key, &'a Self::Val)>
    where
        Self: 'a;

    /// Adds the association `key -> value`.
    fn put(&mut self, key: Self::Key, value: Self::Val);

    /// Adds every association of `other`, after those already held.
    fn put_all(&mut self, other: Self)
    where
        Self: Sized;

    /// Iterates every association. A key held with three values is visited three times.
    fn associations(&self) -> Self::Associations<'_>;
}

/// Element type of the per-key collection `C`.
type ValueOf<C> = <C as Collection>::Item;

impl<K, C, S> MultiValued for HashMap<K, C, S>
where
    K: Eq + Hash,
    S: BuildHasher,
    C: Default + Insert + IntoIterator<Item = ValueOf<C>>,
    for<'a> &'a C: IntoIterator<Item = &'a ValueOf<C>>,
{
    type Key = K;
    type Val = ValueOf<C>;
    type Associations<'a>
        = Associations<'a, hash_map::Iter<'a, K, C>, K, C>
    where
        Self: 'a;

    fn put(&mut self, key: K, value: ValueOf<C>) {
        Insert::insert(self.entry(key).or_default(), value);
    }

    fn put_all(&mut self, other: Self) {
        for (key, values) in other {
            let held = self.entry(key).or_default();
            for value in values {
                Insert::insert(held, value);
            }
        }
    }

    fn associations(&self) -> Self::Associations<'_> {
        Associations::new(self.iter())
    }
}

impl<K, C> MultiValued for BTreeMap<K, C>
where
    K: Ord,
    C: Default + Insert + IntoIterator<Item = ValueOf<C>>,
    for<'a> &'a C: IntoIterator<Item = &'a ValueOf<C>>,
{
    type Key = K;
    type Val = ValueOf<C>;
    type Associations<'a>
        = Associations<'a, btree_map::Iter<'a, K, C>, K, C>
    where
        Self: 'a;

    fn put(&mut self, key: K, value: ValueOf<C>) {
        Insert::insert(self.entry(key).or_default(), value);
    }

    fn put_all(&mut self, other: Self) {
        for (key, values) in other {
            let held = self.entry(key).or_default();
            for value in values {
                Insert::insert(held, value);
            }
        }
    }

    fn associations(&self) -> Self::Associations<'_> {
        Associations::new(self.iter())
    }
}

/// Flattens `(&K, &C)` map entries into one `(&K, &V)` per held value.
#[must_use = "iterators do nothing unless iterated"]
pub struct Associations<'a, O, K, C>
where
    K: 'a,
    C: 'a,
    &'a C: IntoIterator,
{
    outer: O,
    current: Option<(&'a K, <&'a C as IntoIterator>::IntoIter)>,
}

impl<'a, O, K, C> Associations<'a, O, K, C>
where
    K: 'a,
    C: 'a,
    &'a C: IntoIterator,
{
    fn new(outer: O) -> Self {
        Self {
            outer,
            current: None,
        }
    }
}

impl<'a, O, K, C> Iterator for Associations<'a, O, K, C>
where
    O: Iterator<Item = (&'a K, &'a C)>,
    K: 'a,
    C: 'a,
    &'a C: IntoIterator,
{
    type Item = (&'a K, <&'a C as IntoIterator>::Item);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, values)) = &mut self.current
                && let Some(value) = values.next()
            {
                return Some((*key, value));
            }
            let (key, values) = self.outer.next()?;
            self.current = Some((key, values.into_iter()));
        }
    }
}

/// [`Collector`] folding pairs into the [`MultiValued`] map made by `Factory`.
#[derive(Clone, Debug)]
pub struct ToMultiMap<Factory> {
    factory: Factory,
    characteristics: Characteristics,
}

impl<Factory> ToMultiMap<Factory> {
    /// Creates with a `factory` for empty destination maps. [`Characteristics::IDENTITY_FINISH`]
    /// is always added to `characteristics`.
    pub fn new(factory: Factory, characteristics: Characteristics) -> Self {
        Self {
            factory,
            characteristics,
        }
    }
}

impl<K, V, M, Factory> Collector<Pair<K, V>> for ToMultiMap<Factory>
where
    Factory: Fn() -> M,
    M: MultiValued<Key = K, Val = V>,
{
    type Accum = M;
    type Output = M;

    fn init(&self) -> M {
        (self.factory)()
    }

    fn accumulate(&self, accum: &mut M, item: Pair<K, V>) -> Result<()> {
        let (key, value) = item.into_tuple();
        accum.put(key, value);
        Ok(())
    }

    fn combine(&self, mut left: M, right: M) -> Result<M> {
        left.put_all(right);
        Ok(left)
    }

    fn finish(&self, accum: M) -> M {
        accum
    }

    fn characteristics(&self) -> Characteristics {
        self.characteristics | Characteristics::IDENTITY_FINISH
    }
}

/// Folds pairs into a [`ListMultiMap`], keeping every association including repeats.
pub fn to_multimap<K, V>() -> ToMultiMap<fn() -> ListMultiMap<K, V>> {
    ToMultiMap::new(HashMap::new, Characteristics::UNORDERED)
}

/// Like [`to_multimap`], but partitions are combined strictly in encounter order so each key's
/// values stay in the order they were produced.
pub fn to_list_multimap<K, V>() -> ToMultiMap<fn() -> ListMultiMap<K, V>> {
    ToMultiMap::new(HashMap::new, Characteristics::NONE)
}

/// Folds pairs into a [`SetMultiMap`]; a repeated `(key, value)` association is kept once.
pub fn to_set_multimap<K, V>() -> ToMultiMap<fn() -> SetMultiMap<K, V>> {
    ToMultiMap::new(HashMap::new, Characteristics::UNORDERED)
}

/// Folds pairs into the multi-valued map made by `factory`.
pub fn to_multimap_with<M, Factory>(
    factory: Factory,
    characteristics: Characteristics,
) -> ToMultiMap<Factory>
where
    Factory: Fn() -> M,
    M: MultiValued,
{
    ToMultiMap::new(factory, characteristics)
}

#[cfg(test)]
mod test {
    use std::collections::BTreeSet;

    use super::*;
    use crate::collector::{collect_items, fold_partitions};

    #[test]
    fn test_put_and_associations() {
        let mut map = BTreeMap::<&str, Vec<i32>>::new();
        map.put("b", 2);
        map.put("a", 1);
        map.put("b", 3);
        map.put("b", 2);
        let assocs: Vec<_> = map.associations().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(vec![("a", 1), ("b", 2), ("b", 3), ("b", 2)], assocs);
    }

    #[test]
    fn test_set_backed_drops_repeats() {
        let mut map = BTreeMap::<&str, BTreeSet<i32>>::new();
        map.put("b", 2);
        map.put("b", 2);
        map.put("b", 1);
        let assocs: Vec<_> = map.associations().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(vec![("b", 1), ("b", 2)], assocs);
    }

    #[test]
    fn test_empty_associations() {
        let map = SetMultiMap::<u8, u8>::new();
        assert_eq!(0, map.associations().count());
    }

    #[test]
    fn test_put_all_appends() {
        let mut left = ListMultiMap::new();
        left.put("k", 1);
        let mut right = ListMultiMap::new();
        right.put("k", 2);
        right.put("j", 3);
        left.put_all(right);
        assert_eq!(vec![1, 2], left["k"]);
        assert_eq!(vec![3], left["j"]);
    }

    #[test]
    fn test_to_multimap() {
        let items =
            [("key1", 1), ("key2", 2), ("key1", 3), ("key1", 1)].map(|kv| Ok(Pair::from(kv)));
        let out = collect_items(&to_multimap(), items).unwrap();
        assert_eq!(vec![1, 3, 1], out["key1"]);
        assert_eq!(vec![2], out["key2"]);
        assert!(
            Collector::<Pair<&str, i32>>::characteristics(&to_multimap())
                .contains(Characteristics::UNORDERED | Characteristics::IDENTITY_FINISH)
        );
    }

    #[test]
    fn test_to_set_multimap() {
        let items = [("key1", 1), ("key1", 1), ("key1", 2)].map(|kv| Ok(Pair::from(kv)));
        let out = collect_items(&to_set_multimap(), items).unwrap();
        assert_eq!(HashSet::from([1, 2]), out["key1"]);
    }

    #[test]
    fn test_to_list_multimap_combines_in_order() {
        let collector = to_list_multimap();
        assert_eq!(
            Characteristics::IDENTITY_FINISH,
            Collector::<Pair<&str, i32>>::characteristics(&collector)
        );
        let parts = [
            vec![Ok(Pair::new("k", 1)), Ok(Pair::new("k", 2))],
            vec![Ok(Pair::new("k", 3))],
            vec![Ok(Pair::new("j", 4)), Ok(Pair::new("k", 5))],
        ];
        let out = fold_partitions(&collector, parts).unwrap();
        assert_eq!(vec![1, 2, 3, 5], out["k"]);
        assert_eq!(vec![4], out["j"]);
    }

    #[test]
    fn test_to_multimap_with_factory() {
        let collector =
            to_multimap_with(BTreeMap::<i32, BTreeSet<char>>::new, Characteristics::NONE);
        let items = [(2, 'b'), (1, 'z'), (2, 'a'), (2, 'b')].map(|kv| Ok(Pair::from(kv)));
        let out = collect_items(&collector, items).unwrap();
        assert_eq!(
            vec![(&1, &'z'), (&2, &'a'), (&2, &'b')],
            out.associations().collect::<Vec<_>>()
        );
    }
}
