//! [`OrderedMap`], a single-valued map which remembers insertion order.

use core::hash::Hash;
use core::slice;
use std::vec;

use rustc_hash::FxHashMap;

use super::MergeMap;

/// Single-valued map iterating in the order its keys were first inserted.
///
/// As a [`ToMap`](super::ToMap) destination, a repeated key is merged where it first appeared.
#[derive(Clone, Debug)]
pub struct OrderedMap<K, V> {
    index: FxHashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self {
            index: FxHashMap::default(),
            entries: Vec::new(),
        }
    }
}

impl<K, V> OrderedMap<K, V> {
    /// Creates a new, empty `OrderedMap`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> Entries<'_, K, V> {
        Entries {
            entries: self.entries.iter(),
        }
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Eq + Hash,
{
    /// Returns the value held for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        let &position = self.index.get(key)?;
        self.entries.get(position).map(|(_, value)| value)
    }
}

impl<K, V> PartialEq for OrderedMap<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}
impl<K, V> Eq for OrderedMap<K, V>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V> MergeMap<K, V> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn upsert<F>(&mut self, key: K, value: V, merge: F)
    where
        F: FnOnce(V, V) -> V,
    {
        if let Some(&position) = self.index.get(&key) {
            // Reinserting at the same position leaves every index valid.
            let (held, existing) = self.entries.remove(position);
            self.entries.insert(position, (held, merge(existing, value)));
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
        }
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of an [`OrderedMap`], in insertion order.
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone, Debug)]
pub struct Entries<'a, K, V> {
    entries: slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.entries.next()?;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_insertion_order() {
        let mut map = OrderedMap::new();
        map.upsert("c", 3, |_, _| unreachable!());
        map.upsert("a", 1, |_, _| unreachable!());
        map.upsert("b", 2, |_, _| unreachable!());
        map.upsert("a", 10, |x, y| x * 100 + y);

        assert_eq!(3, map.len());
        assert_eq!(Some(&110), map.get(&"a"));
        assert_eq!(None, map.get(&"z"));
        assert_eq!(
            vec![("c", 3), ("a", 110), ("b", 2)],
            map.into_iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let mut ab = OrderedMap::new();
        ab.upsert(1, 'a', |x, _| x);
        ab.upsert(2, 'b', |x, _| x);
        let mut ba = OrderedMap::new();
        ba.upsert(2, 'b', |x, _| x);
        ba.upsert(1, 'a', |x, _| x);
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
        assert!(OrderedMap::<u8, u8>::new().is_empty());
    }
}
