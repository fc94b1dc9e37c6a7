//! [`Pair`], the immutable key/value element every [`MapStream`](crate::MapStream) yields.

/// An immutable key/value tuple.
///
/// Equality, ordering and hashing are structural over `(key, value)`, delegating to `K` and `V`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pair<K, V> {
    key: K,
    value: V,
}

impl<K, V> Pair<K, V> {
    /// Create a new `Pair` from a `key` and a `value`.
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// The key half.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The value half.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Both halves as shared references.
    pub fn as_refs(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    /// Gets the key by value, dropping the value.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Gets the value by value, dropping the key.
    pub fn into_value(self) -> V {
        self.value
    }

    /// Gets both halves by value, consuming self.
    pub fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Pair<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

impl<K, V> From<Pair<K, V>> for (K, V) {
    fn from(pair: Pair<K, V>) -> Self {
        pair.into_tuple()
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Pair<String, i32>: Send, Sync, Clone, Ord);

    #[test]
    fn test_structural_equality() {
        assert_eq!(Pair::new("a", 1), Pair::from(("a", 1)));
        assert_ne!(Pair::new("a", 1), Pair::new("a", 2));
        assert_ne!(Pair::new("a", 1), Pair::new("b", 1));

        let set: HashSet<_> = [Pair::new("a", 1), Pair::new("a", 1), Pair::new("a", 2)]
            .into_iter()
            .collect();
        assert_eq!(2, set.len());
    }

    #[test]
    fn test_absent_halves() {
        let absent_key = Pair::new(None::<&str>, Some(1));
        let absent_value = Pair::new(Some("a"), None::<i32>);
        let both_absent = Pair::new(None::<&str>, None::<i32>);
        assert_ne!(absent_key, both_absent);
        assert_ne!(absent_value, both_absent);
        assert_eq!(both_absent, Pair::new(None, None));
    }

    #[test]
    fn test_into_parts() {
        let pair = Pair::new(String::from("k"), vec![1, 2]);
        assert_eq!((&String::from("k"), &vec![1, 2]), pair.as_refs());
        let (key, value): (String, Vec<i32>) = pair.into();
        assert_eq!("k", key);
        assert_eq!(vec![1, 2], value);
    }
}
