//! Folding pairs into single-valued maps.

use core::fmt::Debug;
use core::hash::{BuildHasher, Hash};
use std::collections::{BTreeMap, HashMap};

use crate::collector::{Characteristics, Collector};
use crate::{Error, Pair, Result};

/// A single-valued map which [`ToMap`] can fold into.
pub trait MergeMap<K, V> {
    /// Returns true if a value is held for `key`.
    fn contains_key(&self, key: &K) -> bool;

    /// Inserts `value` for `key`. If `key` is already held, its value `v` becomes
    /// `merge(v, value)` and the held key keeps its place in maps which have an order.
    fn upsert<F>(&mut self, key: K, value: V, merge: F)
    where
        F: FnOnce(V, V) -> V;
}

impl<K, V, S> MergeMap<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn contains_key(&self, key: &K) -> bool {
        HashMap::contains_key(self, key)
    }

    fn upsert<F>(&mut self, key: K, value: V, merge: F)
    where
        F: FnOnce(V, V) -> V,
    {
        match self.remove_entry(&key) {
            Some((held, existing)) => self.insert(held, merge(existing, value)),
            None => self.insert(key, value),
        };
    }
}

impl<K, V> MergeMap<K, V> for BTreeMap<K, V>
where
    K: Ord,
{
    fn contains_key(&self, key: &K) -> bool {
        BTreeMap::contains_key(self, key)
    }

    fn upsert<F>(&mut self, key: K, value: V, merge: F)
    where
        F: FnOnce(V, V) -> V,
    {
        match self.remove_entry(&key) {
            Some((held, existing)) => self.insert(held, merge(existing, value)),
            None => self.insert(key, value),
        };
    }
}

/// What to do when two pairs with equal keys meet.
pub trait MergePolicy<K, V> {
    /// Called for a repeated `key` before the held value is touched. An error fails the fold
    /// and leaves the accumulation as it was.
    fn check(&self, key: &K) -> Result<()>;

    /// Produces the value kept for a repeated key from the `existing` one and the later
    /// `incoming` one.
    fn merge(&self, existing: V, incoming: V) -> V;
}

/// Fails with [`Error::DuplicateKey`] on any collision.
///
/// Keys must be `Debug`, which is how the colliding key is rendered into the error.
#[derive(Clone, Copy, Debug, Default)]
pub struct RejectDuplicates;

impl<K, V> MergePolicy<K, V> for RejectDuplicates
where
    K: Debug,
{
    fn check(&self, key: &K) -> Result<()> {
        tracing::debug!(?key, "Duplicate key while folding into a map.");
        Err(Error::DuplicateKey {
            key: format!("{:?}", key),
        })
    }

    /// Unreachable through [`ToMap`], as `check` always fails. Keeps the held value.
    fn merge(&self, existing: V, _incoming: V) -> V {
        existing
    }
}

/// Resolves collisions with `F(existing, incoming)`.
#[derive(Clone, Copy, Debug)]
pub struct MergeWith<F>(F);

impl<K, V, F> MergePolicy<K, V> for MergeWith<F>
where
    F: Fn(V, V) -> V,
{
    fn check(&self, _key: &K) -> Result<()> {
        Ok(())
    }

    fn merge(&self, existing: V, incoming: V) -> V {
        (self.0)(existing, incoming)
    }
}

/// [`Collector`] folding pairs into a single-valued map made by `Factory`, resolving key
/// collisions with `Policy`.
#[derive(Clone, Debug)]
pub struct ToMap<Policy, Factory> {
    policy: Policy,
    factory: Factory,
}

impl<Policy, Factory> ToMap<Policy, Factory> {
    /// Creates with a collision `policy` and a `factory` for empty destination maps.
    pub fn new(policy: Policy, factory: Factory) -> Self {
        Self { policy, factory }
    }

    fn merge_into<K, V, M>(&self, map: &mut M, key: K, value: V) -> Result<()>
    where
        M: MergeMap<K, V>,
        Policy: MergePolicy<K, V>,
    {
        if map.contains_key(&key) {
            self.policy.check(&key)?;
        }
        map.upsert(key, value, |existing, incoming| self.policy.merge(existing, incoming));
        Ok(())
    }
}

impl<K, V, M, Policy, Factory> Collector<Pair<K, V>> for ToMap<Policy, Factory>
where
    Policy: MergePolicy<K, V>,
    Factory: Fn() -> M,
    M: MergeMap<K, V> + IntoIterator<Item = (K, V)>,
{
    type Accum = M;
    type Output = M;

    fn init(&self) -> M {
        (self.factory)()
    }

    fn accumulate(&self, accum: &mut M, item: Pair<K, V>) -> Result<()> {
        let (key, value) = item.into_tuple();
        self.merge_into(accum, key, value)
    }

    fn combine(&self, mut left: M, right: M) -> Result<M> {
        for (key, value) in right {
            self.merge_into(&mut left, key, value)?;
        }
        Ok(left)
    }

    fn finish(&self, accum: M) -> M {
        accum
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::IDENTITY_FINISH
    }
}

/// Folds pairs into a [`HashMap`]. Equal keys fail the fold with [`Error::DuplicateKey`],
/// which carries the `Debug` rendering of the key; use [`to_map_merging`] for keys without
/// `Debug`.
pub fn to_map<K, V>() -> ToMap<RejectDuplicates, fn() -> HashMap<K, V>> {
    ToMap::new(RejectDuplicates, HashMap::new)
}

/// Folds pairs into a [`HashMap`], replacing the value `v1` held for a repeated key with
/// `merge(v1, v2)`.
pub fn to_map_merging<K, V, F>(merge: F) -> ToMap<MergeWith<F>, fn() -> HashMap<K, V>>
where
    F: Fn(V, V) -> V,
{
    ToMap::new(MergeWith(merge), HashMap::new)
}

/// Folds pairs into the map made by `factory`, resolving repeated keys with `merge`.
///
/// The factory may make a [`BTreeMap`], a [`HashMap`] with a custom hasher, or an
/// [`OrderedMap`](super::OrderedMap) to keep keys in the order they first appeared.
pub fn to_map_with<K, V, M, F, Factory>(
    merge: F,
    factory: Factory,
) -> ToMap<MergeWith<F>, Factory>
where
    F: Fn(V, V) -> V,
    Factory: Fn() -> M,
    M: MergeMap<K, V>,
{
    ToMap::new(MergeWith(merge), factory)
}
