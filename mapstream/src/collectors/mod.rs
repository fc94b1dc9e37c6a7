//! Ready-made [`Collector`]s for pairs: vectors, single-valued maps and multi-valued maps.
//!
//! [`OrderedMap`] is a single-valued destination which keeps keys in first-insertion order.

use core::marker::PhantomData;

use crate::Result;
use crate::collector::{Characteristics, Collector};

mod multimap;
pub use multimap::*;

mod ordered_map;
pub use ordered_map::{Entries, OrderedMap};

mod to_map;
pub use to_map::*;

/// [`Collector`] gathering items into a [`Vec`] in encounter order. Created by [`to_vec`].
#[derive(Debug)]
pub struct ToVec<T>(PhantomData<fn() -> T>);

impl<T> Clone for ToVec<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for ToVec<T> {}

impl<T> Default for ToVec<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T> Collector<T> for ToVec<T> {
    type Accum = Vec<T>;
    type Output = Vec<T>;

    fn init(&self) -> Vec<T> {
        Vec::new()
    }

    fn accumulate(&self, accum: &mut Vec<T>, item: T) -> Result<()> {
        accum.push(item);
        Ok(())
    }

    fn combine(&self, mut left: Vec<T>, right: Vec<T>) -> Result<Vec<T>> {
        left.extend(right);
        Ok(left)
    }

    fn finish(&self, accum: Vec<T>) -> Vec<T> {
        accum
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::IDENTITY_FINISH
    }
}

/// Collects pairs into a [`Vec`], in encounter order.
pub fn to_vec<T>() -> ToVec<T> {
    ToVec::default()
}
