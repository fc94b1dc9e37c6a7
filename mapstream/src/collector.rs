//! [`Collector`] trait and the generic [`Fold`] implementor.
//!
//! A collector is a generalization of fold: `init` a mutable accumulation, `accumulate` items
//! into it, optionally `combine` two partial accumulations built from disjoint partitions of
//! the input, and `finish` into the result.

use core::ops::BitOr;

use crate::Result;

/// Hints describing a [`Collector`], which a driver may use to pick a cheaper strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Characteristics(u8);

impl Characteristics {
    /// No hints.
    pub const NONE: Self = Self(0);
    /// The result does not depend on the order items are accumulated in, and `combine` may be
    /// applied to partitions in any order.
    pub const UNORDERED: Self = Self(1 << 0);
    /// `finish` is the identity function and may be skipped.
    pub const IDENTITY_FINISH: Self = Self(1 << 1);

    /// Both sets of hints.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns true if every hint in `other` is also in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Characteristics {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// Generalized accumulate/combine/finish fold.
///
/// `combine` must be associative. If [`Characteristics::UNORDERED`] is set it must also not
/// depend on which partition came first.
pub trait Collector<Item> {
    /// Intermediate accumulation.
    type Accum;
    /// Final result.
    type Output;

    /// Creates an empty accumulation.
    fn init(&self) -> Self::Accum;

    /// Folds one item into `accum`.
    fn accumulate(&self, accum: &mut Self::Accum, item: Item) -> Result<()>;

    /// Merges two partial accumulations, `left` holding the earlier partition.
    fn combine(&self, left: Self::Accum, right: Self::Accum) -> Result<Self::Accum>;

    /// Converts the accumulation into the result.
    fn finish(&self, accum: Self::Accum) -> Self::Output;

    /// Hints for drivers.
    fn characteristics(&self) -> Characteristics {
        Characteristics::NONE
    }
}

/// Accumulates every item of `items` into `accum`, stopping at the first error.
pub fn accumulate_all<C, Item, I>(collector: &C, accum: &mut C::Accum, items: I) -> Result<()>
where
    C: Collector<Item> + ?Sized,
    I: IntoIterator<Item = Result<Item>>,
{
    for item in items {
        collector.accumulate(accum, item?)?;
    }
    Ok(())
}

/// Runs `collector` over a single sequence of items.
pub fn collect_items<C, Item, I>(collector: &C, items: I) -> Result<C::Output>
where
    C: Collector<Item> + ?Sized,
    I: IntoIterator<Item = Result<Item>>,
{
    let mut accum = collector.init();
    accumulate_all(collector, &mut accum, items)?;
    Ok(collector.finish(accum))
}

/// Runs `collector` over each partition separately, then combines the partial accumulations
/// left-to-right in partition order.
///
/// This crate does not schedule partitions itself; a host engine evaluating partitions on
/// several threads would call [`Collector::init`], [`accumulate_all`] and
/// [`Collector::combine`] directly.
pub fn fold_partitions<C, Item, P>(collector: &C, partitions: P) -> Result<C::Output>
where
    C: Collector<Item> + ?Sized,
    P: IntoIterator,
    P::Item: IntoIterator<Item = Result<Item>>,
{
    let mut combined = None;
    let mut count = 0_usize;
    for partition in partitions {
        let mut accum = collector.init();
        accumulate_all(collector, &mut accum, partition)?;
        combined = Some(match combined {
            Some(left) => collector.combine(left, accum)?,
            None => accum,
        });
        count += 1;
    }
    tracing::trace!(partitions = count, "Combined partition accumulations.");

    let accum = combined.unwrap_or_else(|| collector.init());
    Ok(collector.finish(accum))
}

/// [`Collector`] built from an initialization, accumulate, combine, and finish function.
#[derive(Clone, Debug)]
pub struct Fold<InitFn, AccumFn, CombineFn, FinishFn> {
    init_fn: InitFn,
    accum_fn: AccumFn,
    combine_fn: CombineFn,
    finish_fn: FinishFn,
    characteristics: Characteristics,
}

impl<InitFn, AccumFn, CombineFn, FinishFn> Fold<InitFn, AccumFn, CombineFn, FinishFn> {
    /// Create a `Fold` [`Collector`] with the given functions and no characteristics.
    pub fn new<Item, Accum, Output>(
        init_fn: InitFn,
        accum_fn: AccumFn,
        combine_fn: CombineFn,
        finish_fn: FinishFn,
    ) -> Self
    where
        InitFn: Fn() -> Accum,
        AccumFn: Fn(&mut Accum, Item),
        CombineFn: Fn(Accum, Accum) -> Accum,
        FinishFn: Fn(Accum) -> Output,
    {
        Self {
            init_fn,
            accum_fn,
            combine_fn,
            finish_fn,
            characteristics: Characteristics::NONE,
        }
    }

    /// Replaces the characteristics. [`Characteristics::IDENTITY_FINISH`] is only honest if
    /// `FinishFn` really is the identity.
    pub fn with_characteristics(mut self, characteristics: Characteristics) -> Self {
        self.characteristics = characteristics;
        self
    }
}

impl<InitFn, AccumFn, CombineFn, Accum> Fold<InitFn, AccumFn, CombineFn, fn(Accum) -> Accum> {
    /// Create a `Fold` [`Collector`] whose result is the accumulation itself. Carries
    /// [`Characteristics::IDENTITY_FINISH`].
    pub fn identity_finish<Item>(init_fn: InitFn, accum_fn: AccumFn, combine_fn: CombineFn) -> Self
    where
        InitFn: Fn() -> Accum,
        AccumFn: Fn(&mut Accum, Item),
        CombineFn: Fn(Accum, Accum) -> Accum,
    {
        let finish_fn: fn(Accum) -> Accum = core::convert::identity;
        Self::new(init_fn, accum_fn, combine_fn, finish_fn)
            .with_characteristics(Characteristics::IDENTITY_FINISH)
    }
}

impl<Item, Accum, Output, InitFn, AccumFn, CombineFn, FinishFn> Collector<Item>
    for Fold<InitFn, AccumFn, CombineFn, FinishFn>
where
    InitFn: Fn() -> Accum,
    AccumFn: Fn(&mut Accum, Item),
    CombineFn: Fn(Accum, Accum) -> Accum,
    FinishFn: Fn(Accum) -> Output,
{
    type Accum = Accum;
    type Output = Output;

    fn init(&self) -> Accum {
        (self.init_fn)()
    }

    fn accumulate(&self, accum: &mut Accum, item: Item) -> Result<()> {
        let () = (self.accum_fn)(accum, item);
        Ok(())
    }

    fn combine(&self, left: Accum, right: Accum) -> Result<Accum> {
        Ok((self.combine_fn)(left, right))
    }

    fn finish(&self, accum: Accum) -> Output {
        (self.finish_fn)(accum)
    }

    fn characteristics(&self) -> Characteristics {
        self.characteristics
    }
}
