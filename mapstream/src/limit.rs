//! [`Limit`] and related items.

use crate::MapStream;

/// Same as [`core::iter::Take`] but as a [`MapStream`] stage.
///
/// Once `max` pairs have been produced the upstream cursor is not pulled again.
#[must_use = "streams do nothing unless a terminal operation runs them"]
#[derive(Clone, Debug)]
pub struct Limit<S> {
    stream: S,
    max: usize,
}

impl<S> Limit<S> {
    /// Creates with upstream `stream`, passing at most `max` pairs.
    pub fn new(stream: S, max: usize) -> Self
    where
        Self: MapStream,
    {
        Self { stream, max }
    }
}

impl<S> MapStream for Limit<S>
where
    S: MapStream,
{
    type Key = S::Key;
    type Val = S::Val;
    type Cursor<'s>
        = LimitCursor<S::Cursor<'s>>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        LimitCursor {
            cursor: self.stream.cursor(),
            remaining: self.max,
        }
    }
}

/// Cursor of [`Limit`].
#[must_use = "cursors do nothing unless iterated"]
#[derive(Debug)]
pub struct LimitCursor<C> {
    cursor: C,
    remaining: usize,
}

impl<C, T, E> Iterator for LimitCursor<C>
where
    C: Iterator<Item = Result<T, E>>,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if 0 == self.remaining {
            return None;
        }
        let item = self.cursor.next()?;
        match item {
            Ok(_) => self.remaining -= 1,
            Err(_) => self.remaining = 0,
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if 0 == self.remaining {
            return (0, Some(0));
        }
        let (lower, upper) = self.cursor.size_hint();
        (
            lower.min(self.remaining),
            Some(upper.map_or(self.remaining, |n| n.min(self.remaining))),
        )
    }
}
