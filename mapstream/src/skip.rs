//! [`Skip`] and related items.

use crate::MapStream;

/// Same as [`core::iter::Skip`] but as a [`MapStream`] stage.
#[must_use = "streams do nothing unless a terminal operation runs them"]
#[derive(Clone, Debug)]
pub struct Skip<S> {
    stream: S,
    n: usize,
}

impl<S> Skip<S> {
    /// Creates with upstream `stream`, dropping its first `n` pairs.
    pub fn new(stream: S, n: usize) -> Self
    where
        Self: MapStream,
    {
        Self { stream, n }
    }
}

impl<S> MapStream for Skip<S>
where
    S: MapStream,
{
    type Key = S::Key;
    type Val = S::Val;
    type Cursor<'s>
        = SkipCursor<S::Cursor<'s>>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        SkipCursor {
            cursor: self.stream.cursor(),
            to_skip: self.n,
        }
    }
}

/// Cursor of [`Skip`].
#[must_use = "cursors do nothing unless iterated"]
#[derive(Debug)]
pub struct SkipCursor<C> {
    cursor: C,
    to_skip: usize,
}

impl<C, T, E> Iterator for SkipCursor<C>
where
    C: Iterator<Item = Result<T, E>>,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<Self::Item> {
        while 0 < self.to_skip {
            let item = self.cursor.next()?;
            if item.is_err() {
                self.to_skip = 0;
                return Some(item);
            }
            self.to_skip -= 1;
        }
        self.cursor.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.cursor.size_hint();
        (
            lower.saturating_sub(self.to_skip),
            upper.map(|n| n.saturating_sub(self.to_skip)),
        )
    }
}

#[cfg(test)]
mod test {
    use crate::collectors::to_vec;
    use crate::{MapStream, Pair, from_fn};

    #[test]
    fn test_skip() {
        let stream = from_fn(|| [("key1", 1), ("key2", 2), ("key3", 3)]);
        assert_eq!(
            vec![Pair::new("key3", 3)],
            (&stream).skip(2).collect(to_vec()).unwrap()
        );
        assert_eq!(3, (&stream).skip(0).count().unwrap());
        assert_eq!(0, (&stream).skip(5).count().unwrap());
    }

    #[test]
    fn test_skip_then_limit() {
        let out = from_fn(|| (0..10).map(|n| (n, n)))
            .skip(3)
            .limit(2)
            .collect(to_vec())
            .unwrap();
        assert_eq!(vec![Pair::new(3, 3), Pair::new(4, 4)], out);
    }
}
