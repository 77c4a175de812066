use crate::cache::Cache;
use crate::list::List;
use std::fmt;

/// An iterator over the non-empty cells of a [`Cache`], driving the cache
/// cursor.
///
/// The first call to `next` is [`Cache::get_first`], every later one is
/// [`Cache::get_next`].
///
/// This `struct` is created by [`Cache::cells`].
pub struct Cells<'a, T: 'a, const N: usize> {
    cache: &'a Cache<T, N>,
    started: bool,
}

impl<'a, T: 'a, const N: usize> Cells<'a, T, N> {
    pub(crate) fn new(cache: &'a Cache<T, N>) -> Self {
        Self {
            cache,
            started: false,
        }
    }
}

impl<'a, T: 'a, const N: usize> fmt::Debug for Cells<'a, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cells")
            .field("current", &self.cache.current_index())
            .field("started", &self.started)
            .finish()
    }
}

impl<'a, T: 'a, const N: usize> Iterator for Cells<'a, T, N> {
    type Item = &'a List<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let cache = self.cache;
        if self.started {
            return cache.get_next();
        }
        self.started = true;
        cache.get_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(N))
    }
}
