use std::cell::Cell;
use std::fmt;

use tracing::trace;

use crate::error::{CacheError, CacheResult};
use crate::list::List;
use crate::record::{DeepCopy, Record};
use crate::Cells;

pub mod iterator;

mod algorithms;

pub use algorithms::Delivery;

/// The number of cells of an orange cache, one per orange size.
pub const ORANGE_CACHE_SIZE: usize = 256;

/// A fixed array of `N` cells, each cell being a [`List`] of records.
///
/// [`Cache::push`] routes a record to the cell named by [`Record::bucket`].
/// Cells are also addressed directly by index, and every such access is
/// bound-checked against `N`.
///
/// The cache has its own cursor, which always names a cell and never an
/// element inside one. Walking a cell is done through the cell's own cursor,
/// on the [`List`] handed out by [`Cache::get_first`] and [`Cache::get_next`].
///
/// # Examples
///
/// ```
/// use orange_cache::{Cache, Month, Orange, Record};
///
/// let mut cache: Cache<Orange> = Cache::new().unwrap();
/// let orange = Orange::new(3, Month::Feb, 1, 12)
///     .and_then(|o| o.with_food_company("Osem"))
///     .unwrap();
/// cache.push(&orange).unwrap();
///
/// let cell = cache.get_first().unwrap();
/// assert_eq!(cell.get_first(), Some(&orange));
///
/// assert_eq!(cache.get(orange.bucket()), Ok(orange));
/// assert!(cache.is_empty());
/// ```
pub struct Cache<T, const N: usize = ORANGE_CACHE_SIZE> {
    cells: Box<[List<T>]>,
    iterator: Cell<Option<usize>>,
}

// private methods
impl<T, const N: usize> Cache<T, N> {
    fn with_cells<F>(mut make_cell: F) -> CacheResult<Self>
    where
        F: FnMut(usize) -> CacheResult<List<T>>,
    {
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(N)
            .map_err(|_| CacheError::OutOfMemory)?;
        for index in 0..N {
            cells.push(make_cell(index)?);
        }
        Ok(Self {
            cells: cells.into_boxed_slice(),
            iterator: Cell::new(None),
        })
    }

    fn checked_index(index: usize) -> CacheResult<usize> {
        if index >= N {
            return Err(CacheError::OutOfRange { index, capacity: N });
        }
        Ok(index)
    }

    fn cell_mut(&mut self, index: usize) -> CacheResult<&mut List<T>> {
        let index = Self::checked_index(index)?;
        Ok(&mut self.cells[index])
    }

    /// Point the cache cursor at the first non-empty cell at or after `start`.
    fn settle_from(&self, start: usize) -> Option<&List<T>> {
        let found = self
            .cells
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, cell)| !cell.is_empty());
        self.iterator.set(found.map(|(index, _)| index));
        found.map(|(_, cell)| cell)
    }

    /// Remove one element of cell `index`: the one at the cell's cursor, or
    /// the first one if the cell's cursor is invalid.
    fn take_from_cell(&mut self, index: usize) -> CacheResult<T> {
        let cell = self.cell_mut(index)?;
        if cell.is_empty() {
            return Err(CacheError::NoElementsInCell { index });
        }
        if cell.get_current().is_none() {
            cell.get_first();
        }
        let element = cell
            .take_current()
            .map_err(|_| CacheError::NoElementsInCell { index })?;
        trace!(index, remaining = cell.len(), "took an element out of a cell");
        Ok(element)
    }
}

impl<T, const N: usize> Cache<T, N> {
    /// Creates a cache of `N` empty cells.
    ///
    /// # Errors
    ///
    /// [`CacheError::OutOfMemory`] if the cells cannot be allocated.
    pub fn new() -> CacheResult<Self> {
        Self::with_cells(|_| Ok(List::new()))
    }

    /// Deep-copies every cell.
    ///
    /// # Errors
    ///
    /// [`CacheError::OutOfMemory`] if any element fails to copy. The cells
    /// copied so far are dropped.
    pub fn try_copy(&self) -> CacheResult<Self>
    where
        T: DeepCopy,
    {
        Self::with_cells(|index| Ok(self.cells[index].try_copy()?))
    }

    /// The number of cells, `N`.
    #[inline]
    pub fn capacity(&self) -> usize {
        N
    }

    /// The number of records over all cells.
    pub fn len(&self) -> usize {
        self.cells.iter().map(List::len).sum()
    }

    /// Returns `true` if no cell holds a record.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(List::is_empty)
    }

    /// Direct access to cell `index`.
    ///
    /// # Errors
    ///
    /// [`CacheError::OutOfRange`] if `index >= N`.
    pub fn cell(&self, index: usize) -> CacheResult<&List<T>> {
        let index = Self::checked_index(index)?;
        Ok(&self.cells[index])
    }

    /// Inserts a copy of `item` first in the cell it routes to.
    ///
    /// # Errors
    ///
    /// [`CacheError::OutOfRange`] if the record routes outside the cache and
    /// [`CacheError::OutOfMemory`] if the copy fails. The cache is unchanged
    /// on failure.
    pub fn push(&mut self, item: &T) -> CacheResult<()>
    where
        T: Record,
    {
        let index = item.bucket();
        let cell = self.cell_mut(index)?;
        cell.insert_first(item)?;
        trace!(index, len = cell.len(), "pushed an element");
        Ok(())
    }

    /// Drops one element of cell `index`: the one at the cell's cursor, or
    /// the first one if the cell's cursor is invalid.
    ///
    /// # Errors
    ///
    /// [`CacheError::OutOfRange`] if `index >= N` and
    /// [`CacheError::NoElementsInCell`] if the cell is empty.
    pub fn free_orange(&mut self, index: usize) -> CacheResult<()> {
        self.take_from_cell(index).map(drop)
    }

    /// Like [`Cache::free_orange`], but hands the removed element to the
    /// caller instead of dropping it.
    pub fn get(&mut self, index: usize) -> CacheResult<T> {
        self.take_from_cell(index)
    }

    /// Sets the cache cursor to the first non-empty cell and returns it, or
    /// returns `None` if every cell is empty.
    pub fn get_first(&self) -> Option<&List<T>> {
        self.settle_from(0)
    }

    /// Advances the cache cursor to the next non-empty cell and returns it.
    ///
    /// Returns `None` once no non-empty cell is left, or if the cursor is
    /// invalid. The cursor is invalid from then on, until
    /// [`Cache::get_first`] is called.
    pub fn get_next(&self) -> Option<&List<T>> {
        let current = self.iterator.get()?;
        self.settle_from(current + 1)
    }

    /// Returns the cell at the cache cursor, or `None` if it is invalid.
    ///
    /// Mutating the cache does not move the cursor, so the returned cell may
    /// have been emptied since the cursor reached it.
    pub fn get_current(&self) -> Option<&List<T>> {
        self.iterator.get().map(|index| &self.cells[index])
    }

    /// The index of the cell at the cache cursor.
    pub fn current_index(&self) -> Option<usize> {
        self.iterator.get()
    }

    /// Provides an iterator over the non-empty cells driven by the cache
    /// cursor, as [`Cache::get_first`] followed by [`Cache::get_next`].
    ///
    /// # Examples
    ///
    /// ```
    /// use orange_cache::{Cache, Month, Orange};
    ///
    /// let mut cache: Cache<Orange> = Cache::new().unwrap();
    /// for size in [4, 9, 4] {
    ///     cache.push(&Orange::new(size, Month::Jun, 1, 3).unwrap()).unwrap();
    /// }
    ///
    /// let sizes: Vec<usize> = cache.cells().map(|cell| cell.len()).collect();
    /// assert_eq!(sizes, vec![2, 1]);
    /// ```
    pub fn cells(&self) -> Cells<'_, T, N> {
        Cells::new(self)
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Cache<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.cells
                    .iter()
                    .enumerate()
                    .filter(|(_, cell)| !cell.is_empty()),
            )
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::error::CacheError;
    use crate::record::{DeepCopy, Record};
    use crate::Cache;
    use std::cell::Cell;
    use std::iter::FromIterator;

    /// A record whose cell and weight are chosen independently.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) struct Parcel {
        pub(crate) cell: usize,
        pub(crate) weight: u32,
        pub(crate) company: &'static str,
    }

    impl Parcel {
        pub(crate) fn new(cell: usize, weight: u32, company: &'static str) -> Self {
            Self {
                cell,
                weight,
                company,
            }
        }
    }

    impl Record for Parcel {
        fn bucket(&self) -> usize {
            self.cell
        }
        fn weight(&self) -> u32 {
            self.weight
        }
        fn is_delivered_to(&self, company: &str) -> bool {
            self.company == company
        }
    }

    /// A record whose copies draw from a shared budget, and fail once it is
    /// spent. It is delivered to every company.
    #[derive(Debug, PartialEq)]
    pub(crate) struct Rationed<'a> {
        pub(crate) cell: usize,
        pub(crate) budget: &'a Cell<u32>,
    }

    impl<'a> Rationed<'a> {
        pub(crate) fn new(cell: usize, budget: &'a Cell<u32>) -> Self {
            Self { cell, budget }
        }
    }

    impl DeepCopy for Rationed<'_> {
        fn deep_copy(&self) -> Option<Self> {
            let left = self.budget.get().checked_sub(1)?;
            self.budget.set(left);
            Some(Rationed::new(self.cell, self.budget))
        }
    }

    impl Record for Rationed<'_> {
        fn bucket(&self) -> usize {
            self.cell
        }
        fn weight(&self) -> u32 {
            1
        }
        fn is_delivered_to(&self, _company: &str) -> bool {
            true
        }
    }

    /// A cache of three rationed records in cells 0, 1 and 1, with the
    /// budget spent.
    pub(crate) fn rationed_cache(budget: &Cell<u32>) -> Cache<Rationed<'_>, 4> {
        let mut cache = Cache::new().unwrap();
        budget.set(3);
        for cell in [0, 1, 1] {
            cache.push(&Rationed::new(cell, budget)).unwrap();
        }
        assert_eq!(budget.get(), 0);
        cache
    }

    fn weights<const N: usize>(cache: &Cache<Parcel, N>, index: usize) -> Vec<u32> {
        Vec::from_iter(cache.cell(index).unwrap().iter().map(|p| p.weight))
    }

    #[test]
    fn cache_create() {
        let cache: Cache<Parcel, 8> = Cache::new().unwrap();
        assert_eq!(cache.capacity(), 8);
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert!(cache.get_first().is_none());
        assert_eq!(
            cache.cell(8).err(),
            Some(CacheError::OutOfRange {
                index: 8,
                capacity: 8
            })
        );
    }

    #[test]
    fn push_goes_to_the_front_of_its_cell() {
        let mut cache: Cache<Parcel, 4> = Cache::new().unwrap();
        cache.push(&Parcel::new(2, 1, "a")).unwrap();
        cache.push(&Parcel::new(2, 2, "a")).unwrap();
        cache.push(&Parcel::new(0, 3, "a")).unwrap();

        assert_eq!(weights(&cache, 2), vec![2, 1]);
        assert_eq!(weights(&cache, 0), vec![3]);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn push_outside_the_cache_fails() {
        let mut cache: Cache<Parcel, 4> = Cache::new().unwrap();
        assert_eq!(
            cache.push(&Parcel::new(4, 1, "a")),
            Err(CacheError::OutOfRange {
                index: 4,
                capacity: 4
            })
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn push_then_get_round_trips() {
        let mut cache: Cache<Parcel, 4> = Cache::new().unwrap();
        let first = Parcel::new(1, 10, "x");
        let second = Parcel::new(1, 20, "y");
        cache.push(&first).unwrap();
        cache.push(&second).unwrap();

        assert_eq!(cache.get(second.bucket()), Ok(second));
        assert_eq!(cache.cell(1).unwrap().len(), 1);
        cache.free_orange(first.bucket()).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn get_uses_the_cell_cursor() {
        let mut cache: Cache<Parcel, 2> = Cache::new().unwrap();
        for weight in [1, 2, 3] {
            cache.push(&Parcel::new(0, weight, "x")).unwrap();
        }
        // cell 0 is [3, 2, 1]
        let cell = cache.get_first().unwrap();
        cell.get_first();
        cell.get_next();

        assert_eq!(cache.get(0).map(|p| p.weight), Ok(2));
        assert_eq!(weights(&cache, 0), vec![3, 1]);
        // The cell cursor is gone, so the first element goes next.
        assert_eq!(cache.get(0).map(|p| p.weight), Ok(3));
    }

    #[test]
    fn empty_and_missing_cells_are_reported() {
        let mut cache: Cache<Parcel, 2> = Cache::new().unwrap();
        assert_eq!(
            cache.free_orange(1),
            Err(CacheError::NoElementsInCell { index: 1 })
        );
        assert_eq!(
            cache.get(0),
            Err(CacheError::NoElementsInCell { index: 0 })
        );
        assert_eq!(
            cache.free_orange(2),
            Err(CacheError::OutOfRange {
                index: 2,
                capacity: 2
            })
        );
    }

    #[test]
    fn cursor_skips_empty_cells() {
        let mut cache: Cache<Parcel, 6> = Cache::new().unwrap();
        cache.push(&Parcel::new(1, 1, "a")).unwrap();
        cache.push(&Parcel::new(4, 2, "a")).unwrap();
        cache.push(&Parcel::new(4, 3, "a")).unwrap();

        assert_eq!(cache.get_current().map(|c| c.len()), None);
        assert_eq!(cache.get_next().map(|c| c.len()), None);

        assert_eq!(cache.get_first().map(|c| c.len()), Some(1));
        assert_eq!(cache.current_index(), Some(1));
        assert_eq!(cache.get_next().map(|c| c.len()), Some(2));
        assert_eq!(cache.current_index(), Some(4));
        assert_eq!(cache.get_current().map(|c| c.len()), Some(2));
        assert!(cache.get_next().is_none());
        assert!(cache.get_current().is_none());
        assert!(cache.get_next().is_none());

        assert_eq!(cache.get_first().map(|c| c.len()), Some(1));
    }

    #[test]
    fn cells_walk_restarts_from_first() {
        let mut cache: Cache<Parcel, 3> = Cache::new().unwrap();
        cache.push(&Parcel::new(0, 1, "a")).unwrap();
        cache.push(&Parcel::new(2, 1, "a")).unwrap();

        assert_eq!(cache.cells().count(), 2);
        assert_eq!(cache.cells().count(), 2);
        let total: usize = cache.cells().map(|cell| cell.walk().count()).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn failed_copies_leave_the_cache_untouched() {
        let budget = Cell::new(0);
        let mut cache = rationed_cache(&budget);

        budget.set(2);
        assert_eq!(cache.try_copy().err(), Some(CacheError::OutOfMemory));
        assert_eq!(cache.len(), 3);

        budget.set(0);
        assert_eq!(
            cache.push(&Rationed::new(2, &budget)),
            Err(CacheError::OutOfMemory)
        );
        assert_eq!(cache.len(), 3);
        assert!(cache.cell(2).unwrap().is_empty());

        budget.set(3);
        let copy = cache.try_copy().unwrap();
        assert_eq!(copy.len(), 3);
        assert_eq!(copy.cell(1).unwrap().len(), 2);
    }

    #[test]
    fn copy_is_independent() {
        let mut cache: Cache<Parcel, 3> = Cache::new().unwrap();
        cache.push(&Parcel::new(0, 1, "a")).unwrap();
        cache.push(&Parcel::new(2, 5, "b")).unwrap();

        let mut copy = cache.try_copy().unwrap();
        copy.free_orange(0).unwrap();
        cache.push(&Parcel::new(1, 7, "c")).unwrap();

        assert_eq!(cache.len(), 3);
        assert_eq!(copy.len(), 1);
        assert_eq!(weights(&copy, 2), vec![5]);
    }
}
