use tracing::debug;

use crate::cache::Cache;
use crate::error::{CacheError, CacheResult};
use crate::list::List;
use crate::record::Record;

/// The outcome of [`Cache::deliver_oranges_with_biggest_weight`].
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub enum Delivery<T> {
    /// Every record of the biggest weight, in cell order and in list order
    /// within a cell.
    Delivered(List<T>),
    /// The cache held no record.
    NothingToDeliver,
}

impl<T> Delivery<T> {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Delivery::Delivered(_))
    }

    /// The number of delivered records.
    pub fn len(&self) -> usize {
        match self {
            Delivery::Delivered(list) => list.len(),
            Delivery::NothingToDeliver => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unwraps the delivered records, or an empty list if nothing was
    /// delivered.
    pub fn into_list(self) -> List<T> {
        match self {
            Delivery::Delivered(list) => list,
            Delivery::NothingToDeliver => List::new(),
        }
    }
}

fn check_company(company: &str) -> CacheResult<()> {
    if company.is_empty() {
        return Err(CacheError::IllegalArgument);
    }
    Ok(())
}

impl<T: Record, const N: usize> Cache<T, N> {
    /// Copies the records of cell `index` delivered to `company`, in the
    /// cell's order. The cache is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`CacheError::IllegalArgument`] if `company` is empty.
    /// - [`CacheError::OutOfRange`] if `index >= N`.
    /// - [`CacheError::OutOfMemory`] if a copy fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use orange_cache::{Cache, Month, Orange};
    ///
    /// let mut cache: Cache<Orange> = Cache::new().unwrap();
    /// let osem = Orange::new(5, Month::Apr, 1, 9)
    ///     .and_then(|o| o.with_food_company("Osem"))
    ///     .unwrap();
    /// cache.push(&osem).unwrap();
    ///
    /// let found = cache.get_oranges_of_company_from_cell("Osem", 4).unwrap();
    /// assert_eq!(found.front(), Some(&osem));
    /// assert!(cache.get_oranges_of_company_from_cell("Tnuva", 4).unwrap().is_empty());
    /// ```
    pub fn get_oranges_of_company_from_cell(
        &self,
        company: &str,
        index: usize,
    ) -> CacheResult<List<T>> {
        check_company(company)?;
        let cell = self.cell(index)?;
        Ok(cell.copy_filtered(|record| record.is_delivered_to(company))?)
    }

    /// Copies every record delivered to `company`, cell by cell in ascending
    /// index order. The cache is left unchanged.
    ///
    /// # Errors
    ///
    /// [`CacheError::IllegalArgument`] if `company` is empty and
    /// [`CacheError::OutOfMemory`] if a copy fails.
    pub fn get_all_oranges_of_company(&self, company: &str) -> CacheResult<List<T>> {
        check_company(company)?;
        let mut found = List::new();
        for cell in self.cells.iter() {
            found.append(&mut cell.copy_filtered(|record| record.is_delivered_to(company))?);
        }
        debug!(company, count = found.len(), "collected records of company");
        Ok(found)
    }

    /// Moves every record of the biggest weight out of the cache.
    ///
    /// Cells left behind keep their other records in order. Every cell the
    /// delivery visits has its cursor invalidated.
    ///
    /// # Examples
    ///
    /// ```
    /// use orange_cache::{Cache, Delivery, Month, Orange};
    ///
    /// let mut cache: Cache<Orange> = Cache::new().unwrap();
    /// assert_eq!(cache.deliver_oranges_with_biggest_weight(), Delivery::NothingToDeliver);
    ///
    /// for size in [3, 8, 8, 2] {
    ///     cache.push(&Orange::new(size, Month::Jan, 1, 1).unwrap()).unwrap();
    /// }
    /// let delivered = cache.deliver_oranges_with_biggest_weight().into_list();
    /// assert_eq!(delivered.len(), 2);
    /// assert!(delivered.iter().all(|orange| orange.size() == 8));
    /// assert_eq!(cache.len(), 2);
    /// ```
    pub fn deliver_oranges_with_biggest_weight(&mut self) -> Delivery<T> {
        let biggest = match self.cells.iter().flat_map(List::iter).map(T::weight).max() {
            Some(weight) => weight,
            None => {
                debug!("nothing to deliver");
                return Delivery::NothingToDeliver;
            }
        };
        let mut delivered: List<T> = List::new();
        for cell in self.cells.iter_mut() {
            delivered.extend(cell.drain_filter(|record| record.weight() == biggest));
        }
        debug!(
            weight = biggest,
            count = delivered.len(),
            "delivered the heaviest records"
        );
        Delivery::Delivered(delivered)
    }
}
