use crate::error::{ListError, ListResult};
use crate::list::List;
use crate::record::DeepCopy;

mod drain;

pub use drain::DrainFilter;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use orange_cache::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Deep-copies every element, preserving the order.
    ///
    /// The copy is structurally independent of `self` and its cursor is
    /// invalid. The cursor of `self` is left alone.
    ///
    /// # Errors
    ///
    /// [`ListError::OutOfMemory`] if any element fails to copy. Elements
    /// copied so far are dropped before returning.
    ///
    /// # Examples
    ///
    /// ```
    /// use orange_cache::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut copy = list.try_copy().unwrap();
    /// copy.pop_front();
    ///
    /// assert_eq!(list.len(), 3);
    /// assert_eq!(Vec::from_iter(copy), vec![2, 3]);
    /// ```
    pub fn try_copy(&self) -> ListResult<Self>
    where
        T: DeepCopy,
    {
        self.copy_filtered(|_| true)
    }

    /// Deep-copies the elements matching `filter` into a new list, preserving
    /// their relative order.
    ///
    /// # Errors
    ///
    /// [`ListError::OutOfMemory`] if any matching element fails to copy.
    pub fn copy_filtered<F>(&self, mut filter: F) -> ListResult<Self>
    where
        T: DeepCopy,
        F: FnMut(&T) -> bool,
    {
        let mut copy = List::new();
        for element in self.iter().filter(|e| filter(e)) {
            copy.push_back(element.deep_copy().ok_or(ListError::OutOfMemory)?);
        }
        Ok(copy)
    }

    /// Creates an iterator which uses a closure to determine if an element
    /// should be removed.
    ///
    /// Matching elements are moved out of the list in order; the rest stay
    /// where they were. Elements not yet visited when the iterator is dropped
    /// are still filtered. The cursor is invalidated.
    ///
    /// # Examples
    ///
    /// ```
    /// use orange_cache::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut numbers = List::from_iter([1, 2, 3, 4, 5, 6]);
    ///
    /// let evens = Vec::from_iter(numbers.drain_filter(|x| *x % 2 == 0));
    ///
    /// assert_eq!(evens, vec![2, 4, 6]);
    /// assert_eq!(Vec::from_iter(numbers), vec![1, 3, 5]);
    /// ```
    pub fn drain_filter<F>(&mut self, filter: F) -> DrainFilter<'_, T, F>
    where
        F: FnMut(&mut T) -> bool,
    {
        self.invalidate_current();
        DrainFilter::new(self, filter)
    }
}
