//! Capabilities the containers require from the elements they store.

/// Copying hook used by every operation that stores a copy of a
/// caller-owned element.
///
/// Any `Clone` type is a `DeepCopy` whose copy never fails. Types whose
/// copies can run out of resources implement it by hand and return `None`.
pub trait DeepCopy: Sized {
    /// Returns an independent copy of `self`, or `None` if it could not be
    /// allocated.
    fn deep_copy(&self) -> Option<Self>;
}

impl<T: Clone> DeepCopy for T {
    #[inline]
    fn deep_copy(&self) -> Option<Self> {
        Some(self.clone())
    }
}

/// A record that can be stored in a [`Cache`](crate::Cache).
pub trait Record: DeepCopy {
    /// The cell this record is routed to by [`Cache::push`](crate::Cache::push).
    fn bucket(&self) -> usize;

    /// The weight compared by
    /// [`Cache::deliver_oranges_with_biggest_weight`](crate::Cache::deliver_oranges_with_biggest_weight).
    fn weight(&self) -> u32;

    /// Whether the record is destined for `company`. Names are compared
    /// exactly, case included.
    fn is_delivered_to(&self, company: &str) -> bool;
}
