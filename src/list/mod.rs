use std::cell::Cell;
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use crate::error::{ListError, ListResult};
use crate::list::cursor::CursorMut;
use crate::record::DeepCopy;
use crate::{Iter, IterMut, Walk};

pub(crate) mod cursor;
pub mod iterator;

mod algorithms;

pub use algorithms::DrainFilter;

/// The `List` is a doubly-linked list with owned nodes, implemented as a cyclic
/// list, that carries an internal cursor.
///
/// Inserting or removing at the cursor takes constant time. Moving the cursor
/// is done one step at a time by [`List::get_first`] and [`List::get_next`].
///
/// The `List` contains:
/// - a pointer `ghost` that points to the payload-free ghost node;
/// - a length field `len` holding the exact number of elements;
/// - the internal cursor `current`, either a live element node or `None`.
///
/// The cursor is only valid right after a successful [`get_first`],
/// [`get_next`], [`get_current`], [`insert_before_current`] or
/// [`insert_after_current`]. Every other operation that changes the linking
/// structure of the list invalidates it.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of list nodes, both inclusive;
/// - `start..end`: a half-open range of list nodes, left inclusive and right
///   exclusive (probably the ghost node).
///
/// [`get_first`]: List::get_first
/// [`get_next`]: List::get_next
/// [`get_current`]: List::get_current
/// [`insert_before_current`]: List::insert_before_current
/// [`insert_after_current`]: List::insert_after_current
pub struct List<T> {
    ghost: Box<Node<Erased>>,
    /// the length of the list
    pub(crate) len: usize,
    current: Cell<Option<NonNull<Node<T>>>>,
    _marker: PhantomData<Box<Node<T>>>,
}

#[repr(C)]
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    pub(crate) element: T,
}

struct Erased;

/// Nodes fragment detached from a list, used when moving every node of one
/// list into another.
///
/// When detached from a list, reading of `front.prev` and `back.next`
/// is invalid.
pub(crate) struct DetachedNodes<T> {
    pub(crate) front: NonNull<Node<T>>,
    pub(crate) back: NonNull<Node<T>>,
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

// private methods
impl<T> List<T> {
    pub(crate) fn ghost_node(&self) -> NonNull<Node<T>> {
        NonNull::from(self.ghost.as_ref()).cast()
    }
    pub(crate) fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.next` is always valid (either `ghost` itself, or the first element
        // in the list). The link is read through a raw place, so the ghost is never
        // referenced as a full `Node<T>`.
        unsafe { (*self.ghost_node().as_ptr()).next }
    }
    pub(crate) fn back_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.prev` is always valid (either `ghost` itself, or the last element
        // in the list).
        unsafe { (*self.ghost_node().as_ptr()).prev }
    }

    pub(crate) fn invalidate_current(&self) {
        self.current.set(None);
    }

    /// Point the internal cursor at `node` and return its element, or
    /// invalidate the cursor if `node` is the ghost node.
    fn settle_current(&self, node: NonNull<Node<T>>) -> Option<&T> {
        if node == self.ghost_node() {
            self.current.set(None);
            return None;
        }
        self.current.set(Some(node));
        // SAFETY: non-ghost nodes always hold a valid element, borrowed no longer
        // than the list itself.
        Some(unsafe { &(*node.as_ptr()).element })
    }

    pub(crate) unsafe fn connect(&mut self, prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
        (*prev.as_ptr()).next = next;
        (*next.as_ptr()).prev = prev;
    }

    /// Detach a single node `node` from the list, and return it as a box.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the list.
    ///
    /// If the `node` does not belong to the list, this function call will make
    /// the list ill-formed.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        self.len -= 1;
        let node = Box::from_raw(node.as_ptr());
        self.connect(node.prev, node.next);
        node
    }

    /// Attach a single node `node` to the list, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belongs
    /// to the list, or whether the `prev` and `next` is adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    pub(crate) unsafe fn attach_node(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        node: NonNull<Node<T>>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        self.connect(prev, node);
        self.connect(node, next);
        self.len += 1;
    }

    /// Attach a range of detached nodes to the list, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belongs
    /// to the list, or whether the `prev` and `next` is adjacent.
    pub(crate) unsafe fn attach_nodes(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        detached: DetachedNodes<T>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        self.connect(prev, detached.front);
        self.connect(detached.back, next);
        self.len += detached.len;
    }

    /// Detach all nodes from the list, and return the detached nodes, or return
    /// `None` if the list is empty.
    ///
    /// It is safe because `self.front_node()..=self.back_node()` is a valid range.
    pub(crate) fn detach_all_nodes(&mut self) -> Option<DetachedNodes<T>> {
        if self.is_empty() {
            return None;
        }
        self.invalidate_current();
        let (front, back, len) = (self.front_node(), self.back_node(), self.len);
        let ghost = self.ghost_node();
        self.len = 0;
        unsafe {
            self.connect(ghost, ghost);
            Some(DetachedNodes::new(front, back, len))
        }
    }

    pub(crate) fn cursor_start_mut(&mut self) -> CursorMut<'_, T> {
        let front = self.front_node();
        CursorMut::new(self, front)
    }

    pub(crate) fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let ghost = self.ghost_node();
        CursorMut::new(self, ghost)
    }

    /// Provides a cursor with editing operations at the internal cursor, or
    /// fails with [`ListError::InvalidCurrent`] if it is not set.
    fn cursor_current_mut(&mut self) -> ListResult<CursorMut<'_, T>> {
        let current = self.current.get().ok_or(ListError::InvalidCurrent)?;
        Ok(CursorMut::new(self, current))
    }
}

impl<T> List<T> {
    /// Create an empty `List`
    ///
    /// # Examples
    /// ```
    /// use orange_cache::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.get_first().is_none());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            ghost: new_ghost(),
            len: 0,
            current: Cell::new(None),
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost_node()
    }

    /// Returns the number of elements in the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use orange_cache::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.len(), 1);
    ///
    /// list.push_back(3);
    /// assert_eq!(list.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements from the `List` and invalidates the cursor.
    ///
    /// Clearing an empty list does nothing.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use orange_cache::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// list.push_front(1);
    /// assert_eq!(list.get_first(), Some(&1));
    ///
    /// list.clear();
    /// assert_eq!(list.len(), 0);
    /// assert_eq!(list.get_current(), None);
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Provides a reference to the front element, or `None` if the list is
    /// empty. The cursor is left alone.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the front node of a non-empty list holds a valid element.
        Some(unsafe { &(*self.front_node().as_ptr()).element })
    }

    /// Provides a reference to the back element, or `None` if the list is
    /// empty. The cursor is left alone.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the back node of a non-empty list holds a valid element.
        Some(unsafe { &(*self.back_node().as_ptr()).element })
    }

    /// Adds an element first in the list, taking ownership of it.
    ///
    /// The cursor is invalidated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_front(&mut self, elt: T) {
        self.invalidate_current();
        self.cursor_start_mut().insert(elt);
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// The cursor is invalidated.
    ///
    /// # Examples
    ///
    /// ```
    /// use orange_cache::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_front(), None);
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Some(3));
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        self.invalidate_current();
        self.cursor_start_mut().remove()
    }

    /// Appends an element to the back of a list, taking ownership of it.
    ///
    /// The cursor is invalidated.
    pub fn push_back(&mut self, elt: T) {
        self.invalidate_current();
        self.cursor_end_mut().insert(elt);
    }

    /// Removes the last element from a list and returns it, or `None` if
    /// it is empty.
    ///
    /// The cursor is invalidated.
    pub fn pop_back(&mut self) -> Option<T> {
        self.invalidate_current();
        self.cursor_end_mut().backspace()
    }

    /// Moves all elements from `other` to the end of the list.
    ///
    /// This reuses all the nodes from `other` and moves them into `self`. After
    /// this operation, `other` becomes empty. The cursors of both lists are
    /// invalidated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use orange_cache::List;
    ///
    /// let mut list1 = List::new();
    /// list1.push_back('a');
    ///
    /// let mut list2 = List::new();
    /// list2.push_back('b');
    /// list2.push_back('c');
    ///
    /// list1.append(&mut list2);
    ///
    /// let mut iter = list1.iter();
    /// assert_eq!(iter.next(), Some(&'a'));
    /// assert_eq!(iter.next(), Some(&'b'));
    /// assert_eq!(iter.next(), Some(&'c'));
    /// assert!(iter.next().is_none());
    ///
    /// assert!(list2.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        self.invalidate_current();
        if let Some(detached) = other.detach_all_nodes() {
            // `self.back_node()` and `self.ghost_node()` are valid
            // nodes in the list and they are adjacent, so it is safe.
            unsafe { self.attach_nodes(self.back_node(), self.ghost_node(), detached) }
        }
    }

    /// Sets the internal cursor to the first element and returns it.
    ///
    /// Returns `None`, leaving the cursor invalid, if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use orange_cache::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([7, 8]);
    /// assert_eq!(list.get_first(), Some(&7));
    /// assert_eq!(list.get_current(), Some(&7));
    ///
    /// let empty: List<i32> = List::new();
    /// assert_eq!(empty.get_first(), None);
    /// ```
    pub fn get_first(&self) -> Option<&T> {
        self.settle_current(self.front_node())
    }

    /// Advances the internal cursor to the next element and returns it.
    ///
    /// Returns `None` once the cursor moves past the last element. The cursor
    /// is invalid from then on, and so every further `get_next` or
    /// `get_current` returns `None` until [`List::get_first`] is called.
    ///
    /// # Examples
    ///
    /// ```
    /// use orange_cache::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2]);
    /// assert_eq!(list.get_next(), None); // no cursor yet
    ///
    /// assert_eq!(list.get_first(), Some(&1));
    /// assert_eq!(list.get_next(), Some(&2));
    /// assert_eq!(list.get_next(), None);
    /// assert_eq!(list.get_next(), None);
    /// assert_eq!(list.get_current(), None);
    /// ```
    pub fn get_next(&self) -> Option<&T> {
        let current = self.current.get()?;
        // SAFETY: `current` is always a live element node of this list.
        let next = unsafe { (*current.as_ptr()).next };
        self.settle_current(next)
    }

    /// Returns the element at the internal cursor without moving it, or
    /// `None` if the cursor is invalid.
    pub fn get_current(&self) -> Option<&T> {
        let current = self.current.get()?;
        // SAFETY: `current` is always a live element node of this list.
        Some(unsafe { &(*current.as_ptr()).element })
    }

    /// Inserts a copy of `item` first in the list.
    ///
    /// The cursor is invalidated, whatever its state was.
    ///
    /// # Errors
    ///
    /// [`ListError::OutOfMemory`] if the copy fails; the list is unchanged.
    pub fn insert_first(&mut self, item: &T) -> ListResult<()>
    where
        T: DeepCopy,
    {
        let copy = item.deep_copy().ok_or(ListError::OutOfMemory)?;
        self.push_front(copy);
        Ok(())
    }

    /// Inserts a copy of `item` right before the element at the cursor.
    ///
    /// The cursor keeps pointing at the same element.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidCurrent`] if the cursor is invalid, and
    /// [`ListError::OutOfMemory`] if the copy fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use orange_cache::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 3]);
    /// list.get_first();
    /// list.get_next();
    /// list.insert_before_current(&2).unwrap();
    ///
    /// assert_eq!(list.get_current(), Some(&3));
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3]);
    /// ```
    pub fn insert_before_current(&mut self, item: &T) -> ListResult<()>
    where
        T: DeepCopy,
    {
        let mut cursor = self.cursor_current_mut()?;
        let copy = item.deep_copy().ok_or(ListError::OutOfMemory)?;
        cursor.insert(copy);
        Ok(())
    }

    /// Inserts a copy of `item` right after the element at the cursor.
    ///
    /// The cursor keeps pointing at the same element.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidCurrent`] if the cursor is invalid, and
    /// [`ListError::OutOfMemory`] if the copy fails.
    pub fn insert_after_current(&mut self, item: &T) -> ListResult<()>
    where
        T: DeepCopy,
    {
        let current = self.current.get().ok_or(ListError::InvalidCurrent)?;
        let copy = item.deep_copy().ok_or(ListError::OutOfMemory)?;
        // SAFETY: `current` is a live element node, so its `next` is a node of
        // this list (possibly the ghost node).
        let next = unsafe { (*current.as_ptr()).next };
        CursorMut::new(self, next).insert(copy);
        Ok(())
    }

    /// Removes the element at the cursor and drops it.
    ///
    /// The cursor is invalid afterwards.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidCurrent`] if the cursor is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use orange_cache::{List, ListError};
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.remove_current(), Err(ListError::InvalidCurrent));
    ///
    /// list.get_first();
    /// list.get_next();
    /// assert_eq!(list.remove_current(), Ok(()));
    /// assert_eq!(list.remove_current(), Err(ListError::InvalidCurrent));
    /// assert_eq!(Vec::from_iter(list), vec![1, 3]);
    /// ```
    pub fn remove_current(&mut self) -> ListResult<()> {
        self.take_current().map(drop)
    }

    /// Removes the element at the cursor and returns it to the caller.
    ///
    /// The cursor is invalid afterwards.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidCurrent`] if the cursor is invalid.
    pub fn take_current(&mut self) -> ListResult<T> {
        let current = self.current.take().ok_or(ListError::InvalidCurrent)?;
        CursorMut::new(self, current)
            .remove()
            .ok_or(ListError::InvalidCurrent)
    }

    /// Provides a forward iterator that does not touch the internal cursor.
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
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// The linking structure is not changed, so the cursor stays valid.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Provides an iterator driven by the internal cursor: the first item
    /// comes from [`List::get_first`], the following ones from
    /// [`List::get_next`].
    ///
    /// # Examples
    ///
    /// ```
    /// use orange_cache::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let sum: i32 = list.walk().sum();
    /// assert_eq!(sum, 6);
    /// // The walk leaves the cursor past the end.
    /// assert_eq!(list.get_current(), None);
    /// ```
    #[inline]
    pub fn walk(&self) -> Walk<'_, T> {
        Walk::new(self)
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    /// Create a detached node with given element.
    ///
    /// The links are dangling until the node is attached to a list.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        let node = Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            element,
        });
        NonNull::from(Box::leak(node))
    }

    pub(crate) fn into_element(self: Box<Self>) -> T {
        self.element
    }
}

impl<T> DetachedNodes<T> {
    /// It is unsafe because it must be guaranteed that `front..=back` is
    /// a valid range and its length must be equal to `len`.
    unsafe fn new(front: NonNull<Node<T>>, back: NonNull<Node<T>>, len: usize) -> Self {
        debug_assert!(len > 0, "Cannot detach nodes of length 0");
        Self {
            front,
            back,
            len,
            _marker: PhantomData,
        }
    }
}

fn new_ghost() -> Box<Node<Erased>> {
    let raw: *mut Node<Erased> =
        Box::into_raw(Box::new(MaybeUninit::<Node<Erased>>::uninit())).cast();
    // SAFETY:
    // - `raw` comes from `Box::into_raw`, so it is non-null;
    // - the node is fully written before `Box::from_raw` takes it back.
    unsafe {
        let ghost_ptr = NonNull::new_unchecked(raw);
        raw.write(Node {
            next: ghost_ptr,
            prev: ghost_ptr,
            element: Erased,
        });
        Box::from_raw(raw)
    }
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    unsafe {
        assert_eq!((*prev.as_ptr()).next, next);
        assert_eq!((*next.as_ptr()).prev, prev);
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

// The cursor cell keeps `List` from being `Sync`.
unsafe impl<T: Send> Send for List<T> {}
