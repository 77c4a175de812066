use crate::list::{List, Node};
use std::fmt;
use std::fmt::Formatter;
use std::ptr::NonNull;

/// An editing cursor over a `List`, the engine behind every structural
/// mutation of the list.
///
/// In a list with length *n*, there are *n* + 1 valid locations for the cursor:
/// the *n* element nodes and the ghost node, which sits after the last element.
///
/// A `CursorMut` never reads or writes the list's internal cursor. Callers
/// decide whether an edit keeps or invalidates it.
pub(crate) struct CursorMut<'a, T: 'a> {
    pub(crate) current: NonNull<Node<T>>,
    pub(crate) list: &'a mut List<T>,
}

// Private methods
impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>, current: NonNull<Node<T>>) -> Self {
        Self { current, list }
    }

    pub(crate) fn is_ghost_node(&self) -> bool {
        self.current == self.list.ghost_node()
    }
    pub(crate) fn is_front_node(&self) -> bool {
        self.prev_node() == self.list.ghost_node()
    }
    pub(crate) fn next_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `current.next` is always valid since it is a cyclic list.
        unsafe { (*self.current.as_ptr()).next }
    }
    pub(crate) fn prev_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `current.prev` is always valid since it is a cyclic list.
        unsafe { (*self.current.as_ptr()).prev }
    }

    /// Insert a new item before the given node `next`.
    ///
    /// It is unsafe because it does not check whether `next` is
    /// belong to the current list that the cursor points to.
    unsafe fn insert_before(&mut self, next: NonNull<Node<T>>, item: T) -> NonNull<Node<T>> {
        let node = Node::new_detached(item);
        self.list.attach_node((*next.as_ptr()).prev, next, node);
        node
    }
}

// Methods that does not change the linking structure of the list.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Return an immutable reference of current node of the cursor,
    /// or return `None` if it is located at the ghost node.
    pub(crate) fn current(&self) -> Option<&T> {
        if self.is_ghost_node() {
            return None;
        }
        // SAFETY: non-ghost nodes must hold a valid element.
        Some(unsafe { &(*self.current.as_ptr()).element })
    }

    /// Return a mutable reference of current node of the cursor,
    /// or return `None` if it is located at the ghost node.
    pub(crate) fn current_mut(&mut self) -> Option<&mut T> {
        if self.is_ghost_node() {
            return None;
        }
        // SAFETY: non-ghost nodes must hold a valid element, and the cursor
        // borrows the list mutably.
        Some(unsafe { &mut (*self.current.as_ptr()).element })
    }

    /// Move the cursor to the next position, or return an error
    /// when passing through the ghost node is happened.
    ///
    /// This operation should compute in *O*(*1*) time.
    pub(crate) fn move_next(&mut self) -> Result<(), &'static str> {
        if self.is_ghost_node() {
            return Err("`move_next` across ghost boundary");
        }
        self.current = self.next_node();
        Ok(())
    }

    /// Temporarily view the list via an immutable reference.
    pub(crate) fn view(&self) -> &List<T> {
        self.list
    }
}

// Methods that might change the linking structure of the list.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Add an element before the cursor position. The cursor stays put.
    ///
    /// This operation should compute in *O*(1) time.
    pub(crate) fn insert(&mut self, item: T) {
        // SAFETY: `self.current` is a valid node in the list, so it is safe.
        unsafe { self.insert_before(self.current, item) };
    }

    /// Remove the element at the cursor and return it, or return `None`
    /// if the cursor is at the ghost node. After removal, the cursor
    /// is moved to the next node unless no removing is happened.
    ///
    /// This operation should compute in *O*(*1*) time.
    pub(crate) fn remove(&mut self) -> Option<T> {
        if self.is_ghost_node() {
            return None;
        }
        let next = self.next_node();
        // SAFETY: `self.current` is a valid non-ghost node in the list, so it is safe.
        let node = unsafe { self.list.detach_node(self.current) };
        self.current = next;
        Some(node.into_element())
    }

    /// Remove the element before the cursor and return it, or return `None` if
    /// the cursor is at the first node. After removal, the cursor is not moved.
    ///
    /// This operation should compute in *O*(*1*) time.
    pub(crate) fn backspace(&mut self) -> Option<T> {
        if self.is_front_node() {
            return None;
        }
        // SAFETY: the previous node of a non-first node is never the ghost node.
        let node = unsafe { self.list.detach_node(self.prev_node()) };
        Some(node.into_element())
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for CursorMut<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("list", self.view())
            .field("current", &self.current())
            .finish()
    }
}
