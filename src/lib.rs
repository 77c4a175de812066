//! This crate provides an orange inventory: a cache of 256 cells, one per
//! orange size, where each cell is a doubly-linked list with an internal
//! cursor.
//!
//! The two containers are generic. [`List`] holds any element type, and
//! [`Cache`] holds any [`Record`], which tells the cache which cell it goes
//! to, how heavy it is and which companies it is delivered to. [`Orange`] is
//! the record the inventory is built for.
//!
//! Here is a quick example showing how the cache works.
//!
//! ```
//! use orange_cache::{Cache, Month, Orange};
//!
//! let mut cache: Cache<Orange> = Cache::new().unwrap();
//! for size in [3, 7, 7, 2] {
//!     let orange = Orange::new(size, Month::Dec, 1, 5)
//!         .and_then(|o| o.with_food_company("Tnuva"))
//!         .unwrap();
//!     cache.push(&orange).unwrap();
//! }
//!
//! let tnuva = cache.get_all_oranges_of_company("Tnuva").unwrap();
//! assert_eq!(tnuva.len(), 4);
//!
//! let heaviest = cache.deliver_oranges_with_biggest_weight().into_list();
//! assert_eq!(heaviest.len(), 2);
//! assert_eq!(cache.len(), 2);
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of a list is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                     (Ghost) Node N  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║ payload T ║           ║ payload T ║                        ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │      Node 0                  Node 1                               ↑   ↑
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║    len    ║
//! ╟───────────╢
//! ║  current  ║ ───→ Node k, or nothing
//! ╚═══════════╝
//!     List
//! ```
//!
//! Each node is allocated on heap. The ghost node has *NO* payload, and in an
//! empty list its `next` and `prev` pointers point to itself. `current` is the
//! internal cursor. It never points to the ghost node.
//!
//! # The Internal Cursor
//!
//! Walking a [`List`] through its cursor is done by [`List::get_first`]
//! followed by [`List::get_next`] until it returns `None`. Only reads, the
//! insertions around the cursor, and these walking calls keep the cursor;
//! every other change to the linking structure invalidates it.
//!
//! ```
//! use orange_cache::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 4]);
//! assert_eq!(list.get_current(), None);
//!
//! assert_eq!(list.get_first(), Some(&1));
//! assert_eq!(list.get_next(), Some(&2));
//! list.insert_after_current(&3).unwrap();
//! assert_eq!(list.get_current(), Some(&2));
//!
//! list.remove_current().unwrap();
//! assert_eq!(list.get_current(), None);
//! assert_eq!(Vec::from_iter(list), vec![1, 3, 4]);
//! ```
//!
//! The [`Cache`] has a cursor of its own, over its non-empty cells.
//!
//! # Iteration
//!
//! Iterating over a list without touching its cursor is by the [`Iter`] and
//! [`IterMut`] iterators. These are double-ended iterators and iterate the
//! list like an array (fused and non-cyclic). [`Walk`] and [`Cells`] iterate
//! by moving the internal cursors instead.
//!
//! ## Examples
//!
//! ```
//! use orange_cache::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Logging
//!
//! Structural activity of the cache is reported through [`tracing`] events at
//! the `trace` and `debug` levels. The crate never installs a subscriber.

#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut, Walk};
#[doc(inline)]
pub use list::{DrainFilter, List};

#[doc(inline)]
pub use cache::iterator::Cells;
#[doc(inline)]
pub use cache::{Cache, Delivery, ORANGE_CACHE_SIZE};

pub use error::{
    CacheError, CacheResult, ListError, ListResult, OrangeError, OrangeResult,
};
pub use orange::{Month, Orange, CURRENT_MONTH, ORANGE_MAX_SIZE, ORANGE_MIN_SIZE};
pub use record::{DeepCopy, Record};

pub mod cache;
pub mod error;
pub mod list;
pub mod orange;
pub mod record;
