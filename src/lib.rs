//! `rb_ordered_map` is an ordered map based on a red-black tree.
//!
//! It fully implements the insertion and deletion functionality of a red-black tree,
//! ensuring that each modification operation requires at most O(logN) time complexity.
//! Keys are kept in the order of a caller-supplied [`Comparator`], which makes sorted
//! iteration, lower-bound searches and stepping cursors cheap.
//!
//! Like its parent-child links, every node lives in a single vector and is addressed
//! by a [`NodeIndex`]. The tree has no reference cycles and no `unsafe` pointer code,
//! it is `Send` whenever its keys, values and comparator are, and a handle keeps
//! pointing at its entry while other entries come and go.
//!
//! [`RbTree`] is the engine and is not synchronized. [`Map`] and [`Set`] wrap it and
//! take one lock per call according to their [`Locking`] strategy.
//!
//! # Example
//!
//! ```rust
//! use rb_ordered_map::RbTree;
//!
//! let mut tree = RbTree::new();
//! for k in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(k, k * 10);
//! }
//! assert_eq!(tree.get(&4), Some(&40));
//! assert_eq!(tree.remove(&5), Some(50));
//! assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 3, 4, 7, 8, 9]);
//!
//! let mut cursor = tree.cursor_lower_bound(&6);
//! assert_eq!(cursor.key(), Ok(&7));
//! cursor.move_prev().unwrap();
//! assert_eq!(cursor.key(), Ok(&4));
//! ```
//!

mod compare;
mod cursor;
mod entry;
mod error;
mod index;
mod iter;
mod map;
mod node;
mod set;
mod sync;
mod tree;


pub use compare::{Comparator, NaturalOrder, Reverse};
pub use cursor::{Cursor, CursorMut};
pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use error::{Error, Result};
pub use index::{DefaultIx, IndexType, NodeIndex};
pub use iter::{IntoIter, Iter, Keys, Range, Values};
pub use map::{Map, SyncMap};
pub use set::{Set, SyncSet};
pub use sync::{Lock, Locking, NoLock, RwLock, Synchronized, Unsynchronized};
pub use tree::RbTree;
