//! Cursors that walk the tree one entry at a time.
//!
//! A cursor either points at an entry or is invalid. Stepping past either end
//! leaves it invalid; reading or stepping an invalid cursor is an
//! [`Error::InvalidIterator`].
//!
//! A cursor borrows its tree, so the tree cannot change while the cursor is
//! alive. To keep a position across mutations, detach it with
//! [`Cursor::index`] and re-attach with [`RbTree::cursor_at`] afterwards. The
//! position survives as long as its own entry was not deleted.
//!
//! ```rust
//! use rb_ordered_map::RbTree;
//!
//! let mut tree = RbTree::new();
//! for k in [1, 2, 3] {
//!     tree.insert(k, k * 10);
//! }
//! let pos = tree.cursor_at_key(&2).index().unwrap();
//! tree.insert(4, 40);
//! tree.remove(&1);
//!
//! let mut cursor = tree.cursor_at(pos);
//! assert_eq!(cursor.key(), Ok(&2));
//! cursor.move_next().unwrap();
//! assert_eq!(cursor.value(), Ok(&30));
//! ```

use std::fmt;

use crate::error::{Error, Result};
use crate::index::{IndexType, NodeIndex};
use crate::tree::RbTree;

/// A read-only cursor over a `RbTree`.
pub struct Cursor<'a, K, V, C, Ix> {
    tree: &'a RbTree<K, V, C, Ix>,
    node: Option<NodeIndex<Ix>>,
}

impl<K, V, C, Ix: IndexType> Clone for Cursor<'_, K, V, C, Ix> {
    fn clone(&self) -> Self {
        Cursor {
            tree: self.tree,
            node: self.node,
        }
    }
}

impl<K, V, C, Ix: fmt::Debug> fmt::Debug for Cursor<'_, K, V, C, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.node).finish()
    }
}

impl<'a, K, V, C, Ix> Cursor<'a, K, V, C, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(tree: &'a RbTree<K, V, C, Ix>, node: Option<NodeIndex<Ix>>) -> Self {
        Cursor {
            tree,
            node: node.filter(|&x| tree.key(x).is_some()),
        }
    }

    /// Return `true` if the cursor points at an entry.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.node.is_some()
    }

    /// Detach the current position.
    #[inline]
    pub fn index(&self) -> Option<NodeIndex<Ix>> {
        self.node
    }

    /// Key of the current entry.
    #[inline]
    pub fn key(&self) -> Result<&'a K> {
        self.key_value().map(|(k, _)| k)
    }

    /// Value of the current entry.
    #[inline]
    pub fn value(&self) -> Result<&'a V> {
        self.key_value().map(|(_, v)| v)
    }

    /// Key and value of the current entry.
    #[inline]
    pub fn key_value(&self) -> Result<(&'a K, &'a V)> {
        let tree = self.tree;
        self.node
            .and_then(|x| tree.get_key_value_at(x))
            .ok_or(Error::InvalidIterator)
    }

    /// Step to the next larger key.
    ///
    /// Stepping past the largest key leaves the cursor invalid.
    #[inline]
    pub fn move_next(&mut self) -> Result<()> {
        let x = self.node.ok_or(Error::InvalidIterator)?;
        self.node = self.tree.successor(x);
        Ok(())
    }

    /// Step to the next smaller key.
    ///
    /// Stepping past the smallest key leaves the cursor invalid.
    #[inline]
    pub fn move_prev(&mut self) -> Result<()> {
        let x = self.node.ok_or(Error::InvalidIterator)?;
        self.node = self.tree.predecessor(x);
        Ok(())
    }
}

/// A cursor that can modify values and remove entries.
pub struct CursorMut<'a, K, V, C, Ix> {
    tree: &'a mut RbTree<K, V, C, Ix>,
    node: Option<NodeIndex<Ix>>,
}

impl<K, V, C, Ix: fmt::Debug> fmt::Debug for CursorMut<'_, K, V, C, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.node).finish()
    }
}

impl<'a, K, V, C, Ix> CursorMut<'a, K, V, C, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(tree: &'a mut RbTree<K, V, C, Ix>, node: Option<NodeIndex<Ix>>) -> Self {
        let node = node.filter(|&x| tree.key(x).is_some());
        CursorMut { tree, node }
    }

    /// Return `true` if the cursor points at an entry.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.node.is_some()
    }

    /// Detach the current position.
    #[inline]
    pub fn index(&self) -> Option<NodeIndex<Ix>> {
        self.node
    }

    /// Borrow as a read-only cursor at the same position.
    #[inline]
    pub fn as_cursor(&self) -> Cursor<'_, K, V, C, Ix> {
        Cursor::new(&*self.tree, self.node)
    }

    /// Key of the current entry.
    #[inline]
    pub fn key(&self) -> Result<&K> {
        self.node
            .and_then(|x| self.tree.key(x))
            .ok_or(Error::InvalidIterator)
    }

    /// Value of the current entry.
    #[inline]
    pub fn value(&self) -> Result<&V> {
        self.node
            .and_then(|x| self.tree.value(x))
            .ok_or(Error::InvalidIterator)
    }

    /// Mutable value of the current entry.
    #[inline]
    pub fn value_mut(&mut self) -> Result<&mut V> {
        let x = self.node.ok_or(Error::InvalidIterator)?;
        self.tree.value_mut(x).ok_or(Error::InvalidIterator)
    }

    /// Replace the value of the current entry, returning the previous one.
    #[inline]
    pub fn replace_value(&mut self, value: V) -> Result<V> {
        let x = self.node.ok_or(Error::InvalidIterator)?;
        self.tree
            .replace_value_at(x, value)
            .ok_or(Error::InvalidIterator)
    }

    /// Step to the next larger key.
    #[inline]
    pub fn move_next(&mut self) -> Result<()> {
        let x = self.node.ok_or(Error::InvalidIterator)?;
        self.node = self.tree.successor(x);
        Ok(())
    }

    /// Step to the next smaller key.
    #[inline]
    pub fn move_prev(&mut self) -> Result<()> {
        let x = self.node.ok_or(Error::InvalidIterator)?;
        self.node = self.tree.predecessor(x);
        Ok(())
    }

    /// Remove the current entry and move to its successor.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// for k in 1..=6 {
    ///     tree.insert(k, ());
    /// }
    /// let mut cursor = tree.cursor_front_mut();
    /// while cursor.is_valid() {
    ///     if cursor.key().map(|k| k % 2 == 0).unwrap_or(false) {
    ///         cursor.remove_current().unwrap();
    ///     } else {
    ///         cursor.move_next().unwrap();
    ///     }
    /// }
    /// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
    /// ```
    pub fn remove_current(&mut self) -> Result<(K, V)> {
        let x = self.node.ok_or(Error::InvalidIterator)?;
        let next = self.tree.successor(x);
        let entry = self.tree.delete(x).ok_or(Error::InvalidIterator)?;
        self.node = next;
        Ok(entry)
    }
}
