use std::fmt;

use crate::compare::Comparator;
use crate::index::{IndexType, NodeIndex};
use crate::node::Node;
use crate::tree::RbTree;

/// A view into a single entry in a tree, which may either be vacant or occupied.
pub enum Entry<'a, K, V, C, Ix> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, C, Ix>),
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, C, Ix>),
}

/// A view into an occupied entry in a `RbTree`.
/// It is part of the [`Entry`] enum.
pub struct OccupiedEntry<'a, K, V, C, Ix> {
    /// Reference to the tree
    tree: &'a mut RbTree<K, V, C, Ix>,
    /// The entry node
    node: NodeIndex<Ix>,
}

/// A view into a vacant entry in a `RbTree`.
/// It is part of the [`Entry`] enum.
pub struct VacantEntry<'a, K, V, C, Ix> {
    /// Mutable reference to the tree
    tree: &'a mut RbTree<K, V, C, Ix>,
    /// The key of this entry, known to be absent
    key: K,
}

impl<'a, K, V, C, Ix> Entry<'a, K, V, C, Ix>
where
    C: Comparator<K>,
    Ix: IndexType,
{
    /// The key this entry was looked up with.
    #[inline]
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }

    /// Ensures a value is in the entry by inserting the default if empty, and returns
    /// a mutable reference to the value in the entry.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::{Entry, RbTree};
    ///
    /// let mut tree = RbTree::new();
    /// assert!(matches!(tree.entry("a"), Entry::Vacant(_)));
    /// tree.entry("a").or_insert(3);
    /// assert!(matches!(tree.entry("a"), Entry::Occupied(_)));
    /// assert_eq!(tree.get(&"a"), Some(&3));
    /// ```
    #[inline]
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Like [`Entry::or_insert`], computing the default only when needed.
    #[inline]
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the tree.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::{Entry, RbTree};
    ///
    /// let mut tree = RbTree::new();
    ///
    /// tree.insert(6, 3);
    /// assert!(matches!(tree.entry(6), Entry::Occupied(_)));
    /// tree.entry(6).and_modify(|v| *v += 1);
    /// assert_eq!(tree.get(&6), Some(&4));
    /// ```
    #[inline]
    #[must_use]
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Self::Occupied(entry)
            }
            Entry::Vacant(entry) => Self::Vacant(entry),
        }
    }
}

impl<'a, K, V, C, Ix> OccupiedEntry<'a, K, V, C, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(tree: &'a mut RbTree<K, V, C, Ix>, node: NodeIndex<Ix>) -> Self {
        OccupiedEntry { tree, node }
    }

    /// Handle of the entry.
    #[inline]
    pub fn index(&self) -> NodeIndex<Ix> {
        self.node
    }

    /// Stored key.
    #[inline]
    pub fn key(&self) -> &K {
        self.tree.node_ref(self.node, Node::key)
    }

    /// Stored value.
    #[inline]
    pub fn get(&self) -> &V {
        self.tree.node_ref(self.node, Node::value)
    }

    /// Mutable stored value.
    #[inline]
    pub fn get_mut(&mut self) -> &mut V {
        self.tree.node_mut(self.node, Node::value_mut)
    }

    /// Convert into a mutable reference bound to the tree's borrow.
    #[inline]
    pub fn into_mut(self) -> &'a mut V {
        let tree = self.tree;
        tree.node_mut(self.node, Node::value_mut)
    }

    /// Replace the stored value, returning the previous one.
    #[inline]
    pub fn insert(&mut self, value: V) -> V {
        self.tree.node_mut(self.node, Node::set_value(value))
    }

    /// Delete the entry, returning its key and value.
    #[inline]
    pub fn remove_entry(self) -> (K, V) {
        let node = self.node;
        let tree = self.tree;
        match tree.delete(node) {
            Some(entry) => entry,
            None => unreachable!("occupied entry {node:?} points at a free slot"),
        }
    }

    /// Delete the entry, returning its value.
    #[inline]
    pub fn remove(self) -> V {
        self.remove_entry().1
    }
}

impl<'a, K, V, C, Ix> VacantEntry<'a, K, V, C, Ix>
where
    C: Comparator<K>,
    Ix: IndexType,
{
    pub(crate) fn new(tree: &'a mut RbTree<K, V, C, Ix>, key: K) -> Self {
        VacantEntry { tree, key }
    }

    /// The key that would be inserted.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    #[inline]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Insert the key with `value`, returning a mutable reference to the value.
    ///
    /// The key was looked up when the entry was created, so this goes straight
    /// to the raw engine insert.
    #[inline]
    pub fn insert(self, value: V) -> &'a mut V {
        let tree = self.tree;
        let node = tree.insert(self.key, value);
        tree.node_mut(node, Node::value_mut)
    }
}

impl<K, V, C, Ix> fmt::Debug for Entry<'_, K, V, C, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Comparator<K>,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Occupied(entry) => f
                .debug_struct("OccupiedEntry")
                .field("key", entry.key())
                .field("value", entry.get())
                .finish(),
            Entry::Vacant(entry) => f.debug_tuple("VacantEntry").field(entry.key()).finish(),
        }
    }
}
