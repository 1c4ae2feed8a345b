use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace};

use crate::compare::{Comparator, NaturalOrder};
use crate::cursor::{Cursor, CursorMut};
use crate::entry::{Entry, OccupiedEntry, VacantEntry};
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::iter::{IntoIter, Iter, Keys, Range, Values};
use crate::node::{Color, Node};

/// An ordered key-value container backed by a red-black tree.
///
/// Nodes live in an arena and refer to each other through [`NodeIndex`]
/// handles, so the tree never holds a reference cycle. The engine is not
/// internally synchronized; see [`Map`](crate::Map) for a facade that can be.
pub struct RbTree<K, V, C = NaturalOrder, Ix = DefaultIx> {
    /// Vector that stores nodes, slot 0 is the shared nil node
    pub(crate) nodes: Vec<Node<K, V, Ix>>,
    /// Slots freed by deletion, reused by later insertions
    pub(crate) free: Vec<NodeIndex<Ix>>,
    /// Root of the tree
    pub(crate) root: NodeIndex<Ix>,
    /// Number of elements in the tree
    pub(crate) len: usize,
    /// Key ordering
    pub(crate) cmp: C,
}

impl<K, V> RbTree<K, V>
where
    K: Ord,
{
    /// Create an empty `RbTree` ordered by `K`'s [`Ord`] implementation.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> RbTree<K, V, C>
where
    C: Comparator<K>,
{
    /// Create an empty `RbTree` ordered by `cmp`.
    ///
    /// The comparator is fixed for the lifetime of the tree.
    #[inline]
    #[must_use]
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_index_capacity(0, cmp)
    }

    /// Creates a new `RbTree` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Self::with_index_capacity(capacity, cmp)
    }
}

impl<K, V, C> Default for RbTree<K, V, C>
where
    C: Comparator<K> + Default,
{
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C, Ix> RbTree<K, V, C, Ix>
where
    Ix: IndexType,
{
    /// Creates a new `RbTree` addressed by a chosen index type.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::{NaturalOrder, RbTree};
    ///
    /// let mut tree: RbTree<u8, (), _, usize> = RbTree::with_index_capacity(16, NaturalOrder);
    /// let node = tree.insert(7, ());
    /// assert_eq!(tree.key(node), Some(&7));
    /// ```
    #[inline]
    #[must_use]
    pub fn with_index_capacity(capacity: usize, cmp: C) -> Self {
        let mut nodes = vec![Node::nil()];
        nodes.reserve(capacity);
        RbTree {
            nodes,
            free: Vec::new(),
            root: NodeIndex::nil(),
            len: 0,
            cmp,
        }
    }

    /// The comparator this tree was built with.
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Return the number of elements in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the tree contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all elements from the tree.
    ///
    /// Every handle obtained before the call becomes stale.
    #[inline]
    pub fn clear(&mut self) {
        debug!("clearing tree with {} entries", self.len);
        self.nodes.clear();
        self.nodes.push(Node::nil());
        self.free.clear();
        self.root = NodeIndex::nil();
        self.len = 0;
    }

    /// Key stored at `node`, or `None` if the handle is stale.
    #[inline]
    pub fn key(&self, node: NodeIndex<Ix>) -> Option<&K> {
        self.live(node).map(Node::key)
    }

    /// Value stored at `node`, or `None` if the handle is stale.
    #[inline]
    pub fn value(&self, node: NodeIndex<Ix>) -> Option<&V> {
        self.live(node).map(Node::value)
    }

    /// Mutable value stored at `node`, or `None` if the handle is stale.
    #[inline]
    pub fn value_mut(&mut self, node: NodeIndex<Ix>) -> Option<&mut V> {
        self.nodes
            .get_mut(node.index())
            .filter(|n| !n.is_nil())
            .map(Node::value_mut)
    }

    /// Key and value stored at `node`, or `None` if the handle is stale.
    #[inline]
    pub fn get_key_value_at(&self, node: NodeIndex<Ix>) -> Option<(&K, &V)> {
        self.live(node).map(Node::entry)
    }

    /// Replace the value stored at `node` without touching the ordering,
    /// returning the previous value.
    #[inline]
    pub fn replace_value_at(&mut self, node: NodeIndex<Ix>, value: V) -> Option<V> {
        self.value_mut(node).map(|old| std::mem::replace(old, value))
    }

    /// Handle of the entry with the smallest key.
    #[inline]
    pub fn first(&self) -> Option<NodeIndex<Ix>> {
        (!self.node_ref(self.root, Node::is_nil)).then(|| self.tree_minimum(self.root))
    }

    /// Handle of the entry with the largest key.
    #[inline]
    pub fn last(&self) -> Option<NodeIndex<Ix>> {
        (!self.node_ref(self.root, Node::is_nil)).then(|| self.tree_maximum(self.root))
    }

    /// Handle of the entry that follows `node` in key order.
    ///
    /// Returns `None` past the last entry or when `node` is stale.
    pub fn successor(&self, node: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        let _ = self.live(node)?;
        if !self.right_ref(node, Node::is_nil) {
            return Some(self.tree_minimum(self.node_ref(node, Node::right)));
        }
        let mut x = node;
        let mut y = self.node_ref(x, Node::parent);
        while !self.node_ref(y, Node::is_nil) && self.node_ref(y, Node::right) == x {
            x = y;
            y = self.node_ref(y, Node::parent);
        }
        (!self.node_ref(y, Node::is_nil)).then_some(y)
    }

    /// Handle of the entry that precedes `node` in key order.
    ///
    /// Returns `None` before the first entry or when `node` is stale.
    pub fn predecessor(&self, node: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        let _ = self.live(node)?;
        if !self.left_ref(node, Node::is_nil) {
            return Some(self.tree_maximum(self.node_ref(node, Node::left)));
        }
        let mut x = node;
        let mut y = self.node_ref(x, Node::parent);
        while !self.node_ref(y, Node::is_nil) && self.node_ref(y, Node::left) == x {
            x = y;
            y = self.node_ref(y, Node::parent);
        }
        (!self.node_ref(y, Node::is_nil)).then_some(y)
    }

    /// Delete the entry at `node`, returning its key and value.
    ///
    /// Returns `None` when the handle is stale. Handles of all other entries
    /// stay valid.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// let one = tree.insert(1, "one");
    /// let two = tree.insert(2, "two");
    /// assert_eq!(tree.delete(one), Some((1, "one")));
    /// assert_eq!(tree.delete(one), None);
    /// assert_eq!(tree.value(two), Some(&"two"));
    /// ```
    pub fn delete(&mut self, node: NodeIndex<Ix>) -> Option<(K, V)> {
        let _ = self.live(node)?;
        self.remove_inner(node);
        trace!("deleted {node:?}, {} entries left", self.len);
        let entry = self.nodes[node.index()].vacate();
        if self.len == 0 {
            self.nodes.truncate(1);
            self.free.clear();
        } else {
            self.free.push(node);
        }
        Some(entry)
    }

    /// Visit every entry in ascending key order.
    ///
    /// The walk stops as soon as `visitor` returns `false`.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// for k in [5, 3, 8, 1] {
    ///     tree.insert(k, ());
    /// }
    /// let mut seen = vec![];
    /// tree.traverse(|k, _| {
    ///     seen.push(*k);
    ///     *k < 5
    /// });
    /// assert_eq!(seen, vec![1, 3, 5]);
    /// ```
    pub fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut cur = self.first();
        while let Some(x) = cur {
            if !self.node_ref(x, |xn| visitor(xn.key(), xn.value())) {
                break;
            }
            cur = self.successor(x);
        }
    }

    /// Get an iterator over the entries of the tree, sorted by key.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, C, Ix> {
        Iter::new(self)
    }

    /// Get an iterator over the keys of the tree, in sorted order.
    #[inline]
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, C, Ix> {
        Keys::new(self.iter())
    }

    /// Get an iterator over the values of the tree, in key order.
    #[inline]
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, C, Ix> {
        Values::new(self.iter())
    }

    /// Cursor at the smallest key, invalid if the tree is empty.
    #[inline]
    pub fn cursor_front(&self) -> Cursor<'_, K, V, C, Ix> {
        Cursor::new(self, self.first())
    }

    /// Cursor at the largest key, invalid if the tree is empty.
    #[inline]
    pub fn cursor_back(&self) -> Cursor<'_, K, V, C, Ix> {
        Cursor::new(self, self.last())
    }

    /// Re-attach a cursor to a handle obtained earlier.
    #[inline]
    pub fn cursor_at(&self, node: NodeIndex<Ix>) -> Cursor<'_, K, V, C, Ix> {
        Cursor::new(self, Some(node))
    }

    /// Mutable cursor at the smallest key.
    #[inline]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, K, V, C, Ix> {
        let node = self.first();
        CursorMut::new(self, node)
    }

    /// Mutable cursor at the largest key.
    #[inline]
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, K, V, C, Ix> {
        let node = self.last();
        CursorMut::new(self, node)
    }

    /// Re-attach a mutable cursor to a handle obtained earlier.
    #[inline]
    pub fn cursor_at_mut(&mut self, node: NodeIndex<Ix>) -> CursorMut<'_, K, V, C, Ix> {
        CursorMut::new(self, Some(node))
    }
}

impl<K, V, C, Ix> RbTree<K, V, C, Ix>
where
    C: Comparator<K>,
    Ix: IndexType,
{
    /// Locate the entry whose key compares equal to `key`.
    #[inline]
    pub fn search(&self, key: &K) -> Option<NodeIndex<Ix>> {
        let mut x = self.root;
        while !self.node_ref(x, Node::is_nil) {
            match self.cmp.compare(key, self.node_ref(x, Node::key)) {
                Ordering::Less => x = self.node_ref(x, Node::left),
                Ordering::Greater => x = self.node_ref(x, Node::right),
                Ordering::Equal => return Some(x),
            }
        }
        None
    }

    /// Locate the entry with the smallest key not less than `key`.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// for k in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(k, ());
    /// }
    /// let lb = tree.lower_bound(&6).and_then(|x| tree.key(x));
    /// assert_eq!(lb, Some(&7));
    /// assert_eq!(tree.lower_bound(&10), None);
    /// ```
    pub fn lower_bound(&self, key: &K) -> Option<NodeIndex<Ix>> {
        let mut x = self.root;
        let mut candidate = None;
        while !self.node_ref(x, Node::is_nil) {
            if self.cmp.compare(self.node_ref(x, Node::key), key) == Ordering::Less {
                x = self.node_ref(x, Node::right);
            } else {
                candidate = Some(x);
                x = self.node_ref(x, Node::left);
            }
        }
        candidate
    }

    /// Locate the entry with the smallest key strictly greater than `key`.
    pub fn upper_bound(&self, key: &K) -> Option<NodeIndex<Ix>> {
        let mut x = self.root;
        let mut candidate = None;
        while !self.node_ref(x, Node::is_nil) {
            if self.cmp.compare(self.node_ref(x, Node::key), key) == Ordering::Greater {
                candidate = Some(x);
                x = self.node_ref(x, Node::left);
            } else {
                x = self.node_ref(x, Node::right);
            }
        }
        candidate
    }

    /// Insert a key that is not yet in the tree, returning its handle.
    ///
    /// The engine does not look for an existing equal key; callers that may
    /// see duplicates should go through [`RbTree::entry`] or
    /// [`Map::insert`](crate::Map::insert) instead.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for
    /// its index, and in debug builds when `key` is already present.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// let node = tree.insert(3, "three");
    /// assert_eq!(tree.search(&3), Some(node));
    /// assert_eq!(tree.get_key_value_at(node), Some((&3, &"three")));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> NodeIndex<Ix> {
        debug_assert!(self.search(&key).is_none(), "key is already present");
        let node_idx = self.alloc(Node::new(key, value));
        self.insert_inner(node_idx);
        trace!("inserted {node_idx:?}, {} entries", self.len);
        node_idx
    }

    /// Return reference to the value corresponding to the key.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.search(key).map(|idx| self.node_ref(idx, Node::value))
    }

    /// Return a mutable reference to the value corresponding to the key.
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.search(key).map(|idx| self.node_mut(idx, Node::value_mut))
    }

    /// Return the stored key and value matching `key`.
    #[inline]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.search(key).map(|idx| self.node_ref(idx, Node::entry))
    }

    /// Return `true` if `key` is present.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Remove a key from the tree, returning its value if it was present.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(1, 'a');
    /// assert_eq!(tree.remove(&2), None);
    /// assert_eq!(tree.remove(&1), Some('a'));
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let node_idx = self.search(key)?;
        self.delete(node_idx).map(|(_, v)| v)
    }

    /// Entry with the smallest key.
    #[inline]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.first().map(|idx| self.node_ref(idx, Node::entry))
    }

    /// Entry with the largest key.
    #[inline]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.last().map(|idx| self.node_ref(idx, Node::entry))
    }

    /// Get the given key's corresponding entry in the tree for in-place manipulation.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::{Entry, RbTree};
    ///
    /// let mut tree = RbTree::new();
    ///
    /// assert!(matches!(tree.entry(1), Entry::Vacant(_)));
    /// tree.entry(1).or_insert(0);
    /// assert!(matches!(tree.entry(1), Entry::Occupied(_)));
    /// tree.entry(1).and_modify(|v| *v += 1);
    /// assert_eq!(tree.get(&1), Some(&1));
    /// ```
    #[inline]
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, C, Ix> {
        match self.search(&key) {
            Some(node) => Entry::Occupied(OccupiedEntry::new(self, node)),
            None => Entry::Vacant(VacantEntry::new(self, key)),
        }
    }

    /// Ascending iterator over the entries whose keys are not less than `key`.
    #[inline]
    pub fn range_from(&self, key: &K) -> Range<'_, K, V, C, Ix> {
        Range::new(self, self.lower_bound(key))
    }

    /// Cursor at `key`, invalid if the key is absent.
    #[inline]
    pub fn cursor_at_key(&self, key: &K) -> Cursor<'_, K, V, C, Ix> {
        Cursor::new(self, self.search(key))
    }

    /// Cursor at the smallest key not less than `key`.
    #[inline]
    pub fn cursor_lower_bound(&self, key: &K) -> Cursor<'_, K, V, C, Ix> {
        Cursor::new(self, self.lower_bound(key))
    }

    /// Mutable cursor at the smallest key not less than `key`.
    #[inline]
    pub fn cursor_lower_bound_mut(&mut self, key: &K) -> CursorMut<'_, K, V, C, Ix> {
        let node = self.lower_bound(key);
        CursorMut::new(self, node)
    }

    /// Compare the keys stored at two nodes.
    fn node_cmp(&self, a: NodeIndex<Ix>, b: NodeIndex<Ix>) -> Ordering {
        self.cmp.compare(self.node_ref(a, Node::key), self.node_ref(b, Node::key))
    }

    /// Link a freshly allocated node into the tree.
    fn insert_inner(&mut self, z: NodeIndex<Ix>) {
        let mut y = NodeIndex::nil();
        let mut x = self.root;

        while !self.node_ref(x, Node::is_nil) {
            y = x;
            if self.node_cmp(z, x) == Ordering::Less {
                x = self.node_ref(x, Node::left);
            } else {
                x = self.node_ref(x, Node::right);
            }
        }
        self.node_mut(z, Node::set_parent(y));
        if self.node_ref(y, Node::is_nil) {
            self.root = z;
        } else if self.node_cmp(z, y) == Ordering::Less {
            self.node_mut(y, Node::set_left(z));
        } else {
            self.node_mut(y, Node::set_right(z));
        }
        self.node_mut(z, Node::set_color(Color::Red));

        self.insert_fixup(z);

        self.len = self.len.wrapping_add(1);
    }
}

impl<K, V, C, Ix> RbTree<K, V, C, Ix>
where
    Ix: IndexType,
{
    /// The node at `node` if it holds an entry.
    fn live(&self, node: NodeIndex<Ix>) -> Option<&Node<K, V, Ix>> {
        self.nodes.get(node.index()).filter(|n| !n.is_nil())
    }

    /// Place `node` into a free slot, growing the arena if there is none.
    fn alloc(&mut self, node: Node<K, V, Ix>) -> NodeIndex<Ix> {
        if let Some(node_idx) = self.free.pop() {
            self.nodes[node_idx.index()] = node;
            return node_idx;
        }
        let node_idx = NodeIndex::new(self.nodes.len());
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != node_idx,
            "Reached maximum number of nodes"
        );
        self.nodes.push(node);
        node_idx
    }

    /// Unlink a node from the tree.
    ///
    /// Nodes are relinked rather than having their payloads swapped, so no
    /// other entry changes slot.
    fn remove_inner(&mut self, z: NodeIndex<Ix>) {
        let mut y_orig_color = self.node_ref(z, Node::color);
        let x;
        if self.left_ref(z, Node::is_nil) {
            x = self.node_ref(z, Node::right);
            self.transplant(z, x);
        } else if self.right_ref(z, Node::is_nil) {
            x = self.node_ref(z, Node::left);
            self.transplant(z, x);
        } else {
            let y = self.tree_minimum(self.node_ref(z, Node::right));
            y_orig_color = self.node_ref(y, Node::color);
            x = self.node_ref(y, Node::right);
            if self.node_ref(y, Node::parent) == z {
                self.node_mut(x, Node::set_parent(y));
            } else {
                self.transplant(y, x);
                self.node_mut(y, Node::set_right(self.node_ref(z, Node::right)));
                self.right_mut(y, Node::set_parent(y));
            }
            self.transplant(z, y);
            self.node_mut(y, Node::set_left(self.node_ref(z, Node::left)));
            self.left_mut(y, Node::set_parent(y));
            self.node_mut(y, Node::set_color(self.node_ref(z, Node::color)));
        }

        if matches!(y_orig_color, Color::Black) {
            self.remove_fixup(x);
        }

        self.len = self.len.wrapping_sub(1);
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while self.parent_ref(z, Node::is_red) {
            if self.grand_parent_ref(z, Node::is_nil) {
                break;
            }
            if self.is_left_child(self.node_ref(z, Node::parent)) {
                let y = self.grand_parent_ref(z, Node::right);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_right_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.left_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.right_rotate(self.parent_ref(z, Node::parent));
                }
            } else {
                let y = self.grand_parent_ref(z, Node::left);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_left_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.right_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.left_rotate(self.parent_ref(z, Node::parent));
                }
            }
        }
        self.node_mut(self.root, Node::set_color(Color::Black));
    }

    /// Restore red-black tree properties after a remove.
    fn remove_fixup(&mut self, mut x: NodeIndex<Ix>) {
        while x != self.root && self.node_ref(x, Node::is_black) {
            let mut w;
            if self.is_left_child(x) {
                w = self.parent_ref(x, Node::right);
                if self.node_ref(w, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::right);
                }
                if self.node_ref(w, Node::is_nil) {
                    break;
                }
                if self.left_ref(w, Node::is_black) && self.right_ref(w, Node::is_black) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.right_ref(w, Node::is_black) {
                        self.left_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.right_rotate(w);
                        w = self.parent_ref(x, Node::right);
                    }
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.right_mut(w, Node::set_color(Color::Black));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            } else {
                w = self.parent_ref(x, Node::left);
                if self.node_ref(w, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::left);
                }
                if self.node_ref(w, Node::is_nil) {
                    break;
                }
                if self.right_ref(w, Node::is_black) && self.left_ref(w, Node::is_black) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.left_ref(w, Node::is_black) {
                        self.right_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.left_rotate(w);
                        w = self.parent_ref(x, Node::left);
                    }
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.left_mut(w, Node::set_color(Color::Black));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            }
        }
        self.node_mut(x, Node::set_color(Color::Black));
    }

    /// Binary tree left rotate.
    fn left_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.right_ref(x, Node::is_nil) {
            return;
        }
        trace!("left rotate at {x:?}");
        let y = self.node_ref(x, Node::right);
        self.node_mut(x, Node::set_right(self.node_ref(y, Node::left)));
        if !self.left_ref(y, Node::is_nil) {
            self.left_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_left(x));
    }

    /// Binary tree right rotate.
    fn right_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.left_ref(x, Node::is_nil) {
            return;
        }
        trace!("right rotate at {x:?}");
        let y = self.node_ref(x, Node::left);
        self.node_mut(x, Node::set_left(self.node_ref(y, Node::right)));
        if !self.right_ref(y, Node::is_nil) {
            self.right_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_right(x));
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, Node::set_parent(self.node_ref(x, Node::parent)));
        if self.parent_ref(x, Node::is_nil) {
            self.root = y;
        } else if self.is_left_child(x) {
            self.parent_mut(x, Node::set_left(y));
        } else {
            self.parent_mut(x, Node::set_right(y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Find the node with the minimum key in the subtree at `x`.
    fn tree_minimum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.left_ref(x, Node::is_nil) {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Find the node with the maximum key in the subtree at `x`.
    fn tree_maximum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.right_ref(x, Node::is_nil) {
            x = self.node_ref(x, Node::right);
        }
        x
    }

    /// Replace one subtree as a child of its parent with another subtree.
    fn transplant(&mut self, u: NodeIndex<Ix>, v: NodeIndex<Ix>) {
        if self.parent_ref(u, Node::is_nil) {
            self.root = v;
        } else if self.is_left_child(u) {
            self.parent_mut(u, Node::set_left(v));
        } else {
            self.parent_mut(u, Node::set_right(v));
        }
        self.node_mut(v, Node::set_parent(self.node_ref(u, Node::parent)));
    }

    /// Check if a node is a left child of its parent.
    fn is_left_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::left) == node
    }

    /// Check if a node is a right child of its parent.
    fn is_right_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::right) == node
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a, K, V, C, Ix> RbTree<K, V, C, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    pub(crate) fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&self.nodes[idx])
    }

    pub(crate) fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&self.nodes[idx])
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn grand_parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&self.nodes[grand_parent_idx])
    }

    fn left_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&mut self.nodes[idx])
    }

    fn right_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&mut self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }

    fn grand_parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&mut self.nodes[grand_parent_idx])
    }
}

impl<K, V, C, Ix> fmt::Debug for RbTree<K, V, C, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C, Ix> IntoIterator for &'a RbTree<K, V, C, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C, Ix> IntoIterator for RbTree<K, V, C, Ix>
where
    Ix: IndexType,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let mut order = Vec::with_capacity(self.len);
        let mut cur = self.first();
        while let Some(x) = cur {
            order.push(x);
            cur = self.successor(x);
        }
        let entries: Vec<_> = order
            .into_iter()
            .map(|x| self.nodes[x.index()].vacate())
            .collect();
        IntoIter::new(entries)
    }
}
