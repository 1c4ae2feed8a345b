use std::fmt;
use std::iter::FusedIterator;

use crate::index::{IndexType, NodeIndex};
use crate::tree::RbTree;

/// An iterator over the entries of a `RbTree`, sorted by key.
///
/// Walks forward by successor and backward by predecessor links.
pub struct Iter<'a, K, V, C, Ix> {
    /// Reference to the tree
    tree: &'a RbTree<K, V, C, Ix>,
    /// Next node from the front
    front: Option<NodeIndex<Ix>>,
    /// Next node from the back
    back: Option<NodeIndex<Ix>>,
    /// Entries not yet yielded from either end
    remaining: usize,
}

impl<'a, K, V, C, Ix> Iter<'a, K, V, C, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(tree: &'a RbTree<K, V, C, Ix>) -> Self {
        Iter {
            tree,
            front: tree.first(),
            back: tree.last(),
            remaining: tree.len(),
        }
    }
}

impl<K, V, C, Ix: IndexType> Clone for Iter<'_, K, V, C, Ix> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K, V, C, Ix> fmt::Debug for Iter<'_, K, V, C, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V, C, Ix> Iterator for Iter<'a, K, V, C, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let x = self.front?;
        self.front = tree.successor(x);
        self.remaining -= 1;
        tree.get_key_value_at(x)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C, Ix> DoubleEndedIterator for Iter<'_, K, V, C, Ix>
where
    Ix: IndexType,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let x = self.back?;
        self.back = tree.predecessor(x);
        self.remaining -= 1;
        tree.get_key_value_at(x)
    }
}

impl<K, V, C, Ix> ExactSizeIterator for Iter<'_, K, V, C, Ix> where Ix: IndexType {}

impl<K, V, C, Ix> FusedIterator for Iter<'_, K, V, C, Ix> where Ix: IndexType {}

/// An iterator over the keys of a `RbTree`.
pub struct Keys<'a, K, V, C, Ix> {
    inner: Iter<'a, K, V, C, Ix>,
}

impl<K, V, C, Ix: IndexType> Clone for Keys<'_, K, V, C, Ix> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V, C, Ix> Keys<'a, K, V, C, Ix> {
    pub(crate) fn new(inner: Iter<'a, K, V, C, Ix>) -> Self {
        Keys { inner }
    }
}

impl<'a, K, V, C, Ix> Iterator for Keys<'a, K, V, C, Ix>
where
    Ix: IndexType,
{
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C, Ix> DoubleEndedIterator for Keys<'_, K, V, C, Ix>
where
    Ix: IndexType,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V, C, Ix> ExactSizeIterator for Keys<'_, K, V, C, Ix> where Ix: IndexType {}

/// An iterator over the values of a `RbTree`, in key order.
pub struct Values<'a, K, V, C, Ix> {
    inner: Iter<'a, K, V, C, Ix>,
}

impl<K, V, C, Ix: IndexType> Clone for Values<'_, K, V, C, Ix> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V, C, Ix> Values<'a, K, V, C, Ix> {
    pub(crate) fn new(inner: Iter<'a, K, V, C, Ix>) -> Self {
        Values { inner }
    }
}

impl<'a, K, V, C, Ix> Iterator for Values<'a, K, V, C, Ix>
where
    Ix: IndexType,
{
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C, Ix> DoubleEndedIterator for Values<'_, K, V, C, Ix>
where
    Ix: IndexType,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V, C, Ix> ExactSizeIterator for Values<'_, K, V, C, Ix> where Ix: IndexType {}

/// An ascending iterator that starts at a lower bound.
pub struct Range<'a, K, V, C, Ix> {
    /// Reference to the tree
    tree: &'a RbTree<K, V, C, Ix>,
    /// Next node to yield
    cur: Option<NodeIndex<Ix>>,
}

impl<'a, K, V, C, Ix> Range<'a, K, V, C, Ix> {
    pub(crate) fn new(tree: &'a RbTree<K, V, C, Ix>, start: Option<NodeIndex<Ix>>) -> Self {
        Range { tree, cur: start }
    }
}

impl<K, V, C, Ix: fmt::Debug> fmt::Debug for Range<'_, K, V, C, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Range").field("cur", &self.cur).finish()
    }
}

impl<'a, K, V, C, Ix> Iterator for Range<'a, K, V, C, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let x = self.cur?;
        self.cur = tree.successor(x);
        tree.get_key_value_at(x)
    }
}

impl<K, V, C, Ix> FusedIterator for Range<'_, K, V, C, Ix> where Ix: IndexType {}

/// An owning iterator over the entries of a `RbTree`, sorted by key.
#[derive(Debug)]
pub struct IntoIter<K, V> {
    inner: std::vec::IntoIter<(K, V)>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(entries: Vec<(K, V)>) -> Self {
        IntoIter {
            inner: entries.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
