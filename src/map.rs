use std::fmt;

use log::debug;

use crate::compare::{Comparator, NaturalOrder};
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::index::NodeIndex;
use crate::sync::{Lock, Locking, Synchronized, Unsynchronized};
use crate::tree::RbTree;

/// An ordered map with unique keys, optionally safe to share across threads.
///
/// Every method takes `&self` and holds the lock for exactly that one call.
/// Values are handed out by clone or through closures so that no reference
/// outlives the lock; cursors are available inside [`Map::read`] and
/// [`Map::write`].
///
/// # Example
/// ```rust
/// use rb_ordered_map::Map;
///
/// let map = Map::new();
/// assert_eq!(map.insert(3, "c"), None);
/// assert_eq!(map.insert(1, "a"), None);
/// assert_eq!(map.insert(3, "C"), Some("c"));
/// assert_eq!(map.get(&3), Some("C"));
/// assert_eq!(map.first(), Some((1, "a")));
/// assert_eq!(map.len(), 2);
/// ```
pub struct Map<K, V, C = NaturalOrder, S: Locking = Unsynchronized> {
    tree: S::Cell<RbTree<K, V, C>>,
}

/// A [`Map`] guarded by a reader-writer lock.
pub type SyncMap<K, V, C = NaturalOrder> = Map<K, V, C, Synchronized>;

impl<K, V> Map<K, V>
where
    K: Ord,
{
    /// Create an empty, unsynchronized map ordered by `K`'s [`Ord`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C, S> Map<K, V, C, S>
where
    C: Comparator<K>,
    S: Locking,
{
    /// Create an empty map ordered by `cmp`.
    #[inline]
    #[must_use]
    pub fn with_comparator(cmp: C) -> Self {
        debug!("creating {} map", S::NAME);
        Map {
            tree: Lock::new(RbTree::with_comparator(cmp)),
        }
    }

    /// Insert a key-value pair. If the key exists, overwrite and return the
    /// previous value.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.tree.write(|tree| match tree.search(&key) {
            Some(node) => tree.replace_value_at(node, value),
            None => {
                let _ = tree.insert(key, value);
                None
            }
        })
    }

    /// Overwrite the value of a key that must already be present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] and leaves the map unchanged if the key
    /// is absent.
    pub fn replace(&self, key: &K, value: V) -> Result<V> {
        self.tree.write(|tree| {
            let node = tree.search(key).ok_or(Error::KeyNotFound)?;
            tree.replace_value_at(node, value).ok_or(Error::KeyNotFound)
        })
    }

    /// Return a clone of the value corresponding to the key.
    #[inline]
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.tree.read(|tree| tree.get(key).cloned())
    }

    /// Run `f` on the value corresponding to the key.
    #[inline]
    pub fn get_with<F, R>(&self, key: &K, f: F) -> Option<R>
    where
        F: FnOnce(&V) -> R,
    {
        self.tree.read(|tree| tree.get(key).map(f))
    }

    /// Return `true` if the key is present.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.read(|tree| tree.contains_key(key))
    }

    /// Handle of the entry for `key`, valid until that entry is removed.
    #[inline]
    pub fn find(&self, key: &K) -> Option<NodeIndex> {
        self.tree.read(|tree| tree.search(key))
    }

    /// Remove a key, returning its value if it was present.
    #[inline]
    pub fn remove(&self, key: &K) -> Option<V> {
        self.tree.write(|tree| tree.remove(key))
    }

    /// Remove the entry behind a handle from [`Map::find`] or a cursor.
    #[inline]
    pub fn remove_at(&self, node: NodeIndex) -> Option<(K, V)> {
        self.tree.write(|tree| tree.delete(node))
    }

    /// Entry with the smallest key.
    #[inline]
    pub fn first(&self) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.tree.read(|tree| tree.first_key_value().map(cloned_entry))
    }

    /// Entry with the largest key.
    #[inline]
    pub fn last(&self) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.tree.read(|tree| tree.last_key_value().map(cloned_entry))
    }

    /// Entry with the smallest key not less than `key`.
    #[inline]
    pub fn lower_bound(&self, key: &K) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.tree.read(|tree| {
            tree.lower_bound(key)
                .and_then(|node| tree.get_key_value_at(node))
                .map(cloned_entry)
        })
    }

    /// Entry with the smallest key strictly greater than `key`.
    #[inline]
    pub fn upper_bound(&self, key: &K) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.tree.read(|tree| {
            tree.upper_bound(key)
                .and_then(|node| tree.get_key_value_at(node))
                .map(cloned_entry)
        })
    }

    /// Return the number of elements in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.read(RbTree::len)
    }

    /// Return `true` if the map contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.read(RbTree::is_empty)
    }

    /// Remove all elements from the map.
    #[inline]
    pub fn clear(&self) {
        self.tree.write(RbTree::clear);
    }

    /// Visit entries in ascending key order until `visitor` returns `false`.
    #[inline]
    pub fn traverse<F>(&self, visitor: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.tree.read(|tree| tree.traverse(visitor));
    }

    /// Run `f` with shared access to the underlying tree.
    ///
    /// Iterators and cursors created inside `f` cannot escape it, so they
    /// never observe a concurrent mutation.
    #[inline]
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&RbTree<K, V, C>) -> R,
    {
        self.tree.read(f)
    }

    /// Run `f` with exclusive access to the underlying tree.
    #[inline]
    pub fn write<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut RbTree<K, V, C>) -> R,
    {
        self.tree.write(f)
    }

    /// The underlying tree, reached through a unique borrow without locking.
    #[inline]
    pub fn get_mut(&mut self) -> &mut RbTree<K, V, C> {
        self.tree.get_mut()
    }

    /// Unwrap the underlying tree.
    #[inline]
    pub fn into_inner(self) -> RbTree<K, V, C> {
        self.tree.into_inner()
    }
}

fn cloned_entry<K: Clone, V: Clone>((k, v): (&K, &V)) -> (K, V) {
    (k.clone(), v.clone())
}

impl<K, V, C, S> Default for Map<K, V, C, S>
where
    C: Comparator<K> + Default,
    S: Locking,
{
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C, S> Extend<(K, V)> for Map<K, V, C, S>
where
    C: Comparator<K>,
    S: Locking,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let tree = self.get_mut();
        for (key, value) in iter {
            match tree.entry(key) {
                Entry::Occupied(mut entry) => {
                    let _ = entry.insert(value);
                }
                Entry::Vacant(entry) => {
                    let _ = entry.insert(value);
                }
            }
        }
    }
}

impl<K, V, C, S> FromIterator<(K, V)> for Map<K, V, C, S>
where
    C: Comparator<K> + Default,
    S: Locking,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C, S> fmt::Debug for Map<K, V, C, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Comparator<K>,
    S: Locking,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.read(|tree| f.debug_map().entries(tree.iter()).finish())
    }
}
