use std::fmt;

use crate::compare::{Comparator, NaturalOrder};
use crate::map::Map;
use crate::sync::{Locking, Synchronized, Unsynchronized};
use crate::tree::RbTree;

/// An ordered set of unique keys: a [`Map`] without payload.
///
/// # Example
/// ```rust
/// use rb_ordered_map::Set;
///
/// let set: Set<i32> = [1, 5, 3, 4, 2].into_iter().collect();
/// assert!(!set.insert(3));
/// assert_eq!(set.to_vec(), vec![1, 2, 3, 4, 5]);
/// assert_eq!(set.lower_bound(&6), None);
/// ```
pub struct Set<K, C = NaturalOrder, S: Locking = Unsynchronized> {
    map: Map<K, (), C, S>,
}

/// A [`Set`] guarded by a reader-writer lock.
pub type SyncSet<K, C = NaturalOrder> = Set<K, C, Synchronized>;

impl<K> Set<K>
where
    K: Ord,
{
    /// Create an empty, unsynchronized set ordered by `K`'s [`Ord`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, C, S> Set<K, C, S>
where
    C: Comparator<K>,
    S: Locking,
{
    /// Create an empty set ordered by `cmp`.
    #[inline]
    #[must_use]
    pub fn with_comparator(cmp: C) -> Self {
        Set {
            map: Map::with_comparator(cmp),
        }
    }

    /// Add a key. Returns `false` if it was already present.
    pub fn insert(&self, key: K) -> bool {
        self.map.write(|tree| {
            if tree.contains_key(&key) {
                return false;
            }
            let _ = tree.insert(key, ());
            true
        })
    }

    /// Return `true` if the key is present.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Remove a key. Returns `false` if it was absent.
    #[inline]
    pub fn remove(&self, key: &K) -> bool {
        self.map.remove(key).is_some()
    }

    /// Smallest key.
    #[inline]
    pub fn first(&self) -> Option<K>
    where
        K: Clone,
    {
        self.map.first().map(|(k, _)| k)
    }

    /// Largest key.
    #[inline]
    pub fn last(&self) -> Option<K>
    where
        K: Clone,
    {
        self.map.last().map(|(k, _)| k)
    }

    /// Smallest key not less than `key`.
    #[inline]
    pub fn lower_bound(&self, key: &K) -> Option<K>
    where
        K: Clone,
    {
        self.map.lower_bound(key).map(|(k, _)| k)
    }

    /// Smallest key strictly greater than `key`.
    #[inline]
    pub fn upper_bound(&self, key: &K) -> Option<K>
    where
        K: Clone,
    {
        self.map.upper_bound(key).map(|(k, _)| k)
    }

    /// Return the number of keys in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Return `true` if the set contains no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove all keys.
    #[inline]
    pub fn clear(&self) {
        self.map.clear();
    }

    /// Visit keys in ascending order until `visitor` returns `false`.
    #[inline]
    pub fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(&K) -> bool,
    {
        self.map.traverse(|k, _| visitor(k));
    }

    /// All keys in ascending order.
    pub fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.map.read(|tree| tree.keys().cloned().collect())
    }

    /// Run `f` with shared access to the underlying tree.
    #[inline]
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&RbTree<K, (), C>) -> R,
    {
        self.map.read(f)
    }
}

impl<K, C, S> Default for Set<K, C, S>
where
    C: Comparator<K> + Default,
    S: Locking,
{
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, C, S> Extend<K> for Set<K, C, S>
where
    C: Comparator<K>,
    S: Locking,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.map.extend(iter.into_iter().map(|k| (k, ())));
    }
}

impl<K, C, S> FromIterator<K> for Set<K, C, S>
where
    C: Comparator<K> + Default,
    S: Locking,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<K, C, S> fmt::Debug for Set<K, C, S>
where
    K: fmt::Debug,
    C: Comparator<K>,
    S: Locking,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.read(|tree| f.debug_set().entries(tree.keys()).finish())
    }
}
