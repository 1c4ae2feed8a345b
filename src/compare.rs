//! Key ordering used by the tree.
//!
//! A comparator must be a strict weak ordering that stays consistent for the
//! whole lifetime of the container. It is fixed at construction; there is no
//! way to swap it on a populated tree.

use std::cmp::Ordering;

/// Total order over keys of type `K`.
pub trait Comparator<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Inverts another comparator.
///
/// # Example
/// ```rust
/// use rb_ordered_map::{NaturalOrder, RbTree, Reverse};
///
/// let mut tree = RbTree::with_comparator(Reverse(NaturalOrder));
/// tree.insert(1, "a");
/// tree.insert(3, "c");
/// tree.insert(2, "b");
/// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

impl<K: ?Sized, C: Comparator<K>> Comparator<K> for Reverse<C> {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn closures_are_comparators() {
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        assert_eq!(by_len.compare(&"ab", &"abc"), Ordering::Less);
        assert_eq!(Reverse(by_len).compare(&"ab", &"abc"), Ordering::Greater);
    }

    #[test]
    fn natural_order_follows_ord() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(NaturalOrder.compare("b", "a"), Ordering::Greater);
        assert_eq!(NaturalOrder.compare(&7, &7), Ordering::Equal);
    }
}
