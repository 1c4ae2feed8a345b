//! Randomized comparison of the tree against `BTreeMap`.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rb_ordered_map::{Entry, Map, NaturalOrder, RbTree, Reverse};

#[derive(Debug, Clone)]
enum Op {
    Insert(i16, i32),
    Remove(i16),
    Get(i16),
    LowerBound(i16),
    UpperBound(i16),
}

// Narrow keys so that removals and overwrites actually hit.
fn operations(max_ops: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            3 => (any::<i16>().prop_map(|k| k % 256), any::<i32>())
                .prop_map(|(k, v)| Op::Insert(k, v)),
            2 => any::<i16>().prop_map(|k| Op::Remove(k % 256)),
            1 => any::<i16>().prop_map(|k| Op::Get(k % 256)),
            1 => any::<i16>().prop_map(|k| Op::LowerBound(k % 256)),
            1 => any::<i16>().prop_map(|k| Op::UpperBound(k % 256)),
        ],
        0..max_ops,
    )
}

fn upsert<K: Ord, V>(tree: &mut RbTree<K, V>, key: K, value: V) -> Option<V> {
    match tree.entry(key) {
        Entry::Occupied(mut entry) => Some(entry.insert(value)),
        Entry::Vacant(entry) => {
            entry.insert(value);
            None
        }
    }
}

proptest! {
    #[test]
    fn matches_btree_map(ops in operations(400)) {
        let mut tree = RbTree::new();
        let mut oracle = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(upsert(&mut tree, k, v), oracle.insert(k, v));
                }
                Op::Remove(k) => {
                    prop_assert_eq!(tree.remove(&k), oracle.remove(&k));
                }
                Op::Get(k) => {
                    prop_assert_eq!(tree.get(&k), oracle.get(&k));
                }
                Op::LowerBound(k) => {
                    let actual = tree.lower_bound(&k).and_then(|x| tree.get_key_value_at(x));
                    prop_assert_eq!(actual, oracle.range(k..).next());
                }
                Op::UpperBound(k) => {
                    let actual = tree.upper_bound(&k).and_then(|x| tree.get_key_value_at(x));
                    let expect = oracle
                        .range((std::ops::Bound::Excluded(k), std::ops::Bound::Unbounded))
                        .next();
                    prop_assert_eq!(actual, expect);
                }
            }
            prop_assert_eq!(tree.len(), oracle.len());
        }

        prop_assert!(tree.iter().eq(oracle.iter()));
        prop_assert!(tree.iter().rev().eq(oracle.iter().rev()));
    }

    #[test]
    fn iteration_is_sorted_and_complete(keys in prop::collection::hash_set(any::<i32>(), 0..300)) {
        let mut tree = RbTree::new();
        for k in &keys {
            tree.insert(*k, ());
        }
        let mut expect: Vec<_> = keys.into_iter().collect();
        expect.sort_unstable();

        prop_assert_eq!(tree.keys().copied().collect::<Vec<_>>(), expect.clone());
        prop_assert_eq!(tree.iter().len(), expect.len());

        let mut walked = vec![];
        let mut cursor = tree.cursor_back();
        while let Ok(k) = cursor.key() {
            walked.push(*k);
            cursor.move_prev().unwrap();
        }
        walked.reverse();
        prop_assert_eq!(walked, expect);
    }

    #[test]
    fn removed_keys_are_gone(
        keys in prop::collection::hash_set(any::<i32>(), 1..300),
        stride in 1usize..5,
    ) {
        let mut tree = RbTree::new();
        for k in &keys {
            tree.insert(*k, *k);
        }
        let keys: Vec<_> = keys.into_iter().collect();
        let removed: Vec<_> = keys.iter().copied().step_by(stride).collect();
        for k in &removed {
            prop_assert_eq!(tree.remove(k), Some(*k));
        }
        for k in &removed {
            prop_assert!(!tree.contains_key(k));
        }
        prop_assert_eq!(tree.len(), keys.len() - removed.len());
    }

    #[test]
    fn reverse_order_mirrors_natural_order(keys in prop::collection::vec(any::<i32>(), 0..200)) {
        let natural: Map<i32, ()> = keys.iter().map(|k| (*k, ())).collect();
        let reversed: Map<i32, (), Reverse<NaturalOrder>> = keys.iter().map(|k| (*k, ())).collect();

        let mut forward = natural.read(|t| t.keys().copied().collect::<Vec<_>>());
        forward.reverse();
        let backward = reversed.read(|t| t.keys().copied().collect::<Vec<_>>());
        prop_assert_eq!(forward, backward);
    }
}
