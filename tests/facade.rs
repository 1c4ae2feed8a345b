use std::thread;

use rb_ordered_map::{Error, Map, NaturalOrder, Reverse, Set, SyncMap, SyncSet};

#[test]
fn map_insert_overwrites_and_reports_previous() {
    let map = Map::new();
    assert_eq!(map.insert("b", 2), None);
    assert_eq!(map.insert("a", 1), None);
    assert_eq!(map.insert("b", 20), Some(2));
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&"b"), Some(20));
    assert_eq!(map.get_with(&"a", |v| v * 100), Some(100));
    assert_eq!(map.get(&"c"), None);
}

#[test]
fn map_replace_requires_existing_key() {
    let map = Map::new();
    map.insert(1, "one");
    assert_eq!(map.replace(&1, "uno"), Ok("one"));
    assert_eq!(map.replace(&2, "dos"), Err(Error::KeyNotFound));
    assert!(!map.contains_key(&2));
    assert_eq!(map.len(), 1);
}

#[test]
fn map_bounds_and_ends() {
    let map: Map<i32, char> = [(10, 'a'), (20, 'b'), (30, 'c')].into_iter().collect();
    assert_eq!(map.first(), Some((10, 'a')));
    assert_eq!(map.last(), Some((30, 'c')));
    assert_eq!(map.lower_bound(&20), Some((20, 'b')));
    assert_eq!(map.upper_bound(&20), Some((30, 'c')));
    assert_eq!(map.lower_bound(&31), None);
    assert_eq!(map.upper_bound(&5), Some((10, 'a')));
}

#[test]
fn map_handles_remove_the_right_entry() {
    let map: Map<i32, i32> = (0..10).map(|k| (k, k * k)).collect();
    let seven = map.find(&7).unwrap();
    assert_eq!(map.remove(&3), Some(9));
    map.insert(42, 0);
    assert_eq!(map.remove_at(seven), Some((7, 49)));
    assert_eq!(map.remove_at(seven), None);
    assert_eq!(map.find(&7), None);
    assert_eq!(map.len(), 9);
}

#[test]
fn map_traverse_and_clear() {
    let map: Map<i32, i32> = (0..5).rev().map(|k| (k, -k)).collect();
    let mut seen = vec![];
    map.traverse(|k, v| {
        seen.push((*k, *v));
        true
    });
    assert_eq!(seen, vec![(0, 0), (1, -1), (2, -2), (3, -3), (4, -4)]);

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.first(), None);
    assert_eq!(format!("{map:?}"), "{}");
}

#[test]
fn map_cursors_inside_write() {
    let map: Map<i32, i32> = (1..=6).map(|k| (k, k)).collect();
    map.write(|tree| {
        let mut cursor = tree.cursor_front_mut();
        while cursor.is_valid() {
            if cursor.key().map(|k| k % 2 == 0).unwrap_or(false) {
                cursor.remove_current().unwrap();
            } else {
                *cursor.value_mut().unwrap() *= 10;
                cursor.move_next().unwrap();
            }
        }
    });
    assert_eq!(format!("{map:?}"), "{1: 10, 3: 30, 5: 50}");
    assert_eq!(map.into_inner().into_iter().count(), 3);
}

#[test]
fn map_with_reverse_comparator() {
    let map: Map<i32, (), _> = Map::with_comparator(Reverse(NaturalOrder));
    for k in [2, 9, 4] {
        map.insert(k, ());
    }
    assert_eq!(map.first(), Some((9, ())));
    assert_eq!(map.lower_bound(&5), Some((4, ())));
}

#[test]
fn set_keeps_unique_sorted_keys() {
    let set = Set::new();
    for k in [1, 5, 3, 4, 2] {
        assert!(set.insert(k));
    }
    assert!(!set.insert(3));
    assert_eq!(set.len(), 5);
    assert_eq!(set.to_vec(), vec![1, 2, 3, 4, 5]);
    assert!(set.contains(&4));
    assert!(set.remove(&4));
    assert!(!set.remove(&4));
    assert_eq!(set.lower_bound(&4), Some(5));
    assert_eq!(set.upper_bound(&5), None);
    assert_eq!((set.first(), set.last()), (Some(1), Some(5)));
    assert_eq!(format!("{set:?}"), "{1, 2, 3, 5}");

    let mut visited = vec![];
    set.traverse(|k| {
        visited.push(*k);
        *k < 2
    });
    assert_eq!(visited, vec![1, 2]);

    set.clear();
    assert!(set.is_empty());
}

#[test]
fn sync_map_is_shared_across_threads() {
    const THREADS: i32 = 8;
    const PER_THREAD: i32 = 500;

    let map: SyncMap<i32, i32> = SyncMap::default();
    thread::scope(|s| {
        for t in 0..THREADS {
            let map = &map;
            s.spawn(move || {
                for i in 0..PER_THREAD {
                    let k = t * PER_THREAD + i;
                    assert_eq!(map.insert(k, t), None);
                    assert_eq!(map.get(&k), Some(t));
                }
                for i in (0..PER_THREAD).step_by(2) {
                    assert_eq!(map.remove(&(t * PER_THREAD + i)), Some(t));
                }
            });
        }
    });

    assert_eq!(map.len(), (THREADS * PER_THREAD / 2) as usize);
    map.read(|tree| {
        assert!(tree.keys().all(|k| k % 2 == 1));
        assert!(tree.keys().zip(tree.keys().skip(1)).all(|(a, b)| a < b));
    });
}

#[test]
fn sync_set_readers_see_consistent_snapshots() {
    let set: SyncSet<u32> = (0..100).collect();
    thread::scope(|s| {
        s.spawn(|| {
            for k in 100..1000 {
                set.insert(k);
            }
        });
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..50 {
                    let snapshot = set.to_vec();
                    assert!(snapshot.windows(2).all(|w| w[0] < w[1]));
                    assert!(snapshot.len() >= 100);
                }
            });
        }
    });
    assert_eq!(set.len(), 1000);
}
