use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rb_ordered_map::{Locking, Map, NaturalOrder, RbTree, Synchronized, Unsynchronized};
use std::collections::BTreeMap;
use std::hint::black_box;

struct KeyGenerator {
    rng: StdRng,
}

impl KeyGenerator {
    fn new() -> Self {
        Self {
            rng: StdRng::from_seed([0; 32]),
        }
    }

    /// `count` distinct keys in random order.
    fn shuffled(&mut self, count: usize) -> Vec<u32> {
        let mut keys: Vec<u32> = (0..count as u32).map(|k| k * 2).collect();
        keys.shuffle(&mut self.rng);
        keys
    }

    fn probes(&mut self, count: usize) -> Vec<u32> {
        let limit = count as u32 * 2;
        std::iter::repeat_with(|| self.rng.gen_range(0..=limit))
            .take(count)
            .collect()
    }
}

fn filled_tree(keys: &[u32]) -> RbTree<u32, ()> {
    let mut tree = RbTree::new();
    for k in keys {
        tree.insert(*k, ());
    }
    tree
}

// insert helper fn
fn rb_tree_insert(count: usize, bench: &mut Bencher) {
    let keys = KeyGenerator::new().shuffled(count);
    bench.iter(|| {
        let mut tree = RbTree::new();
        for k in keys.iter().copied() {
            black_box(tree.insert(k, ()));
        }
    });
}

// insert and remove helper fn
fn rb_tree_insert_remove(count: usize, bench: &mut Bencher) {
    let keys = KeyGenerator::new().shuffled(count);
    bench.iter(|| {
        let mut tree = RbTree::new();
        for k in keys.iter().copied() {
            black_box(tree.insert(k, ()));
        }
        for k in &keys {
            black_box(tree.remove(k));
        }
    });
}

// lower_bound helper fn
fn rb_tree_lower_bound(count: usize, bench: &mut Bencher) {
    let mut gen = KeyGenerator::new();
    let tree = filled_tree(&gen.shuffled(count));
    let probes = gen.probes(count);
    bench.iter(|| {
        for p in &probes {
            black_box(tree.lower_bound(p));
        }
    });
}

fn btree_map_lower_bound(count: usize, bench: &mut Bencher) {
    let mut gen = KeyGenerator::new();
    let map: BTreeMap<_, _> = gen.shuffled(count).into_iter().map(|k| (k, ())).collect();
    let probes = gen.probes(count);
    bench.iter(|| {
        for p in &probes {
            black_box(map.range(p..).next());
        }
    });
}

// full in-order walk helper fn
fn rb_tree_iter(count: usize, bench: &mut Bencher) {
    let tree = filled_tree(&KeyGenerator::new().shuffled(count));
    bench.iter(|| black_box(tree.iter().count()));
}

fn map_insert<S: Locking>(count: usize, bench: &mut Bencher) {
    let keys = KeyGenerator::new().shuffled(count);
    bench.iter(|| {
        let map: Map<u32, (), NaturalOrder, S> = Map::default();
        for k in keys.iter().copied() {
            black_box(map.insert(k, ()));
        }
    });
}

fn bench_rb_tree_insert(c: &mut Criterion) {
    c.bench_function("bench_rb_tree_insert_100", |b| rb_tree_insert(100, b));
    c.bench_function("bench_rb_tree_insert_1000", |b| rb_tree_insert(1000, b));
    c.bench_function("bench_rb_tree_insert_10,000", |b| {
        rb_tree_insert(10_000, b)
    });
    c.bench_function("bench_rb_tree_insert_100,000", |b| {
        rb_tree_insert(100_000, b)
    });
}

fn bench_rb_tree_insert_remove(c: &mut Criterion) {
    c.bench_function("bench_rb_tree_insert_remove_100", |b| {
        rb_tree_insert_remove(100, b)
    });
    c.bench_function("bench_rb_tree_insert_remove_1000", |b| {
        rb_tree_insert_remove(1000, b)
    });
    c.bench_function("bench_rb_tree_insert_remove_10,000", |b| {
        rb_tree_insert_remove(10_000, b)
    });
    c.bench_function("bench_rb_tree_insert_remove_100,000", |b| {
        rb_tree_insert_remove(100_000, b)
    });
}

fn bench_map_locking(c: &mut Criterion) {
    c.bench_function("bench_map_unsynchronized_insert_10,000", |b| {
        map_insert::<Unsynchronized>(10_000, b)
    });
    c.bench_function("bench_map_synchronized_insert_10,000", |b| {
        map_insert::<Synchronized>(10_000, b)
    });
}

fn bench_lower_bound(c: &mut Criterion) {
    c.bench_function("bench_rb_tree_lower_bound_1000", |b| {
        rb_tree_lower_bound(1000, b)
    });
    c.bench_function("bench_rb_tree_lower_bound_100,000", |b| {
        rb_tree_lower_bound(100_000, b)
    });
    c.bench_function("bench_btree_map_lower_bound_1000", |b| {
        btree_map_lower_bound(1000, b)
    });
    c.bench_function("bench_btree_map_lower_bound_100,000", |b| {
        btree_map_lower_bound(100_000, b)
    });
}

fn bench_rb_tree_iter(c: &mut Criterion) {
    c.bench_function("bench_rb_tree_iter_1000", |b| rb_tree_iter(1000, b));
    c.bench_function("bench_rb_tree_iter_100,000", |b| rb_tree_iter(100_000, b));
}

fn criterion_config() -> Criterion {
    Criterion::default().configure_from_args().without_plots()
}

criterion_group! {
    name = benches_basic_op;
    config = criterion_config();
    targets = bench_rb_tree_insert, bench_rb_tree_insert_remove, bench_map_locking
}

criterion_group! {
    name = benches_search;
    config = criterion_config();
    targets = bench_lower_bound, bench_rb_tree_iter
}

criterion_main!(benches_basic_op, benches_search);
