extern crate garance;

use criterion::{Criterion, criterion_group, criterion_main};

fn insert(c: &mut Criterion) {
    c.bench_function("garance_insert", |b| {
        b.iter(|| {
            let mut tree = garance::Tree::<usize, ()>::new();
            for k in 0..100 {
                tree.insert(k, ());
            }
            tree
        })
    });
    c.bench_function("rbtree_insert", |b| {
        b.iter(|| {
            let mut tree = rbtree::RBTree::<usize, ()>::new();
            for k in 0..100 {
                tree.insert(k, ());
            }
            tree
        })
    });
}

fn iterate(c: &mut Criterion) {
    let tree: garance::Tree<usize, usize> = (0..1000).map(|k| (k, k)).collect();
    c.bench_function("garance_in_order", |b| {
        b.iter(|| tree.iter().map(|(_, v)| *v).sum::<usize>())
    });
}

criterion_group!(benches, insert, iterate);
criterion_main!(benches);
