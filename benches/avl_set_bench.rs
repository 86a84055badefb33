//! AvlSet operation benchmarks.
//!
//! Measures incremental construction, membership tests, removal, bounded
//! search, and full iteration across set sizes. Input element order is a
//! deterministic shuffle so the tree exercises its rebalancing paths
//! without a randomness dependency.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use threadset::AvlSet;

const SIZES: [usize; 3] = [100, 1_000, 10_000];

/// Deterministically shuffled 0..size, driven by a multiplicative hash.
fn generate_shuffled_vec(size: usize) -> Vec<usize> {
    let mut elements: Vec<usize> = (0..size).collect();
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    for i in (1..elements.len()).rev() {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let j = usize::try_from(state >> 33).expect("33-bit shift fits usize") % (i + 1);
        elements.swap(i, j);
    }
    elements
}

fn batch_size_for(size: usize) -> BatchSize {
    if size < 1_000 {
        BatchSize::SmallInput
    } else {
        BatchSize::LargeInput
    }
}

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("avl_set_insert");

    for size in SIZES {
        let base_vec = generate_shuffled_vec(size);
        group.bench_with_input(BenchmarkId::new("insert", size), &size, |bencher, &size| {
            bencher.iter_batched(
                || base_vec.clone(),
                |elements| {
                    let mut set = AvlSet::new();
                    for element in elements {
                        set.insert(black_box(element));
                    }
                    black_box(set)
                },
                batch_size_for(size),
            );
        });
    }

    group.finish();
}

fn benchmark_contains(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("avl_set_contains");

    for size in SIZES {
        let set: AvlSet<usize> = generate_shuffled_vec(size).into_iter().collect();
        group.bench_with_input(BenchmarkId::new("contains", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut hits = 0_usize;
                for element in 0..size {
                    hits += usize::from(set.contains(black_box(&element)));
                }
                black_box(hits)
            });
        });
    }

    group.finish();
}

fn benchmark_remove(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("avl_set_remove");

    for size in SIZES {
        let base_vec = generate_shuffled_vec(size);
        let base_set: AvlSet<usize> = base_vec.iter().copied().collect();
        group.bench_with_input(BenchmarkId::new("remove", size), &size, |bencher, &size| {
            bencher.iter_batched(
                || (base_set.clone(), base_vec.clone()),
                |(mut set, elements)| {
                    for element in elements {
                        set.remove(black_box(&element));
                    }
                    black_box(set)
                },
                batch_size_for(size),
            );
        });
    }

    group.finish();
}

fn benchmark_lower_bound(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("avl_set_lower_bound");

    for size in SIZES {
        // Only even elements are present, so half the queries fall between
        // neighbors.
        let set: AvlSet<usize> = (0..size).map(|element| element * 2).collect();
        group.bench_with_input(
            BenchmarkId::new("lower_bound", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut found = 0_usize;
                    for query in 0..size {
                        found += usize::from(!set.lower_bound(black_box(&query)).is_end());
                    }
                    black_box(found)
                });
            },
        );
    }

    group.finish();
}

fn benchmark_iterate(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("avl_set_iterate");

    for size in SIZES {
        let set: AvlSet<usize> = generate_shuffled_vec(size).into_iter().collect();
        group.bench_with_input(BenchmarkId::new("iterate", size), &size, |bencher, _| {
            bencher.iter(|| {
                let mut total = 0_usize;
                for element in &set {
                    total = total.wrapping_add(*black_box(element));
                }
                black_box(total)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_contains,
    benchmark_remove,
    benchmark_lower_bound,
    benchmark_iterate
);
criterion_main!(benches);
