//! Criterion micro-benchmarks for append, insert, erase, and copy.
//!
//! Each group compares `vessel::Vector` with `std::vec::Vec` and
//! `smallvec::SmallVec` on the same workload.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use smallvec::SmallVec;
use vessel::Vector;
use vessel_bench::{build_by_inserts, insert_positions, sequential, WORKLOAD_SEED};

const SIZES: [usize; 3] = [100, 1_000, 10_000];

/// Benchmark: append N integers to an empty container.
fn bench_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back");
    for n in SIZES {
        group.bench_with_input(BenchmarkId::new("vessel", n), &n, |b, &n| {
            b.iter(|| {
                let mut v = Vector::new();
                for i in 0..n as u64 {
                    v.push_back(i);
                }
                black_box(v.len());
            });
        });
        group.bench_with_input(BenchmarkId::new("std", n), &n, |b, &n| {
            b.iter(|| {
                let mut v = Vec::new();
                for i in 0..n as u64 {
                    v.push(i);
                }
                black_box(v.len());
            });
        });
        group.bench_with_input(BenchmarkId::new("smallvec", n), &n, |b, &n| {
            b.iter(|| {
                let mut v: SmallVec<[u64; 16]> = SmallVec::new();
                for i in 0..n as u64 {
                    v.push(i);
                }
                black_box(v.len());
            });
        });
    }
    group.finish();
}

/// Benchmark: grow to N elements by inserting at seeded random positions.
fn bench_random_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_insert");
    for n in SIZES {
        let positions = insert_positions(n, WORKLOAD_SEED);
        group.bench_with_input(BenchmarkId::new("vessel", n), &positions, |b, p| {
            b.iter(|| black_box(build_by_inserts(p).len()));
        });
        group.bench_with_input(BenchmarkId::new("std", n), &positions, |b, p| {
            b.iter(|| {
                let mut v = Vec::new();
                for (i, &pos) in p.iter().enumerate() {
                    v.insert(pos, i as u64);
                }
                black_box(v.len());
            });
        });
    }
    group.finish();
}

/// Benchmark: erase from the front until empty.
fn bench_erase_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase_front");
    for n in [100usize, 1_000] {
        group.bench_with_input(BenchmarkId::new("vessel", n), &n, |b, &n| {
            b.iter_batched(
                || sequential(n),
                |mut v| {
                    while !v.is_empty() {
                        v.erase(0);
                    }
                    black_box(v.capacity());
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

/// Benchmark: copy-construct vs copy-assign into reused storage.
fn bench_clone(c: &mut Criterion) {
    let source = sequential(10_000);
    c.bench_function("clone_10k", |b| {
        b.iter(|| black_box(source.clone().len()));
    });

    let mut target = Vector::with_capacity(10_000);
    c.bench_function("clone_from_10k_reuse", |b| {
        b.iter(|| {
            target.clone_from(&source);
            black_box(target.len());
        });
    });
}

criterion_group!(
    benches,
    bench_push_back,
    bench_random_insert,
    bench_erase_front,
    bench_clone
);
criterion_main!(benches);
