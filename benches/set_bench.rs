//! Set benchmarks.
//!
//! Compares the set algebra on half-overlapping operands and measures
//! membership queries.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ordvec::Set;
use std::hint::black_box;

const SIZES: [i32; 3] = [100, 1000, 10000];

/// Two sets of `size` keys sharing half of them.
fn overlapping_sets(size: i32) -> (Set<i32>, Set<i32>) {
    let left: Set<i32> = (0..size).collect();
    let right: Set<i32> = (size / 2..size + size / 2).collect();
    (left, right)
}

fn benchmark_algebra(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set_algebra");

    for size in SIZES {
        let (left, right) = overlapping_sets(size);

        group.bench_with_input(BenchmarkId::new("union", size), &size, |bencher, _| {
            bencher.iter(|| black_box(left.union(black_box(&right))));
        });
        group.bench_with_input(BenchmarkId::new("intersection", size), &size, |bencher, _| {
            bencher.iter(|| black_box(left.intersection(black_box(&right))));
        });
        group.bench_with_input(BenchmarkId::new("left_difference", size), &size, |bencher, _| {
            bencher.iter(|| black_box(left.left_difference(black_box(&right))));
        });
    }

    group.finish();
}

fn benchmark_membership(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set_membership");

    for size in SIZES {
        let (left, _) = overlapping_sets(size);
        let probes: Vec<i32> = (0..64).map(|index| index * size / 32).collect();

        group.bench_with_input(BenchmarkId::new("has_all", size), &size, |bencher, _| {
            bencher.iter(|| black_box(left.has_all(black_box(&probes))));
        });
        group.bench_with_input(BenchmarkId::new("has_any", size), &size, |bencher, _| {
            bencher.iter(|| black_box(left.has_any(black_box(&probes))));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_algebra, benchmark_membership);
criterion_main!(benches);
