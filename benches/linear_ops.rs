//! Criterion micro-benchmarks for linear allocation and bulk reset.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lallocator::LinearAllocator;

fn bench_allocate(c: &mut Criterion) {
  c.bench_function("allocate_64b_align8", |b| {
    let mut arena = LinearAllocator::with_capacity(1 << 20).unwrap();

    b.iter(|| {
      if arena.available() < 64 {
        arena.reset();
      }
      black_box(arena.allocate(black_box(64), black_box(8)).unwrap())
    });
  });
}

fn bench_fill_then_reset(c: &mut Criterion) {
  c.bench_function("fill_then_reset_1mib", |b| {
    let mut arena = LinearAllocator::with_capacity(1 << 20).unwrap();

    b.iter(|| {
      while arena.allocate(256, 16).is_ok() {}
      arena.reset();
      black_box(arena.used())
    });
  });
}

criterion_group!(benches, bench_allocate, bench_fill_then_reset);
criterion_main!(benches);
