//! Benchmarks for the mutation algebra at scale: write/insert/delete over a
//! memory already holding several thousand scattered blocks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sparsemem::{Address, Memory};

fn scattered(block_count: i64) -> Memory {
    let mut mem = Memory::new();
    for i in 0..block_count {
        mem.write(Address(i * 16), &[i as u8; 8]);
    }
    mem
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");
    for &n in &[100i64, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let base = scattered(n);
            b.iter(|| {
                let mut mem = base.clone();
                mem.write(black_box(Address(n * 8)), black_box(b"payload"));
                mem
            });
        });
    }
    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[100i64, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let base = scattered(n);
            b.iter(|| {
                let mut mem = base.clone();
                mem.insert(black_box(Address(n * 8)), black_box(b"payload"));
                mem
            });
        });
    }
    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete");
    for &n in &[100i64, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let base = scattered(n);
            b.iter(|| {
                let mut mem = base.clone();
                mem.delete(black_box(Address(0)), black_box(Address(n * 8)));
                mem
            });
        });
    }
    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");
    for &n in &[100i64, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let base = scattered(n);
            b.iter(|| black_box(base.ofind(black_box(&[(n - 1) as u8; 4]), None, None)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_write, bench_insert, bench_delete, bench_find);
criterion_main!(benches);
