//! Criterion micro-benchmarks for array growth, list appends, and queue sorting.

use bumpline_bench::{fill_array, fill_list, scrambled_values};
use bumpline_collections::Queue;
use bumpline_pool::{Pool, PoolConfig};
use bumpline_test_utils::{ring, TestNode};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

/// A pool large enough that 10K appends never need a new block.
fn roomy_pool() -> Pool {
    Pool::new(PoolConfig::new(256 * 1024).with_max_block_size(256 * 1024)).unwrap()
}

/// Benchmark: 10K appends at the frontier, growing in place every time.
fn bench_array_push_in_place_10k(c: &mut Criterion) {
    let values = scrambled_values(10_000, u64::MAX, 42);
    c.bench_function("array_push_in_place_10k", |b| {
        b.iter_batched(
            roomy_pool,
            |mut pool| {
                let array = fill_array(&mut pool, 4, &values).unwrap();
                black_box(array.len());
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: 10K appends with a competing allocation between pushes, so
/// every growth reallocates.
fn bench_array_push_realloc_10k(c: &mut Criterion) {
    let values = scrambled_values(10_000, u64::MAX, 42);
    c.bench_function("array_push_realloc_10k", |b| {
        b.iter_batched(
            Pool::default,
            |mut pool| {
                let mut array = bumpline_collections::Array::create(&mut pool, 4, 8).unwrap();
                for v in &values {
                    if array.len() == array.capacity() {
                        pool.alloc(1).unwrap();
                    }
                    array.push(&mut pool).unwrap().copy_from_slice(&v.to_le_bytes());
                }
                black_box(array.capacity());
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: 10K list appends in 64-element chunks.
fn bench_list_push_10k(c: &mut Criterion) {
    let values = scrambled_values(10_000, u64::MAX, 7);
    c.bench_function("list_push_10k", |b| {
        b.iter_batched(
            roomy_pool,
            |mut pool| {
                let list = fill_list(&mut pool, 64, &values).unwrap();
                black_box(list.chunk_count());
            },
            BatchSize::SmallInput,
        );
    });
}

fn unsorted_ring(n: usize) -> (Vec<TestNode>, Queue<u32>) {
    let values: Vec<i64> = scrambled_values(n, 1000, 99)
        .into_iter()
        .map(|v| v as i64)
        .collect();
    ring(&values)
}

/// Benchmark: stable insertion sort of 1K scrambled queue nodes.
fn bench_queue_sort_1k(c: &mut Criterion) {
    c.bench_function("queue_sort_1k", |b| {
        b.iter_batched(
            || unsorted_ring(1000),
            |(mut nodes, queue)| {
                queue.sort(&mut nodes, |x, y| x.value.cmp(&y.value));
                black_box(queue.head(&nodes));
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: middle of a 10K-node queue.
fn bench_queue_middle_10k(c: &mut Criterion) {
    let (nodes, queue) = unsorted_ring(10_000);
    c.bench_function("queue_middle_10k", |b| {
        b.iter(|| black_box(queue.middle(&nodes)));
    });
}

criterion_group!(
    benches,
    bench_array_push_in_place_10k,
    bench_array_push_realloc_10k,
    bench_list_push_10k,
    bench_queue_sort_1k,
    bench_queue_middle_10k
);
criterion_main!(benches);
