//! Benchmark for the task queue under a small worker pool.

use std::path::PathBuf;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use lux_core::scan::TaskQueue;

fn drain_items(rt: &tokio::runtime::Runtime, items: usize, workers: usize) {
    rt.block_on(async {
        let queue = Arc::new(TaskQueue::new());
        for i in 0..items {
            queue.put(PathBuf::from(format!("img_{i}.png"))).await;
        }

        let mut pool = tokio::task::JoinSet::new();
        for _ in 0..workers {
            let queue = Arc::clone(&queue);
            pool.spawn(async move {
                loop {
                    let lease = queue.get().await;
                    drop(lease);
                }
            });
        }

        queue.join().await;
        drop(pool);
    });
}

fn bench_queue(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("queue_1k_items_1_worker", |b| {
        b.iter(|| drain_items(&rt, 1000, 1))
    });
    c.bench_function("queue_1k_items_8_workers", |b| {
        b.iter(|| drain_items(&rt, 1000, 8))
    });
}

criterion_group!(benches, bench_queue);
criterion_main!(benches);
