use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use lsm::LsmTree;
use tempfile::tempdir;

const N_KEYS: usize = 5_000;

fn lsm_put_benchmark(c: &mut Criterion) {
    c.bench_function("lsm_put_5k_unique_keys", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().unwrap();
                let tree = LsmTree::new(dir.path()).unwrap();
                (dir, tree)
            },
            |(_dir, mut tree)| {
                for i in 0..N_KEYS {
                    tree.put(format!("key{:05}", i).into_bytes(), vec![b'x'; 100])
                        .unwrap();
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn lsm_get_benchmark(c: &mut Criterion) {
    c.bench_function("lsm_get_5k_after_flush", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().unwrap();
                let mut tree = LsmTree::new(dir.path()).unwrap();
                for i in 0..N_KEYS {
                    tree.put(format!("key{:05}", i).into_bytes(), vec![b'x'; 100])
                        .unwrap();
                }
                tree.force_compaction(0).unwrap();
                (dir, tree)
            },
            |(_dir, tree)| {
                for i in 0..N_KEYS {
                    let key = format!("key{:05}", i).into_bytes();
                    assert!(tree.get(&key).unwrap().is_some());
                }
            },
            BatchSize::LargeInput,
        );
    });
}

fn lsm_compaction_benchmark(c: &mut Criterion) {
    c.bench_function("lsm_force_compaction_5k", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().unwrap();
                let mut tree = LsmTree::new(dir.path()).unwrap();
                for i in 0..N_KEYS {
                    tree.put(format!("key{:05}", i).into_bytes(), vec![b'x'; 100])
                        .unwrap();
                }
                (dir, tree)
            },
            |(_dir, mut tree)| {
                tree.force_compaction(0).unwrap();
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    lsm_put_benchmark,
    lsm_get_benchmark,
    lsm_compaction_benchmark
);
criterion_main!(benches);
