use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use memtable::Memtable;
use sstable::{Entry, SSTable};
use tempfile::tempdir;

const N_KEYS: usize = 10_000;
const VALUE_SIZE: usize = 100;

fn build_entries() -> Vec<Entry> {
    let mut mem = Memtable::new();
    for i in 0..N_KEYS {
        mem.put(format!("key{:05}", i).into_bytes(), vec![b'x'; VALUE_SIZE]);
    }
    mem.ordered_enumerate()
        .map(|(key, value)| Entry {
            key: key.to_vec(),
            value: value.to_vec(),
            timestamp: 0,
        })
        .collect()
}

fn sstable_write_benchmark(c: &mut Criterion) {
    c.bench_function("sstable_write_10k", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().unwrap();
                let path = dir.path().join("bench.db");
                (dir, path, build_entries())
            },
            |(_dir, path, entries)| {
                let mut sst = SSTable::create(&path).unwrap();
                sst.write(&entries).unwrap();
            },
            BatchSize::SmallInput,
        );
    });
}

fn sstable_get_hit_benchmark(c: &mut Criterion) {
    c.bench_function("sstable_get_hit_10k", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().unwrap();
                let path = dir.path().join("bench.db");
                let mut sst = SSTable::create(&path).unwrap();
                sst.write(&build_entries()).unwrap();
                (dir, sst)
            },
            |(_dir, sst)| {
                for i in 0..N_KEYS {
                    let key = format!("key{:05}", i).into_bytes();
                    assert!(sst.get(&key).unwrap().is_some());
                }
            },
            BatchSize::LargeInput,
        );
    });
}

fn sstable_get_miss_benchmark(c: &mut Criterion) {
    c.bench_function("sstable_get_miss_10k", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().unwrap();
                let path = dir.path().join("bench.db");
                let mut sst = SSTable::create(&path).unwrap();
                sst.write(&build_entries()).unwrap();
                (dir, sst)
            },
            |(_dir, sst)| {
                for i in 0..N_KEYS {
                    let key = format!("missing{:05}", i).into_bytes();
                    assert!(sst.get(&key).unwrap().is_none());
                }
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    sstable_write_benchmark,
    sstable_get_hit_benchmark,
    sstable_get_miss_benchmark
);
criterion_main!(benches);
