//! Journal protocol benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use journalkv_bench::{fill_journal, random_payload};
use journalkv_core::{Journal, JournalConfig, KeyEncoding, RecordNumber};
use journalkv_storage::{FileStore, FileStoreOptions, InMemoryStore};
use rand::Rng;

/// Benchmark prepare/commit cycles in memory.
fn bench_cycle_memory(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycle_memory");

    for size in [64, 256, 1024, 4096].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let journal = Journal::create(InMemoryStore::new()).unwrap();
            let payload = random_payload(size);

            b.iter(|| {
                journal.prepare(black_box(&payload)).unwrap();
                black_box(journal.commit().unwrap());
            });
        });
    }
    group.finish();
}

/// Benchmark prepare/commit cycles on a file store.
fn bench_cycle_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycle_file");

    for sync in [false, true] {
        let name = if sync { "sync" } else { "no_sync" };
        group.bench_function(name, |b| {
            let dir = tempfile::tempdir().unwrap();
            let options = FileStoreOptions::new().sync_on_write(sync);
            let store = FileStore::open_with_options(&dir.path().join("bench.log"), options).unwrap();
            let journal = Journal::create(store).unwrap();
            let payload = random_payload(256);

            b.iter(|| {
                journal.prepare(black_box(&payload)).unwrap();
                black_box(journal.commit().unwrap());
            });
        });
    }
    group.finish();
}

/// Benchmark prepare followed by rollback.
fn bench_rollback(c: &mut Criterion) {
    c.bench_function("prepare_rollback", |b| {
        let journal = Journal::create(InMemoryStore::new()).unwrap();
        let payload = random_payload(256);

        b.iter(|| {
            journal.prepare(black_box(&payload)).unwrap();
            black_box(journal.rollback().unwrap());
        });
    });
}

/// Benchmark random record reads.
fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");

    for encoding in [KeyEncoding::Decimal, KeyEncoding::ZeroPadded] {
        let config = JournalConfig::new().key_encoding(encoding);
        let journal = Journal::create_with_config(InMemoryStore::new(), config).unwrap();
        let last = fill_journal(&journal, 10_000, 128)
            .unwrap()
            .map_or(0, |r| r.as_u64());

        group.bench_function(format!("{encoding:?}"), |b| {
            let mut rng = rand::thread_rng();
            b.iter(|| {
                let record = RecordNumber::new(rng.gen_range(0..=last));
                black_box(journal.get(record).unwrap());
            });
        });
    }
    group.finish();
}

/// Benchmark out-of-band committed writes.
fn bench_set_committed(c: &mut Criterion) {
    c.bench_function("set_committed", |b| {
        let journal = Journal::create(InMemoryStore::new()).unwrap();
        let payload = random_payload(256);
        let mut next = 0u64;

        b.iter(|| {
            journal
                .set_committed(RecordNumber::new(next), black_box(&payload))
                .unwrap();
            next += 1;
        });
    });
}

criterion_group!(
    benches,
    bench_cycle_memory,
    bench_cycle_file,
    bench_rollback,
    bench_get,
    bench_set_committed,
);

criterion_main!(benches);
