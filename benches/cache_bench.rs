//! Benchmarks for the answer cache.
//!
//! Run with: cargo bench

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use burrow::cache::{AnswerCache, CacheStore, MemoryStore};
use burrow::wire::{Question, RData, Record, RecordClass, RecordType};

fn question(name: &str) -> Question {
    Question {
        name: name.to_string(),
        qtype: RecordType::A,
        qclass: RecordClass::In,
    }
}

fn answers(name: &str) -> Vec<Record> {
    vec![Record {
        name: name.to_string(),
        rtype: RecordType::A,
        class: RecordClass::In,
        ttl: 3600,
        rdata: RData::A("93.184.216.34".parse().unwrap()),
    }]
}

fn bench_store_set_if_absent(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = MemoryStore::new();
    let ttl = Duration::from_secs(3600);

    c.bench_function("store_set_if_absent", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("host{i}.example.com:1:1");
            i += 1;
            rt.block_on(store.set_if_absent(&key, b"answers".to_vec(), ttl))
                .unwrap()
        })
    });
}

fn bench_store_get_hit(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = MemoryStore::new();
    rt.block_on(store.set_if_absent(
        "example.com:1:1",
        b"answers".to_vec(),
        Duration::from_secs(3600),
    ))
    .unwrap();

    c.bench_function("store_get_hit", |b| {
        b.iter(|| rt.block_on(store.get(black_box("example.com:1:1"))).unwrap())
    });
}

fn bench_cache_get_hit(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let cache = AnswerCache::new(Arc::new(MemoryStore::new()));
    let q = question("example.com");
    rt.block_on(cache.set(&q, &answers("example.com")));

    c.bench_function("cache_get_hit", |b| {
        b.iter(|| rt.block_on(cache.get(black_box(&q))).unwrap())
    });
}

fn bench_cache_get_miss(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let cache = AnswerCache::new(Arc::new(MemoryStore::new()));
    let q = question("missing.example.com");

    c.bench_function("cache_get_miss", |b| {
        b.iter(|| rt.block_on(cache.get(black_box(&q))))
    });
}

fn bench_cache_set(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let cache = AnswerCache::new(Arc::new(MemoryStore::new()));

    c.bench_function("cache_set", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let name = format!("host{i}.example.com");
            i += 1;
            rt.block_on(cache.set(&question(&name), &answers(&name)))
        })
    });
}

criterion_group!(
    benches,
    bench_store_set_if_absent,
    bench_store_get_hit,
    bench_cache_get_hit,
    bench_cache_get_miss,
    bench_cache_set,
);

criterion_main!(benches);
