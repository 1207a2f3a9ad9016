use bloom::BloomFilter;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hasher::DoubleHash;

fn bench_hash(c: &mut Criterion) {
    c.bench_function("double_hash_of_key", |b| {
        b.iter(|| DoubleHash::of(black_box(b"template-fingerprint-0123456789")))
    });
}

fn bench_sizing(c: &mut Criterion) {
    c.bench_function("m_k_min_1e9", |b| {
        b.iter(|| bloom::m_k_min(black_box(1_000_000_000), black_box(1e-6)))
    });
}

fn bench_add_and_contains(c: &mut Criterion) {
    let filter = BloomFilter::new(1_000_000, 1e-6).unwrap();
    let mut group = c.benchmark_group("bloom_filter");
    group.bench_function("add", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            filter.add(black_box(&i.to_le_bytes()))
        })
    });
    for i in 0..10_000 {
        filter.add(&i.to_le_bytes());
    }
    group.bench_function("contains_hit", |b| {
        b.iter(|| filter.contains(black_box(&42u64.to_le_bytes())))
    });
    group.finish();
}

criterion_group!(benches, bench_hash, bench_sizing, bench_add_and_contains);
criterion_main!(benches);
