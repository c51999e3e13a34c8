use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use rand_core::{RngCore, SeedableRng};
use rand_pcg::Lcg128Xsl64 as Pcg;
use std::time::Duration;
use word_counter::CountingHashTable;

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn keys(seed: u64, n: usize) -> Vec<String> {
    let mut rng = Pcg::seed_from_u64(seed);
    (0..n).map(|_| key(rng.next_u64())).collect()
}

fn filled(ks: &[String]) -> CountingHashTable {
    let mut t = CountingHashTable::new();
    for k in ks {
        t.insert_or_increment(k);
    }
    t
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("counting::insert");
    group.throughput(Throughput::Elements(100_000));
    let fresh = keys(1, 100_000);
    // Every insert is a new key; includes all growth rehashes from 11 buckets.
    group.bench_function("fresh_100k", |b| {
        b.iter_batched(
            CountingHashTable::new,
            |mut t| {
                for k in &fresh {
                    t.insert_or_increment(k);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
    // Zipf-like word stream: 1k distinct keys, heavy repetition.
    let vocab = keys(2, 1_000);
    let mut rng = Pcg::seed_from_u64(3);
    let stream: Vec<usize> = (0..100_000)
        .map(|_| {
            let r = (rng.next_u64() % 1_000) as usize;
            r * r / 1_000
        })
        .collect();
    group.bench_function("repeat_100k_of_1k", |b| {
        b.iter_batched(
            CountingHashTable::new,
            |mut t| {
                for &i in &stream {
                    t.insert_or_increment(&vocab[i]);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("counting::remove");
    group.throughput(Throughput::Elements(100_000));
    let ks = keys(5, 100_000);
    // Drains the table completely, crossing every shrink threshold.
    group.bench_function("drain_100k", |b| {
        b.iter_batched(
            || filled(&ks),
            |mut t| {
                for k in &ks {
                    black_box(t.remove(k));
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("counting::lookup");
    group.throughput(Throughput::Elements(10_000));
    let ks = keys(7, 20_000);
    let t = filled(&ks);
    let misses = keys(8, 10_000);
    group.bench_function("hit_10k", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for k in ks.iter().take(10_000) {
                sum += t.lookup(k);
            }
            black_box(sum)
        })
    });
    group.bench_function("miss_10k", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for k in &misses {
                sum += t.lookup(k);
            }
            black_box(sum)
        })
    });
    group.finish();
}

fn bench_clone(c: &mut Criterion) {
    let t = filled(&keys(9, 50_000));
    c.bench_function("counting::clone_50k", |b| b.iter(|| black_box(t.clone())));
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_remove, bench_lookup, bench_clone
}
criterion_main!(benches);
