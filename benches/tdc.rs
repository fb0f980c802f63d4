use cachemeter::prelude::*;
use cachemeter::trace::zipf_stationary;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

/// Bench: Zipf trace replay across cache sizes
///
/// TDC pays an O(capacity) rescan per evicting miss, so larger caches on
/// miss-heavy traces are the interesting data points here.
fn bench_zipf_trace(c: &mut Criterion) {
    let mut group = c.benchmark_group("TDC Zipf Trace");
    let trace = zipf_stationary(1000, 20_000, 1.0, Some(42));
    for &capacity in &[10, 50, 100, 250] {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| {
                b.iter(|| {
                    let mut cache = TimeDecayedCache::new(capacity);
                    for &item in &trace {
                        cache.access(item);
                    }
                    cache.stats().hits
                })
            },
        );
    }
    group.finish();
}

/// Bench: Miss-heavy scan, worst case for the eviction rescan
fn bench_cold_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("TDC Cold Scan");
    for &capacity in &[50, 200] {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| {
                b.iter(|| {
                    let mut cache = TimeDecayedCache::new(capacity);
                    // Every access past warmup is a miss that rescans.
                    for item in 0..10_000u64 {
                        cache.access(item);
                    }
                    cache.stats().misses
                })
            },
        );
    }
    group.finish();
}

/// Bench: Decay rate sensitivity on the same trace
fn bench_decay_rates(c: &mut Criterion) {
    let mut group = c.benchmark_group("TDC Decay Rates");
    let trace = zipf_stationary(1000, 20_000, 1.0, Some(42));
    for &rate in &[0.9, 0.995, 0.9999] {
        group.bench_with_input(BenchmarkId::from_parameter(rate), &rate, |b, &rate| {
            b.iter(|| {
                let mut cache = TimeDecayedCache::with_decay_rate(100, rate);
                for &item in &trace {
                    cache.access(item);
                }
                cache.stats().hits
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_zipf_trace, bench_cold_scan, bench_decay_rates);
criterion_main!(benches);
