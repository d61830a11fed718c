//! Inference pipeline benchmarks
//!
//! Measures the O(n) aggregation, the pooled interval, and a full
//! simulation sweep.
//!
//! Run with: cargo bench --bench inference

use ab_verdict::{
    pooled_statistics, simulate, summarize, BernoulliProvider, ExperimentParams, SampleProvider,
    SimulationDesign, VariantSummary,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const SMALL_SIZE: usize = 1_078; // default design size per variant
const LARGE_SIZE: usize = 1_000_000;

/// Benchmark summarizing outcome sequences
fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");

    for size in [SMALL_SIZE, LARGE_SIZE] {
        let outcomes = BernoulliProvider::seeded(42)
            .provide(size, 0.6)
            .expect("valid design")
            .into_inner();
        group.bench_with_input(BenchmarkId::new("outcomes", size), &outcomes, |b, data| {
            b.iter(|| summarize(black_box(data)));
        });
    }

    group.finish();
}

/// Benchmark the pooled statistics computation
fn bench_pooled_statistics(c: &mut Criterion) {
    let control = VariantSummary::from_counts(650, 1078).expect("valid counts");
    let treatment = VariantSummary::from_counts(756, 1078).expect("valid counts");

    c.bench_function("pooled_statistics", |b| {
        b.iter(|| pooled_statistics(black_box(&control), black_box(&treatment), 0.05));
    });
}

/// Benchmark a simulation sweep of the default design
fn bench_simulate(c: &mut Criterion) {
    let params = ExperimentParams::default();
    let design = SimulationDesign::balanced(SMALL_SIZE, 0.603, 0.701);

    let mut group = c.benchmark_group("simulate");
    group.sample_size(20);
    for runs in [100, 1_000] {
        group.bench_with_input(BenchmarkId::new("runs", runs), &runs, |b, &runs| {
            b.iter(|| simulate(&params, &design, runs, black_box(7)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_summarize, bench_pooled_statistics, bench_simulate);
criterion_main!(benches);
