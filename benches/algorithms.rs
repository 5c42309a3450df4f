//! Benchmarks for the instrumented sorts
//!
//! Run with: cargo bench --bench algorithms

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sortscope::{run_sort_with, Algorithm, Dataset, NoopEmitter, SortOptions};
use std::hint::black_box;

fn random_values(len: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(0xb0b);
    (0..len).map(|_| rng.gen_range(0.0..1000.0)).collect()
}

fn bench_noop_emitter(c: &mut Criterion) {
    let mut group = c.benchmark_group("noop_emitter");

    for len in [64usize, 512].iter() {
        let values = random_values(*len);
        for algorithm in Algorithm::ALL {
            group.bench_with_input(BenchmarkId::new(algorithm.as_str(), len), &values, |b, values| {
                b.iter(|| {
                    let mut emitter = NoopEmitter;
                    let mut data = Dataset::new(values.clone(), &mut emitter).unwrap();
                    algorithm.run(&mut data).unwrap();
                    black_box(data.into_values());
                });
            });
        }
    }

    group.finish();
}

fn bench_recorded_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("recorded_run");
    let options = SortOptions::default();

    for len in [64usize, 512].iter() {
        let values = random_values(*len);
        for algorithm in Algorithm::ALL {
            group.bench_with_input(BenchmarkId::new(algorithm.as_str(), len), &values, |b, values| {
                b.iter(|| black_box(run_sort_with(algorithm, values, &options).unwrap()));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_noop_emitter, bench_recorded_run);
criterion_main!(benches);
