use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use timelock_puzzle::prime::{IncrementalSearch, PrimalityOracle};
use timelock_puzzle::{PuzzleConfig, generate_puzzle, solve_puzzle};

fn bench_prime_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("prime_search");
    group.sample_size(10);
    let oracle = IncrementalSearch::default();

    for bits in [128u32, 256, 512, 1010] {
        group.bench_with_input(BenchmarkId::new("bits", bits), &bits, |b, &bits| {
            b.iter(|| black_box(oracle.find_probable_prime(black_box(bits)).unwrap()))
        });
    }
    group.finish();
}

fn bench_generation_cycle_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation_cycles");
    group.sample_size(10);

    // Trapdoor cost should barely move with C.
    for cycles in [1u64, 100, 10_000] {
        let config = PuzzleConfig::new(256, 5000, cycles);
        group.bench_with_input(BenchmarkId::new("cycles", cycles), &config, |b, config| {
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            b.iter(|| black_box(generate_puzzle(config, &mut rng).unwrap()))
        });
    }
    group.finish();
}

fn bench_solve_cycle_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_cycles");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));

    // Solve cost grows linearly with C.
    for cycles in [1u64, 10, 50] {
        let config = PuzzleConfig::new(256, 1000, cycles);
        let record = generate_puzzle(&config, &mut ChaCha8Rng::seed_from_u64(2)).unwrap();
        group.throughput(Throughput::Elements(cycles));
        group.bench_with_input(BenchmarkId::new("cycles", cycles), &record, |b, record| {
            b.iter(|| black_box(solve_puzzle(record, None).unwrap()))
        });
    }
    group.finish();
}

fn bench_independent_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation_concurrent");
    group.sample_size(10);

    // Each task owns its random source.
    group.bench_function("parallel_generate", |b| {
        use rayon::prelude::*;

        b.iter(|| {
            (0..16u64)
                .into_par_iter()
                .map(|seed| {
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);
                    generate_puzzle(&PuzzleConfig::new(128, 64, 10), &mut rng).unwrap()
                })
                .collect::<Vec<_>>()
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_prime_search,
    bench_generation_cycle_counts,
    bench_solve_cycle_counts,
    bench_independent_generation,
);

criterion_main!(benches);
