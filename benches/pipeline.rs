//! Benchmarks for the maze generation pipeline.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use cellmaze::compute::evolution::{EvolutionEngine, GenomeRng};
use cellmaze::compute::{evaluate, evolve, repair};
use cellmaze::schema::{EvolutionConfig, FitnessMode, MazeConfig};

fn bench_pipeline_stages(c: &mut Criterion) {
    let config = MazeConfig::default();
    let mut rng = GenomeRng::new(7);
    let genome = rng.random_genome();

    c.bench_function("evolve", |b| {
        b.iter(|| evolve(black_box(&genome), &config));
    });

    let evolved = evolve(&genome, &config);
    c.bench_function("repair", |b| {
        b.iter(|| repair(black_box(evolved.clone())));
    });

    let repaired = repair(evolved);
    c.bench_function("evaluate", |b| {
        b.iter(|| {
            evaluate(
                black_box(&repaired),
                &config,
                FitnessMode::SumOfShortestAndDeadEnds,
            )
        });
    });
}

fn bench_generation_step(c: &mut Criterion) {
    c.bench_function("generation_step", |b| {
        b.iter(|| {
            let config = EvolutionConfig {
                population_size: 16,
                max_generations: 1,
                random_seed: Some(7),
                ..Default::default()
            };
            let mut engine = EvolutionEngine::new(config).expect("valid config");
            engine.step();
        });
    });
}

criterion_group!(benches, bench_pipeline_stages, bench_generation_step);
criterion_main!(benches);
