//! Cellmaze CLI - Evolve maze rule tables from a JSON configuration.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use cellmaze::compute::evolution::EvolutionEngine;
use cellmaze::schema::EvolutionConfig;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [generations]", args[0]);
        eprintln!();
        eprintln!("Evolve maze rule tables from a JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to evolution configuration file");
        eprintln!("  generations  Generation budget override");
        eprintln!();
        eprintln!("Example configuration is printed with the --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);

    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let mut config: EvolutionConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    if let Some(generations) = args.get(2).and_then(|s| s.parse().ok()) {
        config.max_generations = generations;
    }

    println!("Cellmaze Evolution");
    println!("==================");
    println!("Grid: {}x{}", config.maze.width, config.maze.height);
    println!("Rule iterations: {}", config.maze.iterations);
    println!("Population: {}", config.population_size);
    println!("Generations: {}", config.max_generations);
    println!("Fitness mode: {:?}", config.fitness_mode);
    println!(
        "Elitism: {} / Mutation rate: {}",
        config.elitism, config.mutation_rate
    );
    println!();

    let mut engine = EvolutionEngine::new(config.clone()).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    println!("Running evolution...");
    let start = Instant::now();

    let mut metrics: Vec<(usize, f32, i32)> = Vec::with_capacity(config.max_generations + 1);
    let ranked = engine.run_with_sink(|stats| {
        println!(
            "  Generation {}/{}: best={} avg={:.2}",
            stats.generation, config.max_generations, stats.best_fitness, stats.avg_fitness
        );
        metrics.push((stats.generation, stats.avg_fitness, stats.best_fitness));
    });

    let elapsed = start.elapsed();
    println!();
    println!(
        "Time: {:.2}s ({:.1} generations/s)",
        elapsed.as_secs_f32(),
        metrics.len() as f32 / elapsed.as_secs_f32()
    );

    let best = &ranked[0];
    if let Some(score) = best.score {
        println!();
        println!("Best maze:");
        println!("  Shortest path: {}", score.path_length);
        println!("  Dead ends: {}", score.dead_ends);
        println!("  Fitness: {}", score.fitness);
    }
    if let Some(grid) = &best.grid {
        println!();
        println!("{}", grid);
    }

    let metrics_path = config_path.with_extension("metrics.txt");
    write_metrics(&metrics_path, &config, &metrics).unwrap_or_else(|e| {
        eprintln!("Error writing metrics file: {}", e);
        std::process::exit(1);
    });
    println!("Metrics written to {}", metrics_path.display());
}

/// Append per-generation rows in the whitespace-separated format the
/// plotting scripts expect: one header line, then `generation avg best`.
fn write_metrics(
    path: &Path,
    config: &EvolutionConfig,
    metrics: &[(usize, f32, i32)],
) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(
        file,
        "{:?} pop={} mut={} elitism={}",
        config.fitness_mode, config.population_size, config.mutation_rate, config.elitism
    )?;
    for (generation, avg_fitness, best_fitness) in metrics {
        writeln!(file, "{} {} {}", generation, avg_fitness, best_fitness)?;
    }
    Ok(())
}

fn print_example_config() {
    let config = EvolutionConfig::default();
    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}
