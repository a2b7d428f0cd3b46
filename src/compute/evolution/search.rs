//! Genetic search loop over maze rule tables.

use log::debug;
use rayon::prelude::*;

use crate::compute::{DistanceField, Grid, MazeScore, evaluate, evolve, repair};
use crate::schema::{EvolutionConfig, EvolutionConfigError, Genome};

use super::genome::GenomeRng;

/// A candidate individual in the population.
///
/// The grid, distance field, and score stay `None` until the individual is
/// evaluated; elites carry their evaluated state into the next generation
/// verbatim.
#[derive(Debug, Clone)]
pub struct Individual {
    /// The rule table under evaluation.
    pub genome: Genome,
    /// Evolved and repaired maze.
    pub grid: Option<Grid>,
    /// BFS distance transform of the repaired maze.
    pub distances: Option<DistanceField>,
    /// Fitness metrics.
    pub score: Option<MazeScore>,
}

impl Individual {
    fn from_genome(genome: Genome) -> Self {
        Self {
            genome,
            grid: None,
            distances: None,
            score: None,
        }
    }

    /// Scalar fitness; unevaluated individuals rank last.
    pub fn fitness(&self) -> i32 {
        self.score.map_or(i32::MAX, |score| score.fitness)
    }

    fn is_evaluated(&self) -> bool {
        self.score.is_some()
    }
}

/// Per-generation summary handed to the metrics sink.
#[derive(Debug, Clone, Copy)]
pub struct GenerationStats {
    /// Generation index, starting at 0 for the seeded population.
    pub generation: usize,
    /// Mean fitness over the ranked population.
    pub avg_fitness: f32,
    /// Fitness of the best (lowest-scoring) individual.
    pub best_fitness: i32,
}

/// Evolution engine driving the evaluate/rank/breed cycle.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    rng: GenomeRng,
    population: Vec<Individual>,
    generation: usize,
}

impl EvolutionEngine {
    /// Create an engine with a randomly seeded population.
    ///
    /// The configuration is validated up front; no generation ever runs
    /// with bad parameters.
    pub fn new(config: EvolutionConfig) -> Result<Self, EvolutionConfigError> {
        config.validate()?;

        let seed = config.random_seed.unwrap_or_else(rand::random);
        let mut rng = GenomeRng::new(seed);
        let population = (0..config.population_size)
            .map(|_| Individual::from_genome(rng.random_genome()))
            .collect();

        Ok(Self {
            config,
            rng,
            population,
            generation: 0,
        })
    }

    /// Current population. Ranked ascending by fitness after every step.
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Index of the most recently ranked generation.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best evaluated individual of the current population, if any.
    pub fn best(&self) -> Option<&Individual> {
        self.population
            .iter()
            .filter(|individual| individual.is_evaluated())
            .min_by_key(|individual| individual.fitness())
    }

    /// Advance exactly one generation and return its summary.
    ///
    /// The first call evaluates and ranks the seeded population; every
    /// later call breeds the next generation from the previous ranking
    /// first. The population is never left half-evaluated between calls.
    pub fn step(&mut self) -> GenerationStats {
        if self.population.iter().all(Individual::is_evaluated) {
            self.breed_next_generation();
            self.generation += 1;
        }
        self.evaluate_population();
        self.rank();

        let stats = self.stats();
        debug!(
            "generation {}: best={} avg={:.2}",
            stats.generation, stats.best_fitness, stats.avg_fitness
        );
        stats
    }

    /// Run through the configured generation budget, handing each ranked
    /// generation's summary to `sink`, and return the final ranked
    /// population.
    pub fn run_with_sink<F>(&mut self, mut sink: F) -> &[Individual]
    where
        F: FnMut(&GenerationStats),
    {
        loop {
            let stats = self.step();
            sink(&stats);
            if self.generation >= self.config.max_generations {
                break;
            }
        }
        &self.population
    }

    /// Run without a metrics sink.
    pub fn run(&mut self) -> &[Individual] {
        self.run_with_sink(|_| {})
    }

    /// Evaluate every unevaluated individual through the
    /// evolve -> repair -> evaluate pipeline.
    ///
    /// Individuals are independent, so evaluation runs in parallel; results
    /// are identical to a sequential pass.
    fn evaluate_population(&mut self) {
        let maze = &self.config.maze;
        let mode = self.config.fitness_mode;

        self.population
            .par_iter_mut()
            .filter(|individual| !individual.is_evaluated())
            .for_each(|individual| {
                let grid = repair(evolve(&individual.genome, maze));
                let (distances, score) = evaluate(&grid, maze, mode);
                individual.grid = Some(grid);
                individual.distances = Some(distances);
                individual.score = Some(score);
            });
    }

    /// Stable ascending sort; lower fitness is better.
    fn rank(&mut self) {
        self.population.sort_by_key(Individual::fitness);
    }

    fn stats(&self) -> GenerationStats {
        let best_fitness = self.population.first().map_or(i32::MAX, Individual::fitness);
        let avg_fitness = self
            .population
            .iter()
            .map(|individual| individual.fitness() as f64)
            .sum::<f64>()
            / self.population.len() as f64;

        GenerationStats {
            generation: self.generation,
            avg_fitness: avg_fitness as f32,
            best_fitness,
        }
    }

    /// Build the next generation from the current ranking.
    ///
    /// The top elitism fraction survives verbatim with its evaluated state.
    /// The remaining slots are filled by single-point crossover of two
    /// distinct parents drawn uniformly from the whole population, with
    /// per-bit mutation applied only to the offspring.
    fn breed_next_generation(&mut self) {
        let size = self.config.population_size;
        let elite_count = (self.config.elitism * size as f32) as usize;

        let mut next: Vec<Individual> = Vec::with_capacity(size);
        next.extend(self.population.iter().take(elite_count).cloned());

        while next.len() < size {
            let (first, second) = self.pick_distinct_parents();
            let (child_a, child_b) = self.rng.crossover(
                &self.population[first].genome,
                &self.population[second].genome,
            );

            let mutated_a = self.rng.mutate(&child_a, self.config.mutation_rate);
            next.push(Individual::from_genome(mutated_a));
            if next.len() < size {
                let mutated_b = self.rng.mutate(&child_b, self.config.mutation_rate);
                next.push(Individual::from_genome(mutated_b));
            }
        }

        self.population = next;
    }

    fn pick_distinct_parents(&mut self) -> (usize, usize) {
        let size = self.population.len();
        let first = self.rng.parent_index(size);
        let mut second = self.rng.parent_index(size);
        while second == first {
            second = self.rng.parent_index(size);
        }
        (first, second)
    }
}
