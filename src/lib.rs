//! Cellmaze - maze generation by evolved cellular-automaton rule tables.
//!
//! This crate searches the space of 18-bit birth/survival rule tables with
//! a genetic algorithm. Each rule table drives a synchronous cellular
//! automaton over a walled grid; the resulting cave pattern is repaired
//! into a single connected region and scored by solution-path length and
//! dead-end count.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration and genome types
//! - `compute`: Grid evolution, connectivity repair, scoring, and the
//!   genetic search loop
//!
//! # Example
//!
//! ```rust,no_run
//! use cellmaze::compute::evolution::EvolutionEngine;
//! use cellmaze::schema::EvolutionConfig;
//!
//! let config = EvolutionConfig::default();
//! let mut engine = EvolutionEngine::new(config).expect("valid configuration");
//!
//! let ranked = engine.run_with_sink(|stats| {
//!     println!(
//!         "generation {}: best = {}, avg = {:.2}",
//!         stats.generation, stats.best_fitness, stats.avg_fitness
//!     );
//! });
//!
//! println!("best maze fitness: {}", ranked[0].fitness());
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::evolution::{EvolutionEngine, GenerationStats, Individual};
pub use compute::{Cell, Coord, DistanceField, Grid, MazeScore, evaluate, evolve, repair};
pub use schema::{EvolutionConfig, FitnessMode, Genome, MazeConfig};
