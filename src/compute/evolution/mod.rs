//! Genetic search over automaton rule tables.
//!
//! The search loop owns a population of individuals and advances it one
//! generation at a time: evaluate every individual through the
//! evolve -> repair -> evaluate pipeline, rank ascending by fitness,
//! preserve the elite fraction, and fill the rest with mutated crossover
//! offspring.

mod genome;
mod search;

pub use genome::GenomeRng;
pub use search::{EvolutionEngine, GenerationStats, Individual};
