//! Genome and search configuration types for evolving maze rule tables.

use serde::{Deserialize, Serialize};

use super::{ConfigError, MazeConfig};

/// Entries in one rule table: Moore-neighbor counts 0 through 8.
pub const RULE_TABLE_SIZE: usize = 9;

/// Total genome length: one birth table plus one survival table.
pub const GENOME_LENGTH: usize = 2 * RULE_TABLE_SIZE;

/// An 18-bit rule table parameterizing the maze automaton.
///
/// Bits `[0, 9)` form the birth rule: indexed by the filled Moore-neighbor
/// count of an open cell, a set bit turns the cell into a wall on the next
/// step. Bits `[9, 18)` form the survival rule: indexed by `9 + count` for
/// a wall cell, a cleared bit opens the cell. Genomes are immutable once
/// constructed; crossover and mutation always build new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genome {
    bits: [bool; GENOME_LENGTH],
}

impl Genome {
    /// Create a genome from a full bit array.
    pub fn new(bits: [bool; GENOME_LENGTH]) -> Self {
        Self { bits }
    }

    /// Build a genome from a bit slice, rejecting any length other than 18.
    pub fn from_bits(bits: &[bool]) -> Result<Self, GenomeError> {
        if bits.len() != GENOME_LENGTH {
            return Err(GenomeError::InvalidLength {
                expected: GENOME_LENGTH,
                actual: bits.len(),
            });
        }
        let mut array = [false; GENOME_LENGTH];
        array.copy_from_slice(bits);
        Ok(Self { bits: array })
    }

    /// Raw bit pattern.
    #[inline]
    pub fn bits(&self) -> &[bool; GENOME_LENGTH] {
        &self.bits
    }

    /// Birth rule: does an open cell with `filled` Moore neighbors become a wall?
    #[inline]
    pub fn births(&self, filled: usize) -> bool {
        self.bits[filled]
    }

    /// Survival rule: does a wall cell with `filled` Moore neighbors stay a wall?
    #[inline]
    pub fn survives(&self, filled: usize) -> bool {
        self.bits[RULE_TABLE_SIZE + filled]
    }

    /// Single-point crossover at `point`, valid in `[1, GENOME_LENGTH - 1]`.
    ///
    /// Returns the two spliced children: parent-one's prefix joined with
    /// parent-two's suffix, and the symmetric swap. Splicing the children
    /// again at the same point reconstructs the parents exactly.
    pub fn splice(a: &Genome, b: &Genome, point: usize) -> Result<(Genome, Genome), GenomeError> {
        if point == 0 || point >= GENOME_LENGTH {
            return Err(GenomeError::InvalidCrossoverPoint { point });
        }

        let mut first = a.bits;
        let mut second = b.bits;
        first[point..].copy_from_slice(&b.bits[point..]);
        second[point..].copy_from_slice(&a.bits[point..]);
        Ok((Genome::new(first), Genome::new(second)))
    }
}

impl Default for Genome {
    /// All-zero genome: no births, no deaths.
    fn default() -> Self {
        Self {
            bits: [false; GENOME_LENGTH],
        }
    }
}

/// Genome construction errors.
#[derive(Debug, thiserror::Error)]
pub enum GenomeError {
    #[error("genome must be exactly {expected} bits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("crossover point {point} must lie in [1, {}]", GENOME_LENGTH - 1)]
    InvalidCrossoverPoint { point: usize },
}

/// Scalar objective guiding the genetic search. Lower is better.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessMode {
    /// BFS distance from start to end only.
    ShortestSolutionPath,
    /// Count of dead-end cells only.
    TotalDeadEnds,
    /// Unweighted sum of path length and dead-end count.
    #[default]
    SumOfShortestAndDeadEnds,
}

fn default_population_size() -> usize {
    16
}
fn default_max_generations() -> usize {
    90
}
fn default_elitism() -> f32 {
    0.5
}
fn default_mutation_rate() -> f32 {
    0.005
}

/// Top-level configuration for a genetic search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Maze geometry and automaton settings shared by every individual.
    #[serde(default)]
    pub maze: MazeConfig,
    /// Fitness objective, fixed for the whole run.
    #[serde(default)]
    pub fitness_mode: FitnessMode,
    /// Number of individuals per generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Generation budget for the search loop.
    #[serde(default = "default_max_generations")]
    pub max_generations: usize,
    /// Fraction of the ranked population preserved unchanged each generation.
    #[serde(default = "default_elitism")]
    pub elitism: f32,
    /// Per-bit flip probability applied to offspring genomes.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f32,
    /// Random seed for reproducibility. None seeds from entropy.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            maze: MazeConfig::default(),
            fitness_mode: FitnessMode::default(),
            population_size: default_population_size(),
            max_generations: default_max_generations(),
            elitism: default_elitism(),
            mutation_rate: default_mutation_rate(),
            random_seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Validate configuration parameters before any generation runs.
    pub fn validate(&self) -> Result<(), EvolutionConfigError> {
        self.maze.validate()?;
        // Offspring need two distinct parents.
        if self.population_size < 2 {
            return Err(EvolutionConfigError::PopulationTooSmall {
                size: self.population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.elitism) {
            return Err(EvolutionConfigError::InvalidElitism(self.elitism));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EvolutionConfigError::InvalidMutationRate(self.mutation_rate));
        }
        Ok(())
    }
}

/// Search configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionConfigError {
    #[error("population size {size} is too small; need at least 2 individuals")]
    PopulationTooSmall { size: usize },
    #[error("elitism fraction {0} must lie in [0, 1]")]
    InvalidElitism(f32),
    #[error("mutation rate {0} must lie in [0, 1]")]
    InvalidMutationRate(f32),
    #[error(transparent)]
    MazeConfigError(#[from] ConfigError),
}
