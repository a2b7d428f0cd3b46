//! Genome operations for the rule-table search: seeding, crossover, mutation.

use rand::prelude::*;

use crate::schema::{GENOME_LENGTH, Genome};

/// Seedable random source for every stochastic draw in the search.
pub struct GenomeRng {
    rng: StdRng,
}

impl GenomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Uniform random 18-bit genome.
    pub fn random_genome(&mut self) -> Genome {
        let mut bits = [false; GENOME_LENGTH];
        for bit in &mut bits {
            *bit = self.rng.gen_bool(0.5);
        }
        Genome::new(bits)
    }

    /// Uniform index into a population of `size` individuals.
    pub fn parent_index(&mut self, size: usize) -> usize {
        self.rng.gen_range(0..size)
    }

    /// Single-point crossover at a uniform point in [1, 17].
    pub fn crossover(&mut self, a: &Genome, b: &Genome) -> (Genome, Genome) {
        let point = self.rng.gen_range(1..GENOME_LENGTH);
        Genome::splice(a, b, point).expect("crossover point in range")
    }

    /// Flip each bit independently with probability `rate`.
    pub fn mutate(&mut self, genome: &Genome, rate: f32) -> Genome {
        let mut bits = *genome.bits();
        for bit in &mut bits {
            if self.rng.gen_bool(rate as f64) {
                *bit = !*bit;
            }
        }
        Genome::new(bits)
    }
}
