//! Grid evolver: applies a genome's rule table as a synchronous automaton.

use crate::schema::{Genome, MazeConfig};

use super::grid::{Cell, Grid};

/// Evolve a blank grid under `genome` for the configured iteration count.
///
/// Each iteration is a synchronous step: neighbor counts are read from the
/// previous iteration's full grid, never from cells already rewritten in
/// the same sweep. Border cells are excluded from updates and stay walls.
/// The start and end cells are forced open after the final iteration so
/// every genome yields a traversable pair.
///
/// Deterministic: the same genome and config always produce a bit-identical
/// grid.
pub fn evolve(genome: &Genome, config: &MazeConfig) -> Grid {
    let mut current = Grid::blank(config.width, config.height);
    let mut next = current.clone();

    for _ in 0..config.iterations {
        for y in 1..config.height - 1 {
            for x in 1..config.width - 1 {
                let filled = count_filled_neighbors(&current, x, y);
                match current.get(x, y) {
                    Cell::Open => {
                        if genome.births(filled) {
                            next.set(x, y, Cell::Wall);
                        }
                    }
                    Cell::Wall => {
                        if !genome.survives(filled) {
                            next.set(x, y, Cell::Open);
                        }
                    }
                }
            }
        }
        current.clone_from(&next);
    }

    let (sx, sy) = config.start();
    let (ex, ey) = config.end();
    current.set(sx, sy, Cell::Open);
    current.set(ex, ey, Cell::Open);
    current
}

/// Count filled cells in the Moore neighborhood of an interior cell.
fn count_filled_neighbors(grid: &Grid, x: usize, y: usize) -> usize {
    let mut filled = 0;
    for ny in y - 1..=y + 1 {
        for nx in x - 1..=x + 1 {
            // Interior-only iteration keeps every neighbor on the grid.
            assert!(
                grid.in_bounds(nx, ny),
                "neighbor out of bounds at ({nx}, {ny})"
            );
            if nx == x && ny == y {
                continue;
            }
            if grid.get(nx, ny).is_wall() {
                filled += 1;
            }
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{GENOME_LENGTH, RULE_TABLE_SIZE};

    fn config() -> MazeConfig {
        MazeConfig::default()
    }

    #[test]
    fn evolve_is_deterministic() {
        let mut bits = [false; GENOME_LENGTH];
        bits[2] = true;
        bits[4] = true;
        bits[RULE_TABLE_SIZE + 1] = true;
        bits[RULE_TABLE_SIZE + 6] = true;
        let genome = Genome::new(bits);

        assert_eq!(evolve(&genome, &config()), evolve(&genome, &config()));
    }

    #[test]
    fn all_zero_genome_leaves_blank_grid_unchanged() {
        // No births and an all-open interior means no rule ever fires.
        let evolved = evolve(&Genome::default(), &config());
        assert_eq!(evolved, Grid::blank(32, 32));
    }

    #[test]
    fn start_and_end_are_open_for_extreme_genomes() {
        for genome in [Genome::default(), Genome::new([true; GENOME_LENGTH])] {
            let evolved = evolve(&genome, &config());
            assert!(evolved.get(1, 1).is_open());
            assert!(evolved.get(30, 30).is_open());
        }
    }

    #[test]
    fn all_one_genome_walls_the_interior_except_start_and_end() {
        let evolved = evolve(&Genome::new([true; GENOME_LENGTH]), &config());
        for y in 1..31 {
            for x in 1..31 {
                if (x, y) == (1, 1) || (x, y) == (30, 30) {
                    assert!(evolved.get(x, y).is_open());
                } else {
                    assert!(evolved.get(x, y).is_wall());
                }
            }
        }
    }

    #[test]
    fn step_reads_the_previous_grid_not_partial_updates() {
        // On the blank grid only border-adjacent cells see filled neighbors:
        // interior corners see 5, other border-adjacent cells see 3. With
        // birth bits 3 and 5 set, one synchronous step walls exactly that
        // ring. An in-place sweep would see freshly placed walls and raise
        // some counts to 4, leaving gaps in the ring.
        let mut bits = [false; GENOME_LENGTH];
        bits[3] = true;
        bits[5] = true;
        for survival in &mut bits[RULE_TABLE_SIZE..] {
            *survival = true;
        }
        let genome = Genome::new(bits);
        let cfg = MazeConfig {
            iterations: 1,
            ..MazeConfig::default()
        };

        let evolved = evolve(&genome, &cfg);
        for i in 1..31 {
            if (i, 1usize) != (1, 1) {
                assert!(evolved.get(i, 1).is_wall(), "({i}, 1) should be wall");
            }
            if (1usize, i) != (1, 1) {
                assert!(evolved.get(1, i).is_wall(), "(1, {i}) should be wall");
            }
            if (i, 30usize) != (30, 30) {
                assert!(evolved.get(i, 30).is_wall(), "({i}, 30) should be wall");
            }
            if (30usize, i) != (30, 30) {
                assert!(evolved.get(30, i).is_wall(), "(30, {i}) should be wall");
            }
        }
        for y in 2..30 {
            for x in 2..30 {
                assert!(evolved.get(x, y).is_open(), "({x}, {y}) should be open");
            }
        }
    }
}
