//! Maze scoring: BFS distance transform and dead-end classification.

use std::collections::VecDeque;

use crate::schema::{FitnessMode, MazeConfig};

use super::grid::{Coord, Grid};

/// Sentinel distance for walls and for an unreachable end cell.
pub const UNREACHABLE: i32 = -1;

/// Neighbor offsets in north-east-south-west order for deterministic BFS.
const NESW: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// BFS hop counts from the start cell; -1 marks walls.
#[derive(Debug, Clone)]
pub struct DistanceField {
    width: usize,
    height: usize,
    values: Vec<i32>,
}

impl DistanceField {
    /// Compute the distance transform of `grid` from `start`.
    ///
    /// Walls are seeded -1 and open cells 0 as the unvisited sentinel, so
    /// an open cell the search never reaches keeps value 0. The start cell
    /// itself is never revisited and keeps distance 0.
    pub fn from_grid(grid: &Grid, start: Coord) -> Self {
        let (width, height) = (grid.width(), grid.height());
        let mut values = vec![0i32; width * height];
        for y in 0..height {
            for x in 0..width {
                if grid.get(x, y).is_wall() {
                    values[y * width + x] = UNREACHABLE;
                }
            }
        }

        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(cell) = queue.pop_front() {
            for (dx, dy) in NESW {
                let nx = cell.x as i64 + dx;
                let ny = cell.y as i64 + dy;
                assert!(
                    nx >= 0 && ny >= 0 && (nx as usize) < width && (ny as usize) < height,
                    "neighbor out of bounds at ({nx}, {ny})"
                );
                let neighbor = Coord::new(nx as usize, ny as usize);
                if neighbor == start {
                    continue;
                }
                let index = neighbor.y * width + neighbor.x;
                if values[index] != 0 {
                    // Wall or already visited.
                    continue;
                }
                values[index] = values[cell.y * width + cell.x] + 1;
                queue.push_back(neighbor);
            }
        }

        Self {
            width,
            height,
            values,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Hop count at (x, y); -1 for walls, 0 for the start cell and for open
    /// cells the search never reached.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> i32 {
        assert!(
            x < self.width && y < self.height,
            "distance lookup out of bounds at ({x}, {y})"
        );
        self.values[y * self.width + x]
    }
}

/// Fitness metrics derived from a repaired maze. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeScore {
    /// BFS hops from start to end, or [`UNREACHABLE`].
    pub path_length: i32,
    /// Dead-end cell count; 0 when the active mode skips counting.
    pub dead_ends: i32,
    /// Scalar minimization objective selected by the fitness mode.
    pub fitness: i32,
}

/// Score a maze against the configured objective.
///
/// An unreachable end yields a sentinel path length and the worst possible
/// fitness rather than an error; repair normally guarantees connectivity,
/// so this only fires on degenerate inputs.
pub fn evaluate(grid: &Grid, config: &MazeConfig, mode: FitnessMode) -> (DistanceField, MazeScore) {
    let start = Coord::from(config.start());
    let end = Coord::from(config.end());
    let field = DistanceField::from_grid(grid, start);

    let raw = field.get(end.x, end.y);
    let path_length = if end == start {
        0
    } else if raw <= 0 {
        UNREACHABLE
    } else {
        raw
    };

    let dead_ends = match mode {
        // Unused by the objective, so the scan is skipped.
        FitnessMode::ShortestSolutionPath => 0,
        _ => count_dead_ends(&field, start),
    };

    let fitness = if path_length == UNREACHABLE {
        i32::MAX
    } else {
        match mode {
            FitnessMode::ShortestSolutionPath => path_length,
            FitnessMode::TotalDeadEnds => dead_ends,
            FitnessMode::SumOfShortestAndDeadEnds => path_length + dead_ends,
        }
    };

    (
        field,
        MazeScore {
            path_length,
            dead_ends,
            fitness,
        },
    )
}

/// Count open cells that terminate a corridor.
///
/// A dead end is a local maximum of the distance field that is not a hall
/// cell. Hall cells carry a straight-through corridor and can be locally
/// maximal purely through BFS tie structure.
fn count_dead_ends(field: &DistanceField, start: Coord) -> i32 {
    let mut dead_ends = 0;
    for y in 0..field.height() {
        for x in 0..field.width() {
            if field.get(x, y) == UNREACHABLE {
                continue;
            }
            if x == start.x && y == start.y {
                continue;
            }
            if is_local_max(field, x, y) && !is_hall(field, x, y) {
                dead_ends += 1;
            }
        }
    }
    dead_ends
}

/// No orthogonal neighbor leads strictly further from the start.
fn is_local_max(field: &DistanceField, x: usize, y: usize) -> bool {
    let mut max_distance = UNREACHABLE;
    for (dx, dy) in NESW {
        let nx = (x as i64 + dx) as usize;
        let ny = (y as i64 + dy) as usize;
        max_distance = max_distance.max(field.get(nx, ny));
    }
    field.get(x, y) >= max_distance
}

/// Straight-through corridor: both vertical or both horizontal neighbors
/// are non-wall.
fn is_hall(field: &DistanceField, x: usize, y: usize) -> bool {
    (field.get(x, y - 1) != UNREACHABLE && field.get(x, y + 1) != UNREACHABLE)
        || (field.get(x - 1, y) != UNREACHABLE && field.get(x + 1, y) != UNREACHABLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::grid::Cell;

    fn config() -> MazeConfig {
        MazeConfig::default()
    }

    #[test]
    fn blank_grid_shortest_path_is_manhattan_distance() {
        let grid = Grid::blank(32, 32);
        let (field, score) = evaluate(&grid, &config(), FitnessMode::ShortestSolutionPath);

        assert_eq!(field.get(1, 1), 0);
        assert_eq!(score.path_length, 58);
        assert_eq!(score.fitness, 58);
        assert_eq!(score.dead_ends, 0); // skipped by the mode
    }

    #[test]
    fn every_open_cell_is_reachable_on_a_connected_grid() {
        let grid = Grid::blank(32, 32);
        let (field, _) = evaluate(&grid, &config(), FitnessMode::ShortestSolutionPath);

        for y in 0..32 {
            for x in 0..32 {
                if grid.get(x, y).is_wall() {
                    assert_eq!(field.get(x, y), UNREACHABLE);
                } else if (x, y) == (1, 1) {
                    assert_eq!(field.get(x, y), 0);
                } else {
                    assert!(field.get(x, y) > 0, "({x}, {y}) unreachable");
                }
            }
        }
    }

    #[test]
    fn cul_de_sac_counts_as_one_dead_end() {
        // All-wall interior except a vertical corridor from the start.
        let mut grid = Grid::blank(32, 32);
        for y in 1..31 {
            for x in 1..31 {
                grid.set(x, y, Cell::Wall);
            }
        }
        for y in 1..=5 {
            grid.set(1, y, Cell::Open);
        }

        let (field, score) = evaluate(&grid, &config(), FitnessMode::TotalDeadEnds);
        assert_eq!(field.get(1, 5), 4);
        // The corridor interior is hall cells; only the far end terminates.
        assert_eq!(score.dead_ends, 1);
    }

    #[test]
    fn unreachable_end_reports_sentinel_and_worst_fitness() {
        let mut grid = Grid::blank(32, 32);
        for y in 1..31 {
            for x in 1..31 {
                grid.set(x, y, Cell::Wall);
            }
        }
        grid.set(1, 1, Cell::Open);
        grid.set(30, 30, Cell::Open);

        let (_, score) = evaluate(&grid, &config(), FitnessMode::SumOfShortestAndDeadEnds);
        assert_eq!(score.path_length, UNREACHABLE);
        assert_eq!(score.fitness, i32::MAX);
    }

    #[test]
    fn sum_mode_adds_path_and_dead_ends() {
        let grid = Grid::blank(32, 32);
        let (_, sum_score) = evaluate(&grid, &config(), FitnessMode::SumOfShortestAndDeadEnds);
        let (_, path_score) = evaluate(&grid, &config(), FitnessMode::ShortestSolutionPath);
        let (_, dead_score) = evaluate(&grid, &config(), FitnessMode::TotalDeadEnds);

        assert_eq!(
            sum_score.fitness,
            path_score.path_length + dead_score.dead_ends
        );
    }
}
