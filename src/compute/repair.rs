//! Region connectivity repair: carve passages until one open region remains.

use std::collections::VecDeque;

use super::grid::{Cell, Coord, Grid};

/// Radius of the disc opened around every point of a carved passage.
const PASSAGE_RADIUS: i64 = 5;

/// Merge disconnected open regions until exactly one remains.
///
/// Each pass flood-fills the current regions, wraps them in rooms, and runs
/// the greedy matching: rooms are visited in discovery order, a room that
/// already holds a connection sits the pass out, and every other room
/// carves one passage to its nearest unconnected partner by squared
/// edge-tile distance. The pass is greedy and order-dependent by contract;
/// it is not a minimum spanning tree, and the resulting topology depends on
/// discovery order. Disc carving can merge more than two regions at once,
/// so the loop re-runs the flood fill rather than tracking merges
/// incrementally. A grid with no open cells terminates immediately.
pub fn repair(mut grid: Grid) -> Grid {
    let mut regions = open_regions(&grid);
    while regions.len() > 1 {
        let mut rooms: Vec<Room> = regions
            .into_iter()
            .map(|tiles| Room::new(tiles, &grid))
            .collect();
        mark_main_room(&mut rooms);
        connect_closest_rooms(&mut rooms, &mut grid);
        regions = open_regions(&grid);
    }
    grid
}

/// Partition all open cells into 4-connected regions by flood fill.
pub fn open_regions(grid: &Grid) -> Vec<Vec<Coord>> {
    let mut claimed = vec![false; grid.width() * grid.height()];
    let mut regions = Vec::new();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if claimed[y * grid.width() + x] || !grid.get(x, y).is_open() {
                continue;
            }
            let region = region_tiles(grid, Coord::new(x, y));
            for tile in &region {
                claimed[tile.y * grid.width() + tile.x] = true;
            }
            regions.push(region);
        }
    }

    regions
}

/// Flood fill from `start`, collecting every same-state cell reachable over
/// orthogonal adjacency (the 3x3 block filtered to same-row-or-same-column
/// offsets).
fn region_tiles(grid: &Grid, start: Coord) -> Vec<Coord> {
    let target = grid.get(start.x, start.y);
    let mut visited = vec![false; grid.width() * grid.height()];
    let mut tiles = Vec::new();

    let mut queue = VecDeque::new();
    queue.push_back(start);
    visited[start.y * grid.width() + start.x] = true;

    while let Some(tile) = queue.pop_front() {
        tiles.push(tile);

        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx != 0 && dy != 0 {
                    continue;
                }
                let nx = tile.x as i64 + dx;
                let ny = tile.y as i64 + dy;
                if nx < 0 || ny < 0 {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);
                if !grid.in_bounds(nx, ny) {
                    continue;
                }
                let index = ny * grid.width() + nx;
                if !visited[index] && grid.get(nx, ny) == target {
                    visited[index] = true;
                    queue.push_back(Coord::new(nx, ny));
                }
            }
        }
    }

    tiles
}

/// A region of open tiles plus the repair-time connectivity state.
///
/// Rooms are arena-indexed; `connected` is an adjacency list over indices
/// into the per-pass room vector, so the connectivity graph carries no
/// object-to-object references.
struct Room {
    tiles: Vec<Coord>,
    edge_tiles: Vec<Coord>,
    connected: Vec<usize>,
    accessible_from_main: bool,
}

impl Room {
    fn new(tiles: Vec<Coord>, grid: &Grid) -> Self {
        // Edge tiles: open cells with at least one orthogonal wall neighbor.
        let mut edge_tiles = Vec::new();
        'tiles: for &tile in &tiles {
            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    if dx != 0 && dy != 0 {
                        continue;
                    }
                    let nx = tile.x as i64 + dx;
                    let ny = tile.y as i64 + dy;
                    if nx < 0 || ny < 0 {
                        continue;
                    }
                    let (nx, ny) = (nx as usize, ny as usize);
                    if grid.in_bounds(nx, ny) && grid.get(nx, ny).is_wall() {
                        edge_tiles.push(tile);
                        continue 'tiles;
                    }
                }
            }
        }

        Self {
            tiles,
            edge_tiles,
            connected: Vec::new(),
            accessible_from_main: false,
        }
    }

    fn is_connected(&self, other: usize) -> bool {
        self.connected.contains(&other)
    }
}

/// The largest room anchors the reachability flag. Discovery order is left
/// untouched; the matching below depends on it.
fn mark_main_room(rooms: &mut [Room]) {
    if let Some(main) = rooms.iter_mut().max_by_key(|room| room.tiles.len()) {
        main.accessible_from_main = true;
    }
}

/// One greedy matching pass over the rooms.
fn connect_closest_rooms(rooms: &mut [Room], grid: &mut Grid) {
    for a in 0..rooms.len() {
        let mut best: Option<(i64, Coord, Coord, usize)> = None;

        for b in 0..rooms.len() {
            if a == b {
                continue;
            }
            if rooms[a].is_connected(b) {
                // An already-connected room skips the rest of the pass.
                best = None;
                break;
            }

            for &tile_a in &rooms[a].edge_tiles {
                for &tile_b in &rooms[b].edge_tiles {
                    let distance = tile_a.squared_distance(tile_b);
                    if best.is_none_or(|(best_distance, ..)| distance < best_distance) {
                        best = Some((distance, tile_a, tile_b, b));
                    }
                }
            }
        }

        if let Some((_, tile_a, tile_b, b)) = best {
            create_passage(rooms, grid, a, b, tile_a, tile_b);
        }
    }
}

/// Record the connection, then carve the passage between the edge tiles.
fn create_passage(
    rooms: &mut [Room],
    grid: &mut Grid,
    a: usize,
    b: usize,
    tile_a: Coord,
    tile_b: Coord,
) {
    connect_rooms(rooms, a, b);
    for point in discrete_line(tile_a, tile_b) {
        carve_disc(grid, point, PASSAGE_RADIUS);
    }
}

/// Symmetric connection; the main-room flag propagates transitively when
/// either side already carries it.
fn connect_rooms(rooms: &mut [Room], a: usize, b: usize) {
    if rooms[a].accessible_from_main {
        propagate_main_access(rooms, b);
    } else if rooms[b].accessible_from_main {
        propagate_main_access(rooms, a);
    }
    rooms[a].connected.push(b);
    rooms[b].connected.push(a);
}

/// Depth-first flag propagation over the room adjacency list.
fn propagate_main_access(rooms: &mut [Room], from: usize) {
    let mut stack = vec![from];
    while let Some(index) = stack.pop() {
        if rooms[index].accessible_from_main {
            continue;
        }
        rooms[index].accessible_from_main = true;
        stack.extend(rooms[index].connected.iter().copied());
    }
}

/// Open a filled disc around `center`, never touching the outer border.
fn carve_disc(grid: &mut Grid, center: Coord, radius: i64) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let x = center.x as i64 + dx;
            let y = center.y as i64 + dy;
            if x <= 0 || x >= grid.width() as i64 - 1 || y <= 0 || y >= grid.height() as i64 - 1 {
                continue;
            }
            grid.set(x as usize, y as usize, Cell::Open);
        }
    }
}

/// Discrete line from `from` toward `to`, excluding the destination tile.
///
/// Steps the longer axis every point and accumulates the shorter axis's
/// error, stepping it whenever the accumulation reaches the driving-axis
/// length.
fn discrete_line(from: Coord, to: Coord) -> Vec<Coord> {
    let mut x = from.x as i64;
    let mut y = from.y as i64;
    let dx = to.x as i64 - x;
    let dy = to.y as i64 - y;

    let mut step = dx.signum();
    let mut gradient_step = dy.signum();
    let mut longest = dx.abs();
    let mut shortest = dy.abs();

    let inverted = longest < shortest;
    if inverted {
        std::mem::swap(&mut longest, &mut shortest);
        step = dy.signum();
        gradient_step = dx.signum();
    }

    let mut line = Vec::with_capacity(longest as usize);
    let mut accumulation = longest / 2;
    for _ in 0..longest {
        line.push(Coord::new(x as usize, y as usize));

        if inverted {
            y += step;
        } else {
            x += step;
        }

        accumulation += shortest;
        if accumulation >= longest {
            if inverted {
                x += gradient_step;
            } else {
                y += gradient_step;
            }
            accumulation -= longest;
        }
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Grid with an all-wall interior except the listed open rectangles.
    fn pocket_grid(pockets: &[(usize, usize, usize, usize)]) -> Grid {
        let mut grid = Grid::blank(32, 32);
        for y in 1..31 {
            for x in 1..31 {
                grid.set(x, y, Cell::Wall);
            }
        }
        for &(x0, y0, x1, y1) in pockets {
            for y in y0..=y1 {
                for x in x0..=x1 {
                    grid.set(x, y, Cell::Open);
                }
            }
        }
        grid
    }

    #[test]
    fn blank_grid_is_one_region() {
        let grid = Grid::blank(32, 32);
        let regions = open_regions(&grid);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].len(), 30 * 30);
    }

    #[test]
    fn flood_fill_separates_diagonal_pockets() {
        // Diagonally touching pockets are distinct under 4-adjacency.
        let grid = pocket_grid(&[(2, 2, 4, 4), (5, 5, 7, 7)]);
        assert_eq!(open_regions(&grid).len(), 2);
    }

    #[test]
    fn repair_merges_two_distant_pockets() {
        let grid = pocket_grid(&[(2, 2, 5, 5), (25, 25, 29, 29)]);
        assert_eq!(open_regions(&grid).len(), 2);

        let repaired = repair(grid);
        assert_eq!(open_regions(&repaired).len(), 1);
    }

    #[test]
    fn repair_merges_many_pockets() {
        let grid = pocket_grid(&[
            (2, 2, 4, 4),
            (26, 2, 29, 4),
            (2, 26, 4, 29),
            (26, 26, 29, 29),
            (14, 14, 17, 17),
        ]);
        let repaired = repair(grid);
        assert_eq!(open_regions(&repaired).len(), 1);
    }

    #[test]
    fn repair_is_idempotent() {
        let once = repair(pocket_grid(&[(2, 2, 5, 5), (25, 25, 29, 29)]));
        let twice = repair(once.clone());
        assert_eq!(once, twice);

        // An already-connected grid passes through unchanged.
        let blank = Grid::blank(32, 32);
        assert_eq!(repair(blank.clone()), blank);
    }

    #[test]
    fn repair_terminates_on_fully_walled_interior() {
        let grid = pocket_grid(&[]);
        let repaired = repair(grid.clone());
        assert_eq!(repaired, grid);
        assert!(open_regions(&repaired).is_empty());
    }

    #[test]
    fn carving_never_touches_the_border() {
        let repaired = repair(pocket_grid(&[(2, 2, 4, 4), (27, 27, 29, 29)]));
        for x in 0..32 {
            assert!(repaired.get(x, 0).is_wall());
            assert!(repaired.get(x, 31).is_wall());
        }
        for y in 0..32 {
            assert!(repaired.get(0, y).is_wall());
            assert!(repaired.get(31, y).is_wall());
        }
    }

    #[test]
    fn discrete_line_walks_the_driving_axis() {
        let line = discrete_line(Coord::new(1, 1), Coord::new(5, 1));
        assert_eq!(
            line,
            vec![
                Coord::new(1, 1),
                Coord::new(2, 1),
                Coord::new(3, 1),
                Coord::new(4, 1)
            ]
        );

        // Steep lines drive the y axis.
        let steep = discrete_line(Coord::new(1, 1), Coord::new(2, 5));
        assert_eq!(steep.len(), 4);
        assert_eq!(steep[0], Coord::new(1, 1));
        assert!(steep.iter().all(|c| c.x <= 2 && c.y <= 4));
    }

    #[test]
    fn main_room_flag_propagates_over_connections() {
        let grid = pocket_grid(&[(2, 2, 8, 8), (12, 2, 14, 4), (20, 2, 22, 4)]);
        let mut rooms: Vec<Room> = open_regions(&grid)
            .into_iter()
            .map(|tiles| Room::new(tiles, &grid))
            .collect();
        mark_main_room(&mut rooms);
        assert!(rooms[0].accessible_from_main); // largest pocket found first

        connect_rooms(&mut rooms, 1, 2);
        assert!(!rooms[1].accessible_from_main);

        // Connecting the chain to the main room reaches both members.
        connect_rooms(&mut rooms, 0, 1);
        assert!(rooms[1].accessible_from_main);
        assert!(rooms[2].accessible_from_main);
    }
}
