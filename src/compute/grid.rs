//! Binary maze grid and coordinate primitives.

use std::fmt;

/// State of a single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Floor the player can traverse.
    Open,
    /// Filled cell.
    Wall,
}

impl Cell {
    #[inline]
    pub fn is_wall(self) -> bool {
        matches!(self, Cell::Wall)
    }

    #[inline]
    pub fn is_open(self) -> bool {
        matches!(self, Cell::Open)
    }
}

/// Integer grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    #[inline]
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance, used to pick the closest edge-tile pair.
    pub fn squared_distance(self, other: Coord) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx * dx + dy * dy
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// W x H rectangular grid of open/wall cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Blank starting state: open interior, walled border.
    pub fn blank(width: usize, height: usize) -> Self {
        let mut grid = Self {
            width,
            height,
            cells: vec![Cell::Open; width * height],
        };
        for x in 0..width {
            grid.set(x, 0, Cell::Wall);
            grid.set(x, height - 1, Cell::Wall);
        }
        for y in 0..height {
            grid.set(0, y, Cell::Wall);
            grid.set(width - 1, y, Cell::Wall);
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Cell state at (x, y). Out-of-range access is a geometry invariant
    /// violation and fails loudly.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        assert!(self.in_bounds(x, y), "cell out of bounds at ({x}, {y})");
        self.cells[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        assert!(self.in_bounds(x, y), "cell out of bounds at ({x}, {y})");
        self.cells[y * self.width + x] = cell;
    }

    /// Number of open cells in the grid.
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_open()).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                f.write_str(if self.get(x, y).is_wall() { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
