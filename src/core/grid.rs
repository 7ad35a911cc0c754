//! Board geometry: tiles, positions, directions, and the fixed 4x4 grid.
//!
//! ## Position
//!
//! Type-safe `(row, col)` coordinate. Row 0 is the top row.
//!
//! ## Grid
//!
//! Fixed-size cell storage backed by an array for O(1) access and `Copy`
//! snapshots. Supports indexing by `Position`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

/// A tile value. Tiles on the grid and in the queue are always >= 1.
pub type Tile = u32;

/// Number of grid rows.
pub const ROWS: usize = 4;

/// Number of grid columns.
pub const COLS: usize = 4;

/// Grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check if this position lies on the grid.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.row < ROWS && self.col < COLS
    }

    /// The adjacent position in `dir`, or `None` at the grid edge.
    #[must_use]
    pub fn step(self, dir: Direction) -> Option<Position> {
        let next = match dir {
            Direction::Up => Position::new(self.row.checked_sub(1)?, self.col),
            Direction::Right => Position::new(self.row, self.col + 1),
            Direction::Down => Position::new(self.row + 1, self.col),
            Direction::Left => Position::new(self.row, self.col.checked_sub(1)?),
        };
        next.in_bounds().then_some(next)
    }

    /// Orthogonal neighbours in merge priority order (up, right, down, left).
    ///
    /// ```
    /// use just_divide::core::Position;
    ///
    /// let corner: Vec<_> = Position::new(0, 0).neighbors().into_iter().collect();
    /// assert_eq!(corner, vec![Position::new(0, 1), Position::new(1, 0)]);
    /// ```
    #[must_use]
    pub fn neighbors(self) -> SmallVec<[Position; 4]> {
        Direction::MERGE_ORDER
            .iter()
            .filter_map(|&dir| self.step(dir))
            .collect()
    }

    /// Iterate over every grid position in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..ROWS).flat_map(|row| (0..COLS).map(move |col| Position::new(row, col)))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orthogonal direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Order in which neighbours are examined for a merge.
    pub const MERGE_ORDER: [Direction; 4] =
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left];
}

/// The 4x4 playing grid. `None` is an empty cell.
///
/// ## Example
///
/// ```
/// use just_divide::core::{Grid, Position};
///
/// let mut grid = Grid::new();
/// grid[Position::new(1, 2)] = Some(6);
///
/// assert_eq!(grid.get(Position::new(1, 2)), Some(6));
/// assert_eq!(grid.empty_count(), 15);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Option<Tile>; COLS]; ROWS],
}

impl Grid {
    /// Create an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from explicit rows.
    #[must_use]
    pub fn from_rows(cells: [[Option<Tile>; COLS]; ROWS]) -> Self {
        Self { cells }
    }

    /// Value at `pos`, or `None` if empty or off the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Tile> {
        if pos.in_bounds() {
            self.cells[pos.row][pos.col]
        } else {
            None
        }
    }

    /// Check if `pos` is on the grid and empty.
    #[must_use]
    pub fn is_vacant(&self, pos: Position) -> bool {
        pos.in_bounds() && self.cells[pos.row][pos.col].is_none()
    }

    /// Check if every cell is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_none()).count()
    }

    /// Iterate over empty positions in row-major order.
    pub fn vacant_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(move |&pos| self.is_vacant(pos))
    }

    /// Iterate over occupied cells in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        Position::all().filter_map(move |pos| self.get(pos).map(|v| (pos, v)))
    }

    /// Borrow the raw rows.
    #[must_use]
    pub fn rows(&self) -> &[[Option<Tile>; COLS]; ROWS] {
        &self.cells
    }
}

impl Index<Position> for Grid {
    type Output = Option<Tile>;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.cells[pos.row][pos.col]
    }
}

impl IndexMut<Position> for Grid {
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        &mut self.cells[pos.row][pos.col]
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            let line: Vec<String> = row
                .iter()
                .map(|cell| cell.map_or_else(|| ".".to_string(), |v| v.to_string()))
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
