//! Placement hints: empty cells where the active tile would merge at once.

use crate::core::grid::{Grid, Position, Tile};

use super::merge::can_merge;

/// Every empty cell with an orthogonal neighbour that `active` can merge with.
///
/// Pure and idempotent; results are in row-major order.
///
/// ```
/// use just_divide::core::{Grid, Position};
/// use just_divide::rules::compute_hints;
///
/// let mut grid = Grid::new();
/// grid[Position::new(0, 0)] = Some(10);
///
/// assert_eq!(compute_hints(&grid, 5), vec![Position::new(0, 1), Position::new(1, 0)]);
/// assert!(compute_hints(&grid, 3).is_empty());
/// ```
#[must_use]
pub fn compute_hints(grid: &Grid, active: Tile) -> Vec<Position> {
    grid.vacant_positions()
        .filter(|pos| {
            pos.neighbors()
                .into_iter()
                .filter_map(|n| grid.get(n))
                .any(|v| can_merge(active, v))
        })
        .collect()
}
