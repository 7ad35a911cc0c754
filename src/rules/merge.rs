//! Merge resolution.
//!
//! Two tiles merge when they are equal or one evenly divides the other:
//! - Equal: both cells empty, score `2a`
//! - Divisible: the larger cell keeps `big / small`, the smaller empties,
//!   score `big`
//!
//! A placement resolves at most one merge, against the first qualifying
//! neighbour in up, right, down, left order. Merges never cascade.

use crate::core::grid::{Grid, Position, Tile};

/// Check if two tile values interact.
///
/// ```
/// use just_divide::rules::can_merge;
///
/// assert!(can_merge(6, 6));
/// assert!(can_merge(4, 12));
/// assert!(can_merge(12, 4));
/// assert!(!can_merge(5, 7));
/// ```
#[must_use]
pub fn can_merge(a: Tile, b: Tile) -> bool {
    if a == 0 || b == 0 {
        return false;
    }
    a == b || b % a == 0 || a % b == 0
}

/// What a single merge did to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Merge {
    /// The neighbour the placed tile merged with.
    pub partner: Position,
    /// Value left behind in the larger tile's cell (`None` for equal tiles).
    pub remainder: Option<Tile>,
    /// Points awarded.
    pub points: u64,
}

/// Resolve the merge for a tile that was just placed at `at`.
///
/// `at` must already hold the placed value. Returns `None` when no neighbour
/// qualifies, in which case the grid is untouched.
pub fn resolve(grid: &mut Grid, at: Position) -> Option<Merge> {
    let placed = grid.get(at)?;

    let (partner, other) = at
        .neighbors()
        .into_iter()
        .find_map(|n| grid.get(n).filter(|&v| can_merge(placed, v)).map(|v| (n, v)))?;

    if placed == other {
        grid[at] = None;
        grid[partner] = None;
        return Some(Merge {
            partner,
            remainder: None,
            points: u64::from(placed) * 2,
        });
    }

    let (big, small) = (placed.max(other), placed.min(other));
    // Equal values were handled above, so the quotient is at least 2.
    let remainder = big / small;
    let (keeper, emptied) = if placed == big { (at, partner) } else { (partner, at) };
    grid[keeper] = Some(remainder);
    grid[emptied] = None;

    Some(Merge {
        partner,
        remainder: Some(remainder),
        points: u64::from(big),
    })
}
