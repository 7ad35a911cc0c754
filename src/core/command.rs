//! Commands accepted by the engine and the reasons a command is rejected.
//!
//! A command is a discrete player intent ("drop tile 6 at (1, 2)") or a
//! clock event. The engine never interprets where a command came from;
//! pointer tracking and hit-testing stay in the UI layer.

use serde::{Deserialize, Serialize};

use super::grid::{Position, Tile};

/// A single input to the transition function.
///
/// ## Example
///
/// ```
/// use just_divide::core::{Command, Position};
///
/// let drop = Command::place(1, 2, 6, false);
/// assert_eq!(drop, Command::PlaceTile { at: Position::new(1, 2), value: 6, from_keep: false });
/// assert!(drop.is_gameplay());
/// assert!(!Command::Undo.is_gameplay());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Drop a tile onto an empty grid cell.
    PlaceTile {
        at: Position,
        value: Tile,
        from_keep: bool,
    },
    /// Move the active tile into the keep slot (or swap with the held tile).
    StashInKeep { value: Tile, from_keep: bool },
    /// Throw the active tile away, spending one trash charge.
    DiscardTile { value: Tile, from_keep: bool },
    /// Revert the most recent gameplay command.
    Undo,
    /// Start a fresh game, keeping only the best score.
    Restart,
    /// Pause or resume.
    TogglePause,
    /// Show or hide placement hints.
    ToggleHints,
    /// One clock second elapsed.
    Tick,
}

impl Command {
    /// Convenience constructor for `PlaceTile`.
    #[must_use]
    pub const fn place(row: usize, col: usize, value: Tile, from_keep: bool) -> Self {
        Command::PlaceTile {
            at: Position::new(row, col),
            value,
            from_keep,
        }
    }

    /// Check if this command consumes a tile (and so records history).
    #[must_use]
    pub const fn is_gameplay(&self) -> bool {
        matches!(
            self,
            Command::PlaceTile { .. } | Command::StashInKeep { .. } | Command::DiscardTile { .. }
        )
    }
}

/// Why a command left the state unchanged.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    #[error("cell {0} is already occupied")]
    CellOccupied(Position),
    #[error("cell {0} is off the grid")]
    OutOfBounds(Position),
    #[error("tile value must be at least 1")]
    InvalidTile,
    #[error("the held tile cannot be stashed again")]
    AlreadyKept,
    #[error("nothing is held in the keep slot")]
    EmptyKeep,
    #[error("no trash charges left")]
    NoTrashCharges,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("game is paused")]
    Paused,
    #[error("game is over")]
    GameOver,
}
