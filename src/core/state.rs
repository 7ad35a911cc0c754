//! Game state: the single aggregate every transition produces.
//!
//! ## GameState
//!
//! Everything a UI needs to render one frame:
//! - Grid, queue, keep slot
//! - Score, level, trash charges, best score
//! - Clock, pause and game-over flags
//! - Hint toggle and the current hint cells
//! - Undo history
//!
//! Uses `im` persistent vectors for the queue and history, so pushing a
//! snapshot before every move is O(1) in the size of the previous state.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::grid::{Grid, Position, Tile};
use super::rng::TileSource;

/// Coarse lifecycle of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Accepting moves; the clock runs.
    Playing,
    /// Moves are refused; the clock is frozen.
    Paused,
    /// The grid is full. Only undo and restart make progress.
    GameOver,
}

/// Complete observable game state.
///
/// Snapshots stored in `history` are full `GameState` values whose own
/// `history` is empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The 4x4 grid.
    pub grid: Grid,

    /// Upcoming tiles. The front is the active tile.
    pub queue: Vector<Tile>,

    /// Tile held aside, if any.
    pub keep: Option<Tile>,

    /// Points scored this game.
    pub score: u64,

    /// `score / points_per_level + 1`.
    pub level: u64,

    /// Remaining discards.
    pub trash_charges: u32,

    /// Highest score seen this session (seeded from storage).
    pub best_score: u64,

    /// True exactly when the grid has no empty cell.
    pub game_over: bool,

    /// Seconds of unpaused play.
    pub elapsed_seconds: u64,

    pub is_paused: bool,

    pub hints_enabled: bool,

    /// Cells where the active tile would merge immediately (row-major).
    pub hint_cells: Vec<Position>,

    /// Prior snapshots, most recent last.
    pub history: Vector<GameState>,
}

impl GameState {
    /// Create the opening state of a new game.
    ///
    /// ## Defaults
    ///
    /// - Empty grid, empty keep
    /// - Score 0, level 1
    /// - `config.starting_trash_charges` trash charges
    /// - A fresh queue of `config.queue_len` tiles
    #[must_use]
    pub fn new(config: &GameConfig, best_score: u64, tiles: &mut impl TileSource) -> Self {
        let mut state = Self {
            grid: Grid::new(),
            queue: Vector::new(),
            keep: None,
            score: 0,
            level: 1,
            trash_charges: config.starting_trash_charges,
            best_score,
            game_over: false,
            elapsed_seconds: 0,
            is_paused: false,
            hints_enabled: false,
            hint_cells: Vec::new(),
            history: Vector::new(),
        };
        state.refill_queue(config, tiles);
        state
    }

    /// Current lifecycle phase. Game over takes precedence over pause.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.is_paused {
            Phase::Paused
        } else {
            Phase::Playing
        }
    }

    /// The tile at the front of the queue.
    #[must_use]
    pub fn active_tile(&self) -> Option<Tile> {
        self.queue.front().copied()
    }

    /// The first `len` queue slots.
    pub fn visible_queue(&self, len: usize) -> impl Iterator<Item = Tile> + '_ {
        self.queue.iter().take(len).copied()
    }

    /// Number of snapshots available to undo.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Copy of this state with an empty history, for pushing onto a history stack.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        Self {
            history: Vector::new(),
            ..self.clone()
        }
    }

    /// Push a snapshot of the current state onto its own history.
    ///
    /// When `config.history_limit` is set, the oldest snapshots are dropped.
    pub fn record_history(&mut self, config: &GameConfig) {
        let snapshot = self.snapshot();
        self.history.push_back(snapshot);
        if let Some(limit) = config.history_limit {
            while self.history.len() > limit {
                self.history.pop_front();
            }
        }
    }

    /// Top the queue back up to `config.queue_len`.
    pub fn refill_queue(&mut self, config: &GameConfig, tiles: &mut impl TileSource) {
        while self.queue.len() < config.queue_len {
            self.queue.push_back(tiles.next_tile(config.tile_range()));
        }
    }

    /// Remove the front tile and refill.
    pub fn consume_front(&mut self, config: &GameConfig, tiles: &mut impl TileSource) {
        self.queue.pop_front();
        self.refill_queue(config, tiles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{GameRng, ScriptedTiles};

    #[test]
    fn test_new_state() {
        let config = GameConfig::default();
        let state = GameState::new(&config, 17, &mut GameRng::new(42));

        assert_eq!(state.grid, Grid::new());
        assert_eq!(state.queue.len(), 3);
        assert!(state.queue.iter().all(|t| (2..=20).contains(t)));
        assert_eq!(state.keep, None);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.trash_charges, 3);
        assert_eq!(state.best_score, 17);
        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.history_len(), 0);
    }

    #[test]
    fn test_phase_precedence() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 0, &mut GameRng::new(1));

        state.is_paused = true;
        assert_eq!(state.phase(), Phase::Paused);

        state.game_over = true;
        assert_eq!(state.phase(), Phase::GameOver);
    }

    #[test]
    fn test_consume_front() {
        let config = GameConfig::default();
        let mut tiles = ScriptedTiles::new(vec![3, 4, 5, 6]);
        let mut state = GameState::new(&config, 0, &mut tiles);

        assert_eq!(state.active_tile(), Some(3));
        state.consume_front(&config, &mut tiles);

        assert_eq!(state.queue.iter().copied().collect::<Vec<_>>(), vec![4, 5, 6]);
        assert_eq!(state.visible_queue(2).collect::<Vec<_>>(), vec![4, 5]);
    }

    #[test]
    fn test_history_snapshots_are_flat() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 0, &mut GameRng::new(1));

        state.record_history(&config);
        state.score = 5;
        state.record_history(&config);

        assert_eq!(state.history_len(), 2);
        assert!(state.history.iter().all(|s| s.history.is_empty()));
        assert_eq!(state.history[1].score, 5);
    }

    #[test]
    fn test_history_limit() {
        let config = GameConfig::default().with_history_limit(2);
        let mut state = GameState::new(&config, 0, &mut GameRng::new(1));

        for score in 0..5 {
            state.score = score;
            state.record_history(&config);
        }

        assert_eq!(state.history_len(), 2);
        assert_eq!(state.history[0].score, 3);
        assert_eq!(state.history[1].score, 4);
    }

    #[test]
    fn test_state_serde() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 9, &mut GameRng::new(5));
        state.grid[Position::new(2, 2)] = Some(8);
        state.record_history(&config);

        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, back);
    }
}
