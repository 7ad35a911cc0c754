//! The game engine: owns one game and is its only mutation entry point.
//!
//! `Engine` wraps the pure transition function with the pieces that are not
//! pure:
//! - the injected `TileSource` that refills the queue
//! - the `KeyValueStore` holding the best score
//! - hint refresh after every accepted command
//! - logging
//!
//! Engines share nothing, so any number can coexist. To drive one from
//! several threads, wrap it in `Arc<Mutex<_>>` (see `crate::clock`).
//!
//! ## Example
//!
//! ```
//! use just_divide::{Engine, GameConfig, MemoryStore, ScriptedTiles};
//!
//! let mut engine = Engine::new(GameConfig::default(), ScriptedTiles::new(vec![4, 12, 7]), MemoryStore::new());
//!
//! engine.place_tile(0, 0, 4, false).unwrap();
//! engine.place_tile(0, 1, 12, false).unwrap();
//!
//! assert_eq!(engine.score(), 12);
//! assert_eq!(engine.grid().get(just_divide::Position::new(0, 1)), Some(3));
//! ```

use crate::core::command::{Command, Rejection};
use crate::core::config::GameConfig;
use crate::core::grid::{Grid, Position, Tile};
use crate::core::rng::{GameRng, TileSource};
use crate::core::state::{GameState, Phase};
use crate::rules::{self, compute_hints};
use crate::store::{self, KeyValueStore, MemoryStore};

/// A running game.
pub struct Engine<T = GameRng, S = MemoryStore> {
    config: GameConfig,
    state: GameState,
    tiles: T,
    store: S,
}

impl Engine<GameRng, MemoryStore> {
    /// Default game with a seeded RNG and an in-memory store.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameConfig::default(), GameRng::new(seed), MemoryStore::new())
    }
}

impl<T: TileSource, S: KeyValueStore> Engine<T, S> {
    /// Start a new game. The best score is read from `store` once, here.
    pub fn new(config: GameConfig, mut tiles: T, store: S) -> Self {
        let best = store::load_best_score(&store);
        let state = GameState::new(&config, best, &mut tiles);
        log::debug!("new game, best score {}, queue {:?}", best, state.queue);
        Self {
            config,
            state,
            tiles,
            store,
        }
    }

    /// Resume a saved game.
    ///
    /// The stored best score wins if it is higher than the saved one.
    pub fn resume(config: GameConfig, mut state: GameState, mut tiles: T, store: S) -> Self {
        state.best_score = state.best_score.max(store::load_best_score(&store));
        state.refill_queue(&config, &mut tiles);
        let mut engine = Self {
            config,
            state,
            tiles,
            store,
        };
        engine.refresh_hints();
        engine
    }

    /// Apply a command. On rejection the state is left exactly as it was.
    pub fn dispatch(&mut self, command: Command) -> Result<(), Rejection> {
        let transition = rules::apply(&self.state, command, &self.config, &mut self.tiles)
            .map_err(|rejection| {
                log::debug!("rejected {:?}: {}", command, rejection);
                rejection
            })?;

        if let Some(merge) = transition.merge {
            log::debug!(
                "merged with {} (+{}), left {:?}",
                merge.partner,
                merge.points,
                merge.remainder
            );
        }
        if transition.leveled_up {
            log::info!("level {} reached", transition.state.level);
        }
        if transition.state.game_over && !self.state.game_over {
            log::info!("game over, final score {}", transition.state.score);
        }
        if matches!(command, Command::Restart) {
            log::info!("restarted, best score {}", transition.state.best_score);
        }

        // Hints follow the tiles in play and the toggle. A tick or pause keeps
        // whatever is shown, including a preview.
        let hints_stale = transition.state.grid != self.state.grid
            || transition.state.queue != self.state.queue
            || transition.state.keep != self.state.keep
            || transition.state.hints_enabled != self.state.hints_enabled;
        self.state = transition.state;

        if let Some(best) = transition.new_best {
            self.persist_best(best);
        }
        if hints_stale {
            self.refresh_hints();
        }
        Ok(())
    }

    // Store failures never reach gameplay.
    fn persist_best(&mut self, best: u64) {
        match store::save_best_score(&mut self.store, best) {
            Ok(()) => log::info!("new best score {}", best),
            Err(e) => log::warn!("failed to persist best score {}: {}", best, e),
        }
    }

    /// Recompute hints for the queue front, or clear them.
    fn refresh_hints(&mut self) {
        self.state.hint_cells = match (self.state.hints_enabled, self.state.active_tile()) {
            (true, Some(active)) => compute_hints(&self.state.grid, active),
            _ => Vec::new(),
        };
    }

    /// Show hints for an explicit tile, e.g. the held tile while it is dragged.
    ///
    /// Clears the hints when they are disabled.
    pub fn preview_hints(&mut self, active: Tile) -> &[Position] {
        self.state.hint_cells = if self.state.hints_enabled {
            compute_hints(&self.state.grid, active)
        } else {
            Vec::new()
        };
        &self.state.hint_cells
    }

    // === Commands ===

    pub fn place_tile(&mut self, row: usize, col: usize, value: Tile, from_keep: bool) -> Result<(), Rejection> {
        self.dispatch(Command::place(row, col, value, from_keep))
    }

    pub fn stash_in_keep(&mut self, value: Tile, from_keep: bool) -> Result<(), Rejection> {
        self.dispatch(Command::StashInKeep { value, from_keep })
    }

    pub fn discard_tile(&mut self, value: Tile, from_keep: bool) -> Result<(), Rejection> {
        self.dispatch(Command::DiscardTile { value, from_keep })
    }

    pub fn undo(&mut self) -> Result<(), Rejection> {
        self.dispatch(Command::Undo)
    }

    pub fn restart(&mut self) -> Result<(), Rejection> {
        self.dispatch(Command::Restart)
    }

    pub fn toggle_pause(&mut self) -> Result<(), Rejection> {
        self.dispatch(Command::TogglePause)
    }

    pub fn toggle_hints(&mut self) -> Result<(), Rejection> {
        self.dispatch(Command::ToggleHints)
    }

    /// Advance the clock by one second. Driven by `crate::clock::Clock`.
    pub fn tick(&mut self) -> Result<(), Rejection> {
        self.dispatch(Command::Tick)
    }

    // === Queries ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    /// All queued tiles, front first.
    pub fn queue(&self) -> impl Iterator<Item = Tile> + '_ {
        self.state.queue.iter().copied()
    }

    /// The queue slots a UI shows (`config.visible_queue_len`).
    #[must_use]
    pub fn visible_queue(&self) -> Vec<Tile> {
        self.state.visible_queue(self.config.visible_queue_len).collect()
    }

    #[must_use]
    pub fn active_tile(&self) -> Option<Tile> {
        self.state.active_tile()
    }

    #[must_use]
    pub fn keep(&self) -> Option<Tile> {
        self.state.keep
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.state.score
    }

    #[must_use]
    pub fn level(&self) -> u64 {
        self.state.level
    }

    #[must_use]
    pub fn trash_charges(&self) -> u32 {
        self.state.trash_charges
    }

    #[must_use]
    pub fn best_score(&self) -> u64 {
        self.state.best_score
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.state.elapsed_seconds
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.is_paused
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn hints_enabled(&self) -> bool {
        self.state.hints_enabled
    }

    #[must_use]
    pub fn hint_cells(&self) -> &[Position] {
        &self.state.hint_cells
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.state.history_len()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the tile source and store, dropping the game.
    pub fn into_parts(self) -> (GameState, T, S) {
        (self.state, self.tiles, self.store)
    }
}
