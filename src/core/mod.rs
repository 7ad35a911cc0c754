//! Core engine types: grid geometry, state, commands, RNG, configuration.
//!
//! These are plain data with no game rules attached. The rules live in
//! `crate::rules` and operate on these types.

pub mod grid;
pub mod rng;
pub mod config;
pub mod command;
pub mod state;

pub use grid::{Direction, Grid, Position, Tile, COLS, ROWS};
pub use rng::{GameRng, GameRngState, ScriptedTiles, TileSource};
pub use config::{ConfigError, GameConfig, BEST_SCORE_KEY};
pub use command::{Command, Rejection};
pub use state::{GameState, Phase};
