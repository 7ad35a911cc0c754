//! # just-divide
//!
//! State engine for Just Divide, a single-player tile puzzle: drop numbered
//! tiles on a 4x4 grid; a tile next to an equal or evenly dividing tile
//! merges with it, leaving the quotient or clearing both cells.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: `rules::apply` maps `(state, command)` to a new
//!    state or a `Rejection`. It never mutates its input and performs no I/O.
//!
//! 2. **Owned State**: No globals. An `Engine` owns one game and is its only
//!    mutation entry point; engines can coexist freely.
//!
//! 3. **Injected Randomness**: Tiles come from a `TileSource`. `GameRng`
//!    (ChaCha8) is seedable, so every game can be replayed.
//!
//! ## Architecture
//!
//! - **Snapshot Undo**: Each move pushes a full snapshot onto an `im`
//!   persistent vector, so history costs O(1) per move to record.
//!
//! - **Side Effects at the Edge**: Best-score persistence, hint refresh and
//!   logging happen in `Engine`, after the transition is committed.
//!
//! ## Modules
//!
//! - `core`: Grid, positions, state, commands, RNG, configuration
//! - `rules`: Merge resolution, hints, the transition function
//! - `engine`: The owning engine and its command/query surface
//! - `store`: Best-score persistence
//! - `clock`: Background tick thread

pub mod core;
pub mod rules;
pub mod engine;
pub mod store;
pub mod clock;

// Re-export commonly used types
pub use crate::core::{
    Command, Rejection,
    Direction, Grid, Position, Tile,
    ConfigError, GameConfig, GameRng, GameRngState, ScriptedTiles, TileSource,
    GameState, Phase,
};

pub use crate::rules::{apply, can_merge, compute_hints, Merge, Transition};

pub use crate::engine::Engine;

pub use crate::store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};

pub use crate::clock::Clock;
