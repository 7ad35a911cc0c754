//! Game configuration.
//!
//! The rules of Just Divide are fixed, but their tuning knobs are not:
//! queue length, tile range, points per level, starting trash charges and
//! the history cap are all set here. `GameConfig::default()` reproduces the
//! standard game.
//!
//! Builders assert their arguments. Deserialized configs go through
//! `GameConfig::validate` and fail with a `ConfigError` instead.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;

use super::grid::Tile;

/// Storage key for the persisted best score.
pub const BEST_SCORE_KEY: &str = "best_score";

/// Complete game configuration.
///
/// ## Example
///
/// ```
/// use just_divide::core::GameConfig;
///
/// let config = GameConfig::default()
///     .with_tile_range(2, 12)
///     .with_starting_trash_charges(0);
///
/// assert_eq!(config.queue_len, 3);
/// assert_eq!(config.tile_range(), 2..=12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConfigFields")]
pub struct GameConfig {
    /// Target queue length after every consuming transition.
    pub queue_len: usize,

    /// Number of queue slots a UI shows.
    pub visible_queue_len: usize,

    /// Smallest generated tile (inclusive).
    pub min_tile: Tile,

    /// Largest generated tile (inclusive).
    pub max_tile: Tile,

    /// Score needed per level.
    pub points_per_level: u64,

    /// Trash charges a new game starts with.
    pub starting_trash_charges: u32,

    /// Maximum number of undo snapshots. `None` for unlimited.
    pub history_limit: Option<usize>,

    /// Interval between clock ticks.
    pub tick_interval: Duration,
}

/// Reasons a configuration cannot drive a game.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("queue must hold at least 1 tile")]
    EmptyQueue,
    #[error("tiles must be at least 1")]
    ZeroTile,
    #[error("empty tile range {min}..={max}")]
    EmptyTileRange { min: Tile, max: Tile },
    #[error("points per level must be positive")]
    ZeroPointsPerLevel,
}

// Unchecked wire form of `GameConfig`.
#[derive(Deserialize)]
struct ConfigFields {
    queue_len: usize,
    visible_queue_len: usize,
    min_tile: Tile,
    max_tile: Tile,
    points_per_level: u64,
    starting_trash_charges: u32,
    history_limit: Option<usize>,
    tick_interval: Duration,
}

impl TryFrom<ConfigFields> for GameConfig {
    type Error = ConfigError;

    fn try_from(fields: ConfigFields) -> Result<Self, Self::Error> {
        let config = Self {
            queue_len: fields.queue_len,
            visible_queue_len: fields.visible_queue_len,
            min_tile: fields.min_tile,
            max_tile: fields.max_tile,
            points_per_level: fields.points_per_level,
            starting_trash_charges: fields.starting_trash_charges,
            history_limit: fields.history_limit,
            tick_interval: fields.tick_interval,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            queue_len: 3,
            visible_queue_len: 2,
            min_tile: 2,
            max_tile: 20,
            points_per_level: 10,
            starting_trash_charges: 3,
            history_limit: None,
            tick_interval: Duration::from_secs(1),
        }
    }
}

impl GameConfig {
    /// Check the invariants the builders assert.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue_len == 0 {
            return Err(ConfigError::EmptyQueue);
        }
        if self.min_tile == 0 {
            return Err(ConfigError::ZeroTile);
        }
        if self.min_tile > self.max_tile {
            return Err(ConfigError::EmptyTileRange {
                min: self.min_tile,
                max: self.max_tile,
            });
        }
        if self.points_per_level == 0 {
            return Err(ConfigError::ZeroPointsPerLevel);
        }
        Ok(())
    }

    /// Set the queue length.
    #[must_use]
    pub fn with_queue_len(mut self, len: usize) -> Self {
        assert!(len > 0, "Queue must hold at least 1 tile");
        self.queue_len = len;
        self
    }

    /// Set how many queue slots are visible.
    #[must_use]
    pub fn with_visible_queue_len(mut self, len: usize) -> Self {
        self.visible_queue_len = len;
        self
    }

    /// Set the inclusive range of generated tiles.
    #[must_use]
    pub fn with_tile_range(mut self, min: Tile, max: Tile) -> Self {
        assert!(min >= 1, "Tiles must be at least 1");
        assert!(min <= max, "Empty tile range");
        self.min_tile = min;
        self.max_tile = max;
        self
    }

    /// Set the score needed per level.
    #[must_use]
    pub fn with_points_per_level(mut self, points: u64) -> Self {
        assert!(points > 0, "Points per level must be positive");
        self.points_per_level = points;
        self
    }

    /// Set the starting trash charges.
    #[must_use]
    pub fn with_starting_trash_charges(mut self, charges: u32) -> Self {
        self.starting_trash_charges = charges;
        self
    }

    /// Cap the undo history.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Set the clock tick interval.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Inclusive range of generated tiles.
    #[must_use]
    pub fn tile_range(&self) -> RangeInclusive<Tile> {
        self.min_tile..=self.max_tile
    }

    /// Level for a given score.
    #[must_use]
    pub fn level_for(&self, score: u64) -> u64 {
        score.checked_div(self.points_per_level).unwrap_or(0) + 1
    }
}
