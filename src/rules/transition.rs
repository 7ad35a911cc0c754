//! The transition function: `(state, command) -> state`.
//!
//! `apply` never mutates its input. A rejected command returns
//! `Err(Rejection)` and the caller keeps the old state; an accepted command
//! returns a `Transition` carrying the new state plus what happened on the
//! way (merge, level-up, new best score) so the caller can log and persist.
//!
//! ## Phases
//!
//! | Command | Playing | Paused | GameOver |
//! |---|---|---|---|
//! | `PlaceTile` / `StashInKeep` / `DiscardTile` | applied | rejected | rejected |
//! | `Tick` | +1 second | rejected | rejected |
//! | `TogglePause` / `ToggleHints` / `Undo` / `Restart` | applied | applied | applied |

use crate::core::command::{Command, Rejection};
use crate::core::config::GameConfig;
use crate::core::grid::{Position, Tile};
use crate::core::rng::TileSource;
use crate::core::state::{GameState, Phase};

use super::merge::{self, Merge};

/// Result of an accepted command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// The state after the command.
    pub state: GameState,
    /// Merge resolved by a placement, if any.
    pub merge: Option<Merge>,
    /// Set when the level increased.
    pub leveled_up: bool,
    /// Set to the new best score when a placement raised it.
    pub new_best: Option<u64>,
}

impl Transition {
    fn new(state: GameState) -> Self {
        Self {
            state,
            merge: None,
            leveled_up: false,
            new_best: None,
        }
    }
}

/// Apply `command` to `state`.
///
/// `tiles` is only drawn from when the queue needs refilling or a game
/// restarts.
pub fn apply(
    state: &GameState,
    command: Command,
    config: &GameConfig,
    tiles: &mut impl TileSource,
) -> Result<Transition, Rejection> {
    match command {
        Command::PlaceTile { at, value, from_keep } => place_tile(state, at, value, from_keep, config, tiles),
        Command::StashInKeep { value, from_keep } => stash_in_keep(state, value, from_keep, config, tiles),
        Command::DiscardTile { value: _, from_keep } => discard_tile(state, from_keep, config, tiles),
        Command::Undo => undo(state),
        Command::Restart => Ok(Transition::new(GameState::new(config, state.best_score, tiles))),
        Command::TogglePause => {
            let mut next = state.clone();
            next.is_paused = !next.is_paused;
            Ok(Transition::new(next))
        }
        Command::ToggleHints => {
            let mut next = state.clone();
            next.hints_enabled = !next.hints_enabled;
            Ok(Transition::new(next))
        }
        Command::Tick => {
            ensure_playing(state)?;
            let mut next = state.clone();
            next.elapsed_seconds += 1;
            Ok(Transition::new(next))
        }
    }
}

fn ensure_playing(state: &GameState) -> Result<(), Rejection> {
    match state.phase() {
        Phase::Playing => Ok(()),
        Phase::Paused => Err(Rejection::Paused),
        Phase::GameOver => Err(Rejection::GameOver),
    }
}

fn ensure_tile(value: Tile) -> Result<(), Rejection> {
    if value == 0 {
        Err(Rejection::InvalidTile)
    } else {
        Ok(())
    }
}

fn ensure_source(state: &GameState, from_keep: bool) -> Result<(), Rejection> {
    if from_keep && state.keep.is_none() {
        Err(Rejection::EmptyKeep)
    } else {
        Ok(())
    }
}

/// Clear the keep slot or consume the queue front, whichever supplied the tile.
fn take_active(state: &mut GameState, from_keep: bool, config: &GameConfig, tiles: &mut impl TileSource) {
    if from_keep {
        state.keep = None;
    } else {
        state.consume_front(config, tiles);
    }
}

fn place_tile(
    state: &GameState,
    at: Position,
    value: Tile,
    from_keep: bool,
    config: &GameConfig,
    tiles: &mut impl TileSource,
) -> Result<Transition, Rejection> {
    ensure_playing(state)?;
    ensure_tile(value)?;
    ensure_source(state, from_keep)?;
    if !at.in_bounds() {
        return Err(Rejection::OutOfBounds(at));
    }
    if state.grid.get(at).is_some() {
        return Err(Rejection::CellOccupied(at));
    }

    let mut next = state.clone();
    next.record_history(config);

    next.grid[at] = Some(value);
    let merge = merge::resolve(&mut next.grid, at);
    if let Some(m) = merge {
        next.score += m.points;
    }

    take_active(&mut next, from_keep, config, tiles);

    // One charge per level-up, however many thresholds were crossed.
    let level = config.level_for(next.score);
    let leveled_up = level > next.level;
    if leveled_up {
        next.level = level;
        next.trash_charges += 1;
    }

    let new_best = (next.score > next.best_score).then_some(next.score);
    if let Some(best) = new_best {
        next.best_score = best;
    }

    next.game_over = next.grid.is_full();
    next.hint_cells.clear();

    Ok(Transition {
        state: next,
        merge,
        leveled_up,
        new_best,
    })
}

fn stash_in_keep(
    state: &GameState,
    value: Tile,
    from_keep: bool,
    config: &GameConfig,
    tiles: &mut impl TileSource,
) -> Result<Transition, Rejection> {
    ensure_playing(state)?;
    ensure_tile(value)?;
    if from_keep {
        return Err(Rejection::AlreadyKept);
    }

    let mut next = state.clone();
    next.record_history(config);

    match next.keep.replace(value) {
        None => next.consume_front(config, tiles),
        Some(held) => match next.queue.get_mut(0) {
            Some(front) => *front = held,
            None => next.queue.push_back(held),
        },
    }
    next.hint_cells.clear();

    Ok(Transition::new(next))
}

fn discard_tile(
    state: &GameState,
    from_keep: bool,
    config: &GameConfig,
    tiles: &mut impl TileSource,
) -> Result<Transition, Rejection> {
    ensure_playing(state)?;
    ensure_source(state, from_keep)?;
    if state.trash_charges == 0 {
        return Err(Rejection::NoTrashCharges);
    }

    let mut next = state.clone();
    next.record_history(config);

    next.trash_charges -= 1;
    take_active(&mut next, from_keep, config, tiles);
    next.hint_cells.clear();

    Ok(Transition::new(next))
}

/// Restore the latest snapshot. The round trip is exact except for
/// `best_score`, which keeps the higher of the snapshot and current values.
fn undo(state: &GameState) -> Result<Transition, Rejection> {
    let mut remaining = state.history.clone();
    let mut previous = remaining.pop_back().ok_or(Rejection::NothingToUndo)?;

    previous.history = remaining;
    // The best score is a session record, so undo never lowers it.
    previous.best_score = previous.best_score.max(state.best_score);

    Ok(Transition::new(previous))
}
