//! End-to-end gameplay scenarios through the public engine surface.
//!
//! Each test drives an `Engine` with scripted tiles so queue contents are
//! known exactly.

use just_divide::core::BEST_SCORE_KEY;
use just_divide::{
    Command, Engine, GameConfig, GameRng, GameState, KeyValueStore, MemoryStore, Phase, Position,
    Rejection, ScriptedTiles, Tile,
};

fn engine(tiles: &[Tile]) -> Engine<ScriptedTiles, MemoryStore> {
    Engine::new(GameConfig::default(), ScriptedTiles::new(tiles.to_vec()), MemoryStore::new())
}

/// Equal tiles clear each other and score their sum.
#[test]
fn test_equal_merge() {
    let mut game = engine(&[6, 6, 5]);

    game.place_tile(0, 0, 6, false).unwrap();
    game.place_tile(0, 1, 6, false).unwrap();

    assert_eq!(game.grid().get(Position::new(0, 0)), None);
    assert_eq!(game.grid().get(Position::new(0, 1)), None);
    assert_eq!(game.score(), 12);
}

/// A divisible pair leaves the quotient where the larger tile was.
#[test]
fn test_divisible_merge() {
    let mut game = engine(&[4, 12, 5]);

    game.place_tile(0, 0, 4, false).unwrap();
    game.place_tile(0, 1, 12, false).unwrap();

    assert_eq!(game.grid().get(Position::new(0, 1)), Some(3));
    assert_eq!(game.grid().get(Position::new(0, 0)), None);
    assert_eq!(game.score(), 12);
}

/// Coprime tiles just sit next to each other.
#[test]
fn test_no_merge() {
    let mut game = engine(&[5, 7, 11]);

    game.place_tile(0, 0, 5, false).unwrap();
    game.place_tile(0, 1, 7, false).unwrap();

    assert_eq!(game.grid().get(Position::new(0, 0)), Some(5));
    assert_eq!(game.grid().get(Position::new(0, 1)), Some(7));
    assert_eq!(game.score(), 0);
}

/// Only one merge per placement, even when the remainder could merge again.
#[test]
fn test_merges_do_not_cascade() {
    let mut game = engine(&[8, 2, 16, 5]);

    game.place_tile(0, 0, 8, false).unwrap();
    game.place_tile(0, 2, 2, false).unwrap();
    // 16 checks right before left, so it merges with the 2.
    game.place_tile(0, 1, 16, false).unwrap();

    // The remainder 8 now sits next to the other 8 and stays there.
    assert_eq!(game.grid().get(Position::new(0, 0)), Some(8));
    assert_eq!(game.grid().get(Position::new(0, 1)), Some(8));
    assert_eq!(game.grid().get(Position::new(0, 2)), None);
    assert_eq!(game.score(), 16);
}

/// A full grid of pairwise non-mergeable tiles ends the game.
#[test]
fn test_game_over_on_full_grid() {
    // Distinct primes never divide each other.
    let primes: Vec<Tile> = vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];
    let config = GameConfig::default().with_tile_range(2, 60);
    let mut game = Engine::new(config, ScriptedTiles::new(primes.clone()), MemoryStore::new());

    for (i, pos) in Position::all().enumerate() {
        assert!(!game.is_game_over(), "over before cell {}", i);
        game.place_tile(pos.row, pos.col, primes[i], false).unwrap();
    }

    assert!(game.is_game_over());
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.score(), 0);

    // Further play is refused; undo reopens the last cell.
    assert_eq!(game.place_tile(0, 0, 2, false), Err(Rejection::GameOver));
    game.undo().unwrap();
    assert!(!game.is_game_over());
    assert!(game.grid().is_vacant(Position::new(3, 3)));
}

/// With no charges, discarding does nothing.
#[test]
fn test_trash_rejected_without_charges() {
    let config = GameConfig::default().with_starting_trash_charges(0);
    let mut game = Engine::new(config, ScriptedTiles::new(vec![5, 7, 11]), MemoryStore::new());
    let before = game.state().clone();

    assert_eq!(game.discard_tile(5, false), Err(Rejection::NoTrashCharges));
    assert_eq!(game.state(), &before);
    assert_eq!(game.trash_charges(), 0);
}

/// Trash charges run out after the starting three.
#[test]
fn test_trash_charges_deplete() {
    let mut game = engine(&[5, 7, 11, 13]);

    for expected in [2, 1, 0] {
        let front = game.active_tile().unwrap();
        game.discard_tile(front, false).unwrap();
        assert_eq!(game.trash_charges(), expected);
    }

    let front = game.active_tile().unwrap();
    assert_eq!(game.discard_tile(front, false), Err(Rejection::NoTrashCharges));
}

/// Levels follow score; a jump over several thresholds grants one charge.
#[test]
fn test_level_and_trash_on_level_up() {
    let mut game = engine(&[20, 20, 5]);

    game.place_tile(0, 0, 20, false).unwrap();
    game.place_tile(0, 1, 20, false).unwrap();

    assert_eq!(game.score(), 40);
    assert_eq!(game.level(), 5);
    assert_eq!(game.trash_charges(), 3 + 1);
}

/// Place then undo restores everything but the history depth.
#[test]
fn test_place_undo_round_trip() {
    let mut game = engine(&[5, 7, 11, 13]);
    game.place_tile(2, 2, 5, false).unwrap();
    let before = game.state().clone();

    game.place_tile(2, 3, 7, false).unwrap();
    assert_eq!(game.history_len(), before.history_len() + 1);

    game.undo().unwrap();
    assert_eq!(game.state(), &before);
    assert_eq!(game.history_len(), 1);
}

/// Each undo removes exactly one snapshot; an empty history rejects.
#[test]
fn test_undo_steps_back_one_move_at_a_time() {
    let mut game = engine(&[5, 7, 11, 13, 17]);
    let opening = game.state().clone();

    game.place_tile(0, 0, 5, false).unwrap();
    game.stash_in_keep(7, false).unwrap();
    game.discard_tile(11, false).unwrap();
    assert_eq!(game.history_len(), 3);

    game.undo().unwrap();
    assert_eq!(game.trash_charges(), 3);
    game.undo().unwrap();
    assert_eq!(game.keep(), None);
    game.undo().unwrap();
    assert_eq!(game.state(), &opening);

    assert_eq!(game.undo(), Err(Rejection::NothingToUndo));
}

/// Stashing into an empty keep consumes the queue; a second stash swaps.
#[test]
fn test_keep_slot_flow() {
    let mut game = engine(&[5, 7, 11, 13]);

    game.stash_in_keep(5, false).unwrap();
    assert_eq!(game.keep(), Some(5));
    assert_eq!(game.queue().collect::<Vec<_>>(), vec![7, 11, 13]);

    game.stash_in_keep(7, false).unwrap();
    assert_eq!(game.keep(), Some(7));
    assert_eq!(game.queue().collect::<Vec<_>>(), vec![5, 11, 13]);

    assert_eq!(game.stash_in_keep(7, true), Err(Rejection::AlreadyKept));

    game.place_tile(3, 0, 7, true).unwrap();
    assert_eq!(game.keep(), None);
    assert_eq!(game.queue().collect::<Vec<_>>(), vec![5, 11, 13]);
}

/// Restart wipes the game but keeps the best score.
#[test]
fn test_restart_preserves_best_score() {
    let mut game = engine(&[6, 6, 5]);
    game.place_tile(0, 0, 6, false).unwrap();
    game.place_tile(0, 1, 6, false).unwrap();
    game.tick().unwrap();

    game.restart().unwrap();

    assert_eq!(game.best_score(), 12);
    assert_eq!(game.score(), 0);
    assert_eq!(game.level(), 1);
    assert_eq!(game.elapsed_seconds(), 0);
    assert_eq!(game.history_len(), 0);
    assert_eq!(game.queue().count(), 3);
    assert_eq!(game.store().get(BEST_SCORE_KEY).unwrap().as_deref(), Some("12"));
}

/// The clock only runs while playing.
#[test]
fn test_pause_freezes_clock_and_moves() {
    let mut game = engine(&[5, 7, 11]);

    game.tick().unwrap();
    game.toggle_pause().unwrap();
    assert_eq!(game.phase(), Phase::Paused);

    assert_eq!(game.tick(), Err(Rejection::Paused));
    assert_eq!(game.place_tile(0, 0, 5, false), Err(Rejection::Paused));
    assert_eq!(game.elapsed_seconds(), 1);

    game.toggle_pause().unwrap();
    game.tick().unwrap();
    assert_eq!(game.elapsed_seconds(), 2);
}

/// Hints around a lone 9 for an active 3 cover exactly its empty neighbours.
#[test]
fn test_hints_for_active_tile() {
    let mut game = engine(&[9, 3, 3]);
    game.place_tile(1, 1, 9, false).unwrap();
    game.toggle_hints().unwrap();

    let hints = game.hint_cells().to_vec();
    for n in Position::new(1, 1).neighbors() {
        assert!(hints.contains(&n));
    }
    assert!(!hints.contains(&Position::new(0, 0)));
    assert!(!hints.contains(&Position::new(3, 3)));
}

/// Every command can be fed through `dispatch` directly.
#[test]
fn test_dispatch_surface() {
    let mut game = Engine::with_seed(99);
    let front = game.active_tile().unwrap();

    game.dispatch(Command::place(1, 1, front, false)).unwrap();
    game.dispatch(Command::ToggleHints).unwrap();
    game.dispatch(Command::Tick).unwrap();
    game.dispatch(Command::Undo).unwrap();

    assert_eq!(game.history_len(), 0);
    assert!(game.grid().is_vacant(Position::new(1, 1)));
}

/// The same seed and the same commands give the same game.
#[test]
fn test_deterministic_replay() {
    let play = |seed: u64| -> GameState {
        let mut game = Engine::new(GameConfig::default(), GameRng::new(seed), MemoryStore::new());
        for pos in Position::all().take(10) {
            let front = game.active_tile().unwrap();
            let _ = game.place_tile(pos.row, pos.col, front, false);
        }
        game.state().clone()
    };

    assert_eq!(play(2024), play(2024));
}

/// Engines share nothing.
#[test]
fn test_independent_engines() {
    let mut a = engine(&[6, 6, 5]);
    let b = engine(&[6, 6, 5]);

    a.place_tile(0, 0, 6, false).unwrap();

    assert_eq!(a.history_len(), 1);
    assert_eq!(b.history_len(), 0);
    assert!(b.grid().is_vacant(Position::new(0, 0)));
}
