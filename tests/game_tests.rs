//! Game tests - lock timing, hold, commit and top-out through the public API

use stacker::core::{Board, GameError, LockPhase, StepOutcome, TetrisGame};
use stacker::types::{
    Cell, ConfigError, GameAction, GameConfig, PieceKind, GRAVITY_MS, LOCK_DELAY_MS, MAX_LOCK_DELAY_MS,
    RECENT_ACTION_WINDOW_MS, TICK_MS,
};

fn started(seed: u64) -> TetrisGame {
    let mut game = TetrisGame::with_seed(seed);
    game.start();
    game
}

/// Soft-drop to the floor, then let gravity notice.
fn land(game: &mut TetrisGame) {
    while game.apply(GameAction::SoftDrop).unwrap() {}
    assert_eq!(game.step(GRAVITY_MS), Ok(StepOutcome::Landed));
    assert_eq!(game.phase(), LockPhase::Resting);
    assert_eq!(game.timer().rest_ms(), LOCK_DELAY_MS);
}

#[test]
fn test_game_lifecycle() {
    let mut game = TetrisGame::with_seed(12345);
    assert!(!game.started());
    assert!(game.active().is_none());

    game.start();
    assert!(game.started());
    assert!(game.active().is_some());
    assert!(!game.game_over());
    assert!(game.snapshot().playable());
}

#[test]
fn test_rest_budget_grows_until_cap_then_commits() {
    let mut game = started(3);
    land(&mut game);
    let locked_before = game.pieces_locked();

    let mut extensions = 0u32;
    let mut i = 0;
    let event = loop {
        let action = if i % 2 == 0 {
            GameAction::MoveLeft
        } else {
            GameAction::MoveRight
        };
        assert_eq!(game.apply(action), Ok(true));
        i += 1;

        match game.step(TICK_MS).unwrap() {
            StepOutcome::Extended { rest_ms } => {
                extensions += 1;
                assert!(rest_ms < MAX_LOCK_DELAY_MS);
                assert_eq!(rest_ms, LOCK_DELAY_MS + extensions * RECENT_ACTION_WINDOW_MS);
                assert_eq!(game.pieces_locked(), locked_before);
            }
            StepOutcome::Locked(event) => break event,
            other => panic!("unexpected step outcome {other:?}"),
        }
    };

    assert_eq!(
        extensions,
        (MAX_LOCK_DELAY_MS - LOCK_DELAY_MS) / RECENT_ACTION_WINDOW_MS - 1
    );
    assert_eq!(game.pieces_locked(), locked_before + 1);
    assert!(!event.topped_out);
}

#[test]
fn test_untouched_landing_commits_on_next_step() {
    let mut game = started(12);
    land(&mut game);
    let event = match game.step(TICK_MS) {
        Ok(StepOutcome::Locked(event)) => event,
        other => panic!("expected a commit, got {other:?}"),
    };
    assert!(!event.topped_out);
    assert_eq!(game.pieces_locked(), 1);
    assert_eq!(game.phase(), LockPhase::Falling);
}

#[test]
fn test_stale_input_does_not_extend() {
    let mut game = started(8);
    assert_eq!(game.apply(GameAction::MoveLeft), Ok(true));
    land(&mut game);
    // The move happened a full gravity interval ago.
    assert!(matches!(game.step(TICK_MS), Ok(StepOutcome::Locked(_))));
}

#[test]
fn test_ghost_is_stable_and_below_active() {
    let mut game = started(21);
    for action in [
        GameAction::MoveLeft,
        GameAction::RotateCw,
        GameAction::SoftDrop,
        GameAction::MoveRight,
        GameAction::RotateCcw,
    ] {
        game.apply(action).unwrap();
        let active = game.active().unwrap();
        let ghost = game.ghost().unwrap();
        assert_eq!(game.ghost(), Some(ghost));
        assert_eq!((ghost.x, ghost.rotation, ghost.kind), (active.x, active.rotation, active.kind));
        assert!(ghost.y >= active.y);
        assert_eq!(game.active(), Some(active));
    }
}

#[test]
fn test_commit_refused_while_falling() {
    let mut game = started(4);
    let board = game.board().clone();
    let piece = game.active().unwrap();

    let err = game.commit().unwrap_err();
    assert_eq!(err, GameError::NotResting(piece));
    assert!(err.to_string().contains("not resting"));
    assert_eq!(game.board(), &board);
    assert_eq!(game.active(), Some(piece));
    assert_eq!(game.pieces_locked(), 0);
}

#[test]
fn test_hold_via_actions() {
    let mut game = started(77);
    let first = game.active().unwrap().kind;

    assert_eq!(game.apply(GameAction::HoldSwap), Ok(true));
    assert_eq!(game.apply(GameAction::HoldSwap), Ok(false));
    assert_eq!(game.held(), Some(first));
    assert!(game.snapshot().swap_used);
    assert!(!game.snapshot().can_hold());

    assert_eq!(game.apply(GameAction::HardDrop), Ok(true));
    assert!(game.snapshot().can_hold());
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        GameAction::MoveLeft,
        GameAction::RotateCw,
        GameAction::HardDrop,
        GameAction::HoldSwap,
        GameAction::MoveRight,
        GameAction::HardDrop,
        GameAction::SoftDrop,
        GameAction::HardDrop,
    ];
    let mut a = started(99);
    let mut b = started(99);
    for action in script {
        assert_eq!(a.apply(action), b.apply(action));
        assert_eq!(a.step(TICK_MS), b.step(TICK_MS));
        assert_eq!(a.snapshot(), b.snapshot());
    }
}

#[test]
fn test_line_clear_on_prepared_board() {
    // Bottom row has a four-wide gap where a flat I piece lands.
    let mut rows = vec![".........."; 19];
    rows.push("###....###");
    let board = Board::from_rows(&rows).unwrap();

    let mut game = (0..1000)
        .map(TetrisGame::with_seed)
        .find(|g| g.next_queue().first() == Some(&PieceKind::I))
        .expect("some seed starts with an I piece")
        .with_board(board)
        .unwrap();
    game.start();
    assert_eq!(game.active().unwrap().kind, PieceKind::I);

    let event = game.hard_drop().unwrap();
    assert_eq!(event.cleared_rows.as_slice(), &[19]);
    assert_eq!(event.lines_cleared(), 1);
    assert!(game.board().cells().iter().all(Cell::is_empty));
    assert_eq!(game.lines_cleared(), 1);
}

#[test]
fn test_hard_drops_eventually_top_out() {
    let mut game = started(5);
    let mut drops = 0;
    while !game.game_over() {
        game.apply(GameAction::HardDrop).unwrap();
        drops += 1;
        assert!(drops < 200, "stack never reached the top");
    }
    let event = game.take_last_event().unwrap();
    assert!(event.topped_out);
    assert!(game.active().is_none());
    assert_eq!(game.step(GRAVITY_MS), Ok(StepOutcome::Idle));
    assert_eq!(game.apply(GameAction::HardDrop), Ok(false));
    assert!(game.snapshot().game_over);
}

#[test]
fn test_custom_config_is_validated() {
    let bad = GameConfig {
        lock_delay_ms: 5000,
        ..GameConfig::default()
    };
    assert!(TetrisGame::new(bad).is_err());

    let small = GameConfig {
        board_width: 6,
        board_height: 8,
        spawn_x: 1,
        ..GameConfig::default()
    };
    let mut game = TetrisGame::new(small).unwrap();
    game.start();
    assert_eq!(game.board().width(), 6);
    assert_eq!(game.display_board().cells().iter().filter(|c| c.is_block()).count(), 4);
    assert!(game
        .display_board()
        .cells()
        .iter()
        .any(|c| matches!(c, Cell::Ghost(_))));
}

#[test]
fn test_spawn_anchor_must_fit_every_kind() {
    let edge = GameConfig {
        spawn_x: 9,
        ..GameConfig::default()
    };
    assert_eq!(edge.validate(), Ok(()));
    assert_eq!(
        TetrisGame::new(edge).err(),
        Some(ConfigError::SpawnOutsideBoard { x: 9, y: 0 })
    );

    // Anchor (3, 0) is on a five-wide board, but the I piece reaches x = 6.
    let narrow = TetrisGame::with_seed(1).with_board(Board::new(5, 20).unwrap());
    assert_eq!(narrow.err(), Some(ConfigError::SpawnOutsideBoard { x: 3, y: 0 }));

    let mut game = TetrisGame::with_seed(1)
        .with_board(Board::new(6, 20).unwrap())
        .unwrap();
    game.start();
    assert!(!game.game_over());
    assert!(game.active().is_some());
}
