//! Piece geometry tests - shapes, SRS kicks and the controller

use stacker::core::{get_shape, Board, Piece, PieceController, PieceGeometry, SrsGeometry};
use stacker::types::{Cell, PieceKind, Rotation, RotationDirection, SPAWN_POSITION};

const ROTATIONS: [Rotation; 4] = [Rotation::North, Rotation::East, Rotation::South, Rotation::West];

#[test]
fn test_every_kind_spawns_inside_the_board() {
    let geo = SrsGeometry;
    let board = Board::standard();
    for kind in PieceKind::PLAYABLE {
        let piece = Piece::new(kind, SPAWN_POSITION);
        assert!(geo.fits(&piece, &board), "{kind:?} does not fit at spawn");
    }
}

#[test]
fn test_o_shape_is_rotation_invariant() {
    for rotation in ROTATIONS {
        assert_eq!(
            get_shape(PieceKind::O, rotation),
            get_shape(PieceKind::O, Rotation::North)
        );
    }
}

#[test]
fn test_four_turns_return_to_start_in_open_space() {
    let geo = SrsGeometry;
    let board = Board::standard();
    for kind in PieceKind::PLAYABLE {
        if kind == PieceKind::O {
            continue;
        }
        for direction in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
            let start = Piece::new(kind, (3, 8));
            let mut piece = start;
            for _ in 0..4 {
                assert!(geo.rotate(&mut piece, &board, direction));
            }
            assert_eq!(piece, start, "{kind:?} {direction:?}");
        }
    }
}

#[test]
fn test_floor_kick_lifts_t_piece() {
    let geo = SrsGeometry;
    let board = Board::standard();
    let mut piece = Piece::new(PieceKind::T, (4, 18));
    assert!(geo.is_at_bottom(&piece, &board));

    assert!(geo.rotate(&mut piece, &board, RotationDirection::Clockwise));
    assert_eq!(piece.rotation, Rotation::East);
    assert_eq!((piece.x, piece.y), (3, 17));
}

#[test]
fn test_rotation_blocked_everywhere_fails_cleanly() {
    let geo = SrsGeometry;
    // A one-row-high well: nothing vertical fits.
    let board = Board::from_rows(&["...."]).unwrap();
    let mut piece = Piece {
        kind: PieceKind::I,
        rotation: Rotation::North,
        x: 0,
        y: -1,
    };
    assert!(geo.fits(&piece, &board));
    let before = piece;
    assert!(!geo.rotate(&mut piece, &board, RotationDirection::Clockwise));
    assert_eq!(piece, before);
}

#[test]
fn test_controller_ghost_lands_on_stack() {
    let mut board = Board::standard();
    for x in 0..10 {
        board.set(x, 15, Cell::Block(PieceKind::L));
    }
    let mut ctl = PieceController::new(SrsGeometry, SPAWN_POSITION);
    assert!(ctl.spawn(PieceKind::O, &board));

    let ghost = ctl.project(&board).unwrap();
    assert_eq!(ghost.y, 13);
    assert_eq!(ctl.project(&board), Some(ghost));
    assert_eq!(ctl.drop_to_floor(&board), 13);
    assert_eq!(ctl.active(), Some(ghost));
}

#[test]
fn test_controller_wall_blocks_then_kick_rotates() {
    let board = Board::standard();
    let mut ctl = PieceController::new(SrsGeometry, SPAWN_POSITION);
    assert!(ctl.spawn(PieceKind::J, &board));
    while ctl.attempt_move(&board, 1, 0, 0) {}
    let at_wall = ctl.active().unwrap();
    assert_eq!(at_wall.x, 7);

    assert!(!ctl.attempt_move(&board, 1, 0, 1));
    assert_eq!(ctl.last_move_ms(), Some(0));
    assert!(ctl.attempt_rotate(&board, RotationDirection::Clockwise, 2));
    assert_eq!(ctl.last_move_ms(), Some(2));
    let piece = ctl.active().unwrap();
    assert!(SrsGeometry.fits(&piece, &board));
}
