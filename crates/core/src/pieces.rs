//! Pieces module - tetromino shapes and the geometry capability
//!
//! [`PieceGeometry`] is the seam between the state machine and the concrete
//! shape set: everything that knows which cells a piece covers, how it rotates,
//! and whether it collides lives behind it. [`SrsGeometry`] provides the
//! standard tetromino set with SRS wall kicks from fixed lookup tables.
//! Reference: https://tetris.wiki/SRS
//!
//! All offsets use screen orientation: +x is right, +y is down.

use crate::board::Board;
use crate::types::{PieceKind, Rotation, RotationDirection};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// A placed piece: kind, anchor, and rotation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// A piece at `anchor` in spawn orientation.
    pub fn new(kind: PieceKind, anchor: (i8, i8)) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: anchor.0,
            y: anchor.1,
        }
    }

    /// The same piece shifted by (dx, dy).
    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }
}

/// Shape, rotation, and collision rules for a closed set of piece kinds.
///
/// Implementors supply [`shape`](Self::shape) and [`kicks`](Self::kicks); the
/// board-facing operations are derived from those two tables. Every mutating
/// operation either fully succeeds or leaves the piece unchanged.
pub trait PieceGeometry {
    /// Mino offsets for `kind` in `rotation`.
    fn shape(&self, kind: PieceKind, rotation: Rotation) -> PieceShape;

    /// Anchor offsets to try, in order, when rotating from `from`.
    /// An empty list means the kind does not rotate.
    fn kicks(
        &self,
        kind: PieceKind,
        from: Rotation,
        direction: RotationDirection,
    ) -> &'static [MinoOffset];

    /// Absolute board cells covered by `piece`.
    fn cells(&self, piece: &Piece) -> [(i8, i8); 4] {
        self.shape(piece.kind, piece.rotation)
            .map(|(dx, dy)| (piece.x.saturating_add(dx), piece.y.saturating_add(dy)))
    }

    /// True when every cell of `piece` is on the board and empty.
    fn fits(&self, piece: &Piece, board: &Board) -> bool {
        self.cells(piece)
            .iter()
            .all(|&(x, y)| board.is_valid(x, y))
    }

    /// Move by (dx, dy) if the target is free.
    fn translate(&self, piece: &mut Piece, board: &Board, dx: i8, dy: i8) -> bool {
        let moved = piece.offset(dx, dy);
        if self.fits(&moved, board) {
            *piece = moved;
            true
        } else {
            false
        }
    }

    /// Rotate, trying each kick offset in order.
    fn rotate(&self, piece: &mut Piece, board: &Board, direction: RotationDirection) -> bool {
        let turned = Piece {
            rotation: piece.rotation.turned(direction),
            ..*piece
        };
        for &(dx, dy) in self.kicks(piece.kind, piece.rotation, direction) {
            let candidate = turned.offset(dx, dy);
            if self.fits(&candidate, board) {
                *piece = candidate;
                return true;
            }
        }
        false
    }

    /// True when the piece cannot move one row down.
    fn is_at_bottom(&self, piece: &Piece, board: &Board) -> bool {
        !self.fits(&piece.offset(0, 1), board)
    }

    /// A new board with the piece stamped in (as blocks or as ghost markers).
    fn merge_into_board(&self, piece: &Piece, board: &Board, as_ghost: bool) -> Board {
        board.merged(&self.cells(piece), piece.kind, as_ghost)
    }
}

/// Standard tetromino geometry with SRS wall kicks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SrsGeometry;

impl PieceGeometry for SrsGeometry {
    fn shape(&self, kind: PieceKind, rotation: Rotation) -> PieceShape {
        get_shape(kind, rotation)
    }

    fn kicks(
        &self,
        kind: PieceKind,
        from: Rotation,
        direction: RotationDirection,
    ) -> &'static [MinoOffset] {
        let index = get_kick_index(from, direction);
        match kind {
            PieceKind::O => &[],
            PieceKind::I => &I_KICKS[index],
            _ => &JLSTZ_KICKS[index],
        }
    }
}

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => get_o_shape(rotation),
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

/// I piece shapes
fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 1), (1, 1), (2, 1), (3, 1)],
        Rotation::East => [(2, 0), (2, 1), (2, 2), (2, 3)],
        Rotation::South => [(0, 2), (1, 2), (2, 2), (3, 2)],
        Rotation::West => [(1, 0), (1, 1), (1, 2), (1, 3)],
    }
}

/// O piece shapes (same for all rotations)
fn get_o_shape(_rotation: Rotation) -> PieceShape {
    [(1, 0), (2, 0), (1, 1), (2, 1)]
}

/// T piece shapes
fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (1, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (1, 2)],
    }
}

/// S piece shapes
fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (2, 0), (0, 1), (1, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (2, 2)],
        Rotation::South => [(1, 1), (2, 1), (0, 2), (1, 2)],
        Rotation::West => [(0, 0), (0, 1), (1, 1), (1, 2)],
    }
}

/// Z piece shapes
fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rotation::East => [(2, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (1, 2), (2, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (0, 2)],
    }
}

/// J piece shapes
fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (2, 0), (1, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (2, 2)],
        Rotation::West => [(1, 0), (1, 1), (0, 2), (1, 2)],
    }
}

/// L piece shapes
fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (0, 2)],
        Rotation::West => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// SRS wall kick data, one row per transition, first entry is the plain rotation.
/// The wiki tables use +y up; these are flipped to +y down.
pub type KickTable = [[MinoOffset; 5]; 8];

/// JLSTZ kick table (shared by J, L, S, T, Z)
static JLSTZ_KICKS: KickTable = [
    // 0->1 (N->E, clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0->3 (N->W, counter-clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->0 (E->N, counter-clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 1->2 (E->S, clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 2->1 (S->E, counter-clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 2->3 (S->W, clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 3->2 (W->S, counter-clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 3->0 (W->N, clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
];

/// I piece kick table
static I_KICKS: KickTable = [
    // 0->1 (N->E)
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 0->3 (N->W)
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 1->0 (E->N)
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 1->2 (E->S)
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 2->1 (S->E)
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
    // 2->3 (S->W)
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 3->2 (W->S)
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 3->0 (W->N)
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
];

/// Get the kick row for a rotation transition
fn get_kick_index(from: Rotation, direction: RotationDirection) -> usize {
    use RotationDirection::{Clockwise, CounterClockwise};
    match (from, direction) {
        (Rotation::North, Clockwise) => 0,
        (Rotation::North, CounterClockwise) => 1,
        (Rotation::East, CounterClockwise) => 2,
        (Rotation::East, Clockwise) => 3,
        (Rotation::South, CounterClockwise) => 4,
        (Rotation::South, Clockwise) => 5,
        (Rotation::West, CounterClockwise) => 6,
        (Rotation::West, Clockwise) => 7,
    }
}
