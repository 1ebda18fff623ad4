use std::fmt;

use crate::pieces::Piece;

/// Invariant violations reported by [`TetrisGame`](crate::TetrisGame).
///
/// Ordinary rejections (a blocked move, a second swap) are `false` results,
/// not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Commit requested while the piece can still move down.
    NotResting(Piece),
    /// Commit requested with no active piece.
    NoActivePiece,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotResting(piece) => write!(
                f,
                "cannot commit {:?} at ({}, {}): piece is not resting",
                piece.kind, piece.x, piece.y
            ),
            Self::NoActivePiece => write!(f, "cannot commit: no active piece"),
        }
    }
}

impl std::error::Error for GameError {}
