//! Active piece control.
//!
//! [`PieceController`] owns the active piece and drives it through a
//! [`PieceGeometry`]. Rejected moves and rotations are ordinary `false`
//! results that leave the piece untouched.

use crate::board::Board;
use crate::pieces::{Piece, PieceGeometry, SrsGeometry};
use crate::types::{PieceKind, RotationDirection};

#[derive(Debug, Clone)]
pub struct PieceController<G = SrsGeometry> {
    geometry: G,
    spawn_anchor: (i8, i8),
    active: Option<Piece>,
    /// Game clock reading of the last successful player move or rotation.
    last_move_ms: Option<u64>,
}

impl<G: PieceGeometry> PieceController<G> {
    pub fn new(geometry: G, spawn_anchor: (i8, i8)) -> Self {
        Self {
            geometry,
            spawn_anchor,
            active: None,
            last_move_ms: None,
        }
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn last_move_ms(&self) -> Option<u64> {
        self.last_move_ms
    }

    /// Place a fresh piece at the spawn anchor in spawn orientation.
    ///
    /// Returns false, leaving no active piece, if the spawn cells are blocked.
    pub fn spawn(&mut self, kind: PieceKind, board: &Board) -> bool {
        let piece = Piece::new(kind, self.spawn_anchor);
        self.last_move_ms = None;
        if self.geometry.fits(&piece, board) {
            self.active = Some(piece);
            true
        } else {
            self.active = None;
            false
        }
    }

    /// Remove and return the active piece.
    pub fn take(&mut self) -> Option<Piece> {
        self.last_move_ms = None;
        self.active.take()
    }

    /// Player translation. Records `now_ms` on success.
    pub fn attempt_move(&mut self, board: &Board, dx: i8, dy: i8, now_ms: u64) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let moved = self.geometry.translate(piece, board, dx, dy);
        if moved {
            self.last_move_ms = Some(now_ms);
        }
        moved
    }

    /// Player rotation (kicks included). Records `now_ms` on success.
    pub fn attempt_rotate(&mut self, board: &Board, direction: RotationDirection, now_ms: u64) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let rotated = self.geometry.rotate(piece, board, direction);
        if rotated {
            self.last_move_ms = Some(now_ms);
        }
        rotated
    }

    /// Gravity: one row down. Not a player action, so nothing is recorded.
    pub fn fall(&mut self, board: &Board) -> bool {
        match self.active.as_mut() {
            Some(piece) => self.geometry.translate(piece, board, 0, 1),
            None => false,
        }
    }

    /// True when the active piece cannot move down. False without a piece.
    pub fn is_resting(&self, board: &Board) -> bool {
        self.active
            .as_ref()
            .is_some_and(|piece| self.geometry.is_at_bottom(piece, board))
    }

    /// Where the active piece would land. Does not touch the active piece.
    pub fn project(&self, board: &Board) -> Option<Piece> {
        let mut ghost = self.active?;
        while self.geometry.translate(&mut ghost, board, 0, 1) {}
        Some(ghost)
    }

    /// Move the active piece straight down until it rests; returns rows moved.
    pub fn drop_to_floor(&mut self, board: &Board) -> u32 {
        let mut distance = 0;
        while self.fall(board) {
            distance += 1;
        }
        distance
    }
}
