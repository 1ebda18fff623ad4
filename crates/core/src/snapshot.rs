use arrayvec::ArrayVec;

use crate::board::Board;
use crate::lock::LockPhase;
use crate::pieces::Piece;
use crate::types::PieceKind;

/// Upcoming kinds shown to collaborators.
pub type NextQueue = ArrayVec<PieceKind, { PieceKind::COUNT }>;

/// Everything a view needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Committed blocks with the active piece and its ghost merged in.
    pub board: Board,
    pub active: Option<Piece>,
    pub ghost: Option<Piece>,
    pub held: Option<PieceKind>,
    pub next: NextQueue,
    pub phase: LockPhase,
    pub swap_used: bool,
    pub started: bool,
    pub game_over: bool,
    pub pieces_locked: u32,
    pub lines_cleared: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.started && !self.game_over && self.active.is_some()
    }

    pub fn can_hold(&self) -> bool {
        self.playable() && !self.swap_used
    }
}
