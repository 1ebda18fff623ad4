//! Hold slot: one reserved piece kind, swappable once per piece lifecycle.

use crate::types::PieceKind;

/// Result of a swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swap {
    /// A swap already happened since the last commit.
    Rejected,
    /// The slot was empty; the caller spawns the next queued piece.
    Stored,
    /// The slot held this kind; the caller spawns it.
    Exchanged(PieceKind),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoldSlot {
    held: Option<PieceKind>,
    swap_used: bool,
}

impl HoldSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn swap_used(&self) -> bool {
        self.swap_used
    }

    /// Put `active` in the slot unless a swap was already used.
    pub fn try_swap(&mut self, active: PieceKind) -> Swap {
        if self.swap_used {
            return Swap::Rejected;
        }
        self.swap_used = true;
        match self.held.replace(active) {
            Some(previous) => Swap::Exchanged(previous),
            None => Swap::Stored,
        }
    }

    /// Re-arm the slot; called once per commit.
    pub fn release(&mut self) {
        self.swap_used = false;
    }
}
