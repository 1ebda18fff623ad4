//! Bag module - randomized piece supply
//!
//! Pieces are queued in shuffled batches, each batch holding every playable
//! kind exactly once. The queue is topped up with a fresh batch whenever it
//! drops to one batch or less, so at least one full batch of lookahead is
//! always available after [`PieceBag::ensure_filled`] or [`PieceBag::draw`].
//!
//! Shuffling uses a seeded PCG generator, so the same seed always yields the
//! same piece sequence.

use std::collections::VecDeque;

use log::trace;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::types::PieceKind;

/// Number of pieces appended per refill.
pub const BATCH_SIZE: usize = PieceKind::PLAYABLE.len();

/// Infinite shuffled-batch piece generator
#[derive(Debug, Clone)]
pub struct PieceBag {
    queue: VecDeque<PieceKind>,
    rng: Pcg32,
    seed: u64,
}

impl PieceBag {
    /// Create an empty bag; the first [`draw`](Self::draw) or
    /// [`ensure_filled`](Self::ensure_filled) fills it.
    pub fn new(seed: u64) -> Self {
        Self {
            queue: VecDeque::with_capacity(BATCH_SIZE * 2),
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// Append one shuffled batch if at most one batch is left.
    pub fn ensure_filled(&mut self) {
        if self.queue.len() > BATCH_SIZE {
            return;
        }
        let mut batch = PieceKind::PLAYABLE;
        batch.shuffle(&mut self.rng);
        trace!("bag refill: {:?}", batch);
        self.queue.extend(batch);
    }

    /// Remove and return the head of the queue.
    ///
    /// Returns `None` only if the caller skipped [`ensure_filled`](Self::ensure_filled)
    /// until the queue ran dry.
    pub fn pop(&mut self) -> Option<PieceKind> {
        self.queue.pop_front()
    }

    /// Take the next piece, topping the queue up on both sides of the pop so
    /// more than one batch of lookahead remains afterwards.
    pub fn draw(&mut self) -> PieceKind {
        let kind = loop {
            self.ensure_filled();
            if let Some(kind) = self.queue.pop_front() {
                break kind;
            }
        };
        self.ensure_filled();
        kind
    }

    /// Upcoming pieces, head first.
    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Seed this bag was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut kinds: Vec<PieceKind>) -> Vec<PieceKind> {
        kinds.sort();
        kinds
    }

    #[test]
    fn test_new_bag_is_empty_until_filled() {
        let mut bag = PieceBag::new(1);
        assert!(bag.is_empty());
        assert_eq!(bag.pop(), None);

        bag.ensure_filled();
        assert_eq!(bag.len(), BATCH_SIZE);
    }

    #[test]
    fn test_ensure_filled_respects_low_water_mark() {
        let mut bag = PieceBag::new(1);
        bag.ensure_filled();
        // Exactly one batch left: still at the mark, so another batch lands.
        bag.ensure_filled();
        assert_eq!(bag.len(), BATCH_SIZE * 2);
        // Above the mark: nothing happens.
        bag.ensure_filled();
        assert_eq!(bag.len(), BATCH_SIZE * 2);

        bag.pop();
        bag.ensure_filled();
        assert_eq!(bag.len(), BATCH_SIZE * 2 - 1);
    }

    #[test]
    fn test_first_batch_is_a_permutation() {
        let mut bag = PieceBag::new(99);
        let drawn: Vec<_> = (0..BATCH_SIZE).map(|_| bag.draw()).collect();
        assert_eq!(sorted(drawn), PieceKind::PLAYABLE.to_vec());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceBag::new(12345);
        let mut b = PieceBag::new(12345);
        for _ in 0..50 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = PieceBag::new(1);
        let mut b = PieceBag::new(2);
        let sa: Vec<_> = (0..28).map(|_| a.draw()).collect();
        let sb: Vec<_> = (0..28).map(|_| b.draw()).collect();
        assert_ne!(sa, sb);
    }

    #[test]
    fn test_preview_matches_draws() {
        let mut bag = PieceBag::new(7);
        bag.ensure_filled();
        let preview: Vec<_> = bag.preview().take(5).collect();
        let drawn: Vec<_> = (0..5).map(|_| bag.draw()).collect();
        assert_eq!(preview, drawn);
    }

    #[test]
    fn test_draw_never_runs_dry() {
        let mut bag = PieceBag::new(3);
        for _ in 0..1000 {
            bag.draw();
            assert!(bag.len() >= BATCH_SIZE);
        }
    }

    #[test]
    fn test_first_draw_leaves_more_than_a_batch() {
        let mut bag = PieceBag::new(3);
        bag.draw();
        assert_eq!(bag.len(), 2 * BATCH_SIZE - 1);
        assert!(bag.len() > BATCH_SIZE);
    }
}
