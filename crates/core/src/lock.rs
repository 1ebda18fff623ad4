//! Lock timing - gravity and lock delay state machine
//!
//! The timer has two phases. While **Falling**, elapsed time accumulates and
//! each time it reaches the gravity interval the accumulator resets and one
//! gravity step happens: either the piece falls a row, or it is already
//! resting and the timer switches to **Resting** with the base lock delay as
//! its budget.
//!
//! While **Resting**, every step evaluates:
//!
//! 1. piece no longer resting (moved off a ledge) → back to Falling
//! 2. recent successful move and budget below the cap → budget grows by the
//!    action window, clamped to the cap; still below the cap → keep resting
//! 3. otherwise → commit
//!
//! The timer keeps its own game clock, the sum of all elapsed time it was
//! fed. Move timestamps are readings of this clock.

use crate::types::GameConfig;

/// Phase of the active piece's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LockPhase {
    #[default]
    Falling,
    Resting,
}

/// What the caller has to do after [`LockTimer::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStep {
    /// Gravity interval not reached yet.
    Wait,
    /// Move the piece down one row.
    Fall,
    /// The piece landed; the rest budget started.
    Landed,
    /// A recent move extended the rest budget.
    Extended,
    /// The piece is no longer supported; move it down one row.
    Freed,
    /// Commit the piece.
    Commit,
}

/// Timing parameters, taken from [`GameConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockTiming {
    pub gravity_ms: u32,
    pub lock_delay_ms: u32,
    pub recent_action_window_ms: u32,
    pub max_lock_delay_ms: u32,
}

impl From<&GameConfig> for LockTiming {
    fn from(config: &GameConfig) -> Self {
        Self {
            gravity_ms: config.gravity_ms,
            lock_delay_ms: config.lock_delay_ms,
            recent_action_window_ms: config.recent_action_window_ms,
            max_lock_delay_ms: config.max_lock_delay_ms,
        }
    }
}

impl Default for LockTiming {
    fn default() -> Self {
        Self::from(&GameConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockTimer {
    timing: LockTiming,
    phase: LockPhase,
    fall_accumulator_ms: u32,
    rest_ms: u32,
    clock_ms: u64,
}

impl LockTimer {
    pub fn new(timing: LockTiming) -> Self {
        Self {
            timing,
            phase: LockPhase::Falling,
            fall_accumulator_ms: 0,
            rest_ms: 0,
            clock_ms: 0,
        }
    }

    pub fn timing(&self) -> LockTiming {
        self.timing
    }

    pub fn phase(&self) -> LockPhase {
        self.phase
    }

    /// Current rest budget. Zero while falling.
    pub fn rest_ms(&self) -> u32 {
        self.rest_ms
    }

    pub fn fall_accumulator_ms(&self) -> u32 {
        self.fall_accumulator_ms
    }

    /// Game clock: total elapsed time fed to [`advance`](Self::advance).
    pub fn now_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Start a new piece lifecycle. The clock keeps running.
    pub fn reset(&mut self) {
        self.phase = LockPhase::Falling;
        self.fall_accumulator_ms = 0;
        self.rest_ms = 0;
    }

    /// True if `last_move_ms` lies within the action window of the clock.
    pub fn is_recent(&self, last_move_ms: Option<u64>) -> bool {
        last_move_ms.is_some_and(|t| {
            self.clock_ms.saturating_sub(t) <= u64::from(self.timing.recent_action_window_ms)
        })
    }

    /// Whether a rest-budget extension may be granted right now.
    pub fn extension_allowed(&self, last_move_ms: Option<u64>) -> bool {
        self.phase == LockPhase::Resting
            && self.rest_ms < self.timing.max_lock_delay_ms
            && self.is_recent(last_move_ms)
    }

    /// Feed `elapsed_ms` of game time.
    ///
    /// `resting` is whether the active piece currently cannot move down and
    /// `last_move_ms` the clock reading of its last successful player move.
    pub fn advance(&mut self, elapsed_ms: u32, resting: bool, last_move_ms: Option<u64>) -> LockStep {
        self.clock_ms = self.clock_ms.saturating_add(u64::from(elapsed_ms));

        let step = match self.phase {
            LockPhase::Falling => {
                self.fall_accumulator_ms = self.fall_accumulator_ms.saturating_add(elapsed_ms);
                if self.fall_accumulator_ms < self.timing.gravity_ms {
                    return LockStep::Wait;
                }
                self.fall_accumulator_ms = 0;
                if resting {
                    self.phase = LockPhase::Resting;
                    self.rest_ms = self.timing.lock_delay_ms;
                    LockStep::Landed
                } else {
                    LockStep::Fall
                }
            }
            LockPhase::Resting => {
                if !resting {
                    self.reset();
                    LockStep::Freed
                } else if self.extension_allowed(last_move_ms) {
                    self.rest_ms = self
                        .rest_ms
                        .saturating_add(self.timing.recent_action_window_ms)
                        .min(self.timing.max_lock_delay_ms);
                    if self.rest_ms < self.timing.max_lock_delay_ms {
                        LockStep::Extended
                    } else {
                        LockStep::Commit
                    }
                } else {
                    LockStep::Commit
                }
            }
        };

        debug_assert!(self.rest_ms <= self.timing.max_lock_delay_ms.max(self.timing.lock_delay_ms));
        step
    }
}

impl Default for LockTimer {
    fn default() -> Self {
        Self::new(LockTiming::default())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn timing() -> LockTiming {
        LockTiming {
            gravity_ms: 100,
            lock_delay_ms: 50,
            recent_action_window_ms: 20,
            max_lock_delay_ms: 110,
        }
    }

    #[test]
    fn gravity_accumulates_then_resets() {
        let mut timer = LockTimer::new(timing());
        assert_eq!(timer.advance(60, false, None), LockStep::Wait);
        assert_eq!(timer.fall_accumulator_ms(), 60);
        assert_eq!(timer.advance(40, false, None), LockStep::Fall);
        assert_eq!(timer.fall_accumulator_ms(), 0);
        assert_eq!(timer.now_ms(), 100);
    }

    #[test]
    fn large_step_only_moves_once() {
        let mut timer = LockTimer::new(timing());
        assert_eq!(timer.advance(1000, false, None), LockStep::Fall);
        assert_eq!(timer.fall_accumulator_ms(), 0);
    }

    #[test]
    fn landing_starts_rest_budget() {
        let mut timer = LockTimer::new(timing());
        assert_eq!(timer.advance(100, true, None), LockStep::Landed);
        assert_eq!(timer.phase(), LockPhase::Resting);
        assert_eq!(timer.rest_ms(), 50);
    }

    #[test]
    fn resting_without_input_commits() {
        let mut timer = LockTimer::new(timing());
        timer.advance(100, true, None);
        assert_eq!(timer.advance(16, true, None), LockStep::Commit);
    }

    #[test]
    fn stale_move_does_not_extend() {
        let mut timer = LockTimer::new(timing());
        timer.advance(100, true, None);
        // Move at t=50, clock now 116: older than the 20ms window.
        assert!(!timer.extension_allowed(Some(50)));
        assert_eq!(timer.advance(16, true, Some(50)), LockStep::Commit);
    }

    #[test]
    fn extensions_stop_at_cap() {
        let mut timer = LockTimer::new(timing());
        timer.advance(100, true, None);

        let mut steps = Vec::new();
        loop {
            let now = timer.now_ms();
            let step = timer.advance(5, true, Some(now));
            assert!(timer.rest_ms() <= 110);
            steps.push(step);
            if step == LockStep::Commit {
                break;
            }
        }
        // 50 -> 70 -> 90 -> 110 (cap reached, commit)
        assert_eq!(
            steps,
            vec![LockStep::Extended, LockStep::Extended, LockStep::Commit]
        );
        assert_eq!(timer.rest_ms(), 110);
    }

    #[test]
    fn budget_already_at_cap_commits_despite_input() {
        let mut timer = LockTimer::new(LockTiming {
            lock_delay_ms: 110,
            ..timing()
        });
        timer.advance(100, true, None);
        let now = timer.now_ms();
        assert!(!timer.extension_allowed(Some(now)));
        assert_eq!(timer.advance(1, true, Some(now)), LockStep::Commit);
    }

    #[test]
    fn freed_piece_returns_to_falling() {
        let mut timer = LockTimer::new(timing());
        timer.advance(100, true, None);
        let now = timer.now_ms();
        assert_eq!(timer.advance(1, false, Some(now)), LockStep::Freed);
        assert_eq!(timer.phase(), LockPhase::Falling);
        assert_eq!(timer.rest_ms(), 0);
    }

    #[test]
    fn reset_keeps_clock() {
        let mut timer = LockTimer::new(timing());
        timer.advance(100, true, None);
        timer.reset();
        assert_eq!(timer.phase(), LockPhase::Falling);
        assert_eq!(timer.now_ms(), 100);
    }

    proptest! {
        #[test]
        fn rest_budget_stays_within_cap(
            steps in prop::collection::vec((0u32..250, any::<bool>(), any::<bool>()), 1..200)
        ) {
            let mut timer = LockTimer::new(timing());
            let mut fed = 0u64;
            for (elapsed, resting, moved) in steps {
                let last_move = moved.then_some(timer.now_ms());
                timer.advance(elapsed, resting, last_move);
                fed += u64::from(elapsed);

                prop_assert!(timer.rest_ms() <= timing().max_lock_delay_ms);
                prop_assert!(timer.fall_accumulator_ms() < timing().gravity_ms);
                prop_assert_eq!(timer.now_ms(), fed);
                if timer.phase() == LockPhase::Falling {
                    prop_assert_eq!(timer.rest_ms(), 0);
                }
            }
        }
    }
}
