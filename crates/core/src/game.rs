//! Game module - the orchestrator
//!
//! [`TetrisGame`] owns the board, the piece bag, the active piece controller,
//! the hold slot and the lock timer. Collaborators drive it in two ways:
//!
//! - [`TetrisGame::apply`] for discrete player actions, applied immediately
//! - [`TetrisGame::step`] once per frame with the elapsed time
//!
//! Rejected actions are `Ok(false)`. Errors are reserved for invariant
//! violations, which are checked before anything is mutated.

use log::{debug, error, info, trace};

use crate::bag::PieceBag;
use crate::board::{Board, RowList};
use crate::controller::PieceController;
use crate::error::GameError;
use crate::hold::{HoldSlot, Swap};
use crate::lock::{LockPhase, LockStep, LockTimer, LockTiming};
use crate::pieces::{Piece, PieceGeometry, SrsGeometry};
use crate::snapshot::{GameSnapshot, NextQueue};
use crate::types::{ConfigError, GameAction, GameConfig, PieceKind, RotationDirection};

/// Seed used when the config does not name one.
pub const DEFAULT_SEED: u64 = 1;

/// Record of one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    /// The piece as it was merged into the board.
    pub piece: Piece,
    /// Cleared row indices, floor first.
    pub cleared_rows: RowList,
    /// The follow-up piece could not spawn.
    pub topped_out: bool,
}

impl LockEvent {
    pub fn lines_cleared(&self) -> usize {
        self.cleared_rows.len()
    }
}

/// What one call to [`TetrisGame::step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing moved (not started, game over, or gravity interval pending).
    Idle,
    /// Gravity moved the piece down one row.
    Fell,
    /// The piece landed and its rest budget started.
    Landed,
    /// A recent move extended the rest budget to `rest_ms`.
    Extended { rest_ms: u32 },
    /// The piece lost its support and fell one row.
    Freed,
    /// The piece was committed.
    Locked(LockEvent),
}

/// Every playable kind must fit at the spawn anchor of an empty board, or the
/// first spawn would already top out.
fn check_spawn<G: PieceGeometry>(config: &GameConfig, geometry: &G) -> Result<(), ConfigError> {
    let empty = Board::new(config.board_width, config.board_height)?;
    let anchor = (config.spawn_x, config.spawn_y);
    let blocked = PieceKind::PLAYABLE
        .into_iter()
        .find(|&kind| !geometry.fits(&Piece::new(kind, anchor), &empty));
    match blocked {
        Some(kind) => {
            debug!("{:?} does not fit at spawn anchor {:?}", kind, anchor);
            Err(ConfigError::SpawnOutsideBoard {
                x: anchor.0,
                y: anchor.1,
            })
        }
        None => Ok(()),
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct TetrisGame<G = SrsGeometry> {
    config: GameConfig,
    board: Board,
    bag: PieceBag,
    controller: PieceController<G>,
    hold: HoldSlot,
    timer: LockTimer,
    started: bool,
    game_over: bool,
    pieces_locked: u32,
    lines_cleared: u32,
    /// Last commit (consumed by observers).
    last_event: Option<LockEvent>,
}

impl TetrisGame<SrsGeometry> {
    /// Create a game with the standard tetromino geometry.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_geometry(config, SrsGeometry)
    }

    /// Default configuration with an explicit seed.
    pub fn with_seed(seed: u64) -> Self {
        let board = Board::standard();
        let config = GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        };
        Self::assemble(config, board, SrsGeometry)
    }
}

impl<G: PieceGeometry> TetrisGame<G> {
    pub fn with_geometry(config: GameConfig, geometry: G) -> Result<Self, ConfigError> {
        config.validate()?;
        check_spawn(&config, &geometry)?;
        let board = Board::new(config.board_width, config.board_height)?;
        Ok(Self::assemble(config, board, geometry))
    }

    fn assemble(config: GameConfig, board: Board, geometry: G) -> Self {
        let mut bag = PieceBag::new(config.seed.unwrap_or(DEFAULT_SEED));
        bag.ensure_filled();
        Self {
            controller: PieceController::new(geometry, (config.spawn_x, config.spawn_y)),
            timer: LockTimer::new(LockTiming::from(&config)),
            config,
            board,
            bag,
            hold: HoldSlot::new(),
            started: false,
            game_over: false,
            pieces_locked: 0,
            lines_cleared: 0,
            last_event: None,
        }
    }

    /// Replace the empty starting board with a prepared one. Call before
    /// [`start`](Self::start); the config takes the board's dimensions.
    pub fn with_board(mut self, board: Board) -> Result<Self, ConfigError> {
        let config = GameConfig {
            board_width: board.width(),
            board_height: board.height(),
            ..self.config
        };
        config.validate()?;
        check_spawn(&config, self.controller.geometry())?;
        self.config = config;
        self.board = board;
        Ok(self)
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        debug!("game started, seed {}", self.bag.seed());
        self.spawn_next();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// True when actions and gravity have an effect.
    pub fn playable(&self) -> bool {
        self.started && !self.game_over && self.controller.active().is_some()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.controller.active()
    }

    /// Landing projection of the active piece.
    pub fn ghost(&self) -> Option<Piece> {
        self.controller.project(&self.board)
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.hold.held()
    }

    pub fn swap_used(&self) -> bool {
        self.hold.swap_used()
    }

    pub fn phase(&self) -> LockPhase {
        self.timer.phase()
    }

    pub fn timer(&self) -> &LockTimer {
        &self.timer
    }

    pub fn controller(&self) -> &PieceController<G> {
        &self.controller
    }

    /// Game clock in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.timer.now_ms()
    }

    pub fn seed(&self) -> u64 {
        self.bag.seed()
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Upcoming kinds, limited to the configured preview length.
    pub fn next_queue(&self) -> NextQueue {
        let mut next = NextQueue::new();
        next.extend(self.bag.preview().take(self.config.preview_len.min(next.capacity())));
        next
    }

    /// Take and clear the last commit event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Committed board with the active piece and its ghost merged in.
    pub fn display_board(&self) -> Board {
        let Some(piece) = self.controller.active() else {
            return self.board.clone();
        };
        let geometry = self.controller.geometry();
        let board = geometry.merge_into_board(&piece, &self.board, false);
        match self.controller.project(&self.board) {
            Some(ghost) => geometry.merge_into_board(&ghost, &board, true),
            None => board,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.display_board(),
            active: self.controller.active(),
            ghost: self.ghost(),
            held: self.hold.held(),
            next: self.next_queue(),
            phase: self.timer.phase(),
            swap_used: self.hold.swap_used(),
            started: self.started,
            game_over: self.game_over,
            pieces_locked: self.pieces_locked,
            lines_cleared: self.lines_cleared,
        }
    }

    /// Apply a game action. `Ok(false)` means the action was rejected and
    /// nothing changed.
    pub fn apply(&mut self, action: GameAction) -> Result<bool, GameError> {
        if !self.playable() {
            return Ok(false);
        }
        let now = self.timer.now_ms();
        let accepted = match action {
            GameAction::MoveLeft => self.controller.attempt_move(&self.board, -1, 0, now),
            GameAction::MoveRight => self.controller.attempt_move(&self.board, 1, 0, now),
            GameAction::SoftDrop => self.controller.attempt_move(&self.board, 0, 1, now),
            GameAction::RotateCw => {
                self.controller
                    .attempt_rotate(&self.board, RotationDirection::Clockwise, now)
            }
            GameAction::RotateCcw => {
                self.controller
                    .attempt_rotate(&self.board, RotationDirection::CounterClockwise, now)
            }
            GameAction::HardDrop => {
                self.hard_drop()?;
                true
            }
            GameAction::HoldSwap => self.hold_swap(),
        };
        if !accepted {
            trace!("{} rejected", action.as_str());
        }
        Ok(accepted)
    }

    /// Advance the game by `elapsed_ms`.
    pub fn step(&mut self, elapsed_ms: u32) -> Result<StepOutcome, GameError> {
        if !self.playable() {
            return Ok(StepOutcome::Idle);
        }
        let resting = self.controller.is_resting(&self.board);
        let last_move = self.controller.last_move_ms();

        let outcome = match self.timer.advance(elapsed_ms, resting, last_move) {
            LockStep::Wait => StepOutcome::Idle,
            LockStep::Fall => {
                self.controller.fall(&self.board);
                StepOutcome::Fell
            }
            LockStep::Landed => {
                trace!("landed, rest budget {}ms", self.timer.rest_ms());
                StepOutcome::Landed
            }
            LockStep::Extended => {
                trace!("rest budget extended to {}ms", self.timer.rest_ms());
                StepOutcome::Extended {
                    rest_ms: self.timer.rest_ms(),
                }
            }
            LockStep::Freed => {
                trace!("piece freed, falling again");
                self.controller.fall(&self.board);
                StepOutcome::Freed
            }
            LockStep::Commit => StepOutcome::Locked(self.commit()?),
        };
        Ok(outcome)
    }

    /// Drop the active piece to its landing row and commit it at once.
    pub fn hard_drop(&mut self) -> Result<LockEvent, GameError> {
        let distance = self.controller.drop_to_floor(&self.board);
        trace!("hard drop: {} rows", distance);
        self.commit()
    }

    /// Swap the active piece with the hold slot, at most once per piece.
    pub fn hold_swap(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(active) = self.controller.active() else {
            return false;
        };

        match self.hold.try_swap(active.kind) {
            Swap::Rejected => false,
            Swap::Stored => {
                debug!("hold: stored {:?}", active.kind);
                self.controller.take();
                self.spawn_next();
                true
            }
            Swap::Exchanged(held) => {
                debug!("hold: {:?} out, {:?} in", held, active.kind);
                self.spawn(held);
                true
            }
        }
    }

    /// Merge the resting active piece into the board, clear full rows and
    /// spawn the next piece.
    pub fn commit(&mut self) -> Result<LockEvent, GameError> {
        let Some(piece) = self.controller.active() else {
            error!("commit without an active piece");
            return Err(GameError::NoActivePiece);
        };
        if !self.controller.is_resting(&self.board) {
            let err = GameError::NotResting(piece);
            error!("{}", err);
            return Err(err);
        }

        self.board = self
            .controller
            .geometry()
            .merge_into_board(&piece, &self.board, false);
        self.controller.take();

        let cleared_rows = self.board.clear_full_rows();
        self.pieces_locked = self.pieces_locked.saturating_add(1);
        self.lines_cleared = self.lines_cleared.saturating_add(cleared_rows.len() as u32);
        if cleared_rows.is_empty() {
            debug!("locked {:?} at ({}, {})", piece.kind, piece.x, piece.y);
        } else {
            debug!(
                "locked {:?} at ({}, {}), cleared rows {:?}",
                piece.kind,
                piece.x,
                piece.y,
                cleared_rows.as_slice()
            );
        }

        self.hold.release();
        let spawned = self.spawn_next();

        let event = LockEvent {
            piece,
            cleared_rows,
            topped_out: !spawned,
        };
        self.last_event = Some(event.clone());
        Ok(event)
    }

    fn spawn_next(&mut self) -> bool {
        self.bag.ensure_filled();
        let kind = self.bag.draw();
        self.spawn(kind)
    }

    fn spawn(&mut self, kind: PieceKind) -> bool {
        self.timer.reset();
        if self.controller.spawn(kind, &self.board) {
            debug!("spawned {:?}", kind);
            true
        } else {
            self.game_over = true;
            info!(
                "top out: {:?} cannot spawn after {} pieces",
                kind, self.pieces_locked
            );
            false
        }
    }
}

impl Default for TetrisGame<SrsGeometry> {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}
