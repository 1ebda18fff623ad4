//! Core game logic - pure, deterministic, and testable
//!
//! This crate is the authoritative state machine for the stacking game. It
//! owns the grid, the active, queued and held pieces, gravity and lock timing,
//! and row clearing. It has **no dependencies** on terminals or input devices:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Testable**: every rule is reachable without a clock or a screen
//! - **Portable**: drive it from a terminal loop, a test, or a bench
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid with merge, full-row scan and cascading clear
//! - [`bag`]: shuffled-batch piece supply
//! - [`pieces`]: the [`PieceGeometry`] capability and the SRS tetromino tables
//! - [`controller`]: moves, rotates and projects the active piece
//! - [`hold`]: the once-per-piece hold slot
//! - [`lock`]: gravity and extendable lock delay
//! - [`game`]: [`TetrisGame`], tying everything together
//!
//! # Game Rules
//!
//! - **Batch randomizer**: every consecutive batch of seven is one of each kind
//! - **SRS rotation**: wall kicks for all pieces; the O piece does not rotate
//! - **Lock delay**: landing starts a 500ms rest budget. The budget is a
//!   counter, not a countdown: the next step commits the piece unless it was
//!   moved within the last 100ms, in which case that step adds 100ms to the
//!   budget instead. Once the budget reaches 3000ms the piece commits
//! - **Ghost piece**: the display board shows where the active piece will land
//! - **Hold**: store one piece for later use (once per piece)
//! - **Top out**: the game ends when a new piece cannot spawn
//!
//! # Example
//!
//! ```
//! use stacker_core::{StepOutcome, TetrisGame};
//! use stacker_core::types::GameAction;
//!
//! let mut game = TetrisGame::with_seed(12345);
//! game.start();
//!
//! game.apply(GameAction::MoveRight).unwrap();
//! game.apply(GameAction::RotateCw).unwrap();
//! assert_eq!(game.step(16).unwrap(), StepOutcome::Idle);
//!
//! let event = game.hard_drop().unwrap();
//! assert!(!event.topped_out);
//! assert_eq!(game.pieces_locked(), 1);
//! ```
//!
//! # Timing
//!
//! Call [`TetrisGame::step`] every frame with the elapsed milliseconds. The
//! game clock is the sum of those values; nothing reads the wall clock.

pub mod bag;
pub mod board;
pub mod controller;
pub mod error;
pub mod game;
pub mod hold;
pub mod lock;
pub mod pieces;
pub mod snapshot;

pub use stacker_types as types;

// Re-export commonly used types for convenience
pub use bag::PieceBag;
pub use board::{Board, RowList};
pub use controller::PieceController;
pub use error::GameError;
pub use game::{LockEvent, StepOutcome, TetrisGame, DEFAULT_SEED};
pub use hold::{HoldSlot, Swap};
pub use lock::{LockPhase, LockStep, LockTimer, LockTiming};
pub use pieces::{get_shape, Piece, PieceGeometry, SrsGeometry};
pub use snapshot::{GameSnapshot, NextQueue};
