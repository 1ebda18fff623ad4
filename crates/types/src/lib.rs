//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no I/O, making them usable by the core state
//! machine, the terminal view, and the key mapping alike.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn anchor**: (3, 0)
//!
//! Boards may be built with other dimensions up to [`MAX_BOARD_WIDTH`] x
//! [`MAX_BOARD_HEIGHT`]; see [`GameConfig`].
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval used by the terminal driver (~60 FPS) |
//! | `GRAVITY_MS` | 1000 | Time between gravity steps while falling |
//! | `LOCK_DELAY_MS` | 500 | Rest budget granted when a piece lands |
//! | `RECENT_ACTION_WINDOW_MS` | 100 | A move this recent extends the rest budget |
//! | `MAX_LOCK_DELAY_MS` | 3000 | Cap on the extended rest budget |
//!
//! # Examples
//!
//! ```
//! use stacker_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Parse from string (case-insensitive)
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! // Rotate
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! // Parse game action
//! let action = GameAction::from_str("holdSwap").unwrap();
//! assert_eq!(action, GameAction::HoldSwap);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

pub mod config;

pub use config::{check_board_size, ConfigError, GameConfig};

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Largest supported board width.
pub const MAX_BOARD_WIDTH: u8 = 32;

/// Largest supported board height.
pub const MAX_BOARD_HEIGHT: usize = 64;

/// Default spawn anchor (x, y)
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

/// Frame interval for the terminal driver (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval: one row per second while falling
pub const GRAVITY_MS: u32 = 1000;

/// Rest budget assigned when a piece lands
pub const LOCK_DELAY_MS: u32 = 500;

/// A successful move at most this old counts as a recent action
pub const RECENT_ACTION_WINDOW_MS: u32 = 100;

/// Upper bound for the extended rest budget
pub const MAX_LOCK_DELAY_MS: u32 = 3000;

/// Number of upcoming pieces exposed to collaborators by default
pub const PREVIEW_LEN: usize = 5;

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind that may appear in a shuffled batch.
    ///
    /// The ghost marker ([`Cell::Ghost`]) and the enumeration size
    /// ([`PieceKind::COUNT`]) are not variants, so a batch can never hold
    /// a non-playable identifier.
    pub const PLAYABLE: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Number of piece kinds.
    pub const COUNT: usize = Self::PLAYABLE.len();

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use stacker_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation states
///
/// - **North**: Spawn orientation (state 0)
/// - **East**: Rotated 90° clockwise (state 1)
/// - **South**: Rotated 180° (state 2)
/// - **West**: Rotated 270° clockwise (state 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use stacker_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use stacker_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Apply a rotation direction.
    pub fn turned(&self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => self.rotate_cw(),
            RotationDirection::CounterClockwise => self.rotate_ccw(),
        }
    }

    /// Numeric rotation state (0..=3).
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// Direction of a rotation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Abstract player actions accepted by the game.
///
/// Raw device codes are mapped onto these by an input adapter; the game never
/// sees keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Move piece one cell down
    SoftDrop,
    /// Drop piece to its resting place and lock it immediately
    HardDrop,
    /// Exchange the active piece with the hold slot (once per piece)
    HoldSwap,
}

impl GameAction {
    /// All actions, in declaration order.
    pub const ALL: [GameAction; 7] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::HoldSwap,
    ];

    /// Parse action from string (case-insensitive camelCase names)
    ///
    /// # Examples
    ///
    /// ```
    /// use stacker_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "holdswap" | "hold" => Some(GameAction::HoldSwap),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::HoldSwap => "holdSwap",
        }
    }
}

/// A cell on the game board
///
/// Committed boards only ever contain `Empty` and `Block`. `Ghost` appears in
/// display boards, where it marks the landing projection of the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Block(PieceKind),
    Ghost(PieceKind),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// True for real, committed blocks (ghost markers do not count).
    pub fn is_block(&self) -> bool {
        matches!(self, Cell::Block(_))
    }

    /// Piece kind carried by the cell, for coloring.
    pub fn kind(&self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Block(kind) | Cell::Ghost(kind) => Some(*kind),
        }
    }
}
