//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the view draws a
//! [`GameSnapshot`](stacker_core::GameSnapshot) into a plain framebuffer and
//! the renderer flushes that framebuffer to the terminal, emitting only what
//! changed since the previous frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use stacker_core as core;
pub use stacker_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{piece_color, GameView, Overlay, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
