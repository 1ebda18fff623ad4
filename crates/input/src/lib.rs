//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`InputCommand`]s: the seven abstract
//! game actions plus the driver-level commands (pause, restart, quit). The
//! game itself never sees keys.

pub mod map;

pub use stacker_types as types;

pub use map::{map_key, InputCommand};
