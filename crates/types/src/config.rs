//! Game configuration.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes. Call [`GameConfig::validate`] before handing a config to the game.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    PieceKind, BOARD_HEIGHT, BOARD_WIDTH, GRAVITY_MS, LOCK_DELAY_MS, MAX_BOARD_HEIGHT,
    MAX_BOARD_WIDTH, MAX_LOCK_DELAY_MS, PREVIEW_LEN, RECENT_ACTION_WINDOW_MS, SPAWN_POSITION,
};

/// Board geometry, timing, and randomizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_width: u8,
    pub board_height: u8,
    pub spawn_x: i8,
    pub spawn_y: i8,
    /// Falling time per gravity step.
    pub gravity_ms: u32,
    /// Rest budget granted on landing.
    pub lock_delay_ms: u32,
    /// How old a successful move may be and still extend the rest budget.
    pub recent_action_window_ms: u32,
    /// Cap for the extended rest budget.
    pub max_lock_delay_ms: u32,
    /// Number of upcoming pieces in snapshots.
    pub preview_len: usize,
    /// Bag seed. `None` lets the driver pick one.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            spawn_x: SPAWN_POSITION.0,
            spawn_y: SPAWN_POSITION.1,
            gravity_ms: GRAVITY_MS,
            lock_delay_ms: LOCK_DELAY_MS,
            recent_action_window_ms: RECENT_ACTION_WINDOW_MS,
            max_lock_delay_ms: MAX_LOCK_DELAY_MS,
            preview_len: PREVIEW_LEN,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_board_size(self.board_width, self.board_height)?;
        if self.spawn_x < 0
            || self.spawn_y < 0
            || self.spawn_x >= self.board_width as i8
            || self.spawn_y >= self.board_height as i8
        {
            return Err(ConfigError::SpawnOutsideBoard {
                x: self.spawn_x,
                y: self.spawn_y,
            });
        }
        if self.gravity_ms == 0 {
            return Err(ConfigError::ZeroGravityInterval);
        }
        if self.recent_action_window_ms == 0 {
            return Err(ConfigError::ZeroActionWindow);
        }
        if self.lock_delay_ms > self.max_lock_delay_ms {
            return Err(ConfigError::LockDelayAboveMaximum {
                lock_delay_ms: self.lock_delay_ms,
                max_lock_delay_ms: self.max_lock_delay_ms,
            });
        }
        if self.preview_len > PieceKind::COUNT {
            return Err(ConfigError::PreviewTooLong {
                requested: self.preview_len,
                max: PieceKind::COUNT,
            });
        }
        Ok(())
    }
}

/// Validate board dimensions.
pub fn check_board_size(width: u8, height: u8) -> Result<(), ConfigError> {
    if width == 0 || height == 0 || width > MAX_BOARD_WIDTH || height as usize > MAX_BOARD_HEIGHT {
        return Err(ConfigError::BoardSize { width, height });
    }
    Ok(())
}

/// Rejected configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    BoardSize { width: u8, height: u8 },
    SpawnOutsideBoard { x: i8, y: i8 },
    ZeroGravityInterval,
    ZeroActionWindow,
    LockDelayAboveMaximum { lock_delay_ms: u32, max_lock_delay_ms: u32 },
    PreviewTooLong { requested: usize, max: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoardSize { width, height } => write!(
                f,
                "board size {width}x{height} is outside 1x1..={MAX_BOARD_WIDTH}x{MAX_BOARD_HEIGHT}"
            ),
            Self::SpawnOutsideBoard { x, y } => {
                write!(f, "spawn anchor ({x}, {y}) is outside the board")
            }
            Self::ZeroGravityInterval => write!(f, "gravity interval must be positive"),
            Self::ZeroActionWindow => write!(f, "recent action window must be positive"),
            Self::LockDelayAboveMaximum {
                lock_delay_ms,
                max_lock_delay_ms,
            } => write!(
                f,
                "lock delay {lock_delay_ms}ms exceeds maximum lock delay {max_lock_delay_ms}ms"
            ),
            Self::PreviewTooLong { requested, max } => {
                write!(f, "preview length {requested} exceeds {max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_board_size() {
        let cfg = GameConfig {
            board_width: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::BoardSize {
                width: 0,
                height: BOARD_HEIGHT
            })
        );

        let cfg = GameConfig {
            board_height: 65,
            ..GameConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::BoardSize { .. })));
    }

    #[test]
    fn rejects_spawn_outside_board() {
        let cfg = GameConfig {
            spawn_x: 10,
            ..GameConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::SpawnOutsideBoard { x: 10, y: 0 })
        );
    }

    #[test]
    fn rejects_bad_timing() {
        let cfg = GameConfig {
            gravity_ms: 0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroGravityInterval));

        let cfg = GameConfig {
            recent_action_window_ms: 0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroActionWindow));

        let cfg = GameConfig {
            lock_delay_ms: 10,
            max_lock_delay_ms: 5,
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::LockDelayAboveMaximum { .. })
        ));
    }

    #[test]
    fn rejects_long_preview() {
        let cfg = GameConfig {
            preview_len: 8,
            ..GameConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::PreviewTooLong {
                requested: 8,
                max: 7
            })
        );
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: GameConfig = serde_json::from_str(r#"{ "gravity_ms": 250, "seed": 7 }"#).unwrap();
        assert_eq!(cfg.gravity_ms, 250);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.board_width, BOARD_WIDTH);
        assert_eq!(cfg.lock_delay_ms, LOCK_DELAY_MS);
    }

    #[test]
    fn error_messages_name_the_field() {
        let msg = ConfigError::ZeroGravityInterval.to_string();
        assert!(msg.contains("gravity"));
        let msg = ConfigError::SpawnOutsideBoard { x: -1, y: 0 }.to_string();
        assert!(msg.contains("(-1, 0)"));
    }
}
