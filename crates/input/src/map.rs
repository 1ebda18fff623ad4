//! Key mapping from terminal events to commands.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCommand {
    /// Forward to the game.
    Play(GameAction),
    /// Toggle pause. Handled by the driver, which stops stepping the game.
    Pause,
    /// Start a fresh game with the same configuration.
    Restart,
    Quit,
}

/// Map a key event to a command. Key releases map to nothing.
pub fn map_key(key: KeyEvent) -> Option<InputCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputCommand::Quit);
    }

    let action = match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => GameAction::MoveLeft,
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => GameAction::MoveRight,
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => GameAction::SoftDrop,

        // Rotation
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W' | 'x' | 'X') => GameAction::RotateCw,
        KeyCode::Char('z' | 'Z' | 'y' | 'Y') => GameAction::RotateCcw,

        // Actions
        KeyCode::Char(' ') => GameAction::HardDrop,
        KeyCode::Char('c' | 'C') => GameAction::HoldSwap,

        // Driver commands
        KeyCode::Char('p' | 'P') | KeyCode::Esc => return Some(InputCommand::Pause),
        KeyCode::Char('r' | 'R') => return Some(InputCommand::Restart),
        KeyCode::Char('q' | 'Q') => return Some(InputCommand::Quit),

        _ => return None,
    };
    Some(InputCommand::Play(action))
}
