//! # Keyboard Command Surface
//!
//! Function-key bindings for the billing screen, bound once and dispatched
//! through the command queue (never re-registered per render):
//!
//! | Key    | Command            |
//! |--------|--------------------|
//! | F2     | Save               |
//! | F3     | Print              |
//! | F4     | Hold               |
//! | F5     | Retrieve (latest)  |
//! | Escape | CancelSearch       |
//! | ↑ / ↓  | Move selection     |
//! | Enter  | Select highlighted |

use crate::command::{Command, SelectionMove};

/// Keys the billing screen reacts to globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    F2,
    F3,
    F4,
    F5,
    Escape,
    Enter,
    ArrowUp,
    ArrowDown,
}

/// Maps a key to its billing command. Keys not on the surface map to None
/// and fall through to normal text entry.
pub fn command_for(key: Key) -> Option<Command> {
    match key {
        Key::F2 => Some(Command::Save),
        Key::F3 => Some(Command::Print),
        Key::F4 => Some(Command::Hold),
        Key::F5 => Some(Command::RetrieveLast),
        Key::Escape => Some(Command::CancelSearch),
        Key::Enter => Some(Command::SelectHighlighted),
        Key::ArrowUp => Some(Command::MoveSelection(SelectionMove::Up)),
        Key::ArrowDown => Some(Command::MoveSelection(SelectionMove::Down)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_key_bindings() {
        assert!(matches!(command_for(Key::F2), Some(Command::Save)));
        assert!(matches!(command_for(Key::F3), Some(Command::Print)));
        assert!(matches!(command_for(Key::F4), Some(Command::Hold)));
        assert!(matches!(command_for(Key::F5), Some(Command::RetrieveLast)));
        assert!(matches!(command_for(Key::Escape), Some(Command::CancelSearch)));
    }

    #[test]
    fn test_navigation_bindings() {
        assert!(matches!(
            command_for(Key::ArrowUp),
            Some(Command::MoveSelection(SelectionMove::Up))
        ));
        assert!(matches!(
            command_for(Key::ArrowDown),
            Some(Command::MoveSelection(SelectionMove::Down))
        ));
        assert!(matches!(command_for(Key::Enter), Some(Command::SelectHighlighted)));
    }
}
