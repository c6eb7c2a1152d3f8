//! Keyboard mapping
//!
//! Raw `KeyboardEvent.key` strings to game actions. The shell forwards
//! actions to [`crate::sim::GameState::apply`], which ignores anything the
//! current phase does not accept.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    LaneLeft,
    LaneRight,
    Jump,
    Pause,
    Restart,
}

impl Action {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Action::LaneLeft),
            "ArrowRight" | "d" | "D" => Some(Action::LaneRight),
            "ArrowUp" | "w" | "W" | " " => Some(Action::Jump),
            "Escape" | "p" | "P" => Some(Action::Pause),
            "Enter" | "r" | "R" => Some(Action::Restart),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Action::from_key("ArrowLeft"), Some(Action::LaneLeft));
        assert_eq!(Action::from_key("d"), Some(Action::LaneRight));
        assert_eq!(Action::from_key(" "), Some(Action::Jump));
        assert_eq!(Action::from_key("Escape"), Some(Action::Pause));
        assert_eq!(Action::from_key("Enter"), Some(Action::Restart));
        assert_eq!(Action::from_key("ArrowDown"), None);
        assert_eq!(Action::from_key("Shift"), None);
    }
}
