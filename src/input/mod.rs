//! # Input Module
//!
//! Maps raw key presses to player inputs for the turn engine.

use crate::game::Direction;
use serde::{Deserialize, Serialize};

/// Input handler for processing player commands.
///
/// Converts single key presses into [`PlayerInput`] values that can be fed to
/// [`GameState::handle_input`](crate::GameState::handle_input).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler with Vi keys enabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcrawl::{Direction, InputHandler, PlayerInput};
    ///
    /// let input_handler = InputHandler::new();
    /// assert_eq!(input_handler.map_key('w'), Some(PlayerInput::Move(Direction::Up)));
    /// assert_eq!(input_handler.map_key('x'), None);
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Maps one key to a player input, or `None` if the key means nothing.
    ///
    /// Letter keys are case-insensitive.
    pub fn map_key(&self, key: char) -> Option<PlayerInput> {
        let key = key.to_ascii_lowercase();
        match key {
            'w' => Some(PlayerInput::Move(Direction::Up)),
            's' => Some(PlayerInput::Move(Direction::Down)),
            'a' => Some(PlayerInput::Move(Direction::Left)),
            'd' => Some(PlayerInput::Move(Direction::Right)),
            ' ' => Some(PlayerInput::Attack),
            'q' => Some(PlayerInput::Quit),
            '?' => Some(PlayerInput::Help),
            _ if self.vi_keys_enabled => match key {
                'k' => Some(PlayerInput::Move(Direction::Up)),
                'j' => Some(PlayerInput::Move(Direction::Down)),
                'h' => Some(PlayerInput::Move(Direction::Left)),
                'l' => Some(PlayerInput::Move(Direction::Right)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Maps a line of text input, using its first character.
    ///
    /// Only line terminators are stripped, so a line holding a single space is an attack.
    pub fn map_line(&self, line: &str) -> Option<PlayerInput> {
        let line = line.trim_end_matches(['\r', '\n']);
        line.chars().next().and_then(|key| self.map_key(key))
    }

    /// Key bindings as `(keys, description)` pairs for help screens.
    pub fn key_bindings(&self) -> Vec<(&'static str, &'static str)> {
        let mut bindings = vec![
            ("w a s d", "move"),
            ("space", "attack all adjacent enemies"),
            ("?", "help"),
            ("q", "quit"),
        ];
        if self.vi_keys_enabled {
            bindings.insert(1, ("h j k l", "move (vi)"));
        }
        bindings
    }
}

/// Player input types that can be processed by the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerInput {
    /// Move one cell in a direction
    Move(Direction),
    /// Attack every adjacent enemy
    Attack,
    /// Quit the game
    Quit,
    /// Show help information
    Help,
}

impl PlayerInput {
    /// Whether this input is a game action that may consume a turn.
    pub fn is_action(self) -> bool {
        matches!(self, PlayerInput::Move(_) | PlayerInput::Attack)
    }
}
