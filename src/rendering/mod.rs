//! # Rendering Module
//!
//! Plain-text rendering of a game session for terminals and logs.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;

use crate::game::GameState;

/// Anything that can turn a game session into a printable frame.
pub trait Renderer {
    /// Draws the current state of the session.
    fn render(&self, game: &GameState) -> String;
}
