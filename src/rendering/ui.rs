//! # User Interface Elements
//!
//! Text panels shown next to the map: stats, health bars, messages and help.

use crate::game::{GameCompletionState, GameInfo};
use crate::input::InputHandler;

/// Text UI components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UI {
    /// Width of health bars in characters, brackets excluded
    pub bar_width: usize,
}

impl Default for UI {
    fn default() -> Self {
        Self::new()
    }
}

impl UI {
    pub fn new() -> Self {
        Self { bar_width: 10 }
    }

    /// Draws a bar filled in proportion to `ratio`, e.g. `[#####-----]`.
    ///
    /// Ratios are clamped to `[0, 1]`; any health above zero shows at least one mark.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcrawl::UI;
    ///
    /// assert_eq!(UI::new().health_bar(0.5), "[#####-----]");
    /// assert_eq!(UI::new().health_bar(0.0), "[----------]");
    /// ```
    pub fn health_bar(&self, ratio: f32) -> String {
        let ratio = ratio.clamp(0.0, 1.0);
        let mut filled = (ratio * self.bar_width as f32).round() as usize;
        if ratio > 0.0 {
            filled = filled.max(1);
        }
        let filled = filled.min(self.bar_width);
        format!(
            "[{}{}]",
            "#".repeat(filled),
            "-".repeat(self.bar_width - filled)
        )
    }

    /// The stats panel: health, attack and what is left on the map.
    pub fn info_panel(&self, info: &GameInfo) -> String {
        let ratio = if info.max_health > 0 {
            info.health as f32 / info.max_health as f32
        } else {
            0.0
        };
        format!(
            "Health: {}/{} {}\nAttack: {}\nEnemies: {}\nPotions: {}\nSwords: {}",
            info.health,
            info.max_health,
            self.health_bar(ratio),
            info.attack_power,
            info.enemy_count,
            info.potion_count,
            info.sword_count
        )
    }

    /// A one-line banner for a finished game, `None` while it is still running.
    pub fn outcome_banner(&self, state: GameCompletionState) -> Option<&'static str> {
        match state {
            GameCompletionState::Playing => None,
            GameCompletionState::Victory => Some("*** VICTORY ***"),
            GameCompletionState::Defeat => Some("*** YOU DIED ***"),
        }
    }

    pub fn help_text(&self, input: &InputHandler) -> String {
        input
            .key_bindings()
            .into_iter()
            .map(|(keys, description)| format!("{:>8}  {}", keys, description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
