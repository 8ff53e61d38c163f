//! # Display Management
//!
//! ASCII map rendering with a scrolling message log.

use crate::game::{GameEvent, GameState, Position, Tile};
use crate::rendering::{Renderer, UI};

/// ASCII display for the game.
///
/// Draws one character per cell. Living things are drawn from the grid markers and
/// items are drawn over plain floor, so what is shown always matches the grid.
#[derive(Debug, Clone)]
pub struct AsciiDisplay {
    /// Message history
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
    /// Number of recent messages shown under the map
    pub visible_messages: usize,
    /// Whether to list enemy health bars under the map
    pub show_enemy_health: bool,
    pub ui: UI,
}

impl Default for AsciiDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl AsciiDisplay {
    /// Creates a display with an empty message log.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcrawl::{AsciiDisplay, GameState, GenerationConfig, Renderer};
    ///
    /// let game = GameState::generate_map(&GenerationConfig::for_testing(7)).unwrap();
    /// let frame = AsciiDisplay::new().render(&game);
    /// assert!(frame.contains('@'));
    /// ```
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            max_messages: 100,
            visible_messages: 3,
            show_enemy_health: true,
            ui: UI::new(),
        }
    }

    /// The glyph drawn at a position.
    pub fn glyph_at(&self, game: &GameState, pos: Position) -> char {
        match game.grid().get(pos) {
            Some(Tile::Floor) => game
                .item_at(pos)
                .map(|item| item.kind.glyph())
                .unwrap_or(Tile::Floor.glyph()),
            Some(tile) => tile.glyph(),
            None => ' ',
        }
    }

    /// Just the map, one line per row.
    pub fn render_map(&self, game: &GameState) -> String {
        let grid = game.grid();
        let mut out = String::with_capacity((grid.width() as usize + 1) * grid.height() as usize);
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                out.push(self.glyph_at(game, Position::new(x, y)));
            }
            out.push('\n');
        }
        out
    }

    /// A health bar line per enemy, in list order.
    pub fn render_enemy_health(&self, game: &GameState) -> String {
        game.enemies()
            .iter()
            .map(|enemy| {
                format!(
                    "E {:<9}{}",
                    enemy.position.to_string(),
                    self.ui.health_bar(enemy.health_ratio())
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);

        // Keep only the most recent messages
        if self.messages.len() > self.max_messages {
            let excess = self.messages.len() - self.max_messages;
            self.messages.drain(..excess);
        }
    }

    /// Logs the message of every event except plain player steps.
    pub fn record_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if !matches!(event, GameEvent::PlayerMoved { .. }) {
                self.add_message(event.message());
            }
        }
    }

    fn recent_messages(&self) -> &[String] {
        let start = self.messages.len().saturating_sub(self.visible_messages);
        &self.messages[start..]
    }
}

impl Renderer for AsciiDisplay {
    fn render(&self, game: &GameState) -> String {
        let mut sections = vec![
            self.render_map(game).trim_end().to_string(),
            self.ui.info_panel(&game.game_info()),
        ];
        if self.show_enemy_health && !game.enemies().is_empty() {
            sections.push(self.render_enemy_health(game));
        }
        if !self.messages.is_empty() {
            sections.push(self.recent_messages().join("\n"));
        }
        if let Some(banner) = self.ui.outcome_banner(game.completion_state()) {
            sections.push(banner.to_string());
        }
        sections.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Enemy, Grid, Item, ItemKind, Player};

    fn small_game() -> GameState {
        let grid = Grid::from_rows(&["#####", "#...#", "#...#", "#####"]).unwrap();
        GameState::from_parts(
            grid,
            Player::new(Position::new(1, 1)),
            vec![Enemy::new(Position::new(3, 2))],
            vec![
                Item::new(Position::new(2, 1), ItemKind::HealthPotion),
                Item::new(Position::new(1, 2), ItemKind::Sword),
            ],
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_render_map_glyphs() {
        let map = AsciiDisplay::new().render_map(&small_game());
        assert_eq!(map, "#####\n#@!.#\n#/.E#\n#####\n");
    }

    #[test]
    fn test_render_includes_panels() {
        let frame = AsciiDisplay::new().render(&small_game());
        assert!(frame.contains("Health: 100/100"));
        assert!(frame.contains("E (3, 2)"));
        assert!(!frame.contains("VICTORY"));
    }

    #[test]
    fn test_message_log_is_bounded() {
        let mut display = AsciiDisplay::new();
        display.max_messages = 2;
        for i in 0..5 {
            display.add_message(format!("message {}", i));
        }
        assert_eq!(display.messages, vec!["message 3", "message 4"]);
    }

    #[test]
    fn test_record_events_skips_plain_moves() {
        let mut display = AsciiDisplay::new();
        display.record_events(&[
            GameEvent::PlayerMoved {
                from: Position::new(0, 0),
                to: Position::new(1, 0),
            },
            GameEvent::AttackMissed,
        ]);
        assert_eq!(display.messages, vec!["There is nothing to attack"]);
    }
}
