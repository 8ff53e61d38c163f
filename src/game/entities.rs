//! # Entities
//!
//! Player, enemy and item records. Positions here are kept in step with the grid
//! markers by [`crate::GameState`]; nothing outside the session moves them.

use crate::{config, Position};
use serde::{Deserialize, Serialize};

/// The player character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub position: Position,
    pub health: i32,
    pub max_health: i32,
    pub attack_power: i32,
}

impl Player {
    /// Creates a player at full default health.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcrawl::{Player, Position};
    ///
    /// let player = Player::new(Position::new(3, 4));
    /// assert_eq!(player.health, player.max_health);
    /// assert!(player.is_alive());
    /// ```
    pub fn new(position: Position) -> Self {
        Self {
            position,
            health: config::DEFAULT_PLAYER_HEALTH,
            max_health: config::DEFAULT_PLAYER_HEALTH,
            attack_power: config::DEFAULT_PLAYER_ATTACK,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Restores health, never past the maximum. Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - before
    }

    /// Applies damage, never dropping below zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    /// Fraction of health remaining, in `[0, 1]`.
    pub fn health_ratio(&self) -> f32 {
        health_ratio(self.health, self.max_health)
    }
}

/// A hostile creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub position: Position,
    pub health: i32,
    pub max_health: i32,
}

impl Enemy {
    /// Standard enemy health.
    pub const DEFAULT_HEALTH: i32 = 30;

    pub fn new(position: Position) -> Self {
        Self::with_health(position, Self::DEFAULT_HEALTH)
    }

    /// Creates an enemy at full health with the given maximum.
    pub fn with_health(position: Position, max_health: i32) -> Self {
        Self {
            position,
            health: max_health,
            max_health,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Applies damage. Health may go negative; callers only test `is_alive`.
    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    /// Fraction of health remaining, in `[0, 1]`.
    pub fn health_ratio(&self) -> f32 {
        health_ratio(self.health, self.max_health)
    }
}

/// What an item does when picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    HealthPotion,
    Sword,
}

impl ItemKind {
    /// Gets the display character for this item.
    pub fn glyph(self) -> char {
        match self {
            ItemKind::HealthPotion => '!',
            ItemKind::Sword => '/',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ItemKind::HealthPotion => "health potion",
            ItemKind::Sword => "sword",
        }
    }
}

/// An item lying on a floor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub position: Position,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(position: Position, kind: ItemKind) -> Self {
        Self { position, kind }
    }
}

fn health_ratio(health: i32, max_health: i32) -> f32 {
    if max_health <= 0 {
        return 0.0;
    }
    (health as f32 / max_health as f32).clamp(0.0, 1.0)
}
