//! # Gridcrawl Roguelike
//!
//! A compact, turn-based roguelike: one procedurally generated dungeon floor, a player,
//! a pack of pathfinding enemies and a handful of items.
//!
//! ## Architecture Overview
//!
//! The crate is split along the lines of the game loop:
//!
//! - **Generation**: room-and-corridor layout, connectivity repair and entity placement
//! - **Game State**: the session object that owns the grid, entities and random source
//! - **Turn Engine**: player actions, enemy reactions and win/loss detection
//! - **Pathfinding**: breadth-first shortest paths used by enemy pursuit
//! - **Input/Rendering**: thin collaborators that map keys to actions and draw text
//!
//! All randomness flows through a seedable [`rand::rngs::StdRng`] so that a given seed
//! reproduces the same dungeon and the same enemy behavior.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

// Explicit re-exports for commonly used types
pub use game::{
    // From entities
    Enemy,
    Item,
    ItemKind,
    Player,
    // From state
    GameCompletionState,
    GameEvent,
    GameInfo,
    GameState,
    TurnResult,
    // From world
    Grid,
    Tile,
    // From mod
    Direction,
    Position,
};

pub use generation::{
    Area, GenerationConfig, Generator, Layout, Placement, Room, RoomCorridorGenerator,
};

pub use rendering::{AsciiDisplay, Renderer, UI};

/// Core error type for the Gridcrawl game engine.
#[derive(thiserror::Error, Debug)]
pub enum GridcrawlError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// A coordinate fell outside the grid or onto an unusable cell
    #[error("Invalid position ({x}, {y}): {reason}")]
    InvalidPosition { x: i32, y: i32, reason: String },

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Gridcrawl codebase.
pub type GridcrawlResult<T> = Result<T, GridcrawlError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default dungeon width in tiles
    pub const DEFAULT_MAP_WIDTH: u32 = 40;

    /// Default dungeon height in tiles
    pub const DEFAULT_MAP_HEIGHT: u32 = 24;

    /// Largest accepted map width or height
    pub const MAX_MAP_DIMENSION: u32 = 1024;

    /// Default player starting (and maximum) health
    pub const DEFAULT_PLAYER_HEALTH: i32 = 100;

    /// Default player attack power
    pub const DEFAULT_PLAYER_ATTACK: i32 = 10;

    /// Damage dealt by an enemy in melee range
    pub const ENEMY_ATTACK_DAMAGE: i32 = 5;

    /// Euclidean distance at which enemies start chasing the player
    pub const ENEMY_PURSUIT_RANGE: f64 = 10.0;

    /// Chance that an idle enemy wanders one step per turn
    pub const ENEMY_WANDER_CHANCE: f64 = 0.3;

    /// Health restored by a potion
    pub const POTION_HEAL_AMOUNT: i32 = 20;

    /// Attack power granted by a sword
    pub const SWORD_ATTACK_BONUS: i32 = 5;
}
