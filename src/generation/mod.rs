//! # Generation Module
//!
//! Procedural content generation: dungeon layout, connectivity repair and entity placement.
//!
//! A level is produced in three passes. The room-and-corridor generator carves the
//! layout, the connectivity repairer stitches any isolated floor regions onto the
//! largest one, and entity placement scatters the player, enemies and items over the
//! remaining floor.

pub mod connectivity;
pub mod dungeon;
pub mod encounters;

pub use connectivity::*;
pub use dungeon::*;
pub use encounters::*;

use crate::game::{Position, Tile};
use crate::{config, GridcrawlError, GridcrawlResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// Controls map size, room and corridor counts, and how many entities are placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Map width in tiles
    pub width: u32,
    /// Map height in tiles
    pub height: u32,
    /// Minimum room side length
    pub min_room_size: u32,
    /// Maximum room side length
    pub max_room_size: u32,
    /// Minimum number of rooms to attempt
    pub min_rooms: u32,
    /// Maximum number of rooms to attempt
    pub max_rooms: u32,
    /// Minimum number of corridors along each axis
    pub min_corridors: u32,
    /// Maximum number of corridors along each axis
    pub max_corridors: u32,
    /// Number of enemies to place
    pub enemy_count: usize,
    /// Health each enemy starts with
    pub enemy_health: i32,
    /// Number of swords to place
    pub sword_count: usize,
    /// Number of health potions to place
    pub potion_count: usize,
}

impl GenerationConfig {
    /// Creates the standard game configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcrawl::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!((config.width, config.height), (40, 24));
    /// assert!(config.max_room_size >= config.min_room_size);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: config::DEFAULT_MAP_WIDTH,
            height: config::DEFAULT_MAP_HEIGHT,
            min_room_size: 3,
            max_room_size: 8,
            min_rooms: 5,
            max_rooms: 10,
            min_corridors: 3,
            max_corridors: 5,
            enemy_count: 10,
            enemy_health: 30,
            sword_count: 2,
            potion_count: 10,
        }
    }

    /// Creates a configuration for testing with a smaller, sparser level.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            width: 20,
            height: 12,
            min_room_size: 3,
            max_room_size: 5,
            min_rooms: 2,
            max_rooms: 4,
            min_corridors: 1,
            max_corridors: 2,
            enemy_count: 3,
            enemy_health: 30,
            sword_count: 1,
            potion_count: 2,
        }
    }

    /// Returns the configuration with a different map size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Checks that the ranges are ordered and the map has an interior to carve.
    pub fn validate(&self) -> GridcrawlResult<()> {
        if self.width < 3 || self.height < 3 {
            return Err(GridcrawlError::GenerationFailed(format!(
                "Map {}x{} is too small, need at least 3x3",
                self.width, self.height
            )));
        }
        if self.width > config::MAX_MAP_DIMENSION || self.height > config::MAX_MAP_DIMENSION {
            return Err(GridcrawlError::GenerationFailed(format!(
                "Map {}x{} is too large, at most {} per side",
                self.width,
                self.height,
                config::MAX_MAP_DIMENSION
            )));
        }
        if self.min_room_size == 0 || self.min_room_size > self.max_room_size {
            return Err(GridcrawlError::GenerationFailed(format!(
                "Invalid room size range {}..={}",
                self.min_room_size, self.max_room_size
            )));
        }
        if self.min_rooms > self.max_rooms {
            return Err(GridcrawlError::GenerationFailed(format!(
                "Invalid room count range {}..={}",
                self.min_rooms, self.max_rooms
            )));
        }
        if self.min_corridors > self.max_corridors {
            return Err(GridcrawlError::GenerationFailed(format!(
                "Invalid corridor count range {}..={}",
                self.min_corridors, self.max_corridors
            )));
        }
        Ok(())
    }

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// A rectangular room carved during generation.
///
/// Rooms only exist while a layout is being built; the game session keeps the grid,
/// not the rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Top-left corner of the room
    pub top_left: Position,
    /// Width of the room
    pub width: u32,
    /// Height of the room
    pub height: u32,
}

impl Room {
    /// Creates a new room with the given parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcrawl::{Room, Position};
    ///
    /// let room = Room::new(Position::new(5, 5), 4, 3);
    /// assert_eq!(room.area(), 12);
    /// assert!(room.contains(Position::new(8, 7)));
    /// assert!(!room.contains(Position::new(9, 7)));
    /// ```
    pub fn new(top_left: Position, width: u32, height: u32) -> Self {
        Self {
            top_left,
            width,
            height,
        }
    }

    /// Gets the bottom-right corner of the room.
    pub fn bottom_right(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 - 1,
            self.top_left.y + self.height as i32 - 1,
        )
    }

    /// Gets the area of the room in tiles.
    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Checks if a position is inside this room.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x < self.top_left.x + self.width as i32
            && pos.y < self.top_left.y + self.height as i32
    }

    /// Returns this room grown by `margin` cells on every side.
    pub fn expanded(&self, margin: u32) -> Room {
        Room::new(
            Position::new(
                self.top_left.x - margin as i32,
                self.top_left.y - margin as i32,
            ),
            self.width + 2 * margin,
            self.height + 2 * margin,
        )
    }

    /// Checks if this room overlaps with another room.
    pub fn overlaps(&self, other: &Room) -> bool {
        !(self.top_left.x >= other.top_left.x + other.width as i32
            || other.top_left.x >= self.top_left.x + self.width as i32
            || self.top_left.y >= other.top_left.y + other.height as i32
            || other.top_left.y >= self.top_left.y + self.height as i32)
    }

    /// Gets all positions within this room.
    pub fn positions(&self) -> Vec<Position> {
        let mut positions = Vec::with_capacity(self.area() as usize);

        for y in self.top_left.y..(self.top_left.y + self.height as i32) {
            for x in self.top_left.x..(self.top_left.x + self.width as i32) {
                positions.push(Position::new(x, y));
            }
        }

        positions
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> GridcrawlResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> GridcrawlResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Checks that a grid has at least one floor tile to stand on.
pub fn validate_grid(grid: &crate::Grid) -> GridcrawlResult<()> {
    if grid.count(Tile::Floor) == 0 {
        return Err(GridcrawlError::GenerationFailed(
            "Grid has no floor tiles".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.min_rooms, 5);
        assert_eq!(config.max_rooms, 10);
        assert_eq!(config.enemy_count, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_rejects_tiny_maps() {
        let config = GenerationConfig::new(1).with_size(2, 10);
        assert!(matches!(
            config.validate(),
            Err(GridcrawlError::GenerationFailed(_))
        ));
    }

    #[test]
    fn test_config_validation_rejects_oversized_maps() {
        let config = GenerationConfig::new(1).with_size(100_000, 100_000);
        assert!(matches!(
            config.validate(),
            Err(GridcrawlError::GenerationFailed(_))
        ));
        assert!(GenerationConfig::new(1).with_size(1024, 1024).validate().is_ok());
    }

    #[test]
    fn test_config_validation_rejects_inverted_ranges() {
        let mut config = GenerationConfig::for_testing(1);
        config.min_rooms = 5;
        config.max_rooms = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_room_geometry() {
        let room = Room::new(Position::new(5, 5), 10, 8);

        assert_eq!(room.bottom_right(), Position::new(14, 12));

        assert!(room.contains(Position::new(5, 5)));
        assert!(room.contains(Position::new(14, 12)));
        assert!(!room.contains(Position::new(4, 5)));
        assert!(!room.contains(Position::new(15, 12)));
    }

    #[test]
    fn test_room_overlap() {
        let room1 = Room::new(Position::new(5, 5), 10, 8);
        let room2 = Room::new(Position::new(10, 8), 6, 6);
        let room3 = Room::new(Position::new(20, 20), 5, 5);

        assert!(room1.overlaps(&room2));
        assert!(room2.overlaps(&room1));
        assert!(!room1.overlaps(&room3));
        assert!(!room3.overlaps(&room1));
    }

    #[test]
    fn test_room_margin_catches_touching_rooms() {
        let left = Room::new(Position::new(1, 1), 3, 3);
        let touching = Room::new(Position::new(4, 1), 3, 3);
        let gapped = Room::new(Position::new(5, 1), 3, 3);

        assert!(!left.overlaps(&touching));
        assert!(left.expanded(1).overlaps(&touching));
        assert!(!left.expanded(1).overlaps(&gapped));
    }

    #[test]
    fn test_room_positions() {
        let room = Room::new(Position::new(2, 3), 3, 2);
        let positions: HashSet<_> = room.positions().into_iter().collect();
        assert_eq!(positions.len(), 6);
        assert!(positions.contains(&Position::new(4, 4)));
        assert!(positions.iter().all(|&pos| room.contains(pos)));
    }

    #[test]
    fn test_create_rng_is_deterministic() {
        use rand::Rng;

        let config = GenerationConfig::new(12345);
        let a: u64 = config.create_rng().gen();
        let b: u64 = config.create_rng().gen();
        assert_eq!(a, b);
    }
}
