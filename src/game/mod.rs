//! # Game Module
//!
//! Core game state management, grid representation, and entity records.
//!
//! This module contains the fundamental building blocks of Gridcrawl:
//! - The tile grid and its coordinate system
//! - Player, enemy and item records
//! - The game session and its turn engine
//! - Enemy decision making

pub mod ai;
pub mod entities;
pub mod state;
pub mod world;

pub use ai::*;
pub use entities::*;
pub use state::*;
pub use world::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate on the grid.
///
/// # Examples
///
/// ```
/// use gridcrawl::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let adjacent = pos.adjacent_positions();
/// assert_eq!(adjacent.len(), 8); // All 8 surrounding positions
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcrawl::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    /// Calculates the Chebyshev distance, `max(|dx|, |dy|)`.
    ///
    /// Two positions are adjacent (diagonals included) when this is 1.
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        (self.x - other.x).abs().max((self.y - other.y).abs()) as u32
    }

    /// Calculates the Euclidean distance to another position.
    pub fn euclidean_distance(self, other: Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns all 8 adjacent positions in row-major order (top row first).
    pub fn adjacent_positions(self) -> Vec<Position> {
        let mut positions = Vec::with_capacity(8);
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                positions.push(Position::new(self.x + dx, self.y + dy));
            }
        }
        positions
    }

    /// Returns the 4 cardinal neighbours in [`Direction::cardinal`] order.
    pub fn cardinal_adjacent_positions(self) -> [Position; 4] {
        Direction::cardinal().map(|direction| self + direction.to_delta())
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Directions the player can move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcrawl::{Direction, Position};
    ///
    /// let delta = Direction::Up.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }

    /// Returns the 4 cardinal directions in scan order: up, down, left, right.
    pub fn cardinal() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.x, 5);
        assert_eq!(pos.y, 10);
    }

    #[test]
    fn test_position_distances() {
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(3, 4);
        assert_eq!(pos1.manhattan_distance(pos2), 7);
        assert_eq!(pos1.chebyshev_distance(pos2), 4);
        assert_eq!(pos1.euclidean_distance(pos2), 5.0);
    }

    #[test]
    fn test_chebyshev_counts_diagonals_as_adjacent() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.chebyshev_distance(Position::new(6, 6)), 1);
        assert_eq!(pos.chebyshev_distance(Position::new(4, 5)), 1);
        assert_eq!(pos.chebyshev_distance(Position::new(7, 5)), 2);
    }

    #[test]
    fn test_position_adjacent_is_row_major() {
        let pos = Position::new(5, 5);
        let adjacent = pos.adjacent_positions();
        assert_eq!(adjacent.len(), 8);
        assert_eq!(adjacent[0], Position::new(4, 4));
        assert_eq!(adjacent[3], Position::new(4, 5));
        assert_eq!(adjacent[4], Position::new(6, 5));
        assert_eq!(adjacent[7], Position::new(6, 6));
        assert!(!adjacent.contains(&pos));
    }

    #[test]
    fn test_position_cardinal_adjacent() {
        let pos = Position::new(5, 5);
        let adjacent = pos.cardinal_adjacent_positions();
        assert_eq!(
            adjacent,
            [
                Position::new(5, 4),
                Position::new(5, 6),
                Position::new(4, 5),
                Position::new(6, 5),
            ]
        );
    }

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
        assert_eq!(pos1 - pos2, Position::new(2, 8));
    }

    #[test]
    fn test_cardinal_deltas_are_unit_steps() {
        for direction in Direction::cardinal() {
            assert_eq!(Position::new(0, 0).manhattan_distance(direction.to_delta()), 1);
        }
    }
}
