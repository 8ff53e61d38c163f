//! # Utilities Module
//!
//! Shared algorithms used by the game systems.

pub mod pathfinding;

pub use self::pathfinding::*;
