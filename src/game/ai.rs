//! # Enemy AI
//!
//! Decides what each enemy does on its turn. Melee reach uses Chebyshev distance
//! (diagonals count), aggro range uses straight-line distance, and movement itself
//! is strictly orthogonal.

use crate::game::{Direction, Grid, Position, Tile};
use crate::{config, find_path};
use rand::{rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

/// What an enemy intends to do this turn, before any randomness is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyIntent {
    /// The player is in one of the 8 surrounding cells
    Attack,
    /// The player is within aggro range; chase along a shortest path
    Pursue,
    /// The player is far away; maybe wander a step
    Idle,
}

impl EnemyIntent {
    /// Picks the intent for an enemy at `enemy` facing a player at `player`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcrawl::{EnemyIntent, Position};
    ///
    /// let enemy = Position::new(5, 5);
    /// assert_eq!(EnemyIntent::decide(enemy, Position::new(6, 6)), EnemyIntent::Attack);
    /// assert_eq!(EnemyIntent::decide(enemy, Position::new(11, 13)), EnemyIntent::Pursue);
    /// assert_eq!(EnemyIntent::decide(enemy, Position::new(12, 13)), EnemyIntent::Idle);
    /// ```
    pub fn decide(enemy: Position, player: Position) -> EnemyIntent {
        if enemy.chebyshev_distance(player) <= 1 {
            EnemyIntent::Attack
        } else if enemy.euclidean_distance(player) <= config::ENEMY_PURSUIT_RANGE {
            EnemyIntent::Pursue
        } else {
            EnemyIntent::Idle
        }
    }
}

/// Checks whether an enemy may step onto `pos`: only empty floor qualifies.
pub fn can_enemy_enter(grid: &Grid, pos: Position) -> bool {
    grid.is(pos, Tile::Floor)
}

/// The next cell on a shortest path towards the player, if that cell is free.
pub fn pursuit_step(grid: &Grid, enemy: Position, player: Position) -> Option<Position> {
    let path = find_path(grid, enemy, player)?;
    let next = *path.get(1)?;
    can_enemy_enter(grid, next).then_some(next)
}

/// A random orthogonal step onto free floor, or `None` when boxed in.
pub fn random_step(grid: &Grid, from: Position, rng: &mut StdRng) -> Option<Position> {
    let mut directions = Direction::cardinal();
    directions.shuffle(rng);
    directions
        .into_iter()
        .map(|direction| from + direction.to_delta())
        .find(|&candidate| can_enemy_enter(grid, candidate))
}
