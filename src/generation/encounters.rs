//! # Entity Placement
//!
//! Scatters the player, enemies and items over the floor of a finished grid.

use crate::game::{Enemy, Grid, Item, ItemKind, Player, Position, Tile};
use crate::generation::GenerationConfig;
use crate::GridcrawlResult;
use log::{debug, warn};
use rand::{rngs::StdRng, seq::SliceRandom};

/// Everything placed on a grid by [`place_entities`].
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// The player, unless the grid had no floor at all
    pub player: Option<Player>,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
}

impl Placement {
    /// Every occupied position, player first, then enemies, then items.
    pub fn occupied_positions(&self) -> Vec<Position> {
        self.player
            .iter()
            .map(|player| player.position)
            .chain(self.enemies.iter().map(|enemy| enemy.position))
            .chain(self.items.iter().map(|item| item.position))
            .collect()
    }
}

/// Places the player, enemies, swords and potions on distinct floor cells.
///
/// Floor cells are shuffled once and handed out from the end of the pool in a fixed
/// order: player, enemies, swords, potions. When the pool runs dry the rest are simply
/// left out. Player and enemy markers are written into the grid; items are not.
pub fn place_entities(
    grid: &mut Grid,
    config: &GenerationConfig,
    rng: &mut StdRng,
) -> GridcrawlResult<Placement> {
    let mut pool = grid.floor_positions();
    pool.shuffle(rng);
    let available = pool.len();

    let player = pool.pop().map(Player::new);
    if let Some(player) = &player {
        grid.set(player.position, Tile::Player)?;
    }

    let mut enemies = Vec::with_capacity(config.enemy_count);
    for position in draw(&mut pool, config.enemy_count) {
        grid.set(position, Tile::Enemy)?;
        enemies.push(Enemy::with_health(position, config.enemy_health));
    }

    let mut items = Vec::with_capacity(config.sword_count + config.potion_count);
    items.extend(
        draw(&mut pool, config.sword_count)
            .into_iter()
            .map(|position| Item::new(position, ItemKind::Sword)),
    );
    items.extend(
        draw(&mut pool, config.potion_count)
            .into_iter()
            .map(|position| Item::new(position, ItemKind::HealthPotion)),
    );

    let wanted = 1 + config.enemy_count + config.sword_count + config.potion_count;
    if available < wanted {
        warn!(
            "Only {} floor cells for {} entities, some were not placed",
            available, wanted
        );
    }
    debug!(
        "Placed player: {}, {} enemies, {} items",
        player.is_some(),
        enemies.len(),
        items.len()
    );

    Ok(Placement {
        player,
        enemies,
        items,
    })
}

/// Pops up to `count` positions off the end of the pool.
fn draw(pool: &mut Vec<Position>, count: usize) -> Vec<Position> {
    let take = count.min(pool.len());
    let mut drawn = pool.split_off(pool.len() - take);
    drawn.reverse();
    drawn
}
