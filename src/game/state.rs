//! # Game State Module
//!
//! The game session and its turn engine.
//!
//! [`GameState`] owns the grid, the entity records and the random source. Its fields
//! are private: every move or removal goes through a method that updates the grid
//! marker and the entity record together, so the two never disagree.

use crate::game::ai::{self, EnemyIntent};
use crate::game::{Direction, Enemy, Grid, Item, ItemKind, Player, Position, Tile};
use crate::generation::{place_entities, GenerationConfig, Generator, RoomCorridorGenerator};
use crate::input::PlayerInput;
use crate::{config, GridcrawlError, GridcrawlResult};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Game completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCompletionState {
    /// Game is still in progress
    Playing,
    /// Every enemy has been defeated
    Victory,
    /// The player's health reached zero
    Defeat,
}

impl GameCompletionState {
    /// Checks whether the game has ended and input should no longer be processed.
    pub fn is_terminal(self) -> bool {
        self != GameCompletionState::Playing
    }
}

/// Something that happened during a turn, in the order it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerMoved {
        from: Position,
        to: Position,
    },
    ItemPickedUp {
        kind: ItemKind,
        position: Position,
    },
    PlayerAttacked {
        target: Position,
        damage: i32,
        remaining_health: i32,
    },
    EnemyDefeated {
        position: Position,
    },
    /// An attack found no enemy in any neighbouring cell
    AttackMissed,
    EnemyAttacked {
        enemy: Position,
        damage: i32,
        player_health: i32,
    },
    EnemyMoved {
        from: Position,
        to: Position,
    },
    /// The last enemy fell
    Victory,
    /// The player's health reached zero
    Defeat,
}

impl GameEvent {
    /// A short human-readable description for message logs.
    pub fn message(&self) -> String {
        match self {
            GameEvent::PlayerMoved { to, .. } => format!("You move to {}", to),
            GameEvent::ItemPickedUp { kind, .. } => format!("You pick up a {}", kind.name()),
            GameEvent::PlayerAttacked {
                target,
                damage,
                remaining_health,
            } => format!(
                "You hit the enemy at {} for {} ({} left)",
                target,
                damage,
                (*remaining_health).max(0)
            ),
            GameEvent::EnemyDefeated { .. } => "The enemy is defeated!".to_string(),
            GameEvent::AttackMissed => "There is nothing to attack".to_string(),
            GameEvent::EnemyAttacked {
                damage,
                player_health,
                ..
            } => format!(
                "An enemy hits you for {} (health {})",
                damage, player_health
            ),
            GameEvent::EnemyMoved { .. } => "Something shuffles nearby".to_string(),
            GameEvent::Victory => "Victory! Every enemy is defeated.".to_string(),
            GameEvent::Defeat => "You have died.".to_string(),
        }
    }
}

/// Outcome of processing one player input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    /// Completion state after the input was resolved
    pub completion: GameCompletionState,
    /// Events produced, empty when the input changed nothing
    pub events: Vec<GameEvent>,
    /// Number of turns resolved so far
    pub turn_number: u64,
}

impl TurnResult {
    pub fn is_terminal(&self) -> bool {
        self.completion.is_terminal()
    }

    /// Whether the input actually consumed a turn.
    pub fn took_turn(&self) -> bool {
        !self.events.is_empty()
    }
}

/// Summary numbers for an info panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub health: i32,
    pub max_health: i32,
    pub attack_power: i32,
    pub enemy_count: usize,
    pub potion_count: usize,
    pub sword_count: usize,
}

/// A single game session.
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    player: Player,
    enemies: Vec<Enemy>,
    items: Vec<Item>,
    completion_state: GameCompletionState,
    turn_number: u64,
    rng: StdRng,
}

impl GameState {
    /// Generates a complete level and places everything on it.
    ///
    /// The same configuration (seed included) always yields the same session.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcrawl::{GameCompletionState, GameState, GenerationConfig};
    ///
    /// let game = GameState::generate_map(&GenerationConfig::new(12345)).unwrap();
    /// assert_eq!(game.completion_state(), GameCompletionState::Playing);
    /// assert_eq!(game.enemies().len(), 10);
    /// ```
    pub fn generate_map(config: &GenerationConfig) -> GridcrawlResult<Self> {
        let mut rng = config.create_rng();
        let generator = RoomCorridorGenerator::new();

        let mut grid = generator.generate(config, &mut rng)?;
        let placement = place_entities(&mut grid, config, &mut rng)?;
        let player = placement.player.ok_or_else(|| {
            GridcrawlError::InvalidState("No floor left to place the player".to_string())
        })?;

        info!(
            "Generated {}x{} map with seed {}: {} enemies, {} items",
            grid.width(),
            grid.height(),
            config.seed,
            placement.enemies.len(),
            placement.items.len()
        );

        Ok(Self {
            grid,
            player,
            enemies: placement.enemies,
            items: placement.items,
            completion_state: GameCompletionState::Playing,
            turn_number: 0,
            rng,
        })
    }

    /// Builds a session from a hand-made layout.
    ///
    /// Any player or enemy markers already in the grid are cleared and rewritten from
    /// the records. Every entity and item must sit on its own in-bounds, non-wall cell.
    pub fn from_parts(
        mut grid: Grid,
        player: Player,
        enemies: Vec<Enemy>,
        items: Vec<Item>,
        seed: u64,
    ) -> GridcrawlResult<Self> {
        let mut occupied = HashSet::new();
        let positions = std::iter::once(player.position)
            .chain(enemies.iter().map(|enemy| enemy.position))
            .chain(items.iter().map(|item| item.position));

        for pos in positions {
            match grid.get(pos) {
                None => {
                    return Err(GridcrawlError::InvalidPosition {
                        x: pos.x,
                        y: pos.y,
                        reason: "outside the grid".to_string(),
                    })
                }
                Some(Tile::Wall) => {
                    return Err(GridcrawlError::InvalidPosition {
                        x: pos.x,
                        y: pos.y,
                        reason: "inside a wall".to_string(),
                    })
                }
                Some(_) => {}
            }
            if !occupied.insert(pos) {
                return Err(GridcrawlError::InvalidPosition {
                    x: pos.x,
                    y: pos.y,
                    reason: "shared by two entities".to_string(),
                });
            }
        }

        let stale: Vec<Position> = grid
            .positions()
            .filter(|&pos| grid.is(pos, Tile::Player) || grid.is(pos, Tile::Enemy))
            .collect();
        for pos in stale {
            grid.set(pos, Tile::Floor)?;
        }
        grid.set(player.position, Tile::Player)?;
        for enemy in &enemies {
            grid.set(enemy.position, Tile::Enemy)?;
        }

        let mut state = Self {
            grid,
            player,
            enemies,
            items,
            completion_state: GameCompletionState::Playing,
            turn_number: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        state.completion_state = state.evaluate_completion();
        Ok(state)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn completion_state(&self) -> GameCompletionState {
        self.completion_state
    }

    pub fn turn_number(&self) -> u64 {
        self.turn_number
    }

    /// Checks whether the game has reached victory or defeat.
    pub fn is_over(&self) -> bool {
        self.completion_state.is_terminal()
    }

    /// Finds the item lying on a cell, if any.
    pub fn item_at(&self, pos: Position) -> Option<&Item> {
        self.items.iter().find(|item| item.position == pos)
    }

    /// Gets the summary numbers shown in the info panel.
    pub fn game_info(&self) -> GameInfo {
        let count = |kind: ItemKind| self.items.iter().filter(|item| item.kind == kind).count();
        GameInfo {
            health: self.player.health,
            max_health: self.player.max_health,
            attack_power: self.player.attack_power,
            enemy_count: self.enemies.len(),
            potion_count: count(ItemKind::HealthPotion),
            sword_count: count(ItemKind::Sword),
        }
    }

    /// Dispatches a player input. Inputs that are not game actions change nothing.
    pub fn handle_input(&mut self, input: PlayerInput) -> GridcrawlResult<TurnResult> {
        match input {
            PlayerInput::Move(direction) => self.handle_directional_input(direction),
            PlayerInput::Attack => self.handle_attack_input(),
            PlayerInput::Quit | PlayerInput::Help => Ok(self.unchanged()),
        }
    }

    /// Moves the player one step, then lets every enemy act.
    ///
    /// Moving into a wall, an enemy or off the map is ignored entirely: no enemy
    /// acts and the turn counter does not advance.
    pub fn handle_directional_input(
        &mut self,
        direction: Direction,
    ) -> GridcrawlResult<TurnResult> {
        if self.is_over() {
            return Ok(self.unchanged());
        }

        let from = self.player.position;
        let to = from + direction.to_delta();
        if !self.can_player_move_to(to) {
            debug!("Move {:?} from {} is blocked", direction, from);
            return Ok(self.unchanged());
        }

        let mut events = Vec::new();
        if let Some(item) = self.take_item_at(to) {
            self.apply_item(item.kind);
            events.push(GameEvent::ItemPickedUp {
                kind: item.kind,
                position: to,
            });
        }

        self.move_player(to)?;
        events.push(GameEvent::PlayerMoved { from, to });

        self.run_enemy_turns(&mut events)?;
        Ok(self.finish_turn(events))
    }

    /// Strikes every enemy in the 8 surrounding cells. Enemies do not respond.
    pub fn handle_attack_input(&mut self) -> GridcrawlResult<TurnResult> {
        if self.is_over() {
            return Ok(self.unchanged());
        }

        let mut events = Vec::new();
        let damage = self.player.attack_power;

        for target in self.player.position.adjacent_positions() {
            let Some(index) = self.enemy_index_at(target) else {
                continue;
            };

            let enemy = &mut self.enemies[index];
            enemy.take_damage(damage);
            events.push(GameEvent::PlayerAttacked {
                target,
                damage,
                remaining_health: enemy.health,
            });
            debug!("Player hits enemy at {} for {}", target, damage);

            if !enemy.is_alive() {
                self.remove_enemy(index)?;
                events.push(GameEvent::EnemyDefeated { position: target });
                info!("Enemy at {} defeated, {} left", target, self.enemies.len());
            }
        }

        if events.is_empty() {
            events.push(GameEvent::AttackMissed);
        }

        Ok(self.finish_turn(events))
    }

    /// Index of the first enemy, in list order, standing on a cell.
    fn enemy_index_at(&self, pos: Position) -> Option<usize> {
        self.enemies.iter().position(|enemy| enemy.position == pos)
    }

    /// The player may enter any in-bounds cell that is neither wall nor enemy.
    fn can_player_move_to(&self, pos: Position) -> bool {
        matches!(self.grid.get(pos), Some(Tile::Floor) | Some(Tile::Player))
    }

    fn apply_item(&mut self, kind: ItemKind) {
        match kind {
            ItemKind::HealthPotion => {
                let healed = self.player.heal(config::POTION_HEAL_AMOUNT);
                debug!("Potion heals {}, health {}", healed, self.player.health);
            }
            ItemKind::Sword => {
                self.player.attack_power += config::SWORD_ATTACK_BONUS;
                debug!("Sword raises attack to {}", self.player.attack_power);
            }
        }
    }

    /// Lets each enemy act once, in list order.
    fn run_enemy_turns(&mut self, events: &mut Vec<GameEvent>) -> GridcrawlResult<()> {
        for index in 0..self.enemies.len() {
            let enemy = self.enemies[index].position;
            let player = self.player.position;

            let step = match EnemyIntent::decide(enemy, player) {
                EnemyIntent::Attack => {
                    self.player.take_damage(config::ENEMY_ATTACK_DAMAGE);
                    debug!(
                        "Enemy at {} hits player, health {}",
                        enemy, self.player.health
                    );
                    events.push(GameEvent::EnemyAttacked {
                        enemy,
                        damage: config::ENEMY_ATTACK_DAMAGE,
                        player_health: self.player.health,
                    });
                    None
                }
                EnemyIntent::Pursue => match ai::pursuit_step(&self.grid, enemy, player) {
                    Some(next) => Some(next),
                    None => ai::random_step(&self.grid, enemy, &mut self.rng),
                },
                EnemyIntent::Idle => {
                    if self.rng.gen_bool(config::ENEMY_WANDER_CHANCE) {
                        ai::random_step(&self.grid, enemy, &mut self.rng)
                    } else {
                        None
                    }
                }
            };

            if let Some(to) = step {
                self.move_enemy(index, to)?;
                events.push(GameEvent::EnemyMoved { from: enemy, to });
            }
        }
        Ok(())
    }

    fn evaluate_completion(&self) -> GameCompletionState {
        if self.player.health <= 0 {
            GameCompletionState::Defeat
        } else if self.enemies.is_empty() {
            GameCompletionState::Victory
        } else {
            GameCompletionState::Playing
        }
    }

    /// Closes a turn that did something: bumps the counter and checks for an ending.
    fn finish_turn(&mut self, mut events: Vec<GameEvent>) -> TurnResult {
        self.turn_number += 1;
        self.completion_state = self.evaluate_completion();
        let ending = match self.completion_state {
            GameCompletionState::Victory => Some(GameEvent::Victory),
            GameCompletionState::Defeat => Some(GameEvent::Defeat),
            GameCompletionState::Playing => None,
        };
        if let Some(event) = ending {
            info!(
                "Game over after {} turns: {:?}",
                self.turn_number, self.completion_state
            );
            events.push(event);
        }

        TurnResult {
            completion: self.completion_state,
            events,
            turn_number: self.turn_number,
        }
    }

    fn unchanged(&self) -> TurnResult {
        TurnResult {
            completion: self.completion_state,
            events: Vec::new(),
            turn_number: self.turn_number,
        }
    }

    fn move_player(&mut self, to: Position) -> GridcrawlResult<()> {
        self.grid.set(self.player.position, Tile::Floor)?;
        self.grid.set(to, Tile::Player)?;
        self.player.position = to;
        Ok(())
    }

    fn move_enemy(&mut self, index: usize, to: Position) -> GridcrawlResult<()> {
        let from = self.enemies[index].position;
        self.grid.set(from, Tile::Floor)?;
        self.grid.set(to, Tile::Enemy)?;
        self.enemies[index].position = to;
        Ok(())
    }

    fn remove_enemy(&mut self, index: usize) -> GridcrawlResult<Enemy> {
        let enemy = self.enemies.remove(index);
        self.grid.set(enemy.position, Tile::Floor)?;
        Ok(enemy)
    }

    fn take_item_at(&mut self, pos: Position) -> Option<Item> {
        let index = self.items.iter().position(|item| item.position == pos)?;
        Some(self.items.remove(index))
    }
}
