//! End-to-end turn scenarios on hand-built maps.

use gridcrawl::{
    Direction, Enemy, GameCompletionState, GameEvent, GameState, Grid, GridcrawlResult, Item,
    ItemKind, Player, PlayerInput, Position, Tile,
};

fn open_floor(width: u32, height: u32) -> Grid {
    Grid::filled(width, height, Tile::Floor)
}

fn weakened_enemy(position: Position, health: i32) -> Enemy {
    let mut enemy = Enemy::new(position);
    enemy.health = health;
    enemy
}

#[test]
fn test_potion_heal_caps_at_max() -> GridcrawlResult<()> {
    let mut player = Player::new(Position::new(1, 1));
    player.health = 90;
    let mut game = GameState::from_parts(
        open_floor(20, 3),
        player,
        vec![Enemy::new(Position::new(19, 2))],
        vec![Item::new(Position::new(2, 1), ItemKind::HealthPotion)],
        1,
    )?;

    let result = game.handle_directional_input(Direction::Right)?;

    assert_eq!(game.player().health, 100);
    assert!(game.items().is_empty());
    assert_eq!(game.player().position, Position::new(2, 1));
    assert!(result.events.contains(&GameEvent::ItemPickedUp {
        kind: ItemKind::HealthPotion,
        position: Position::new(2, 1),
    }));
    Ok(())
}

#[test]
fn test_attack_defeats_enemy_and_frees_its_cell() -> GridcrawlResult<()> {
    let mut game = GameState::from_parts(
        open_floor(6, 6),
        Player::new(Position::new(2, 2)),
        vec![
            weakened_enemy(Position::new(2, 1), 8),
            Enemy::new(Position::new(5, 5)),
        ],
        vec![],
        2,
    )?;

    let result = game.handle_attack_input()?;

    assert_eq!(game.enemies().len(), 1);
    assert_eq!(game.grid().get(Position::new(2, 1)), Some(Tile::Floor));
    assert_eq!(result.completion, GameCompletionState::Playing);
    assert_eq!(
        result.events,
        vec![
            GameEvent::PlayerAttacked {
                target: Position::new(2, 1),
                damage: 10,
                remaining_health: -2,
            },
            GameEvent::EnemyDefeated {
                position: Position::new(2, 1)
            },
        ]
    );
    Ok(())
}

#[test]
fn test_killing_last_enemy_is_victory() -> GridcrawlResult<()> {
    let mut game = GameState::from_parts(
        open_floor(4, 4),
        Player::new(Position::new(1, 1)),
        vec![weakened_enemy(Position::new(2, 2), 10)],
        vec![],
        3,
    )?;

    let result = game.handle_input(PlayerInput::Attack)?;

    assert_eq!(result.completion, GameCompletionState::Victory);
    assert!(game.enemies().is_empty());

    // Nothing moves once the game is won.
    let after = game.handle_input(PlayerInput::Move(Direction::Right))?;
    assert!(after.events.is_empty());
    assert_eq!(game.player().position, Position::new(1, 1));
    Ok(())
}

#[test]
fn test_defeat_freezes_the_session() -> GridcrawlResult<()> {
    let mut player = Player::new(Position::new(0, 0));
    player.health = 10;
    let mut game = GameState::from_parts(
        open_floor(5, 5),
        player,
        vec![Enemy::new(Position::new(1, 2)), Enemy::new(Position::new(0, 2))],
        vec![],
        4,
    )?;

    // Stepping down puts both enemies in reach; 5 + 5 damage finishes the player.
    let result = game.handle_directional_input(Direction::Down)?;
    assert_eq!(result.completion, GameCompletionState::Defeat);
    assert_eq!(game.player().health, 0);
    assert_eq!(
        result.events.last(),
        Some(&GameEvent::Defeat)
    );

    let enemies_before = game.enemies().to_vec();
    for input in [
        PlayerInput::Move(Direction::Right),
        PlayerInput::Attack,
        PlayerInput::Move(Direction::Up),
    ] {
        let result = game.handle_input(input)?;
        assert_eq!(result.completion, GameCompletionState::Defeat);
        assert!(result.events.is_empty());
    }
    assert_eq!(game.enemies(), enemies_before.as_slice());
    assert_eq!(game.player().position, Position::new(0, 1));
    Ok(())
}

#[test]
fn test_pursuit_in_open_room() -> GridcrawlResult<()> {
    let mut game = GameState::from_parts(
        open_floor(5, 5),
        Player::new(Position::new(4, 4)),
        vec![Enemy::new(Position::new(0, 0))],
        vec![],
        5,
    )?;

    // Bump into the map edge first: nothing happens at all.
    let blocked = game.handle_directional_input(Direction::Down)?;
    assert!(blocked.events.is_empty());
    assert_eq!(game.enemies()[0].position, Position::new(0, 0));

    // Step left, then back right, so the player ends at (4, 4) again.
    game.handle_directional_input(Direction::Left)?;
    game.handle_directional_input(Direction::Right)?;

    let player = game.player().position;
    let enemy = game.enemies()[0].position;
    assert_eq!(player, Position::new(4, 4));
    assert_eq!(enemy.manhattan_distance(Position::new(0, 0)), 2);
    assert!(enemy.manhattan_distance(player) < 8);
    assert!(enemy.euclidean_distance(player) < Position::new(0, 0).euclidean_distance(player));
    assert_eq!(game.grid().count(Tile::Enemy), 1);
    assert_eq!(game.turn_number(), 2);
    Ok(())
}

#[test]
fn test_walls_block_the_player() -> GridcrawlResult<()> {
    let grid = Grid::from_rows(&["#####", "#...#", "#####"])?;
    let mut game = GameState::from_parts(
        grid,
        Player::new(Position::new(1, 1)),
        vec![Enemy::new(Position::new(3, 1))],
        vec![],
        6,
    )?;

    for direction in [Direction::Up, Direction::Down, Direction::Left] {
        let result = game.handle_directional_input(direction)?;
        assert!(result.events.is_empty());
    }
    assert_eq!(game.player().position, Position::new(1, 1));
    assert_eq!(game.player().health, 100);
    assert_eq!(game.turn_number(), 0);
    Ok(())
}

#[test]
fn test_cut_off_pursuer_still_steps() -> GridcrawlResult<()> {
    // The pursuer at (0,0) is within range, but its only way out is the cell held by
    // the second enemy, so no route to the player exists.
    let grid = Grid::from_rows(&[".....", ".#...", "##..."])?;
    let mut game = GameState::from_parts(
        grid,
        Player::new(Position::new(4, 2)),
        vec![Enemy::new(Position::new(0, 0)), Enemy::new(Position::new(1, 0))],
        vec![],
        7,
    )?;

    let result = game.handle_directional_input(Direction::Left)?;

    assert_eq!(game.player().position, Position::new(3, 2));
    assert_eq!(game.enemies()[0].position, Position::new(0, 1));
    assert!(result.events.contains(&GameEvent::EnemyMoved {
        from: Position::new(0, 0),
        to: Position::new(0, 1),
    }));
    assert_eq!(game.grid().get(Position::new(0, 0)), Some(Tile::Floor));
    assert_eq!(game.grid().get(Position::new(0, 1)), Some(Tile::Enemy));
    assert_eq!(game.grid().count(Tile::Enemy), 2);
    for enemy in game.enemies() {
        assert_eq!(game.grid().get(enemy.position), Some(Tile::Enemy));
    }
    Ok(())
}

#[test]
fn test_distant_enemy_sometimes_wanders() -> GridcrawlResult<()> {
    let start = Position::new(20, 20);
    let mut moved = 0;
    let mut stayed = 0;

    for seed in 0..200 {
        let mut game = GameState::from_parts(
            open_floor(25, 25),
            Player::new(Position::new(0, 0)),
            vec![Enemy::new(start)],
            vec![],
            seed,
        )?;

        game.handle_directional_input(Direction::Right)?;

        let enemy = game.enemies()[0].position;
        assert!(enemy.euclidean_distance(game.player().position) > 10.0);
        match enemy.manhattan_distance(start) {
            0 => stayed += 1,
            1 => {
                moved += 1;
                assert_eq!(game.grid().get(start), Some(Tile::Floor));
            }
            steps => panic!("seed {} moved the enemy {} cells", seed, steps),
        }
        assert_eq!(game.grid().get(enemy), Some(Tile::Enemy));
        assert_eq!(game.grid().count(Tile::Enemy), 1);
    }

    assert!(moved > 0, "no seed let the enemy wander");
    assert!(stayed > 0, "every seed moved the enemy");
    Ok(())
}
