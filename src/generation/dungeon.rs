//! # Dungeon Generation
//!
//! Procedural dungeon layout generation using a rooms-then-corridors algorithm.
//!
//! Rooms are scattered with a one-cell gap between them, then a few corridors are
//! cut straight across the whole map in each axis. The corridors usually link most
//! rooms together, and the connectivity pass fixes whatever they miss.

use crate::game::{Grid, Position, Tile};
use crate::generation::{connectivity, validate_grid, GenerationConfig, Generator, Room};
use crate::GridcrawlResult;
use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng};

/// A freshly carved layout together with the artifacts used to build it.
#[derive(Debug, Clone)]
pub struct Layout {
    /// The carved grid
    pub grid: Grid,
    /// Rooms that were successfully placed
    pub rooms: Vec<Room>,
    /// How many rooms were attempted
    pub requested_rooms: u32,
    /// Rows cut by horizontal corridors, in carving order (may repeat)
    pub corridor_rows: Vec<i32>,
    /// Columns cut by vertical corridors, in carving order (may repeat)
    pub corridor_columns: Vec<i32>,
}

/// Primary dungeon generator using the room-and-corridor algorithm.
///
/// This generator creates dungeons by:
/// 1. Placing rooms randomly, rejecting any that would touch an earlier room
/// 2. Cutting full-width and full-height corridors
/// 3. Optionally repairing connectivity so every floor tile is reachable
#[derive(Debug, Clone)]
pub struct RoomCorridorGenerator {
    /// Maximum attempts to place a room before giving up on it
    pub max_placement_attempts: u32,
    /// Maximum draws when looking for an unused corridor row or column
    pub max_corridor_attempts: u32,
    /// Whether `generate` should stitch isolated regions together
    pub ensure_connectivity: bool,
}

impl RoomCorridorGenerator {
    /// Creates a new dungeon generator with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcrawl::RoomCorridorGenerator;
    ///
    /// let generator = RoomCorridorGenerator::new();
    /// assert_eq!(generator.max_placement_attempts, 100);
    /// ```
    pub fn new() -> Self {
        Self {
            max_placement_attempts: 100,
            max_corridor_attempts: 20,
            ensure_connectivity: true,
        }
    }

    /// Carves rooms and corridors without any connectivity repair.
    pub fn generate_layout(
        &self,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> GridcrawlResult<Layout> {
        config.validate()?;

        let mut grid = Grid::new(config.width, config.height);

        let requested_rooms = rng.gen_range(config.min_rooms..=config.max_rooms);
        let rooms = self.place_rooms(&mut grid, config, requested_rooms, rng)?;
        if rooms.len() < requested_rooms as usize {
            warn!(
                "Placed {} of {} requested rooms",
                rooms.len(),
                requested_rooms
            );
        }

        let corridor_rows = self.carve_horizontal_corridors(&mut grid, config, rng)?;
        let corridor_columns = self.carve_vertical_corridors(&mut grid, config, rng)?;

        info!(
            "Carved {}x{} layout: {} rooms, {} horizontal and {} vertical corridors",
            config.width,
            config.height,
            rooms.len(),
            corridor_rows.len(),
            corridor_columns.len()
        );

        Ok(Layout {
            grid,
            rooms,
            requested_rooms,
            corridor_rows,
            corridor_columns,
        })
    }

    /// Places up to `room_count` rooms, carving each one as it is accepted.
    fn place_rooms(
        &self,
        grid: &mut Grid,
        config: &GenerationConfig,
        room_count: u32,
        rng: &mut StdRng,
    ) -> GridcrawlResult<Vec<Room>> {
        let mut rooms = Vec::new();

        for room_index in 0..room_count {
            match self.try_place_room(grid, config, rng) {
                Some(room) => {
                    debug!(
                        "Room {} placed at {} size {}x{}",
                        room_index, room.top_left, room.width, room.height
                    );
                    self.carve_room(grid, &room)?;
                    rooms.push(room);
                }
                None => {
                    debug!(
                        "Room {} not placed after {} attempts",
                        room_index, self.max_placement_attempts
                    );
                }
            }
        }

        Ok(rooms)
    }

    /// Attempts to find a spot for a single room.
    fn try_place_room(
        &self,
        grid: &Grid,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> Option<Room> {
        for _ in 0..self.max_placement_attempts {
            let width = rng.gen_range(config.min_room_size..=config.max_room_size);
            let height = rng.gen_range(config.min_room_size..=config.max_room_size);

            // The room and its one-cell border must fit inside the map.
            if width + 2 > grid.width() || height + 2 > grid.height() {
                continue;
            }

            let x = rng.gen_range(1..=(grid.width() - width - 1) as i32);
            let y = rng.gen_range(1..=(grid.height() - height - 1) as i32);
            let room = Room::new(Position::new(x, y), width, height);

            if self.has_clear_margin(grid, &room) {
                return Some(room);
            }
        }

        None
    }

    /// Checks that no floor exists in the room footprint or the ring around it.
    fn has_clear_margin(&self, grid: &Grid, room: &Room) -> bool {
        room.expanded(1)
            .positions()
            .into_iter()
            .all(|pos| !grid.is(pos, Tile::Floor))
    }

    /// Carves out a room in the grid by setting tiles to floor.
    fn carve_room(&self, grid: &mut Grid, room: &Room) -> GridcrawlResult<()> {
        for pos in room.positions() {
            grid.set(pos, Tile::Floor)?;
        }
        Ok(())
    }

    fn carve_horizontal_corridors(
        &self,
        grid: &mut Grid,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> GridcrawlResult<Vec<i32>> {
        let count = rng.gen_range(config.min_corridors..=config.max_corridors);
        let mut rows = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let y = self.pick_corridor_line(&rows, grid.height() as i32 - 2, rng);
            rows.push(y);
            for x in 0..grid.width() as i32 {
                grid.set(Position::new(x, y), Tile::Floor)?;
            }
        }

        Ok(rows)
    }

    fn carve_vertical_corridors(
        &self,
        grid: &mut Grid,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> GridcrawlResult<Vec<i32>> {
        let count = rng.gen_range(config.min_corridors..=config.max_corridors);
        let mut columns = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let x = self.pick_corridor_line(&columns, grid.width() as i32 - 2, rng);
            columns.push(x);
            for y in 0..grid.height() as i32 {
                grid.set(Position::new(x, y), Tile::Floor)?;
            }
        }

        Ok(columns)
    }

    /// Draws a line index in `1..=max`, retrying while it repeats an earlier one.
    ///
    /// After `max_corridor_attempts` draws the last value is kept even if it is a
    /// duplicate, so corridors may overlap.
    fn pick_corridor_line(&self, used: &[i32], max: i32, rng: &mut StdRng) -> i32 {
        let mut attempts = 0;
        loop {
            let line = rng.gen_range(1..=max);
            attempts += 1;
            if !used.contains(&line) || attempts >= self.max_corridor_attempts {
                return line;
            }
        }
    }
}

impl Generator<Grid> for RoomCorridorGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> GridcrawlResult<Grid> {
        let mut grid = self.generate_layout(config, rng)?.grid;

        if self.ensure_connectivity && !connectivity::is_connected(&grid) {
            warn!("Generated map is not connected, repairing");
            let connectors = connectivity::ensure_connectivity(&mut grid, rng)?;
            info!("Carved {} connector corridors", connectors);
        }

        self.validate(&grid, config)?;
        Ok(grid)
    }

    fn validate(&self, grid: &Grid, config: &GenerationConfig) -> GridcrawlResult<()> {
        if grid.width() != config.width || grid.height() != config.height {
            return Err(crate::GridcrawlError::GenerationFailed(format!(
                "Grid is {}x{}, expected {}x{}",
                grid.width(),
                grid.height(),
                config.width,
                config.height
            )));
        }
        validate_grid(grid)
    }

    fn generator_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}

impl Default for RoomCorridorGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_corridor_generator_creation() {
        let generator = RoomCorridorGenerator::new();
        assert_eq!(generator.max_placement_attempts, 100);
        assert_eq!(generator.max_corridor_attempts, 20);
        assert!(generator.ensure_connectivity);
    }

    #[test]
    fn test_layout_respects_configured_counts() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig::new(12345);
        let mut rng = config.create_rng();

        let layout = generator.generate_layout(&config, &mut rng).unwrap();
        assert!((5..=10).contains(&layout.requested_rooms));
        assert!(layout.rooms.len() <= layout.requested_rooms as usize);
        assert!((3..=5).contains(&layout.corridor_rows.len()));
        assert!((3..=5).contains(&layout.corridor_columns.len()));
    }

    #[test]
    fn test_rooms_stay_inside_border() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig::new(777);
        let mut rng = config.create_rng();
        let layout = generator.generate_layout(&config, &mut rng).unwrap();

        for room in &layout.rooms {
            assert!(room.top_left.x >= 1 && room.top_left.y >= 1);
            let bottom_right = room.bottom_right();
            assert!(bottom_right.x <= config.width as i32 - 2);
            assert!(bottom_right.y <= config.height as i32 - 2);
            assert!((3..=8).contains(&room.width));
            assert!((3..=8).contains(&room.height));
        }
    }

    #[test]
    fn test_rooms_keep_a_gap() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig::new(4242);
        let mut rng = config.create_rng();
        let layout = generator.generate_layout(&config, &mut rng).unwrap();

        for (i, a) in layout.rooms.iter().enumerate() {
            for b in layout.rooms.iter().skip(i + 1) {
                assert!(!a.expanded(1).overlaps(b), "{:?} touches {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_corridors_span_the_map() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig::new(99);
        let mut rng = config.create_rng();
        let layout = generator.generate_layout(&config, &mut rng).unwrap();

        for &y in &layout.corridor_rows {
            assert!(y >= 1 && y <= config.height as i32 - 2);
            for x in 0..config.width as i32 {
                assert_eq!(layout.grid.get(Position::new(x, y)), Some(Tile::Floor));
            }
        }
        for &x in &layout.corridor_columns {
            assert!(x >= 1 && x <= config.width as i32 - 2);
            for y in 0..config.height as i32 {
                assert_eq!(layout.grid.get(Position::new(x, y)), Some(Tile::Floor));
            }
        }
    }

    #[test]
    fn test_room_with_floor_in_margin_is_rejected() {
        let generator = RoomCorridorGenerator::new();
        let mut grid = Grid::new(12, 12);
        grid.set(Position::new(5, 5), Tile::Floor).unwrap();

        let adjacent = Room::new(Position::new(6, 6), 3, 3);
        let distant = Room::new(Position::new(7, 7), 3, 3);
        assert!(!generator.has_clear_margin(&grid, &adjacent));
        assert!(generator.has_clear_margin(&grid, &distant));
    }

    #[test]
    fn test_map_too_narrow_for_rooms_still_gets_corridors() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig::new(5).with_size(4, 4);
        let mut rng = config.create_rng();

        let layout = generator.generate_layout(&config, &mut rng).unwrap();
        assert!(layout.rooms.is_empty());
        assert!(layout.grid.count(Tile::Floor) > 0);
    }

    #[test]
    fn test_corridor_line_draw_is_bounded() {
        let generator = RoomCorridorGenerator::new();
        let mut rng = GenerationConfig::new(3).create_rng();
        // Only one candidate line exists, so every draw after the first repeats it.
        let used = vec![1];
        assert_eq!(generator.pick_corridor_line(&used, 1, &mut rng), 1);
    }

    #[test]
    fn test_generate_produces_connected_grid() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig::new(2024);
        let mut rng = config.create_rng();

        let grid = generator.generate(&config, &mut rng).unwrap();
        assert!(connectivity::is_connected(&grid));
        assert!(generator.validate(&grid, &config).is_ok());
    }

    #[test]
    fn test_validation() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig::new(12345).with_size(10, 10);

        let mut grid = Grid::new(10, 10);
        grid.set(Position::new(5, 5), Tile::Floor).unwrap();
        assert!(generator.validate(&grid, &config).is_ok());

        let empty = Grid::new(10, 10);
        assert!(generator.validate(&empty, &config).is_err());
        assert_eq!(generator.generator_type(), "RoomCorridorGenerator");
    }
}
