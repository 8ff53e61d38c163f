//! # Connectivity
//!
//! Flood-fill reachability checks over floor tiles and the repair pass that joins
//! isolated regions onto the largest one with L-shaped corridors.

use crate::game::{Grid, Position, Tile};
use crate::GridcrawlResult;
use ::pathfinding::prelude::bfs_reach;
use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom};

/// A maximal 4-connected region of floor tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    /// Cells in flood-fill order, starting from the seed cell
    pub cells: Vec<Position>,
}

impl Area {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }
}

/// Floor cells reachable in one orthogonal step.
fn floor_neighbours(grid: &Grid, pos: Position) -> impl Iterator<Item = Position> + '_ {
    pos.cardinal_adjacent_positions()
        .into_iter()
        .filter(move |&neighbour| grid.is(neighbour, Tile::Floor))
}

/// Checks whether every floor tile can reach every other one.
///
/// The flood fill starts at the first floor tile in row-major order. A grid with no
/// floor at all is reported as not connected.
///
/// # Examples
///
/// ```
/// use gridcrawl::{is_connected, Grid};
///
/// assert!(is_connected(&Grid::from_rows(&["...", "#.#"]).unwrap()));
/// assert!(!is_connected(&Grid::from_rows(&[".#."]).unwrap()));
/// ```
pub fn is_connected(grid: &Grid) -> bool {
    let Some(start) = grid.positions().find(|&pos| grid.is(pos, Tile::Floor)) else {
        return false;
    };

    let reachable = bfs_reach(start, |&pos| floor_neighbours(grid, pos)).count();
    reachable == grid.count(Tile::Floor)
}

/// Partitions all floor tiles into maximal 4-connected areas.
///
/// Areas are discovered in row-major order of their first cell.
pub fn find_isolated_areas(grid: &Grid) -> Vec<Area> {
    let width = grid.width() as usize;
    let mut visited = vec![false; width * grid.height() as usize];
    let mut areas = Vec::new();

    for pos in grid.positions() {
        let index = pos.y as usize * width + pos.x as usize;
        if visited[index] || !grid.is(pos, Tile::Floor) {
            continue;
        }

        let cells: Vec<Position> = bfs_reach(pos, |&cell| floor_neighbours(grid, cell)).collect();
        for cell in &cells {
            visited[cell.y as usize * width + cell.x as usize] = true;
        }
        areas.push(Area { cells });
    }

    areas
}

/// Joins every isolated floor area onto the largest one.
///
/// For each smaller area a random cell is linked to a random cell of the largest area
/// with [`carve_straight_corridor`]. This is a single pass; since each connector ends
/// on a cell of the main area, every area ends up attached to it.
///
/// Returns the number of connectors carved.
pub fn ensure_connectivity(grid: &mut Grid, rng: &mut StdRng) -> GridcrawlResult<usize> {
    let mut areas = find_isolated_areas(grid);
    if areas.len() <= 1 {
        return Ok(0);
    }

    areas.sort_by(|a, b| b.len().cmp(&a.len()));
    let (main_area, isolated) = areas.split_at(1);
    let main_area = &main_area[0];
    debug!(
        "Main area has {} cells, joining {} isolated areas",
        main_area.len(),
        isolated.len()
    );

    let mut connectors = 0;
    for area in isolated {
        let (Some(&from), Some(&to)) = (area.cells.choose(rng), main_area.cells.choose(rng)) else {
            continue;
        };
        debug!("Connecting area of {} cells: {} -> {}", area.len(), from, to);
        carve_straight_corridor(grid, from, to)?;
        connectors += 1;
    }

    Ok(connectors)
}

/// Carves an L-shaped corridor: along `from`'s row to `to.x`, then along `to`'s column.
///
/// Every cell on the way becomes floor, whatever it held before.
pub fn carve_straight_corridor(grid: &mut Grid, from: Position, to: Position) -> GridcrawlResult<()> {
    for x in from.x.min(to.x)..=from.x.max(to.x) {
        grid.set(Position::new(x, from.y), Tile::Floor)?;
    }
    for y in from.y.min(to.y)..=from.y.max(to.y) {
        grid.set(Position::new(to.x, y), Tile::Floor)?;
    }
    Ok(())
}
