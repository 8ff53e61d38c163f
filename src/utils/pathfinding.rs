//! # Pathfinding Algorithms
//!
//! Breadth-first shortest paths over the 4-connected grid, used by enemy pursuit.

use crate::{Grid, Position, Tile};
use std::collections::VecDeque;

/// Per-cell BFS depth from the search origin. `-1` marks unvisited cells.
struct DistanceMap<'a> {
    grid: &'a Grid,
    depths: Vec<i32>,
}

impl<'a> DistanceMap<'a> {
    const UNVISITED: i32 = -1;

    fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            depths: vec![Self::UNVISITED; grid.width() as usize * grid.height() as usize],
        }
    }

    /// Depth of a cell; out-of-bounds cells read as unvisited.
    fn get(&self, pos: Position) -> i32 {
        self.grid
            .index(pos)
            .map(|index| self.depths[index])
            .unwrap_or(Self::UNVISITED)
    }

    fn set(&mut self, pos: Position, depth: i32) {
        if let Some(index) = self.grid.index(pos) {
            self.depths[index] = depth;
        }
    }

    fn is_unvisited(&self, pos: Position) -> bool {
        self.grid
            .index(pos)
            .map(|index| self.depths[index] == Self::UNVISITED)
            .unwrap_or(false)
    }
}

/// Cells the search may step onto. The player's cell is open so it can be the goal.
fn is_traversable(grid: &Grid, pos: Position) -> bool {
    matches!(grid.get(pos), Some(Tile::Floor) | Some(Tile::Player))
}

/// Finds a shortest 4-directional path from `start` to `target`.
///
/// Walls and enemy-occupied cells block the search. The returned path contains both
/// endpoints, so a path to the starting cell is just `[start]`. Returns `None` when the
/// target is a wall, either endpoint is off the grid, or no route exists.
///
/// Among equally short paths the one found by walking back from the target, always
/// preferring up, down, left, then right, is returned.
///
/// # Examples
///
/// ```
/// use gridcrawl::{find_path, Grid, Position};
///
/// let grid = Grid::from_rows(&["...", "...", "..."]).unwrap();
/// let path = find_path(&grid, Position::new(0, 0), Position::new(2, 2)).unwrap();
/// assert_eq!(path.len(), 5);
/// assert_eq!(path.first(), Some(&Position::new(0, 0)));
/// assert_eq!(path.last(), Some(&Position::new(2, 2)));
/// ```
pub fn find_path(grid: &Grid, start: Position, target: Position) -> Option<Vec<Position>> {
    match grid.get(target) {
        None | Some(Tile::Wall) => return None,
        Some(_) => {}
    }
    if !grid.in_bounds(start) {
        return None;
    }

    let mut distances = DistanceMap::new(grid);
    let mut queue = VecDeque::new();
    distances.set(start, 0);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == target {
            return build_path(&distances, start, target);
        }

        let next_depth = distances.get(current) + 1;
        for neighbor in current.cardinal_adjacent_positions() {
            if distances.is_unvisited(neighbor) && is_traversable(grid, neighbor) {
                distances.set(neighbor, next_depth);
                queue.push_back(neighbor);
            }
        }
    }

    None
}

/// Walks from the target back to the start along strictly decreasing depths.
fn build_path(distances: &DistanceMap<'_>, start: Position, target: Position) -> Option<Vec<Position>> {
    let mut path = vec![target];
    let mut current = target;

    while current != start {
        let wanted = distances.get(current) - 1;
        let previous = current
            .cardinal_adjacent_positions()
            .into_iter()
            .find(|&neighbor| {
                let depth = distances.get(neighbor);
                depth >= 0 && depth == wanted
            })?;
        path.push(previous);
        current = previous;
    }

    path.reverse();
    Some(path)
}
