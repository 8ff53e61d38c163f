//! # Grid Model
//!
//! The rectangular tile grid that every other system reads and mutates.

use crate::{GridcrawlError, GridcrawlResult, Position};
use serde::{Deserialize, Serialize};

/// The contents of a single grid cell.
///
/// Items are tracked separately by the game session and never stored here,
/// so picking one up never changes walkability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Floor,
    /// Cell currently occupied by the player
    Player,
    /// Cell currently occupied by an enemy
    Enemy,
}

impl Tile {
    /// Gets the display character for this tile.
    pub fn glyph(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::Player => '@',
            Tile::Enemy => 'E',
        }
    }
}

/// A fixed-size, row-major grid of tiles with the origin at the top-left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a grid filled entirely with walls.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcrawl::{Grid, Position, Tile};
    ///
    /// let grid = Grid::new(10, 5);
    /// assert_eq!(grid.get(Position::new(9, 4)), Some(Tile::Wall));
    /// assert_eq!(grid.get(Position::new(10, 4)), None);
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Tile::Wall)
    }

    /// Creates a grid with every cell set to `tile`.
    pub fn filled(width: u32, height: u32, tile: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile; width as usize * height as usize],
        }
    }

    /// Builds a grid from text rows, `#` for walls and anything else for floor.
    ///
    /// All rows must have the same length. Handy for laying out fixtures by hand.
    pub fn from_rows(rows: &[&str]) -> GridcrawlResult<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0) as u32;
        let mut tiles = Vec::with_capacity(width as usize * height as usize);

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(GridcrawlError::InvalidState(format!(
                    "Row {} has length {}, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            tiles.extend(row.chars().map(|c| if c == '#' { Tile::Wall } else { Tile::Floor }));
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Checks if a position lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Row-major index of an in-bounds position.
    pub(crate) fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// Gets the tile at a position, or None if out of bounds.
    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.index(pos).map(|index| self.tiles[index])
    }

    /// Sets the tile at a position.
    pub fn set(&mut self, pos: Position, tile: Tile) -> GridcrawlResult<()> {
        let index = self.index(pos).ok_or_else(|| GridcrawlError::InvalidPosition {
            x: pos.x,
            y: pos.y,
            reason: format!("outside {}x{} grid", self.width, self.height),
        })?;
        self.tiles[index] = tile;
        Ok(())
    }

    /// Checks whether the tile at `pos` equals `tile`. Out of bounds is never a match.
    pub fn is(&self, pos: Position, tile: Tile) -> bool {
        self.get(pos) == Some(tile)
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }

    /// Collects every floor position in row-major order.
    pub fn floor_positions(&self) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.is(pos, Tile::Floor))
            .collect()
    }

    /// Counts the cells holding `tile`.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&cell| cell == tile).count()
    }
}
