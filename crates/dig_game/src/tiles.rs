//! Tile collision layer: which grid cells block movement.
//!
//! One world unit is one tile, so cell `(x, y)` covers the square
//! `[x, x + 1) × [y, y + 1)`. Gameplay reads solidity through the
//! [`TileSource`] trait; the physics step is the only writer, and it only ever
//! clears cells (blocks hit from below break).

use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCell {
    pub x: i32,
    pub y: i32,
}

impl TileCell {
    pub const SIZE: f32 = 1.0;

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn left(self) -> f32 {
        self.x as f32
    }

    pub fn bottom(self) -> f32 {
        self.y as f32
    }

    pub fn top(self) -> f32 {
        self.y as f32 + Self::SIZE
    }
}

/// A 2D grid of solid / empty cells addressed by integer tile coordinates.
pub trait TileSource {
    /// Out-of-range cells are never solid.
    fn is_solid(&self, x: i32, y: i32) -> bool;

    /// Out-of-range writes are ignored.
    fn set_solid(&mut self, x: i32, y: i32, solid: bool);

    /// Solid cells in the inclusive region `[x0, x1] × [y0, y1]`, row by row.
    fn tiles_in(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<TileCell> {
        let mut tiles = Vec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                if self.is_solid(x, y) {
                    tiles.push(TileCell::new(x, y));
                }
            }
        }
        tiles
    }

    /// Clear one cell. Returns false if it was already empty.
    fn destroy_tile(&mut self, x: i32, y: i32) -> bool {
        if !self.is_solid(x, y) {
            return false;
        }
        self.set_solid(x, y, false);
        true
    }
}

#[derive(Debug, Clone)]
pub struct TileGrid {
    pub width: i32,
    pub height: i32,
    solids: HashSet<TileCell>,
}

impl TileGrid {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            solids: HashSet::new(),
        }
    }

    pub fn with_solids(
        width: i32,
        height: i32,
        solids: impl IntoIterator<Item = TileCell>,
    ) -> Self {
        let mut grid = Self::new(width, height);
        for cell in solids {
            grid.set_solid(cell.x, cell.y, true);
        }
        grid
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }
}

impl TileSource for TileGrid {
    fn is_solid(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.solids.contains(&TileCell::new(x, y))
    }

    fn set_solid(&mut self, x: i32, y: i32, solid: bool) {
        if !self.in_bounds(x, y) {
            return;
        }
        let cell = TileCell::new(x, y);
        if solid {
            self.solids.insert(cell);
        } else {
            self.solids.remove(&cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> TileGrid {
        TileGrid::with_solids(
            8,
            8,
            [
                TileCell::new(1, 1),
                TileCell::new(2, 1),
                TileCell::new(2, 2),
                TileCell::new(5, 0),
            ],
        )
    }

    #[test]
    fn tiles_in_returns_only_solid_cells() {
        let grid = sample_grid();
        let tiles = grid.tiles_in(0, 0, 3, 3);
        assert_eq!(
            tiles,
            vec![
                TileCell::new(1, 1),
                TileCell::new(2, 1),
                TileCell::new(2, 2)
            ]
        );
    }

    #[test]
    fn tiles_in_handles_single_column_sweep() {
        let grid = sample_grid();
        assert_eq!(
            grid.tiles_in(2, 0, 2, 7),
            vec![TileCell::new(2, 1), TileCell::new(2, 2)]
        );
    }

    #[test]
    fn out_of_range_region_is_empty() {
        let grid = sample_grid();
        assert!(grid.tiles_in(-5, -5, -1, -1).is_empty());
        assert!(grid.tiles_in(8, 8, 12, 12).is_empty());
        assert!(!grid.is_solid(-1, 1));
    }

    #[test]
    fn inverted_region_is_empty() {
        let grid = sample_grid();
        assert!(grid.tiles_in(3, 3, 0, 0).is_empty());
    }

    #[test]
    fn destroy_tile_is_idempotent() {
        let mut grid = sample_grid();
        assert!(grid.destroy_tile(2, 2));
        assert!(!grid.is_solid(2, 2));
        assert!(!grid.destroy_tile(2, 2));
        assert!(!grid.destroy_tile(0, 0));
        assert_eq!(grid.solid_count(), 3);
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut grid = sample_grid();
        grid.set_solid(100, 100, true);
        assert!(!grid.is_solid(100, 100));
        assert_eq!(grid.solid_count(), 4);
    }
}
