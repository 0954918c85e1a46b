//! The tile grid.
//!
//! Mutable while a map is being generated, frozen inside the returned
//! `DungeonMap`.

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Rect};
use super::tile::Tile;

/// Row-major grid of tile codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create a grid filled with walls.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Wall; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height
    }

    fn index(&self, p: Point) -> usize {
        p.y as usize * self.width as usize + p.x as usize
    }

    /// Tile at `p`, or `None` out of bounds.
    pub fn get(&self, p: Point) -> Option<Tile> {
        if self.in_bounds(p) {
            Some(self.tiles[self.index(p)])
        } else {
            None
        }
    }

    /// Write a tile. Out-of-bounds writes are ignored.
    pub fn set(&mut self, p: Point, tile: Tile) {
        if self.in_bounds(p) {
            let i = self.index(p);
            self.tiles[i] = tile;
        }
    }

    /// Fill every in-bounds cell of `rect` with `tile`.
    pub fn fill_rect(&mut self, rect: Rect, tile: Tile) {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.set(Point::new(x, y), tile);
            }
        }
    }

    /// Check that every cell of `rect` is in bounds and still solid wall.
    pub fn rect_is_solid(&self, rect: Rect) -> bool {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                match self.get(Point::new(x, y)) {
                    Some(Tile::Wall) => {}
                    _ => return false,
                }
            }
        }
        true
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width as usize)
    }
}
