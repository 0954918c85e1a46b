//! Adapter to the flat map layout older call sites consume.
//!
//! The projection is structural only: tile codes, room rectangles, and
//! an empty visited set the session layer fills in. Room types,
//! features, and corridors do not survive it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::generation::DungeonMap;
use super::geometry::Point;

/// A room as the old layout knows it: a bare rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyRoom {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// The flat map layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyMap {
    pub width: u32,
    pub height: u32,
    /// Row-major tile codes, `Tile` discriminants.
    pub tiles: Vec<u8>,
    pub rooms: Vec<LegacyRoom>,
    /// Per-player state, always empty here. Owned by the session layer.
    pub visited: BTreeSet<u32>,
}

/// Project a finished map down to the flat layout.
pub fn to_legacy(map: &DungeonMap) -> LegacyMap {
    let mut tiles = Vec::with_capacity((map.width * map.height) as usize);
    for y in 0..map.height as i32 {
        for x in 0..map.width as i32 {
            let tile = map.grid.get(Point::new(x, y)).unwrap_or_default();
            tiles.push(tile as u8);
        }
    }

    let rooms = map
        .rooms
        .iter()
        .map(|r| LegacyRoom {
            x: r.rect.x,
            y: r.rect.y,
            width: r.rect.width,
            height: r.rect.height,
        })
        .collect();

    LegacyMap {
        width: map.width,
        height: map.height,
        tiles,
        rooms,
        visited: BTreeSet::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;
    use crate::dungeon::generation::generate;
    use crate::dungeon::tile::Tile;

    #[test]
    fn test_projection_shape() {
        let map = generate(Difficulty::Normal, 2, 42);
        let legacy = to_legacy(&map);
        assert_eq!(legacy.width, map.width);
        assert_eq!(legacy.height, map.height);
        assert_eq!(legacy.tiles.len(), (map.width * map.height) as usize);
        assert_eq!(legacy.rooms.len(), map.rooms.len());
        assert!(legacy.visited.is_empty());
    }

    #[test]
    fn test_tile_codes_match_grid() {
        let map = generate(Difficulty::Hard, 3, 9);
        let legacy = to_legacy(&map);
        let entrance_idx = map.entrance.y as usize * map.width as usize + map.entrance.x as usize;
        assert_eq!(legacy.tiles[entrance_idx], Tile::Entrance as u8);
        let exit_idx = map.exit.y as usize * map.width as usize + map.exit.x as usize;
        assert_eq!(legacy.tiles[exit_idx], Tile::Exit as u8);
    }

    #[test]
    fn test_room_rects_survive() {
        let map = generate(Difficulty::Easy, 1, 4);
        let legacy = to_legacy(&map);
        for (room, flat) in map.rooms.iter().zip(&legacy.rooms) {
            assert_eq!(flat.x, room.rect.x);
            assert_eq!(flat.y, room.rect.y);
            assert_eq!(flat.width, room.rect.width);
            assert_eq!(flat.height, room.rect.height);
        }
    }
}
