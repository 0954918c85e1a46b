//! Tile codes stored per grid cell.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Terrain/content code for a single grid cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Wall = 0,
    Floor = 1,
    Exit = 2,
    Door = 3,
    Corridor = 4,
    Trap = 5,
    Treasure = 6,
    Pillar = 7,
    Water = 8,
    Lava = 9,
    Entrance = 10,
}

impl Tile {
    /// Check if a creature can stand here.
    pub const fn is_walkable(&self) -> bool {
        matches!(
            self,
            Tile::Floor
                | Tile::Exit
                | Tile::Door
                | Tile::Corridor
                | Tile::Trap
                | Tile::Treasure
                | Tile::Entrance
        )
    }

    /// Check if this tile damages whatever stands on it.
    pub const fn is_hazard(&self) -> bool {
        matches!(self, Tile::Trap | Tile::Water | Tile::Lava)
    }

    /// Display character for the ASCII renderer.
    pub const fn glyph(&self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::Exit => '>',
            Tile::Door => '+',
            Tile::Corridor => ',',
            Tile::Trap => '^',
            Tile::Treasure => '$',
            Tile::Pillar => 'O',
            Tile::Water => '~',
            Tile::Lava => '%',
            Tile::Entrance => '<',
        }
    }
}
