//! Dungeon generation
//!
//! Contains the tile grid, BSP partitioning, room and corridor layout,
//! classification, feature placement, and the derived read-only views.

mod ascii;
mod bsp;
mod classify;
mod corridor;
mod features;
mod generation;
mod geometry;
mod graph;
mod grid;
mod legacy;
mod room;
mod secret;
mod tile;

pub use ascii::dungeon_to_ascii;
pub use bsp::{BspNode, BspTree};
pub use corridor::Corridor;
pub use generation::{generate, generate_with_config, DungeonMap};
pub use geometry::{Point, Rect};
pub use graph::{find_room_path, room_graph, RoomGraph};
pub use grid::TileGrid;
pub use legacy::{to_legacy, LegacyMap, LegacyRoom};
pub use room::{overlaps_any_room, FeatureKind, Room, RoomFeature, RoomId, RoomType};
pub use tile::Tile;
