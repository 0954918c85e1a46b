//! delve-core: Deterministic BSP dungeon generation
//!
//! This crate contains all generation logic with no I/O dependencies.
//! It is designed to be pure and testable: the same configuration,
//! difficulty, depth, and seed always produce the same map.

pub mod config;
pub mod dungeon;
pub mod error;
pub mod rng;

pub use config::{Difficulty, GenConfig};
pub use dungeon::{
    dungeon_to_ascii, find_room_path, generate, generate_with_config, room_graph, to_legacy,
    DungeonMap, Room, RoomGraph, RoomId, RoomType, Tile,
};
pub use error::GenError;
pub use rng::DungeonRng;
