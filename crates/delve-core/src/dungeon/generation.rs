//! Map generation.
//!
//! `generate` is the policy layer: it runs the primary BSP strategy
//! and, if that refuses the configuration, falls back to a minimal
//! single-room strategy so callers always receive a map with at least
//! one room.

use serde::{Deserialize, Serialize};

use crate::config::{Difficulty, GenConfig};
use crate::error::GenError;
use crate::rng::DungeonRng;

use super::bsp::{place_rooms, BspTree};
use super::classify::classify_rooms;
use super::corridor::{route_corridors, Corridor};
use super::features::place_features;
use super::geometry::{Point, Rect};
use super::grid::TileGrid;
use super::room::{Room, RoomId, RoomType};
use super::secret::insert_secret_rooms;
use super::tile::Tile;

/// A finished dungeon floor. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonMap {
    pub width: u32,
    pub height: u32,
    pub grid: TileGrid,
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    pub entrance: Point,
    pub exit: Point,
    pub seed: u64,
    pub depth: u32,
    pub room_count: usize,
}

impl DungeonMap {
    /// Look up a room by id.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// All rooms of a given type, creation order.
    pub fn rooms_of_type(&self, ty: RoomType) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(move |r| r.room_type == ty)
    }

    /// The room whose floor rect contains `p`, if any.
    pub fn room_at(&self, p: Point) -> Option<&Room> {
        self.rooms.iter().find(|r| r.contains(p))
    }

    pub fn entrance_room(&self) -> Option<&Room> {
        self.rooms_of_type(RoomType::Entrance).next()
    }

    pub fn exit_room(&self) -> Option<&Room> {
        self.rooms_of_type(RoomType::Exit).next()
    }
}

/// Generate a floor with the default configuration.
pub fn generate(difficulty: Difficulty, depth: u32, seed: u64) -> DungeonMap {
    generate_with_config(&GenConfig::default(), difficulty, depth, seed)
}

/// Generate a floor.
///
/// Never fails: bad configuration is clamped, and a configuration the
/// BSP strategy still cannot serve gets the fallback map instead.
pub fn generate_with_config(
    cfg: &GenConfig,
    difficulty: Difficulty,
    depth: u32,
    seed: u64,
) -> DungeonMap {
    let cfg = cfg.sanitized();
    let mut rng = DungeonRng::new(stream_seed(seed, depth, difficulty));

    match build_bsp_map(&cfg, difficulty, depth, seed, &mut rng) {
        Ok(map) => map,
        Err(_) => fallback_map(&cfg, depth, seed),
    }
}

/// Derive the per-call RNG stream from the full input triple, so each
/// of seed, depth, and difficulty perturbs every downstream draw.
fn stream_seed(seed: u64, depth: u32, difficulty: Difficulty) -> u64 {
    seed.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add((depth as u64) << 32)
        .wrapping_add(difficulty.stream_index())
}

/// Primary strategy: full BSP pipeline.
fn build_bsp_map(
    cfg: &GenConfig,
    difficulty: Difficulty,
    depth: u32,
    seed: u64,
    rng: &mut DungeonRng,
) -> Result<DungeonMap, GenError> {
    let bounds = Rect::new(0, 0, cfg.width as i32, cfg.height as i32);
    if bounds.width < cfg.min_room_size as i32 + 2 * cfg.room_padding as i32
        || bounds.height < cfg.min_room_size as i32 + 2 * cfg.room_padding as i32
    {
        return Err(GenError::GridTooSmall {
            width: cfg.width,
            height: cfg.height,
        });
    }

    let mut grid = TileGrid::new(cfg.width, cfg.height);
    let max_splits = cfg.effective_splits(difficulty, depth);
    let mut tree = BspTree::build(bounds, cfg, max_splits, rng);
    let mut rooms = place_rooms(&mut tree, cfg, rng);
    if rooms.is_empty() {
        return Err(GenError::NoRoomsPlaced);
    }

    for room in &rooms {
        grid.fill_rect(room.rect, Tile::Floor);
    }

    let corridors = route_corridors(&tree, &mut rooms, &mut grid, cfg, rng);

    classify_rooms(&mut rooms, cfg, difficulty, depth, rng);
    let (entrance, exit) = stamp_entrance_exit(&mut grid, &rooms);

    place_features(&mut rooms, &mut grid, cfg, difficulty, depth, rng);
    insert_secret_rooms(&mut rooms, &mut grid, cfg, rng);

    let room_count = rooms.len();
    Ok(DungeonMap {
        width: cfg.width,
        height: cfg.height,
        grid,
        rooms,
        corridors,
        entrance,
        exit,
        seed,
        depth,
        room_count,
    })
}

/// Write the entrance/exit tiles at the two forced rooms' centers and
/// return both points for O(1) lookup on the map.
///
/// Single-room maps hold no exit-typed room; the exit tile lands on a
/// different cell of the lone room instead.
fn stamp_entrance_exit(grid: &mut TileGrid, rooms: &[Room]) -> (Point, Point) {
    let entrance_room = rooms
        .iter()
        .find(|r| r.room_type == RoomType::Entrance)
        .unwrap_or(&rooms[0]);
    let entrance = entrance_room.center();
    grid.set(entrance, Tile::Entrance);

    let exit = match rooms.iter().find(|r| r.room_type == RoomType::Exit) {
        Some(room) => room.center(),
        None => {
            // Lone room: offset inside it, away from the entrance stamp.
            let c = entrance_room.center();
            let p = Point::new(c.x + 1, c.y);
            if entrance_room.contains(p) {
                p
            } else {
                Point::new(c.x - 1, c.y)
            }
        }
    };
    grid.set(exit, Tile::Exit);

    (entrance, exit)
}

/// Fallback strategy: one centered room, entrance and exit stamped.
///
/// Exists to preserve a single property of the original behavior: a
/// valid configuration never yields a zero-room map.
fn fallback_map(cfg: &GenConfig, depth: u32, seed: u64) -> DungeonMap {
    let width = cfg.width.max(8);
    let height = cfg.height.max(8);
    let mut grid = TileGrid::new(width, height);

    let w = (width as i32 - 4).clamp(3, 12);
    let h = (height as i32 - 4).clamp(3, 8);
    let rect = Rect::new(
        (width as i32 - w) / 2,
        (height as i32 - h) / 2,
        w,
        h,
    );
    grid.fill_rect(rect, Tile::Floor);

    let mut room = Room::new(RoomId(0), rect);
    room.room_type = RoomType::Entrance;
    let rooms = vec![room];

    let (entrance, exit) = stamp_entrance_exit(&mut grid, &rooms);

    DungeonMap {
        width,
        height,
        grid,
        rooms,
        corridors: Vec::new(),
        entrance,
        exit,
        seed,
        depth,
        room_count: 1,
    }
}
