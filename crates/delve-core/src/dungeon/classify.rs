//! Rule-driven room classification.
//!
//! Two forced roles (entrance nearest the map origin, exit farthest
//! from the entrance), an optional boss room, then a weighted draw for
//! everything else. All tie-breaks go to the lowest room id so that a
//! seed fixes the outcome completely.

use crate::config::{Difficulty, GenConfig};
use crate::rng::DungeonRng;

use super::geometry::Point;
use super::room::{Room, RoomType};

/// Assign a semantic type to every room.
///
/// Secret rooms are never produced here; they are spliced in later by
/// the secret-room pass.
pub fn classify_rooms(
    rooms: &mut [Room],
    cfg: &GenConfig,
    difficulty: Difficulty,
    depth: u32,
    rng: &mut DungeonRng,
) {
    if rooms.is_empty() {
        return;
    }

    let entrance_idx = nearest_to(rooms, Point::new(0, 0));
    rooms[entrance_idx].room_type = RoomType::Entrance;

    if rooms.len() >= 2 {
        let origin = rooms[entrance_idx].center();
        let exit_idx = farthest_from(rooms, origin, entrance_idx);
        rooms[exit_idx].room_type = RoomType::Exit;
    }

    assign_boss_room(rooms, cfg, depth, rng);

    let weights = ClassWeights::new(cfg, difficulty, depth);
    for room in rooms.iter_mut() {
        if room.room_type == RoomType::Normal {
            room.room_type = weights.draw(rng);
        }
    }
}

/// Index of the room whose center is nearest `target`; lowest id wins
/// ties. Strict comparison keeps the scan deterministic.
fn nearest_to(rooms: &[Room], target: Point) -> usize {
    let mut best = 0;
    let mut best_d = i64::MAX;
    for (i, room) in rooms.iter().enumerate() {
        let d = room.center().distance_sq(target);
        if d < best_d {
            best_d = d;
            best = i;
        }
    }
    best
}

/// Index of the room whose center is farthest from `origin`, skipping
/// `exclude`; lowest id wins ties.
fn farthest_from(rooms: &[Room], origin: Point, exclude: usize) -> usize {
    let mut best = usize::MAX;
    let mut best_d = -1i64;
    for (i, room) in rooms.iter().enumerate() {
        if i == exclude {
            continue;
        }
        let d = room.center().distance_sq(origin);
        if d > best_d {
            best_d = d;
            best = i;
        }
    }
    best
}

/// The largest still-normal room becomes a boss room when it clears
/// the size gate; the chance grows with floor depth.
fn assign_boss_room(rooms: &mut [Room], cfg: &GenConfig, depth: u32, rng: &mut DungeonRng) {
    let min_side = cfg.boss_room_min_size as i32;
    let mut best: Option<usize> = None;
    for (i, room) in rooms.iter().enumerate() {
        if room.room_type != RoomType::Normal {
            continue;
        }
        if room.rect.width < min_side || room.rect.height < min_side {
            continue;
        }
        if best.is_none_or(|b| room.area() > rooms[b].area()) {
            best = Some(i);
        }
    }

    if let Some(i) = best {
        let p = (0.25 + depth as f64 * 0.07).min(0.95);
        if rng.chance(p) {
            rooms[i].room_type = RoomType::Boss;
        }
    }
}

/// Depth/difficulty-scaled weight table for the non-forced types.
struct ClassWeights {
    entries: [(RoomType, f64); 6],
    total: f64,
}

impl ClassWeights {
    fn new(cfg: &GenConfig, difficulty: Difficulty, depth: u32) -> Self {
        let depth_scale = 1.0 + depth as f64 * 0.05;
        let entries = [
            (RoomType::Normal, 1.0),
            (
                RoomType::Trap,
                cfg.trap_chance * difficulty.hazard_scale() * depth_scale,
            ),
            (RoomType::Treasure, cfg.treasure_chance * depth_scale),
            (RoomType::Shrine, 0.05),
            (RoomType::Armory, 0.06),
            (RoomType::Library, 0.06),
        ];
        let total = entries.iter().map(|(_, w)| w).sum();
        Self { entries, total }
    }

    fn draw(&self, rng: &mut DungeonRng) -> RoomType {
        if self.total <= 0.0 {
            return RoomType::Normal;
        }
        let mut roll = rng.between(0, 9999) as f64 / 10_000.0 * self.total;
        for (ty, w) in self.entries {
            if roll < w {
                return ty;
            }
            roll -= w;
        }
        RoomType::Normal
    }
}
