//! Corridor routing over the BSP tree.
//!
//! Walking internal nodes from the leaves toward the root, every pair
//! of sibling subtrees gets one corridor between a representative room
//! per side. Connecting every sibling pair bottom-up is what makes the
//! final room graph a single connected component.

use serde::{Deserialize, Serialize};

use crate::config::GenConfig;
use crate::rng::DungeonRng;

use super::bsp::BspTree;
use super::geometry::{Point, Rect};
use super::grid::TileGrid;
use super::room::{Room, RoomId};
use super::tile::Tile;

/// A carved corridor between two rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub id: u32,
    pub from: RoomId,
    pub to: RoomId,
    /// Ordered path points, room center to room center.
    pub path: Vec<Point>,
    pub has_door: bool,
}

/// Connect sibling subtrees bottom-up and carve the results.
///
/// Internal nodes are visited in reverse creation order, so the
/// deepest sibling pairs connect first. Sides without any room are
/// skipped; they simply contribute nothing to the graph.
pub fn route_corridors(
    tree: &BspTree,
    rooms: &mut [Room],
    grid: &mut TileGrid,
    cfg: &GenConfig,
    rng: &mut DungeonRng,
) -> Vec<Corridor> {
    let mut corridors = Vec::new();

    for idx in (0..tree.nodes().len()).rev() {
        let Some((a, b)) = tree.nodes()[idx].children else {
            continue;
        };
        let left = tree.rooms_under(a);
        let right = tree.rooms_under(b);
        if left.is_empty() || right.is_empty() {
            continue;
        }

        let (from, to) = closest_pair(&left, &right, rooms);
        let corridor = carve_between(from, to, rooms, grid, cfg, rng, corridors.len() as u32);

        rooms[from.0 as usize].connect_to(to);
        rooms[to.0 as usize].connect_to(from);
        corridors.push(corridor);
    }

    corridors
}

/// Representative pair: the cross-subtree room pair with the smallest
/// center distance, lowest ids on ties.
fn closest_pair(left: &[RoomId], right: &[RoomId], rooms: &[Room]) -> (RoomId, RoomId) {
    let mut best = (left[0], right[0]);
    let mut best_d = i64::MAX;
    for &a in left {
        for &b in right {
            let d = rooms[a.0 as usize]
                .center()
                .distance_sq(rooms[b.0 as usize].center());
            if d < best_d {
                best_d = d;
                best = (a, b);
            }
        }
    }
    best
}

fn carve_between(
    from: RoomId,
    to: RoomId,
    rooms: &[Room],
    grid: &mut TileGrid,
    cfg: &GenConfig,
    rng: &mut DungeonRng,
    id: u32,
) -> Corridor {
    let from_rect = rooms[from.0 as usize].rect;
    let to_rect = rooms[to.0 as usize].rect;
    let path = corridor_path(from_rect.center(), to_rect.center(), rng);

    carve_path(grid, &path, cfg.corridor_width as i32);

    // Where the corridor crosses each room's wall ring, a door may
    // replace the carved opening.
    let mut has_door = false;
    for candidate in [
        exit_cell(&path, &from_rect),
        entry_cell(&path, &to_rect),
    ]
    .into_iter()
    .flatten()
    {
        if grid.get(candidate) == Some(Tile::Corridor) && rng.chance(cfg.door_chance) {
            grid.set(candidate, Tile::Door);
            has_door = true;
        }
    }

    Corridor {
        id,
        from,
        to,
        path,
        has_door,
    }
}

/// Straight or L-shaped path between two points, inclusive.
///
/// The elbow orientation of an L route is a seeded coin flip.
fn corridor_path(a: Point, b: Point, rng: &mut DungeonRng) -> Vec<Point> {
    if a.x == b.x || a.y == b.y {
        return line(a, b);
    }
    let elbow = if rng.one_in(2) {
        Point::new(b.x, a.y)
    } else {
        Point::new(a.x, b.y)
    };
    let mut path = line(a, elbow);
    path.extend(line(elbow, b).into_iter().skip(1));
    path
}

/// Axis-aligned segment from `a` to `b`, both endpoints included.
fn line(a: Point, b: Point) -> Vec<Point> {
    let mut out = vec![a];
    let (dx, dy) = ((b.x - a.x).signum(), (b.y - a.y).signum());
    let mut p = a;
    while p != b {
        p = Point::new(p.x + dx, p.y + dy);
        out.push(p);
    }
    out
}

/// Carve corridor tiles along the path, widened perpendicular to the
/// travel direction. Only solid wall is replaced; room floors, doors,
/// and earlier corridors are left as they are.
fn carve_path(grid: &mut TileGrid, path: &[Point], width: i32) {
    for (i, &p) in path.iter().enumerate() {
        let dir = if i + 1 < path.len() {
            direction(p, path[i + 1])
        } else if i > 0 {
            direction(path[i - 1], p)
        } else {
            (1, 0)
        };
        for k in 0..width {
            // Perpendicular offset for thickness.
            let cell = if dir.0 != 0 {
                Point::new(p.x, p.y + k)
            } else {
                Point::new(p.x + k, p.y)
            };
            if grid.get(cell) == Some(Tile::Wall) {
                grid.set(cell, Tile::Corridor);
            }
        }
    }
}

fn direction(a: Point, b: Point) -> (i32, i32) {
    ((b.x - a.x).signum(), (b.y - a.y).signum())
}

/// First path cell outside `rect` after leaving it.
fn exit_cell(path: &[Point], rect: &Rect) -> Option<Point> {
    path.windows(2)
        .find(|w| rect.contains(w[0]) && !rect.contains(w[1]))
        .map(|w| w[1])
}

/// Last path cell outside `rect` before entering it.
fn entry_cell(path: &[Point], rect: &Rect) -> Option<Point> {
    path.windows(2)
        .rev()
        .find(|w| !rect.contains(w[0]) && rect.contains(w[1]))
        .map(|w| w[0])
}
