//! Per-room-type feature placement.
//!
//! Dispatch goes through an exhaustive `RoomType` lookup so a new room
//! type cannot be added without deciding its placement routine. Every
//! feature write pairs with the matching tile write; the two must
//! never disagree.

use crate::config::{Difficulty, GenConfig};
use crate::rng::DungeonRng;

use super::geometry::Point;
use super::grid::TileGrid;
use super::room::{FeatureKind, Room, RoomType};
use super::tile::Tile;

/// Shared knobs for the placement routines.
pub struct PlacerCtx {
    pub feature_density: f64,
    pub hazard_scale: f64,
    pub depth: u32,
}

type Placer = fn(&mut Room, &mut TileGrid, &PlacerCtx, &mut DungeonRng);

/// Placement routine for a room type, or `None` for rooms kept clear.
fn placer_for(ty: RoomType) -> Option<Placer> {
    match ty {
        RoomType::Treasure => Some(place_treasure),
        RoomType::Trap => Some(place_trap),
        RoomType::Shrine => Some(place_shrine),
        RoomType::Library => Some(place_library),
        RoomType::Armory => Some(place_armory),
        RoomType::Boss => Some(place_boss),
        RoomType::Normal => Some(place_normal),
        RoomType::Entrance | RoomType::Exit | RoomType::Secret => None,
    }
}

/// Run the per-type placer for every room, then the cosmetic corner
/// torch pass for rooms large enough to carry it.
pub fn place_features(
    rooms: &mut [Room],
    grid: &mut TileGrid,
    cfg: &GenConfig,
    difficulty: Difficulty,
    depth: u32,
    rng: &mut DungeonRng,
) {
    let ctx = PlacerCtx {
        feature_density: cfg.feature_density,
        hazard_scale: difficulty.hazard_scale(),
        depth,
    };

    for room in rooms.iter_mut() {
        if let Some(place) = placer_for(room.room_type) {
            place(room, grid, &ctx, rng);
        }
        corner_torches(room, grid);
    }
}

/// Write one feature and its tile together.
///
/// Refuses cells that are not plain floor (stamps, earlier features)
/// and cells beside a door or corridor opening, so entrances never
/// get blocked by decoration.
fn put_feature(room: &mut Room, grid: &mut TileGrid, kind: FeatureKind, pos: Point) -> bool {
    if !room.contains(pos) {
        return false;
    }
    if grid.get(pos) != Some(Tile::Floor) || near_opening(grid, pos) {
        return false;
    }
    grid.set(pos, kind.tile());
    room.features.push(super::room::RoomFeature { kind, position: pos });
    true
}

/// Check the four neighbors for a door or corridor mouth.
fn near_opening(grid: &TileGrid, p: Point) -> bool {
    [(1, 0), (-1, 0), (0, 1), (0, -1)].iter().any(|&(dx, dy)| {
        matches!(
            grid.get(Point::new(p.x + dx, p.y + dy)),
            Some(Tile::Door) | Some(Tile::Corridor)
        )
    })
}

/// Scatter up to `count` features at random interior cells.
fn scatter(
    room: &mut Room,
    grid: &mut TileGrid,
    kind: FeatureKind,
    count: u32,
    rng: &mut DungeonRng,
) -> u32 {
    let mut placed = 0;
    // Bounded retries keep the loop finite in crowded rooms.
    for _ in 0..count * 4 {
        if placed >= count {
            break;
        }
        let pos = Point::new(
            rng.between(room.rect.x, room.rect.right() - 1),
            rng.between(room.rect.y, room.rect.bottom() - 1),
        );
        if put_feature(room, grid, kind, pos) {
            placed += 1;
        }
    }
    placed
}

/// Density-scaled feature budget for a room.
fn budget(room: &Room, ctx: &PlacerCtx) -> u32 {
    ((room.area() as f64 * ctx.feature_density).ceil() as u32).max(1)
}

fn place_treasure(room: &mut Room, grid: &mut TileGrid, ctx: &PlacerCtx, rng: &mut DungeonRng) {
    let chests = budget(room, ctx).min(4);
    scatter(room, grid, FeatureKind::Chest, chests, rng);
    // Deep hoards get a guardian trap.
    if ctx.depth >= 4 && rng.chance(0.4 * ctx.hazard_scale) {
        scatter(room, grid, FeatureKind::Trap, 1, rng);
    }
}

fn place_trap(room: &mut Room, grid: &mut TileGrid, ctx: &PlacerCtx, rng: &mut DungeonRng) {
    let traps = ((budget(room, ctx) as f64 * ctx.hazard_scale).ceil() as u32).clamp(1, 6);
    scatter(room, grid, FeatureKind::Trap, traps, rng);
    if rng.chance(0.3) {
        scatter(room, grid, FeatureKind::Water, 1, rng);
    }
}

fn place_shrine(room: &mut Room, grid: &mut TileGrid, _ctx: &PlacerCtx, _rng: &mut DungeonRng) {
    // Sacred pool at the center, flanked by pillars.
    let c = room.center();
    put_feature(room, grid, FeatureKind::Shrine, c);
    for (dx, dy) in [(-1, -1), (1, -1), (-1, 1), (1, 1)] {
        put_feature(
            room,
            grid,
            FeatureKind::Pillar,
            Point::new(c.x + dx * 2, c.y + dy * 2),
        );
    }
}

fn place_library(room: &mut Room, grid: &mut TileGrid, _ctx: &PlacerCtx, _rng: &mut DungeonRng) {
    // Shelves line the top and bottom interior rows.
    let rect = room.rect;
    for x in rect.x..rect.right() {
        put_feature(room, grid, FeatureKind::Bookshelf, Point::new(x, rect.y));
        put_feature(
            room,
            grid,
            FeatureKind::Bookshelf,
            Point::new(x, rect.bottom() - 1),
        );
    }
}

fn place_armory(room: &mut Room, grid: &mut TileGrid, ctx: &PlacerCtx, rng: &mut DungeonRng) {
    let racks = budget(room, ctx).min(3);
    scatter(room, grid, FeatureKind::Pillar, racks, rng);
    scatter(room, grid, FeatureKind::Chest, 1, rng);
}

fn place_boss(room: &mut Room, grid: &mut TileGrid, ctx: &PlacerCtx, rng: &mut DungeonRng) {
    // Symmetric pillars frame the arena.
    let rect = room.rect;
    let inset = 2;
    for (x, y) in [
        (rect.x + inset, rect.y + inset),
        (rect.right() - 1 - inset, rect.y + inset),
        (rect.x + inset, rect.bottom() - 1 - inset),
        (rect.right() - 1 - inset, rect.bottom() - 1 - inset),
    ] {
        put_feature(room, grid, FeatureKind::Pillar, Point::new(x, y));
    }

    // Ground hazard flavor hardens with depth.
    let hazard = if ctx.depth >= 5 {
        FeatureKind::Lava
    } else {
        FeatureKind::Water
    };
    let pools = ((ctx.hazard_scale * 2.0).round() as u32).clamp(1, 4);
    scatter(room, grid, hazard, pools, rng);
}

fn place_normal(room: &mut Room, grid: &mut TileGrid, ctx: &PlacerCtx, rng: &mut DungeonRng) {
    // Mostly empty; the odd pillar or puddle.
    if rng.chance(ctx.feature_density * room.area() as f64 * 0.5) {
        let kind = if rng.one_in(3) {
            FeatureKind::Water
        } else {
            FeatureKind::Pillar
        };
        scatter(room, grid, kind, 1, rng);
    }
}

/// Cosmetic pass: a torch in each interior corner of any room at
/// least 5x5.
fn corner_torches(room: &mut Room, grid: &mut TileGrid) {
    let rect = room.rect;
    if rect.width < 5 || rect.height < 5 {
        return;
    }
    for (x, y) in [
        (rect.x, rect.y),
        (rect.right() - 1, rect.y),
        (rect.x, rect.bottom() - 1),
        (rect.right() - 1, rect.bottom() - 1),
    ] {
        put_feature(room, grid, FeatureKind::Torch, Point::new(x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::geometry::Rect;
    use crate::dungeon::room::RoomId;

    fn carved_room(ty: RoomType, rect: Rect, grid_size: u32) -> (Room, TileGrid) {
        let mut room = Room::new(RoomId(0), rect);
        room.room_type = ty;
        let mut grid = TileGrid::new(grid_size, grid_size);
        grid.fill_rect(rect, Tile::Floor);
        (room, grid)
    }

    fn ctx() -> PlacerCtx {
        PlacerCtx {
            feature_density: 0.06,
            hazard_scale: 1.0,
            depth: 3,
        }
    }

    #[test]
    fn test_feature_and_tile_always_agree() {
        use strum::IntoEnumIterator;
        for ty in RoomType::iter() {
            let (mut room, mut grid) = carved_room(ty, Rect::new(4, 4, 9, 9), 20);
            let mut rng = DungeonRng::new(ty as u64);
            if let Some(place) = placer_for(ty) {
                place(&mut room, &mut grid, &ctx(), &mut rng);
            }
            corner_torches(&mut room, &mut grid);
            for f in &room.features {
                assert_eq!(
                    grid.get(f.position),
                    Some(f.kind.tile()),
                    "{:?} feature mismatches its tile",
                    f.kind
                );
            }
        }
    }

    #[test]
    fn test_trap_room_gets_traps() {
        let (mut room, mut grid) = carved_room(RoomType::Trap, Rect::new(2, 2, 8, 8), 16);
        let mut rng = DungeonRng::new(3);
        place_trap(&mut room, &mut grid, &ctx(), &mut rng);
        assert!(
            room.features.iter().any(|f| f.kind == FeatureKind::Trap),
            "trap room must contain at least one trap"
        );
    }

    #[test]
    fn test_shrine_center_pool() {
        let (mut room, mut grid) = carved_room(RoomType::Shrine, Rect::new(2, 2, 9, 9), 16);
        let mut rng = DungeonRng::new(4);
        place_shrine(&mut room, &mut grid, &ctx(), &mut rng);
        assert_eq!(grid.get(room.center()), Some(Tile::Water));
    }

    #[test]
    fn test_features_avoid_openings() {
        let rect = Rect::new(4, 4, 6, 6);
        let (mut room, mut grid) = carved_room(RoomType::Treasure, rect, 16);
        // A door on the left wall makes the adjacent floor cell off
        // limits.
        let door = Point::new(3, 6);
        grid.set(door, Tile::Door);
        let mut rng = DungeonRng::new(8);
        place_treasure(&mut room, &mut grid, &ctx(), &mut rng);
        assert_eq!(grid.get(Point::new(4, 6)), Some(Tile::Floor));
    }

    #[test]
    fn test_small_rooms_skip_torches() {
        let (mut room, mut grid) = carved_room(RoomType::Normal, Rect::new(2, 2, 4, 4), 12);
        corner_torches(&mut room, &mut grid);
        assert!(room.features.is_empty());
    }

    #[test]
    fn test_structural_rooms_stay_clear() {
        for ty in [RoomType::Entrance, RoomType::Exit, RoomType::Secret] {
            assert!(placer_for(ty).is_none());
        }
    }
}
