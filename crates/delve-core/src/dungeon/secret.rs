//! Secret room insertion.
//!
//! A post-pass outside the leaf structure: small rooms spliced behind
//! an existing room's wall, reached through a narrow hidden passage.
//! Secret rooms never join the room graph; the passage exists only on
//! the tile grid.

use crate::config::GenConfig;
use crate::rng::DungeonRng;

use super::geometry::{Point, Rect};
use super::grid::TileGrid;
use super::room::{overlaps_any_room, Room, RoomId, RoomType};
use super::tile::Tile;

/// Passage length between the host wall and the secret room.
const PASSAGE_LEN: i32 = 2;

/// The four wall sides of a host room.
#[derive(Debug, Clone, Copy)]
enum Side {
    North,
    South,
    West,
    East,
}

const SIDES: [Side; 4] = [Side::North, Side::South, Side::West, Side::East];

/// Roll each wall side of each host room and splice in secret rooms
/// where the roll passes and the space is free.
///
/// Appended rooms continue the creation-order id sequence.
pub fn insert_secret_rooms(
    rooms: &mut Vec<Room>,
    grid: &mut TileGrid,
    cfg: &GenConfig,
    rng: &mut DungeonRng,
) -> usize {
    let hosts = rooms.len();
    let mut inserted = 0;

    for host in 0..hosts {
        if rooms[host].room_type.is_structural() {
            continue;
        }
        for side in SIDES {
            if !rng.chance(cfg.secret_room_chance) {
                continue;
            }
            if let Some((rect, passage, mouth)) = propose(rooms[host].rect, side, rng) {
                if !fits(rect, &passage, mouth, rooms, grid, cfg) {
                    continue;
                }
                grid.fill_rect(rect, Tile::Floor);
                for &p in &passage {
                    grid.set(p, Tile::Corridor);
                }
                let mut room = Room::new(RoomId(rooms.len() as u32), rect);
                room.room_type = RoomType::Secret;
                rooms.push(room);
                inserted += 1;
            }
        }
    }

    inserted
}

/// Candidate rect, passage cells beyond one side of the host, and the
/// host-interior mouth cell the passage opens onto.
fn propose(host: Rect, side: Side, rng: &mut DungeonRng) -> Option<(Rect, Vec<Point>, Point)> {
    if host.width < 3 || host.height < 3 {
        return None;
    }

    let w = rng.between(3, 5);
    let h = rng.between(3, 4);

    let (rect, passage, mouth) = match side {
        Side::East => {
            let y0 = rng.between(host.y + 1, host.bottom() - 2);
            let x0 = host.right();
            let rect = Rect::new(x0 + PASSAGE_LEN, y0 - h / 2, w, h);
            let passage = (0..PASSAGE_LEN).map(|i| Point::new(x0 + i, y0)).collect();
            (rect, passage, Point::new(x0 - 1, y0))
        }
        Side::West => {
            let y0 = rng.between(host.y + 1, host.bottom() - 2);
            let x0 = host.x - 1;
            let rect = Rect::new(x0 - PASSAGE_LEN - w + 1, y0 - h / 2, w, h);
            let passage = (0..PASSAGE_LEN).map(|i| Point::new(x0 - i, y0)).collect();
            (rect, passage, Point::new(x0 + 1, y0))
        }
        Side::South => {
            let x0 = rng.between(host.x + 1, host.right() - 2);
            let y0 = host.bottom();
            let rect = Rect::new(x0 - w / 2, y0 + PASSAGE_LEN, w, h);
            let passage = (0..PASSAGE_LEN).map(|i| Point::new(x0, y0 + i)).collect();
            (rect, passage, Point::new(x0, y0 - 1))
        }
        Side::North => {
            let x0 = rng.between(host.x + 1, host.right() - 2);
            let y0 = host.y - 1;
            let rect = Rect::new(x0 - w / 2, y0 - PASSAGE_LEN - h + 1, w, h);
            let passage = (0..PASSAGE_LEN).map(|i| Point::new(x0, y0 - i)).collect();
            (rect, passage, Point::new(x0, y0 + 1))
        }
    };

    Some((rect, passage, mouth))
}

/// The defensive placement check: the padded rect must be in-bounds
/// solid wall, clear of every existing room, the passage must cut only
/// through wall, and the mouth cell inside the host must still be
/// plain floor. Features run before this pass, so a shelf or pillar
/// sitting on the mouth would wall the passage off for good.
fn fits(
    rect: Rect,
    passage: &[Point],
    mouth: Point,
    rooms: &[Room],
    grid: &TileGrid,
    cfg: &GenConfig,
) -> bool {
    let padding = cfg.room_padding as i32;
    if !grid.rect_is_solid(rect.expanded(1)) {
        return false;
    }
    if overlaps_any_room(rect, rooms, padding) {
        return false;
    }
    if grid.get(mouth) != Some(Tile::Floor) {
        return false;
    }
    passage
        .iter()
        .all(|&p| grid.get(p) == Some(Tile::Wall))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_setup() -> (Vec<Room>, TileGrid) {
        let rect = Rect::new(20, 20, 8, 8);
        let mut grid = TileGrid::new(48, 48);
        grid.fill_rect(rect, Tile::Floor);
        (vec![Room::new(RoomId(0), rect)], grid)
    }

    fn chancy_cfg(p: f64) -> GenConfig {
        GenConfig {
            secret_room_chance: p,
            ..GenConfig::default()
        }
        .sanitized()
    }

    #[test]
    fn test_insertion_with_certain_chance() {
        let (mut rooms, mut grid) = host_setup();
        let mut rng = DungeonRng::new(42);
        let n = insert_secret_rooms(&mut rooms, &mut grid, &chancy_cfg(1.0), &mut rng);
        assert!(n >= 1, "an isolated host with p=1.0 must gain a secret room");
        assert_eq!(rooms.len(), 1 + n);

        for secret in &rooms[1..] {
            assert_eq!(secret.room_type, RoomType::Secret);
            assert!(secret.connections.is_empty());
            // Ids continue in creation order.
            assert_eq!(secret.id.0 as usize, rooms.iter().position(|r| r.id == secret.id).unwrap());
            // Carved clear of the host, floor everywhere inside.
            assert!(!secret.overlaps(&rooms[0], 1));
            for y in secret.rect.y..secret.rect.bottom() {
                for x in secret.rect.x..secret.rect.right() {
                    assert_eq!(grid.get(Point::new(x, y)), Some(Tile::Floor));
                }
            }
        }
    }

    #[test]
    fn test_blocked_mouth_rejects_insertion() {
        // Shelf-lined host: the whole interior perimeter carries
        // pillar tiles, so every candidate passage would open onto an
        // obstacle instead of floor.
        let (mut rooms, mut grid) = host_setup();
        let rect = rooms[0].rect;
        for x in rect.x..rect.right() {
            grid.set(Point::new(x, rect.y), Tile::Pillar);
            grid.set(Point::new(x, rect.bottom() - 1), Tile::Pillar);
        }
        for y in rect.y..rect.bottom() {
            grid.set(Point::new(rect.x, y), Tile::Pillar);
            grid.set(Point::new(rect.right() - 1, y), Tile::Pillar);
        }
        let mut rng = DungeonRng::new(42);
        let n = insert_secret_rooms(&mut rooms, &mut grid, &chancy_cfg(1.0), &mut rng);
        assert_eq!(n, 0, "a walled-off mouth must veto the secret room");
    }

    #[test]
    fn test_mouth_stays_open() {
        let (mut rooms, mut grid) = host_setup();
        let mut rng = DungeonRng::new(42);
        let n = insert_secret_rooms(&mut rooms, &mut grid, &chancy_cfg(1.0), &mut rng);
        assert!(n >= 1);
        // Each passage must run from open host floor to the room.
        for secret in &rooms[1..] {
            let host = rooms[0].rect;
            let reachable = walkable_flood(&grid, host.center());
            let c = secret.center();
            assert!(
                reachable.contains(&c),
                "{} not tile-reachable from its host",
                secret.id
            );
        }
    }

    fn walkable_flood(grid: &TileGrid, start: Point) -> std::collections::BTreeSet<Point> {
        let mut seen = std::collections::BTreeSet::new();
        let mut stack = vec![start];
        while let Some(p) = stack.pop() {
            let walkable = grid.get(p).map(|t| t.is_walkable()).unwrap_or(false);
            if !walkable || !seen.insert(p) {
                continue;
            }
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                stack.push(Point::new(p.x + dx, p.y + dy));
            }
        }
        seen
    }

    #[test]
    fn test_zero_chance_inserts_nothing() {
        let (mut rooms, mut grid) = host_setup();
        let mut rng = DungeonRng::new(42);
        let n = insert_secret_rooms(&mut rooms, &mut grid, &chancy_cfg(0.0), &mut rng);
        assert_eq!(n, 0);
        assert_eq!(rooms.len(), 1);
    }

    #[test]
    fn test_structural_hosts_are_skipped() {
        let (mut rooms, mut grid) = host_setup();
        rooms[0].room_type = RoomType::Entrance;
        let mut rng = DungeonRng::new(42);
        let n = insert_secret_rooms(&mut rooms, &mut grid, &chancy_cfg(1.0), &mut rng);
        assert_eq!(n, 0);
    }

    #[test]
    fn test_no_room_against_grid_edge() {
        // Host close to the border: candidates spilling out must be
        // rejected, not clipped.
        let rect = Rect::new(1, 1, 6, 6);
        let mut grid = TileGrid::new(12, 12);
        grid.fill_rect(rect, Tile::Floor);
        let mut rooms = vec![Room::new(RoomId(0), rect)];
        let mut rng = DungeonRng::new(5);
        insert_secret_rooms(&mut rooms, &mut grid, &chancy_cfg(1.0), &mut rng);
        for secret in &rooms[1..] {
            let padded = secret.rect.expanded(1);
            assert!(padded.x >= 0 && padded.y >= 0);
            assert!(padded.right() <= 12 && padded.bottom() <= 12);
        }
    }
}
