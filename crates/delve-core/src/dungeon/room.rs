//! Rooms, room types, and the features placed inside them.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::geometry::{Point, Rect};
use super::tile::Tile;

/// Identifier for a room, unique within one generated map and
/// assigned in creation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct RoomId(pub u32);

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "room#{}", self.0)
    }
}

/// Semantic room classification.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum RoomType {
    Entrance = 0,
    #[default]
    Normal = 1,
    Treasure = 2,
    Trap = 3,
    Boss = 4,
    Shrine = 5,
    Armory = 6,
    Library = 7,
    Exit = 8,
    Secret = 9,
}

impl RoomType {
    /// Check if this room is outside the spanning-connectivity
    /// guarantee (reachable only through its hidden passage).
    pub fn is_secret(self) -> bool {
        matches!(self, RoomType::Secret)
    }

    /// Check if this is one of the two forced structural roles.
    pub fn is_structural(self) -> bool {
        matches!(self, RoomType::Entrance | RoomType::Exit)
    }
}

/// Kinds of decorative/hazard features a room can hold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum FeatureKind {
    Chest,
    Trap,
    Shrine,
    Pillar,
    Water,
    Lava,
    Torch,
    Bookshelf,
}

impl FeatureKind {
    /// The tile code written wherever this feature is placed.
    ///
    /// The tile set is closed, so several feature kinds project onto
    /// the same code: shrines read as sacred pools, torches and
    /// bookshelves as solid pillars.
    pub const fn tile(self) -> Tile {
        match self {
            FeatureKind::Chest => Tile::Treasure,
            FeatureKind::Trap => Tile::Trap,
            FeatureKind::Shrine => Tile::Water,
            FeatureKind::Pillar => Tile::Pillar,
            FeatureKind::Water => Tile::Water,
            FeatureKind::Lava => Tile::Lava,
            FeatureKind::Torch => Tile::Pillar,
            FeatureKind::Bookshelf => Tile::Pillar,
        }
    }
}

/// A placed feature with its grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomFeature {
    pub kind: FeatureKind,
    pub position: Point,
}

/// A placed room.
///
/// `rect` covers the floor interior only; the surrounding wall ring is
/// implicit in the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub rect: Rect,
    pub room_type: RoomType,
    /// Rooms reachable through a corridor, symmetric.
    pub connections: Vec<RoomId>,
    pub features: Vec<RoomFeature>,
    /// Caller-owned exploration flag; always false on a fresh map.
    pub explored: bool,
}

impl Room {
    pub fn new(id: RoomId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            room_type: RoomType::Normal,
            connections: Vec::new(),
            features: Vec::new(),
            explored: false,
        }
    }

    pub fn center(&self) -> Point {
        self.rect.center()
    }

    pub fn area(&self) -> i64 {
        self.rect.area()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.rect.contains(p)
    }

    /// Check if the padded bounding rects of two rooms intersect.
    pub fn overlaps(&self, other: &Room, padding: i32) -> bool {
        self.rect
            .expanded(padding)
            .intersects(&other.rect.expanded(padding))
    }

    /// Record a symmetric corridor connection (idempotent).
    pub fn connect_to(&mut self, other: RoomId) {
        if other != self.id && !self.connections.contains(&other) {
            self.connections.push(other);
        }
    }
}

/// Check whether `rect`, padded, collides with any existing room.
///
/// Leaf-placed rooms cannot overlap by construction; this is the
/// defensive check for placements not bound to a single leaf, such as
/// secret rooms.
pub fn overlaps_any_room(rect: Rect, rooms: &[Room], padding: i32) -> bool {
    let padded = rect.expanded(padding);
    rooms
        .iter()
        .any(|r| padded.intersects(&r.rect.expanded(padding)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: u32, x: i32, y: i32, w: i32, h: i32) -> Room {
        Room::new(RoomId(id), Rect::new(x, y, w, h))
    }

    #[test]
    fn test_overlap_with_padding() {
        let a = room(0, 5, 5, 5, 5);
        let b = room(1, 11, 5, 5, 5);
        // One tile of wall between them: fine unpadded, collision padded.
        assert!(!a.overlaps(&b, 0));
        assert!(a.overlaps(&b, 1));
    }

    #[test]
    fn test_connect_to_is_symmetric_material() {
        let mut a = room(0, 0, 0, 4, 4);
        a.connect_to(RoomId(1));
        a.connect_to(RoomId(1));
        a.connect_to(RoomId(0)); // self-connection ignored
        assert_eq!(a.connections, vec![RoomId(1)]);
    }

    #[test]
    fn test_overlaps_any_room() {
        let rooms = vec![room(0, 5, 5, 5, 5), room(1, 20, 20, 4, 4)];
        assert!(overlaps_any_room(Rect::new(9, 5, 4, 4), &rooms, 1));
        assert!(!overlaps_any_room(Rect::new(30, 30, 4, 4), &rooms, 1));
    }

    #[test]
    fn test_feature_tile_projection_is_total() {
        use strum::IntoEnumIterator;
        for kind in FeatureKind::iter() {
            // Features never project onto structural tiles.
            let t = kind.tile();
            assert!(!matches!(
                t,
                Tile::Wall | Tile::Floor | Tile::Door | Tile::Corridor | Tile::Entrance | Tile::Exit
            ));
        }
    }

    #[test]
    fn test_room_type_predicates() {
        assert!(RoomType::Secret.is_secret());
        assert!(!RoomType::Boss.is_secret());
        assert!(RoomType::Entrance.is_structural());
        assert!(RoomType::Exit.is_structural());
        assert!(!RoomType::Treasure.is_structural());
    }
}
