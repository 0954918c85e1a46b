//! BSP tree building and per-leaf room placement.
//!
//! The tree is a flat arena of nodes with explicit child indices, so
//! iteration order is the deterministic creation order and nodes never
//! need interior pointers.

use crate::config::GenConfig;
use crate::rng::DungeonRng;

use super::geometry::Rect;
use super::room::{Room, RoomId};

/// One partition in the BSP tree.
#[derive(Debug, Clone)]
pub struct BspNode {
    pub rect: Rect,
    /// Indices of the two children, or `None` for a leaf.
    pub children: Option<(usize, usize)>,
    /// The room placed in this leaf, if any.
    pub room: Option<RoomId>,
}

impl BspNode {
    fn leaf(rect: Rect) -> Self {
        Self {
            rect,
            children: None,
            room: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Flat-array binary space partition over the map rectangle.
#[derive(Debug, Clone)]
pub struct BspTree {
    nodes: Vec<BspNode>,
}

/// Proportional cut bounds: both children keep 35-65% of the split
/// dimension.
const CUT_LO_PCT: i32 = 35;
const CUT_HI_PCT: i32 = 65;

impl BspTree {
    /// Recursively partition `bounds`.
    ///
    /// Splitting stops once a region is at or below
    /// `min_partition_size` or the recursion budget is spent, except
    /// that regions wider/taller than `max_partition_size` keep
    /// splitting. A region that cannot be cut without starving a child
    /// below `min_partition_size` stays a leaf.
    pub fn build(bounds: Rect, cfg: &GenConfig, max_splits: u32, rng: &mut DungeonRng) -> Self {
        let mut tree = Self {
            nodes: vec![BspNode::leaf(bounds)],
        };
        tree.split_node(0, 0, cfg, max_splits, rng);
        tree
    }

    pub fn nodes(&self) -> &[BspNode] {
        &self.nodes
    }

    pub fn root(&self) -> &BspNode {
        &self.nodes[0]
    }

    /// Leaf indices in creation order.
    pub fn leaves(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&i| self.nodes[i].is_leaf())
            .collect()
    }

    /// Ids of all rooms placed in leaves under `idx`, creation order.
    pub fn rooms_under(&self, idx: usize) -> Vec<RoomId> {
        let mut out = Vec::new();
        let mut stack = vec![idx];
        while let Some(i) = stack.pop() {
            let node = &self.nodes[i];
            if let Some((a, b)) = node.children {
                // Push right first so the left subtree is visited first.
                stack.push(b);
                stack.push(a);
            } else if let Some(id) = node.room {
                out.push(id);
            }
        }
        out
    }

    fn split_node(
        &mut self,
        idx: usize,
        depth: u32,
        cfg: &GenConfig,
        max_splits: u32,
        rng: &mut DungeonRng,
    ) {
        let rect = self.nodes[idx].rect;
        let min_p = cfg.min_partition_size as i32;
        let max_p = cfg.max_partition_size as i32;
        let longer = rect.width.max(rect.height);

        // Oversized regions split past the budget; everything else
        // respects it.
        if depth >= max_splits && longer <= max_p {
            return;
        }
        if rect.width <= min_p && rect.height <= min_p {
            return;
        }

        let Some((vertical, cut)) = pick_cut(rect, min_p, rng) else {
            // No cut leaves both children usable: forced leaf.
            return;
        };

        let (a, b) = if vertical {
            (
                Rect::new(rect.x, rect.y, cut, rect.height),
                Rect::new(rect.x + cut, rect.y, rect.width - cut, rect.height),
            )
        } else {
            (
                Rect::new(rect.x, rect.y, rect.width, cut),
                Rect::new(rect.x, rect.y + cut, rect.width, rect.height - cut),
            )
        };

        let ai = self.nodes.len();
        self.nodes.push(BspNode::leaf(a));
        let bi = self.nodes.len();
        self.nodes.push(BspNode::leaf(b));
        self.nodes[idx].children = Some((ai, bi));

        self.split_node(ai, depth + 1, cfg, max_splits, rng);
        self.split_node(bi, depth + 1, cfg, max_splits, rng);
    }
}

/// Choose the split axis and cut offset for `rect`.
///
/// Splits the longer dimension, with a seeded coin flip when the
/// region is near-square. Returns `(vertical, cut)` where a vertical
/// split cuts the width at `cut` columns, or `None` when neither axis
/// admits a cut keeping both children at `min_p`.
fn pick_cut(rect: Rect, min_p: i32, rng: &mut DungeonRng) -> Option<(bool, i32)> {
    let near_square = rect.width * 5 < rect.height * 6 && rect.height * 5 < rect.width * 6;
    let prefer_vertical = if near_square {
        rng.one_in(2)
    } else {
        rect.width > rect.height
    };

    let axes = [prefer_vertical, !prefer_vertical];
    for vertical in axes {
        let len = if vertical { rect.width } else { rect.height };
        let lo = min_p.max(len * CUT_LO_PCT / 100);
        let hi = (len - min_p).min(len * CUT_HI_PCT / 100);
        if lo <= hi {
            return Some((vertical, rng.between(lo, hi)));
        }
    }
    None
}

/// Place at most one room per leaf, inside the leaf's padded interior.
///
/// Leaves whose usable interior cannot hold `min_room_size` are
/// skipped; they own no room and drop out of corridor routing. Room
/// ids are assigned in leaf creation order.
pub fn place_rooms(tree: &mut BspTree, cfg: &GenConfig, rng: &mut DungeonRng) -> Vec<Room> {
    let min_room = cfg.min_room_size as i32;
    let padding = cfg.room_padding as i32;
    let mut rooms = Vec::new();

    for idx in tree.leaves() {
        let usable = tree.nodes[idx].rect.shrunk(padding);
        if usable.width < min_room || usable.height < min_room {
            continue;
        }

        let w = rng.between(min_room, usable.width);
        let h = rng.between(min_room, usable.height);
        let x = rng.between(usable.x, usable.right() - w);
        let y = rng.between(usable.y, usable.bottom() - h);

        let id = RoomId(rooms.len() as u32);
        rooms.push(Room::new(id, Rect::new(x, y, w, h)));
        tree.nodes[idx].room = Some(id);
    }

    rooms
}
