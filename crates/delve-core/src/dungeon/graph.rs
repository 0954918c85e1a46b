//! Derived room adjacency and shortest-path queries.
//!
//! Read-only views over a finished map. Ordered containers keep the
//! results identical across calls and platforms.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::generation::DungeonMap;
use super::room::RoomId;

/// Adjacency over room ids, built purely from each room's connection
/// list. Secret rooms appear as isolated vertices.
pub type RoomGraph = BTreeMap<RoomId, Vec<RoomId>>;

/// Build the room graph in O(rooms).
pub fn room_graph(map: &DungeonMap) -> RoomGraph {
    map.rooms
        .iter()
        .map(|room| (room.id, room.connections.clone()))
        .collect()
}

/// Breadth-first room path with the fewest corridor hops.
///
/// Returns `Some(vec![start])` when `start == end`, and `None` when
/// either id is unknown or no path exists.
pub fn find_room_path(graph: &RoomGraph, start: RoomId, end: RoomId) -> Option<Vec<RoomId>> {
    if !graph.contains_key(&start) || !graph.contains_key(&end) {
        return None;
    }
    if start == end {
        return Some(vec![start]);
    }

    let mut visited = BTreeSet::from([start]);
    let mut prev: BTreeMap<RoomId, RoomId> = BTreeMap::new();
    let mut queue = VecDeque::from([start]);

    while let Some(id) = queue.pop_front() {
        let Some(neighbors) = graph.get(&id) else {
            continue;
        };
        for &next in neighbors {
            if !visited.insert(next) {
                continue;
            }
            prev.insert(next, id);
            if next == end {
                return Some(backtrack(&prev, start, end));
            }
            queue.push_back(next);
        }
    }

    None
}

fn backtrack(prev: &BTreeMap<RoomId, RoomId>, start: RoomId, end: RoomId) -> Vec<RoomId> {
    let mut path = vec![end];
    let mut cursor = end;
    while cursor != start {
        cursor = prev[&cursor];
        path.push(cursor);
    }
    path.reverse();
    path
}
