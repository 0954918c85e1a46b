//! ASCII rendering for debugging and the CLI.

use super::generation::DungeonMap;

/// Render the map as one line per grid row, one glyph per tile.
///
/// Purely derived from the grid; rendering the same map twice yields
/// the same string, and an empty grid yields an empty string.
pub fn dungeon_to_ascii(map: &DungeonMap) -> String {
    let mut out = String::with_capacity((map.width as usize + 1) * map.height as usize);
    for row in map.grid.rows() {
        for tile in row {
            out.push(tile.glyph());
        }
        out.push('\n');
    }
    out
}
