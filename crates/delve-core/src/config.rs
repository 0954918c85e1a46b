//! Generation difficulty and tunable configuration.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Player-facing difficulty setting.
///
/// Scales hazard density and how aggressively space is subdivided.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Nightmare,
}

impl Difficulty {
    /// Multiplier applied to trap/hazard probabilities.
    pub fn hazard_scale(self) -> f64 {
        match self {
            Difficulty::Easy => 0.6,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.4,
            Difficulty::Nightmare => 1.8,
        }
    }

    /// Adjustment to the BSP recursion budget.
    pub fn split_bonus(self) -> i32 {
        match self {
            Difficulty::Easy => -1,
            Difficulty::Normal => 0,
            Difficulty::Hard => 1,
            Difficulty::Nightmare => 1,
        }
    }

    /// Stable index used when deriving the RNG stream.
    pub fn stream_index(self) -> u64 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
            Difficulty::Nightmare => 3,
        }
    }
}

/// Tunable generation parameters.
///
/// All fields have workable defaults. Out-of-range values are clamped
/// by [`GenConfig::sanitized`] rather than rejected; generative content
/// degrades instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenConfig {
    /// Grid width in tiles.
    pub width: u32,
    /// Grid height in tiles.
    pub height: u32,
    /// Partitions at or below this size stop splitting.
    pub min_partition_size: u32,
    /// Partitions with a dimension above this keep splitting even past
    /// the recursion budget.
    pub max_partition_size: u32,
    /// Smallest room dimension.
    pub min_room_size: u32,
    /// Wall padding kept between a room and its partition edge.
    pub room_padding: u32,
    /// Base BSP recursion budget, before difficulty/depth adjustment.
    pub max_depth_splits: u32,
    /// Corridor thickness in tiles.
    pub corridor_width: u32,
    /// Probability of a door where a corridor meets a room wall.
    pub door_chance: f64,
    /// Base weight for trap room classification.
    pub trap_chance: f64,
    /// Base weight for treasure room classification.
    pub treasure_chance: f64,
    /// Per-wall-side probability of splicing in a secret room.
    pub secret_room_chance: f64,
    /// Features placed per interior tile.
    pub feature_density: f64,
    /// Minimum dimension for a room to qualify as a boss room.
    pub boss_room_min_size: u32,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 48,
            min_partition_size: 12,
            max_partition_size: 28,
            min_room_size: 5,
            room_padding: 1,
            max_depth_splits: 4,
            corridor_width: 1,
            door_chance: 0.45,
            trap_chance: 0.12,
            treasure_chance: 0.10,
            secret_room_chance: 0.08,
            feature_density: 0.06,
            boss_room_min_size: 9,
        }
    }
}

impl GenConfig {
    /// Return a copy with every field clamped into a safe range.
    ///
    /// Ordering constraints between partition size, room size, and
    /// padding are restored here so that every surviving leaf can
    /// host a room.
    pub fn sanitized(&self) -> Self {
        let mut cfg = self.clone();

        cfg.width = cfg.width.clamp(16, 512);
        cfg.height = cfg.height.clamp(16, 512);

        cfg.min_room_size = cfg.min_room_size.clamp(3, 24);
        cfg.room_padding = cfg.room_padding.clamp(1, 4);

        // A partition must fit its padded minimum room.
        let floor = cfg.min_room_size + 2 * cfg.room_padding;
        cfg.min_partition_size = cfg.min_partition_size.max(floor).min(128);
        cfg.max_partition_size = cfg
            .max_partition_size
            .max(cfg.min_partition_size * 2)
            .min(256);

        cfg.max_depth_splits = cfg.max_depth_splits.clamp(1, 8);
        cfg.corridor_width = cfg.corridor_width.clamp(1, 3);

        cfg.door_chance = cfg.door_chance.clamp(0.0, 1.0);
        cfg.trap_chance = cfg.trap_chance.clamp(0.0, 1.0);
        cfg.treasure_chance = cfg.treasure_chance.clamp(0.0, 1.0);
        cfg.secret_room_chance = cfg.secret_room_chance.clamp(0.0, 1.0);
        cfg.feature_density = cfg.feature_density.clamp(0.0, 0.5);

        cfg.boss_room_min_size = cfg.boss_room_min_size.max(cfg.min_room_size);

        cfg
    }

    /// Recursion budget after difficulty and floor-depth scaling.
    pub fn effective_splits(&self, difficulty: Difficulty, depth: u32) -> u32 {
        let depth_bonus = if depth >= 6 { 1 } else { 0 };
        (self.max_depth_splits as i32 + difficulty.split_bonus() + depth_bonus).clamp(1, 8) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::from_str("easy").unwrap(), Difficulty::Easy);
        assert_eq!(
            Difficulty::from_str("Nightmare").unwrap(),
            Difficulty::Nightmare
        );
        assert!(Difficulty::from_str("brutal").is_err());
    }

    #[test]
    fn test_sanitize_degenerate_dimensions() {
        let cfg = GenConfig {
            width: 0,
            height: 3,
            ..GenConfig::default()
        }
        .sanitized();
        assert_eq!(cfg.width, 16);
        assert_eq!(cfg.height, 16);
    }

    #[test]
    fn test_sanitize_restores_ordering() {
        let cfg = GenConfig {
            min_partition_size: 2,
            min_room_size: 6,
            room_padding: 2,
            boss_room_min_size: 1,
            ..GenConfig::default()
        }
        .sanitized();
        assert!(cfg.min_partition_size >= cfg.min_room_size + 2 * cfg.room_padding);
        assert!(cfg.max_partition_size >= cfg.min_partition_size * 2);
        assert!(cfg.boss_room_min_size >= cfg.min_room_size);
    }

    #[test]
    fn test_sanitize_clamps_chances() {
        let cfg = GenConfig {
            door_chance: 7.0,
            trap_chance: -3.0,
            ..GenConfig::default()
        }
        .sanitized();
        assert_eq!(cfg.door_chance, 1.0);
        assert_eq!(cfg.trap_chance, 0.0);
    }

    #[test]
    fn test_effective_splits_scaling() {
        let cfg = GenConfig::default();
        let easy = cfg.effective_splits(Difficulty::Easy, 1);
        let nightmare = cfg.effective_splits(Difficulty::Nightmare, 10);
        assert!(nightmare > easy);
        assert!(nightmare <= 8);
        assert!(easy >= 1);
    }
}
