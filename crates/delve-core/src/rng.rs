//! Random number generation for dungeon building.
//!
//! Uses a seeded ChaCha RNG so a whole generation run is reproducible
//! from its seed alone.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generation random number generator.
///
/// Wraps `ChaCha8Rng` for reproducible, platform-independent draws.
/// One stream is created per `generate` call and threaded explicitly
/// through every generation step.
#[derive(Debug, Clone)]
pub struct DungeonRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl DungeonRng {
    /// Create a new RNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Get the seed used to create this RNG.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns a value in `0..n`, or 0 if `n` is 0.
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Returns a value in `lo..=hi`, or `lo` if the range is empty.
    pub fn between(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// Returns true with probability `p` (clamped to `[0, 1]`).
    pub fn chance(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.rng.gen_range(0.0..1.0) < p
    }

    /// Returns true with probability 1/n.
    pub fn one_in(&mut self, n: u32) -> bool {
        self.below(n) == 0
    }

    /// Choose a random element from a slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.below(items.len() as u32) as usize])
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_bounds() {
        let mut rng = DungeonRng::new(42);
        for _ in 0..1000 {
            assert!(rng.below(10) < 10);
        }
        assert_eq!(rng.below(0), 0);
    }

    #[test]
    fn test_between_bounds() {
        let mut rng = DungeonRng::new(42);
        for _ in 0..1000 {
            let n = rng.between(3, 9);
            assert!((3..=9).contains(&n));
        }
        assert_eq!(rng.between(5, 5), 5);
        assert_eq!(rng.between(7, 2), 7);
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = DungeonRng::new(42);
        assert!(!rng.chance(0.0));
        assert!(rng.chance(1.0));
        assert!(!rng.chance(-2.0));
        assert!(rng.chance(3.0));
    }

    #[test]
    fn test_reproducibility() {
        let mut a = DungeonRng::new(42);
        let mut b = DungeonRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.below(100), b.below(100));
        }
    }

    #[test]
    fn test_choose_and_shuffle() {
        let mut rng = DungeonRng::new(7);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());

        let items = [1, 2, 3];
        assert!(items.contains(rng.choose(&items).unwrap()));

        let mut deck: Vec<u32> = (0..16).collect();
        rng.shuffle(&mut deck);
        let mut sorted = deck.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<_>>());
    }
}
