//! Random number generation for dice and game ids.
//!
//! ## Key Features
//!
//! - **Uniform**: faces are drawn with `gen_range`, never by modulo reduction
//! - **Deterministic when seeded**: same seed produces identical rolls (tests)
//! - **Entropy-seeded in production**: `from_entropy()` for live games
//!
//! ```
//! use liars_dice::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let face = rng.roll_face();
//! assert!((1..=6).contains(&face));
//!
//! let mut replay = GameRng::new(42);
//! assert_eq!(replay.roll_face(), face);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::die::{MAX_FACE, MIN_FACE};

/// RNG used for every random decision in a game.
///
/// Uses ChaCha8 for speed while keeping statistically uniform output.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Roll one die face, uniform over `1..=6`.
    pub fn roll_face(&mut self) -> u8 {
        self.inner.gen_range(MIN_FACE..=MAX_FACE)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll_face(), rng2.roll_face());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..20).map(|_| rng1.roll_face()).collect();
        let seq2: Vec<_> = (0..20).map(|_| rng2.roll_face()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_roll_face_in_range() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            let face = rng.roll_face();
            assert!((MIN_FACE..=MAX_FACE).contains(&face));
        }
    }

    #[test]
    fn test_gen_range_usize() {
        let mut rng = GameRng::new(7);
        for _ in 0..100 {
            assert!(rng.gen_range_usize(0..20) < 20);
        }
    }
}
