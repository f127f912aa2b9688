//! Deterministic random number generation for level synthesis.
//!
//! Level generation and room-id allocation both draw from a `LevelRng`
//! that the caller owns. Threading the source explicitly makes every
//! generated level reproducible from its seed.
//!
//! ```
//! use axis_pals::core::LevelRng;
//!
//! let mut a = LevelRng::new(7);
//! let mut b = LevelRng::new(7);
//! assert_eq!(a.gen_range_usize(0..100), b.gen_range_usize(0..100));
//!
//! // Each fork gets its own reproducible stream.
//! let fork_a = a.fork();
//! let fork_b = b.fork();
//! assert_eq!(fork_a.seed(), fork_b.seed());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable RNG with deterministic forking.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct LevelRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl LevelRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from OS entropy.
    ///
    /// The chosen seed is still recorded, so a surprising level can be
    /// replayed from `seed()`.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork an independent stream.
    ///
    /// The generator forks once per attempt, so attempt `n` of a seed is
    /// reproducible on its own.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a random boolean with given probability of true.
    ///
    /// The probability is clamped to `[0, 1]`.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        if probability.is_nan() || probability <= 0.0 {
            return false;
        }
        self.inner.gen_bool(probability.min(1.0))
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = LevelRng::new(42);
        let mut rng2 = LevelRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = LevelRng::new(1);
        let mut rng2 = LevelRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_produces_different_sequence() {
        let mut rng = LevelRng::new(42);
        let mut forked = rng.fork();

        let seq1: Vec<_> = (0..10).map(|_| rng.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| forked.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = LevelRng::new(42);
        let mut rng2 = LevelRng::new(42);

        let _ = rng1.fork();
        let _ = rng2.fork();
        assert_eq!(rng1.fork().seed(), rng2.fork().seed());
    }

    #[test]
    fn test_gen_bool_extremes() {
        let mut rng = LevelRng::new(9);
        for _ in 0..50 {
            assert!(!rng.gen_bool(0.0));
            assert!(!rng.gen_bool(-1.0));
            assert!(!rng.gen_bool(f64::NAN));
            assert!(rng.gen_bool(1.0));
            assert!(rng.gen_bool(3.5));
        }
    }

    #[test]
    fn test_choose() {
        let mut rng = LevelRng::new(42);
        let items = vec![1, 2, 3, 4, 5];

        let chosen = rng.choose(&items);
        assert!(chosen.is_some());
        assert!(items.contains(chosen.unwrap()));

        let empty: Vec<i32> = vec![];
        assert!(rng.choose(&empty).is_none());
    }
}
