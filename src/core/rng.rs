//! Random sources and the board permutation.
//!
//! The engine never touches a global RNG. Shuffles go through
//! [`RandomSource`], so tests can inject a fixed source and get a known
//! board layout.
//!
//! ```
//! use memory_match::core::{permute, GameRng};
//!
//! let mut rng = GameRng::new(42);
//! let mut cards = vec!["A", "A", "B", "B"];
//! permute(&mut cards, &mut rng);
//!
//! cards.sort();
//! assert_eq!(cards, vec!["A", "A", "B", "B"]);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniformly distributed indices.
pub trait RandomSource {
    /// Return an index uniformly distributed in `0..upper`.
    ///
    /// `upper` is always at least 1.
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Uniform in-place permutation (Fisher-Yates).
///
/// Every ordering is equally likely provided `rng` is uniform.
pub fn permute<T, R: RandomSource + ?Sized>(slice: &mut [T], rng: &mut R) {
    for i in (1..slice.len()).rev() {
        let j = rng.next_index(i + 1);
        debug_assert!(j <= i, "random source returned out-of-range index");
        slice.swap(i, j);
    }
}

/// Seeded ChaCha8 RNG.
///
/// Same seed produces the same sequence of boards.
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

    /// Create an RNG seeded from the thread-local generator.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        permute(slice, self);
    }
}

impl RandomSource for GameRng {
    fn next_index(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper)
    }
}

/// Source that never moves anything: `permute` leaves the slice as-is.
///
/// Handy when a test needs to know where each card lands.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentitySource;

impl RandomSource for IdentitySource {
    fn next_index(&mut self, upper: usize) -> usize {
        upper - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    /// Indices a 52-card Fisher-Yates pass would draw.
    fn draw_sequence(rng: &mut impl RandomSource) -> Vec<usize> {
        (1..=52).rev().map(|upper| rng.next_index(upper)).collect()
    }

    #[test]
    fn test_same_seed_same_indices() {
        let seq1 = draw_sequence(&mut GameRng::new(42));
        let seq2 = draw_sequence(&mut GameRng::new(42));

        assert_eq!(seq1, seq2);
        assert!(seq1.iter().zip((1..=52).rev()).all(|(&i, upper)| i < upper));
    }

    #[test]
    fn test_different_seeds_diverge() {
        let seq1 = draw_sequence(&mut GameRng::new(1));
        let seq2 = draw_sequence(&mut GameRng::new(2));

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_shuffle() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        // Same elements, different order (very likely)
        assert_eq!(data.len(), original.len());
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_identity_source_keeps_order() {
        let mut data = vec!['a', 'b', 'c', 'd'];
        permute(&mut data, &mut IdentitySource);
        assert_eq!(data, vec!['a', 'b', 'c', 'd']);
    }

    #[test]
    fn test_permute_empty_and_single() {
        let mut empty: Vec<u8> = vec![];
        permute(&mut empty, &mut GameRng::new(1));
        assert!(empty.is_empty());

        let mut one = vec![7];
        permute(&mut one, &mut GameRng::new(1));
        assert_eq!(one, vec![7]);
    }

    #[test]
    fn test_permute_is_uniform() {
        let mut rng = GameRng::new(7);
        let mut counts: FxHashMap<[u8; 3], u32> = FxHashMap::default();

        for _ in 0..60_000 {
            let mut data = [0u8, 1, 2];
            permute(&mut data, &mut rng);
            *counts.entry(data).or_insert(0) += 1;
        }

        // 3! orderings, each expected 10_000 times
        assert_eq!(counts.len(), 6);
        for (ordering, count) in counts {
            assert!(
                (9_400..=10_600).contains(&count),
                "ordering {:?} drawn {} times",
                ordering,
                count
            );
        }
    }
}
