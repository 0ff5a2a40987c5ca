//! Seedable simulation RNG.
//!
//! Each session owns one `SimRng`.  Sessions never share RNG state, so the
//! draws of one session cannot be perturbed by another.  Seeding is only
//! reproducible within a single build of the framework; runs are not meant to
//! be replayed across versions.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Session-level RNG.
///
/// Used only from the thread currently holding the session, so no
/// synchronisation is needed.  Derive independent streams with
/// [`child`](Self::child).
#[derive(Debug, Clone)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from the operating system's entropy source.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// Derive an independent child stream.  Per-session RNGs are seeded this
    /// way from a controller's root seed.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Percent roll: draws a uniform integer in `[0, 100)` and returns `true`
    /// if it is below `rate`.  A rate of 0 never fires, 100 always does.
    #[inline]
    pub fn roll_percent(&mut self, rate: i64) -> bool {
        self.0.gen_range(0..100) < rate
    }

    /// `amount` distinct indices from `0..length`, in random order.
    ///
    /// Memory grows with `amount`, not `length`, unless `amount` is a large
    /// share of `length`.  Returns `None` if `amount > length`.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Option<Vec<usize>> {
        if amount > length {
            return None;
        }
        Some(rand::seq::index::sample(&mut self.0, length, amount).into_vec())
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
