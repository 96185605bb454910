/// Pluggable randomness for the generator
///
/// Sampling code only talks to `RandomSource`, so a seeded `StdRng` gives a
/// reproducible file and anything else implementing `rand::Rng` works too.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform float in [0, 1)
    fn next_uniform_float(&mut self) -> f64;

    /// Uniform integer in [lo, hi], both bounds inclusive
    fn next_int(&mut self, lo: i64, hi: i64) -> i64;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_uniform_float(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn next_int(&mut self, lo: i64, hi: i64) -> i64 {
        self.gen_range(lo..=hi)
    }
}

/// Reproducible source for a given seed
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn from_entropy() -> StdRng {
    StdRng::from_entropy()
}
