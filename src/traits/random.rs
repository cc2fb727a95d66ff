//! Random source abstraction for testable randomness.
//!
//! Bidder name generation, prediction-target selection, and the heuristic
//! predictor all draw from a [`RandomSource`] so they stay deterministic
//! under test.

use rand::Rng;

/// Trait for providing random values.
pub trait RandomSource: Send + Sync {
    /// Pick a uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&self, len: usize) -> usize;

    /// A uniform value in `[0, 1)`.
    fn unit(&self) -> f64;
}

/// Production implementation using the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRng;

impl RandomSource for ThreadRng {
    fn pick_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }

    fn unit(&self) -> f64 {
        rand::thread_rng().gen_range(0.0..1.0)
    }
}

impl ThreadRng {
    pub fn new() -> Self {
        Self
    }
}
