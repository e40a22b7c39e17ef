//! Randomness source for test case selection and framing
//!
//! The selector never touches a process-wide generator. Production runs use
//! [`RngSource`] over an entropy-seeded `StdRng`; tests pass a seeded one or
//! their own [`RandomSource`] with fixed answers.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Draws needed to pick and frame one test case
pub trait RandomSource: Send {
    /// `true` with the given probability
    fn chance(&mut self, probability: f64) -> bool;

    /// Uniform index below `len`; `len` is never zero
    fn index(&mut self, len: usize) -> usize;

    /// Uniform value in `0..=max`
    fn up_to(&mut self, max: u64) -> u64;

    /// Generator for frame-level draws (sequence number, corrupted checksum)
    fn frame_rng(&mut self) -> &mut dyn RngCore;
}

/// [`RandomSource`] backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Reproducible source, for replaying a fuzz run
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore + Send> RandomSource for RngSource<R> {
    fn chance(&mut self, probability: f64) -> bool {
        self.0.gen_bool(probability)
    }

    fn index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }

    fn up_to(&mut self, max: u64) -> u64 {
        self.0.gen_range(0..=max)
    }

    fn frame_rng(&mut self) -> &mut dyn RngCore {
        &mut self.0
    }
}
