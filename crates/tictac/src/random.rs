//! Injectable randomness for the move oracle.

use rand::Rng;

/// Source of the two random draws the oracle makes.
///
/// Implementations must return `unit()` in `[0, 1)` and `index(len)` in
/// `0..len`. Tests stub this to force either strategy.
pub trait RandomSource {
    /// Draws a float uniformly from `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Draws an index uniformly from `0..len`. `len` is never zero.
    fn index(&mut self, len: usize) -> usize;
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wraps a random number generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<rand::rngs::StdRng> {
    /// A reproducible source seeded from `seed`.
    pub fn seeded(seed: u64) -> Self {
        use rand::SeedableRng;
        Self::new(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// A source seeded from the operating system.
    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self::new(rand::rngs::StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}
