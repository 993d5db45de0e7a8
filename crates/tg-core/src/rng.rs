//! Deterministic RNG for simulation and test point generation.
//!
//! Every sampler in this workspace takes a `&mut GeoRng` rather than reaching
//! for a thread-local generator, so a seed fully determines a generated
//! tourist population.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded `SmallRng` wrapper.
///
/// Not `Sync`.  Give each thread its own child via [`GeoRng::child`].
pub struct GeoRng(SmallRng);

impl GeoRng {
    pub fn new(seed: u64) -> Self {
        GeoRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent generator, e.g. one per simulated tourist.
    pub fn child(&mut self, offset: u64) -> GeoRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        GeoRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
