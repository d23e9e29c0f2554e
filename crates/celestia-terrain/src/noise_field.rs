//! Seeded 3D coherent noise.

use noise::{NoiseFn, Perlin};

use crate::NoiseSeed;

/// Deterministic 3D gradient noise over a seeded permutation table.
///
/// Output is continuous in all three coordinates and stays within roughly
/// `[-1, 1]`. Two fields built from equal seeds return identical values for
/// identical inputs.
#[derive(Clone, Debug)]
pub struct NoiseField {
    seed: NoiseSeed,
    perlin: Perlin,
}

impl NoiseField {
    /// Build the permutation table for `seed`.
    pub fn new(seed: NoiseSeed) -> Self {
        let perlin = Perlin::new(seed.to_u32());
        Self { seed, perlin }
    }

    /// Sample the field at `(x, y, z)`.
    #[inline]
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.perlin.get([x, y, z])
    }

    /// The seed this field was built from.
    pub fn seed(&self) -> &NoiseSeed {
        &self.seed
    }
}
