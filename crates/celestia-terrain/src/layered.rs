//! Weight-gated layered noise elevation.
//!
//! Stacks layers of [`NoiseField`] samples at rising frequency and falling
//! amplitude. Each layer's squared value gates the next: once a layer leaves
//! the open interval `(0, 1)` after scaling by the weight multiplicator, every
//! following layer contributes nothing. This yields plateau-like terrain
//! instead of unbounded accumulation.

use celestia_cubesphere::{ElevationSource, MAX_SURFACE_RADIUS};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::{NoiseField, TerrainError};

/// Shape parameters for layered terrain noise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Number of noise layers. Must be at least 1.
    pub layers: u32,
    /// Base frequency, and the frequency multiplier between layers.
    pub roughness: f64,
    /// Amplitude multiplier between layers.
    pub persistence: f64,
    /// Scale applied to a layer's value before the weight gate test.
    pub weight_multiplicator: f64,
    /// Overall height multiplier of the summed layers.
    pub strength: f64,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            layers: 10,
            roughness: 3.0,
            persistence: 0.4,
            weight_multiplicator: 2.0,
            strength: 1.0,
        }
    }
}

impl TerrainSettings {
    /// Check the settings can produce a terrain signal.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidLayers`] when `layers` is zero.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.layers < 1 {
            return Err(TerrainError::InvalidLayers(self.layers));
        }
        Ok(())
    }
}

/// Terrain elevation over the unit sphere for one body.
#[derive(Clone, Debug)]
pub struct LayeredElevation {
    noise: NoiseField,
    terrain: TerrainSettings,
    minimal_centre: f64,
    floor: f64,
}

impl LayeredElevation {
    /// Bind terrain settings to a noise field.
    ///
    /// `water_level_offset`, when present, raises the clamp floor from
    /// `minimal_centre` to `minimal_centre + offset` so that submerged terrain
    /// is flattened onto the water line.
    ///
    /// # Errors
    ///
    /// Propagates [`TerrainSettings::validate`] failures.
    pub fn new(
        noise: NoiseField,
        terrain: TerrainSettings,
        minimal_centre: f64,
        water_level_offset: Option<f64>,
    ) -> Result<Self, TerrainError> {
        terrain.validate()?;
        let floor = minimal_centre + water_level_offset.unwrap_or(0.0);
        Ok(Self {
            noise,
            terrain,
            minimal_centre,
            floor,
        })
    }

    /// Lower clamp bound for every elevation.
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Sum of the gated layers at `unit`, before strength and base radius.
    pub fn layered_noise(&self, unit: DVec3) -> f64 {
        let t = &self.terrain;
        let mut frequency = t.roughness;
        let mut amplitude = 1.0;
        let mut total = 0.0;
        let mut weight = 1.0;

        for _ in 0..t.layers {
            let p = unit * frequency;
            let mut n = self.noise.sample(p.x, p.y, p.z);
            n = n * n * weight;

            let gated = n * t.weight_multiplicator;
            weight = if gated < 1.0 && gated > 0.0 { 1.0 } else { 0.0 };

            total += n * amplitude;
            frequency *= t.roughness;
            amplitude *= t.persistence;
        }

        total
    }
}

impl ElevationSource for LayeredElevation {
    fn elevation(&self, unit: DVec3) -> f64 {
        let radius = self.layered_noise(unit) * self.terrain.strength + self.minimal_centre;
        radius.max(self.floor).min(MAX_SURFACE_RADIUS)
    }
}
