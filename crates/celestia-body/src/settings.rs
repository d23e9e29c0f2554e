//! Body settings and their builder.
//!
//! Every group has a default matching a temperate, Earth-like body. Overrides
//! go through [`BodySettingsBuilder`], so partial configuration never needs
//! to merge loosely typed data.

use celestia_cubesphere::{MAX_SURFACE_RADIUS, MIN_RESOLUTION};
use celestia_terrain::{BiomeData, BiomeSettings, NoiseSeed, TerrainSettings};
use serde::{Deserialize, Serialize};

use crate::{BodyError, BodyKind};

/// Base radius and mesh density.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeSettings {
    /// Radius of the undisplaced sphere.
    pub minimal_centre: f64,
    /// Vertices per face edge.
    pub resolution: u32,
}

impl Default for SizeSettings {
    fn default() -> Self {
        Self {
            minimal_centre: 15.0,
            resolution: 300,
        }
    }
}

/// Water line height above the base radius.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterSettings {
    pub level_offset: f64,
}

impl Default for WaterSettings {
    fn default() -> Self {
        Self { level_offset: 0.35 }
    }
}

/// Rayleigh-style scattering parameters for an atmosphere shell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereSettings {
    /// Wavelengths in nanometres; shorter wavelengths scatter more.
    pub wave_length_red: f64,
    pub wave_length_green: f64,
    pub wave_length_blue: f64,
    pub scattering_strength: f64,
    /// Shell thickness as a fraction of the body radius.
    pub scale: f64,
    /// Density falloff with altitude.
    pub fall_off: f64,
    pub intensity: f64,
}

impl Default for AtmosphereSettings {
    fn default() -> Self {
        Self {
            wave_length_red: 700.0,
            wave_length_green: 530.0,
            wave_length_blue: 460.0,
            scattering_strength: 20.0,
            scale: 1.0,
            fall_off: 0.25,
            intensity: 1.0,
        }
    }
}

/// Self-rotation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationSettings {
    /// Tilt about the X axis, in degrees.
    pub axis_tilt: f64,
    /// Seconds per full turn. Negative values spin the other way.
    pub period_seconds: f64,
    /// Rotation at time zero, in degrees.
    pub period_start_angle: f64,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            axis_tilt: 15.0,
            period_seconds: 10.0,
            period_start_angle: 0.0,
        }
    }
}

/// Complete parameter set for one body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySettings {
    pub seed: NoiseSeed,
    pub size: SizeSettings,
    pub terrain: TerrainSettings,
    pub water: Option<WaterSettings>,
    pub atmosphere: Option<AtmosphereSettings>,
    pub biomes: BiomeSettings,
    pub rotation: RotationSettings,
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            seed: NoiseSeed::default(),
            size: SizeSettings::default(),
            terrain: TerrainSettings::default(),
            water: Some(WaterSettings::default()),
            atmosphere: Some(AtmosphereSettings::default()),
            biomes: BiomeSettings::default(),
            rotation: RotationSettings::default(),
        }
    }
}

impl BodySettings {
    /// Start from the defaults and override selectively.
    pub fn builder() -> BodySettingsBuilder {
        BodySettingsBuilder::default()
    }

    /// Radius of the water line, if the body has water.
    pub fn water_radius(&self) -> Option<f64> {
        self.water
            .as_ref()
            .map(|w| self.size.minimal_centre + w.level_offset)
    }

    /// Water line a body of `kind` is meshed against. Suns have none.
    pub fn surface_water_radius(&self, kind: BodyKind) -> Option<f64> {
        if kind.has_terrain() {
            self.water_radius()
        } else {
            None
        }
    }

    /// Upper bound on the generated surface radius for a body of `kind`.
    ///
    /// Layered noise never exceeds `strength · Σ persistenceⁱ` above the base
    /// radius, so this bound is known before any mesh is built.
    pub fn surface_bound(&self, kind: BodyKind) -> f64 {
        let centre = self.size.minimal_centre;
        if !kind.has_terrain() {
            return centre;
        }
        let terrain = &self.terrain;
        let mut amplitude = 1.0;
        let mut relief = 0.0;
        for _ in 0..terrain.layers {
            relief += amplitude;
            amplitude *= terrain.persistence.abs();
        }
        let bound = (centre + terrain.strength.abs() * relief).max(self.water_radius().unwrap_or(centre));
        bound.min(MAX_SURFACE_RADIUS)
    }

    /// Check the settings for a body of `kind`.
    ///
    /// Suns are flat spheres, so their terrain and biome groups are not checked.
    ///
    /// # Errors
    ///
    /// Returns the first [`BodyError`] found.
    pub fn validate(&self, kind: BodyKind) -> Result<(), BodyError> {
        if self.size.resolution < MIN_RESOLUTION {
            return Err(BodyError::InvalidResolution(self.size.resolution));
        }
        let centre = self.size.minimal_centre;
        if !centre.is_finite() || centre <= 0.0 || centre > MAX_SURFACE_RADIUS {
            return Err(BodyError::InvalidMinimalCentre(centre));
        }
        if let Some(water) = &self.water {
            if !water.level_offset.is_finite() || water.level_offset < 0.0 {
                return Err(BodyError::InvalidWaterOffset(water.level_offset));
            }
        }
        if self
            .surface_water_radius(kind)
            .is_some_and(|water| water > MAX_SURFACE_RADIUS)
        {
            let offset = self.water.as_ref().map_or(0.0, |w| w.level_offset);
            return Err(BodyError::InvalidWaterOffset(offset));
        }
        if kind != BodyKind::Sun {
            self.terrain.validate()?;
            self.biomes.validate()?;
        }
        Ok(())
    }
}

/// Typed overrides on top of [`BodySettings::default`].
#[derive(Clone, Debug, Default)]
pub struct BodySettingsBuilder {
    settings: BodySettings,
}

impl BodySettingsBuilder {
    #[must_use]
    pub fn seed(mut self, seed: impl Into<NoiseSeed>) -> Self {
        self.settings.seed = seed.into();
        self
    }

    #[must_use]
    pub fn minimal_centre(mut self, radius: f64) -> Self {
        self.settings.size.minimal_centre = radius;
        self
    }

    #[must_use]
    pub fn resolution(mut self, resolution: u32) -> Self {
        self.settings.size.resolution = resolution;
        self
    }

    #[must_use]
    pub fn terrain(mut self, terrain: TerrainSettings) -> Self {
        self.settings.terrain = terrain;
        self
    }

    #[must_use]
    pub fn layers(mut self, layers: u32) -> Self {
        self.settings.terrain.layers = layers;
        self
    }

    #[must_use]
    pub fn roughness(mut self, roughness: f64) -> Self {
        self.settings.terrain.roughness = roughness;
        self
    }

    #[must_use]
    pub fn persistence(mut self, persistence: f64) -> Self {
        self.settings.terrain.persistence = persistence;
        self
    }

    #[must_use]
    pub fn weight_multiplicator(mut self, weight: f64) -> Self {
        self.settings.terrain.weight_multiplicator = weight;
        self
    }

    #[must_use]
    pub fn strength(mut self, strength: f64) -> Self {
        self.settings.terrain.strength = strength;
        self
    }

    /// Enable water at `level_offset` above the base radius.
    #[must_use]
    pub fn water_level(mut self, level_offset: f64) -> Self {
        self.settings.water = Some(WaterSettings { level_offset });
        self
    }

    #[must_use]
    pub fn without_water(mut self) -> Self {
        self.settings.water = None;
        self
    }

    #[must_use]
    pub fn atmosphere(mut self, atmosphere: AtmosphereSettings) -> Self {
        self.settings.atmosphere = Some(atmosphere);
        self
    }

    #[must_use]
    pub fn without_atmosphere(mut self) -> Self {
        self.settings.atmosphere = None;
        self
    }

    #[must_use]
    pub fn biomes(mut self, biomes: BiomeSettings) -> Self {
        self.settings.biomes = biomes;
        self
    }

    /// Replace the biome rows, keeping the blend parameters.
    #[must_use]
    pub fn biome_layers(mut self, layers: Vec<BiomeData>) -> Self {
        self.settings.biomes.layers = layers;
        self
    }

    #[must_use]
    pub fn rotation(mut self, rotation: RotationSettings) -> Self {
        self.settings.rotation = rotation;
        self
    }

    #[must_use]
    pub fn axis_tilt(mut self, degrees: f64) -> Self {
        self.settings.rotation.axis_tilt = degrees;
        self
    }

    #[must_use]
    pub fn rotation_period(mut self, seconds: f64) -> Self {
        self.settings.rotation.period_seconds = seconds;
        self
    }

    pub fn build(self) -> BodySettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use celestia_terrain::TerrainError;

    #[test]
    fn test_defaults() {
        let s = BodySettings::default();
        assert_eq!(s.size.minimal_centre, 15.0);
        assert_eq!(s.size.resolution, 300);
        assert_eq!(s.terrain.layers, 10);
        assert_eq!(s.water, Some(WaterSettings { level_offset: 0.35 }));
        assert_eq!(s.atmosphere.as_ref().map(|a| a.wave_length_red), Some(700.0));
        assert_eq!(s.rotation.axis_tilt, 15.0);
        assert_eq!(s.biomes.layers.len(), 3);
        assert!(s.validate(BodyKind::Planet).is_ok());
    }

    #[test]
    fn test_builder_overrides_only_named_fields() {
        let s = BodySettings::builder()
            .seed("test")
            .minimal_centre(15.0)
            .resolution(50)
            .layers(3)
            .water_level(0.15)
            .build();
        assert_eq!(s.seed, NoiseSeed::from("test"));
        assert_eq!(s.size.resolution, 50);
        assert_eq!(s.terrain.layers, 3);
        assert_eq!(s.terrain.roughness, 3.0);
        assert_eq!(s.water_radius(), Some(15.15));
    }

    #[test]
    fn test_resolution_validation() {
        let s = BodySettings::builder().resolution(1).build();
        assert_eq!(s.validate(BodyKind::Planet), Err(BodyError::InvalidResolution(1)));
    }

    #[test]
    fn test_minimal_centre_validation() {
        for bad in [0.0, -2.0, f64::NAN, 150.0] {
            let s = BodySettings::builder().minimal_centre(bad).build();
            assert!(
                matches!(s.validate(BodyKind::Moon), Err(BodyError::InvalidMinimalCentre(_))),
                "centre {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_negative_water_rejected() {
        let s = BodySettings::builder().water_level(-0.1).build();
        assert_eq!(s.validate(BodyKind::Planet), Err(BodyError::InvalidWaterOffset(-0.1)));
    }

    #[test]
    fn test_water_above_ceiling_rejected() {
        let s = BodySettings::builder()
            .minimal_centre(99.0)
            .water_level(5.0)
            .build();
        assert_eq!(
            s.validate(BodyKind::Planet),
            Err(BodyError::InvalidWaterOffset(5.0))
        );
        assert!(s.validate(BodyKind::Sun).is_ok());

        let at_ceiling = BodySettings::builder()
            .minimal_centre(99.0)
            .water_level(1.0)
            .build();
        assert!(at_ceiling.validate(BodyKind::Moon).is_ok());
    }

    #[test]
    fn test_suns_have_no_water_line() {
        let s = BodySettings::default();
        assert_eq!(s.surface_water_radius(BodyKind::Sun), None);
        assert_eq!(s.surface_water_radius(BodyKind::Planet), s.water_radius());
    }

    #[test]
    fn test_sun_skips_terrain_validation() {
        let s = BodySettings::builder().layers(0).biome_layers(Vec::new()).build();
        assert!(s.validate(BodyKind::Sun).is_ok());
        assert_eq!(
            s.validate(BodyKind::Planet),
            Err(BodyError::InvalidTerrain(TerrainError::InvalidLayers(0)))
        );
    }

    #[test]
    fn test_surface_bound() {
        let s = BodySettings::builder()
            .minimal_centre(10.0)
            .layers(2)
            .persistence(0.5)
            .strength(2.0)
            .water_level(0.5)
            .build();
        assert!((s.surface_bound(BodyKind::Planet) - 13.0).abs() < 1e-12);
        assert_eq!(s.surface_bound(BodyKind::Sun), 10.0);

        let flooded = BodySettings::builder()
            .minimal_centre(10.0)
            .strength(0.0)
            .water_level(2.0)
            .build();
        assert_eq!(flooded.surface_bound(BodyKind::Moon), 12.0);

        let huge = BodySettings::builder().minimal_centre(99.0).strength(10.0).build();
        assert_eq!(huge.surface_bound(BodyKind::Planet), MAX_SURFACE_RADIUS);
    }

    #[test]
    fn test_no_water_radius_without_water() {
        let s = BodySettings::builder().without_water().build();
        assert_eq!(s.water_radius(), None);
    }

    #[test]
    fn test_partial_ron_fills_defaults() {
        let s: BodySettings = ron::from_str("(size: (resolution: 20))").unwrap();
        assert_eq!(s.size.resolution, 20);
        assert_eq!(s.size.minimal_centre, 15.0);
        assert_eq!(s.rotation, RotationSettings::default());
    }
}
