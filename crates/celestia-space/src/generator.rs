//! Seeded procedural solar systems.
//!
//! A single ChaCha8 stream, seeded from the system seed, makes every random
//! choice in a fixed order before any mesh is built. The same seed and
//! configuration therefore always plan the same system, whatever the thread
//! count used for meshing afterwards.

use std::ops::RangeInclusive;

use celestia_body::{
    AtmosphereSettings, BodyId, BodyKind, BodySettings, CelestialBody, RotationSettings,
};
use celestia_config::{Config, GeneratorConfig};
use celestia_cubesphere::MIN_RESOLUTION;
use celestia_terrain::{NoiseSeed, generated_biome_layers, seeded_rng};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::{NameGenerator, SolarSystem, SystemError, WordList, romanize};

/// A moon drawn before its planet is placed.
struct MoonPlan {
    settings: BodySettings,
    distance: f64,
    start_angle: f64,
    period_seconds: f64,
    reversed: bool,
}

/// Builds random solar systems within [`GeneratorConfig`] ranges.
#[derive(Clone, Debug)]
pub struct SystemGenerator {
    config: GeneratorConfig,
    names: NameGenerator,
    weld_vertices: bool,
}

impl SystemGenerator {
    /// # Errors
    ///
    /// [`SystemError::Config`] if a range in `config` is unusable.
    pub fn new(config: GeneratorConfig) -> Result<Self, SystemError> {
        config.validate()?;
        Ok(Self {
            config,
            names: NameGenerator::default(),
            weld_vertices: true,
        })
    }

    /// Generator ranges and weld flag from a loaded configuration.
    ///
    /// # Errors
    ///
    /// [`SystemError::Config`] if a range in `config.generator` is unusable.
    pub fn from_config(config: &Config) -> Result<Self, SystemError> {
        Ok(Self::new(config.generator.clone())?.with_weld_vertices(config.system.weld_vertices))
    }

    /// Reject names that collide with these words.
    #[must_use]
    pub fn with_word_list(mut self, words: WordList) -> Self {
        self.names = NameGenerator::new(words);
        self
    }

    #[must_use]
    pub fn with_weld_vertices(mut self, weld: bool) -> Self {
        self.weld_vertices = weld;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Plan and mesh a full system.
    ///
    /// # Errors
    ///
    /// Propagates any [`SystemError`] from planning or mesh generation.
    pub fn generate(&self, seed: &NoiseSeed) -> Result<SolarSystem, SystemError> {
        let mut system = self.plan(seed)?;
        system.generate_all()?;
        Ok(system)
    }

    /// Draw every body, size, and orbit for `seed` without building meshes.
    ///
    /// Bodies are placed at simulated time zero.
    ///
    /// # Errors
    ///
    /// [`SystemError::Body`] if a drawn body fails validation.
    pub fn plan(&self, seed: &NoiseSeed) -> Result<SolarSystem, SystemError> {
        let c = &self.config;
        let mut rng = seeded_rng(seed);
        let mut system = SolarSystem::new();

        let sun_radius = rng.random_range(range(c.sun_size));
        let sun_settings = BodySettings::builder()
            .seed(rng.random::<u64>())
            .minimal_centre(sun_radius)
            .resolution(self.resolution_for(sun_radius))
            .without_water()
            .without_atmosphere()
            .rotation(self.draw_rotation(&mut rng))
            .build();
        let sun_name = self.names.next_name(&mut rng);
        let sun = self.add(&mut system, BodyKind::Sun, sun_name, sun_settings)?;
        let mut accumulated = system.body(sun)?.settings().surface_bound(BodyKind::Sun);

        let planet_count = rng.random_range(c.planet_count.0..=c.planet_count.1);
        for _ in 0..planet_count {
            let planet_radius = rng.random_range(range(c.planet_size));
            let planet_settings = self.draw_surface(&mut rng, planet_radius);
            let planet_name = self.names.next_name(&mut rng);

            let moon_count = rng.random_range(c.moons_per_planet.0..=c.moons_per_planet.1);
            let mut moon_extent = planet_settings.surface_bound(BodyKind::Planet);
            let moons: Vec<MoonPlan> = (0..moon_count)
                .map(|_| {
                    let max_size = (planet_radius * c.moon_max_size_of_parent).max(c.moon_min_size);
                    let radius = rng.random_range(c.moon_min_size..=max_size);
                    let settings = self.draw_surface(&mut rng, radius);
                    let bound = settings.surface_bound(BodyKind::Moon);
                    let distance = moon_extent + rng.random_range(range(c.moon_spacing)) + bound;
                    moon_extent = distance + bound;
                    MoonPlan {
                        settings,
                        distance,
                        start_angle: rng.random_range(0.0..360.0),
                        period_seconds: f64::from(
                            rng.random_range(c.moon_period.0..=c.moon_period.1),
                        ),
                        reversed: rng.random_bool(c.reversed_orbit_chance),
                    }
                })
                .collect();

            let distance = accumulated + rng.random_range(range(c.planet_spacing)) + moon_extent;
            accumulated = distance + moon_extent;
            let start_angle = rng.random_range(0.0..360.0);
            let period_seconds = rng.random_range(range(c.planet_period));
            let reversed = rng.random_bool(c.reversed_orbit_chance);

            let planet = self.add(&mut system, BodyKind::Planet, planet_name.clone(), planet_settings)?;
            system.attach_to_barycenter(planet, distance, start_angle, period_seconds, reversed)?;
            debug!(
                "Planet '{}' at distance {:.2} with {} moons",
                planet_name, distance, moon_count
            );

            for (i, moon) in (1u32..).zip(moons) {
                let name = format!("{planet_name} {}", romanize(i));
                let id = self.add(&mut system, BodyKind::Moon, name, moon.settings)?;
                system.attach_to_body(
                    id,
                    planet,
                    moon.distance,
                    moon.start_angle,
                    moon.period_seconds,
                    moon.reversed,
                )?;
            }
        }

        system.update_at(0.0);
        info!(
            "Planned system '{}': {} bodies, {} planets, outer edge {:.2}",
            seed,
            system.len(),
            planet_count,
            accumulated
        );
        Ok(system)
    }

    fn add(
        &self,
        system: &mut SolarSystem,
        kind: BodyKind,
        name: String,
        settings: BodySettings,
    ) -> Result<BodyId, SystemError> {
        let mut body = CelestialBody::new(kind, name, settings)?;
        body.set_weld_vertices(self.weld_vertices);
        Ok(system.add_body(body))
    }

    /// Mesh density for a base radius, at least the mesher's minimum.
    pub fn resolution_for(&self, radius: f64) -> u32 {
        let scaled = (radius * self.config.resolution_per_unit).floor();
        (scaled as u32)
            .min(self.config.max_resolution)
            .max(MIN_RESOLUTION)
    }

    /// Settings for a planet or moon with terrain, water, and an atmosphere.
    fn draw_surface(&self, rng: &mut ChaCha8Rng, radius: f64) -> BodySettings {
        let c = &self.config;
        let seed = rng.random::<u64>();
        let strength = rng.random_range(range(c.terrain_strength));
        let roughness = rng.random_range(range(c.terrain_roughness));
        let water_level = rng.random_range(range(c.water_level));
        let atmosphere = AtmosphereSettings {
            wave_length_red: rng.random_range(range(c.wave_length_red)),
            wave_length_green: rng.random_range(range(c.wave_length_green)),
            wave_length_blue: rng.random_range(range(c.wave_length_blue)),
            scattering_strength: c.scattering_strength,
            fall_off: rng.random_range(range(c.atmosphere_fall_off)),
            intensity: rng.random_range(range(c.atmosphere_intensity)),
            ..Default::default()
        };

        BodySettings::builder()
            .seed(seed)
            .minimal_centre(radius)
            .resolution(self.resolution_for(radius))
            .strength(strength)
            .roughness(roughness)
            .water_level(water_level)
            .atmosphere(atmosphere)
            .biome_layers(generated_biome_layers())
            .rotation(self.draw_rotation(rng))
            .build()
    }

    fn draw_rotation(&self, rng: &mut ChaCha8Rng) -> RotationSettings {
        let period = self.config.max_rotation_period;
        let tilt = self.config.max_axis_tilt;
        RotationSettings {
            period_seconds: rng.random_range(-period..=period),
            axis_tilt: rng.random_range(-tilt..=tilt),
            period_start_angle: 0.0,
        }
    }
}

fn range((min, max): (f64, f64)) -> RangeInclusive<f64> {
    min..=max
}
