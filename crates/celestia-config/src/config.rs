//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Simulation settings.
    pub system: SystemConfig,
    /// Ranges and counts for procedural systems.
    pub generator: GeneratorConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SystemConfig {
    /// Seed for the whole system. Digits-only values are used as numbers.
    pub seed: String,
    /// Simulated seconds per real second.
    pub speed_multiplier: f64,
    /// Draw orbit rings.
    pub show_orbits: bool,
    /// Merge duplicated seam vertices in generated meshes.
    pub weld_vertices: bool,
}

/// Ranges the system generator draws from. Every `(min, max)` pair is inclusive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of planets around the sun.
    pub planet_count: (u32, u32),
    /// Number of moons around each planet.
    pub moons_per_planet: (u32, u32),
    /// Sun base radius.
    pub sun_size: (f64, f64),
    /// Planet base radius.
    pub planet_size: (f64, f64),
    /// Smallest moon base radius.
    pub moon_min_size: f64,
    /// Largest moon base radius as a fraction of its planet's.
    pub moon_max_size_of_parent: f64,
    /// Gap between neighbouring planet extents.
    pub planet_spacing: (f64, f64),
    /// Gap between neighbouring moon orbits.
    pub moon_spacing: (f64, f64),
    /// Seconds per planet revolution around the barycenter.
    pub planet_period: (f64, f64),
    /// Whole seconds per moon revolution.
    pub moon_period: (u32, u32),
    /// Self-rotation period is drawn from `[-max, max]`.
    pub max_rotation_period: f64,
    /// Axis tilt is drawn from `[-max, max]` degrees.
    pub max_axis_tilt: f64,
    /// Chance an orbit runs clockwise.
    pub reversed_orbit_chance: f64,
    /// Mesh resolution is `base radius × this`, capped at `max_resolution`.
    pub resolution_per_unit: f64,
    pub max_resolution: u32,
    pub water_level: (f64, f64),
    pub terrain_strength: (f64, f64),
    pub terrain_roughness: (f64, f64),
    pub wave_length_red: (f64, f64),
    pub wave_length_green: (f64, f64),
    pub wave_length_blue: (f64, f64),
    pub scattering_strength: f64,
    pub atmosphere_fall_off: (f64, f64),
    pub atmosphere_intensity: (f64, f64),
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            seed: "celestia".to_string(),
            speed_multiplier: 1.0,
            show_orbits: true,
            weld_vertices: true,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            planet_count: (1, 3),
            moons_per_planet: (0, 2),
            sun_size: (20.0, 30.0),
            planet_size: (5.0, 20.0),
            moon_min_size: 0.25,
            moon_max_size_of_parent: 0.75,
            planet_spacing: (40.0, 120.0),
            moon_spacing: (20.0, 100.0),
            planet_period: (120.0, 600.0),
            moon_period: (10, 60),
            max_rotation_period: 60.0,
            max_axis_tilt: 15.0,
            reversed_orbit_chance: 0.2,
            resolution_per_unit: 10.0,
            max_resolution: 100,
            water_level: (0.2, 0.5),
            terrain_strength: (0.8, 1.2),
            terrain_roughness: (2.5, 3.5),
            wave_length_red: (0.0, 1500.0),
            wave_length_green: (0.0, 1000.0),
            wave_length_blue: (0.0, 1000.0),
            scattering_strength: 2.0,
            atmosphere_fall_off: (10.0, 40.0),
            atmosphere_intensity: (1.0, 2.0),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Validation ---

fn check_range(field: &'static str, (min, max): (f64, f64)) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { field, min, max })
    }
}

fn check_count(field: &'static str, (min, max): (u32, u32)) -> Result<(), ConfigError> {
    check_range(field, (f64::from(min), f64::from(max)))
}

impl GeneratorConfig {
    /// Check every range is ordered and finite, and the scalar knobs are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRange`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_count("planet_count", self.planet_count)?;
        check_count("moons_per_planet", self.moons_per_planet)?;
        check_count("moon_period", self.moon_period)?;
        for (field, range) in [
            ("sun_size", self.sun_size),
            ("planet_size", self.planet_size),
            ("planet_spacing", self.planet_spacing),
            ("moon_spacing", self.moon_spacing),
            ("planet_period", self.planet_period),
            ("water_level", self.water_level),
            ("terrain_strength", self.terrain_strength),
            ("terrain_roughness", self.terrain_roughness),
            ("wave_length_red", self.wave_length_red),
            ("wave_length_green", self.wave_length_green),
            ("wave_length_blue", self.wave_length_blue),
            ("atmosphere_fall_off", self.atmosphere_fall_off),
            ("atmosphere_intensity", self.atmosphere_intensity),
        ] {
            check_range(field, range)?;
        }
        for (field, value) in [
            ("max_rotation_period", self.max_rotation_period),
            ("max_axis_tilt", self.max_axis_tilt),
            ("resolution_per_unit", self.resolution_per_unit),
            ("moon_max_size_of_parent", self.moon_max_size_of_parent),
        ] {
            check_range(field, (0.0, value))?;
        }
        if !(0.0..=1.0).contains(&self.reversed_orbit_chance) {
            return Err(ConfigError::InvalidRange {
                field: "reversed_orbit_chance",
                min: 0.0,
                max: self.reversed_orbit_chance,
            });
        }
        for (field, min, max) in [
            ("sun_size", self.sun_size.0, self.sun_size.1),
            ("planet_size", self.planet_size.0, self.planet_size.1),
            ("moon_min_size", self.moon_min_size, self.moon_min_size),
        ] {
            if min <= 0.0 || !min.is_finite() {
                return Err(ConfigError::InvalidRange { field, min, max });
            }
        }
        Ok(())
    }
}

// --- Persistence ---

/// File name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
    ron::from_str(&text).map_err(ConfigError::ParseError)
}

impl Config {
    /// Platform config directory for Celestia, e.g. `~/.config/celestia`.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("celestia"))
    }

    /// Path of the config file inside `config_dir`.
    pub fn file_path(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE_NAME)
    }

    /// Read `config.ron` from `config_dir`, writing the defaults there first
    /// if the file does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::file_path(config_dir);
        if !path.exists() {
            let defaults = Config::default();
            defaults.save(config_dir)?;
            log::info!("Wrote default config to {}", path.display());
            return Ok(defaults);
        }

        let config = read_config(&path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write pretty RON to `config_dir`, creating the directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        // Keep (min, max) ranges on one line.
        let style = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(false)
            .enumerate_arrays(false);
        let text = ron::ser::to_string_pretty(self, style).map_err(ConfigError::SerializeError)?;
        std::fs::write(Self::file_path(config_dir), text).map_err(ConfigError::WriteError)
    }

    /// Re-read the file; `Some` only when its contents differ from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = read_config(&Self::file_path(config_dir))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Config changed on disk, reloading");
        Ok(Some(fresh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_file_is_readable_ron() {
        let dir = tempfile::tempdir().unwrap();
        Config::default().save(dir.path()).unwrap();
        let text = std::fs::read_to_string(Config::file_path(dir.path())).unwrap();
        assert!(text.contains("speed_multiplier: 1.0"));
        assert!(text.contains("seed: \"celestia\""));
    }

    #[test]
    fn test_missing_field_uses_default() {
        // Config missing the `generator` section entirely
        let ron_str = "(system: (seed: \"abc\"), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.generator, GeneratorConfig::default());
        assert_eq!(config.system.seed, "abc");
        assert_eq!(config.system.speed_multiplier, 1.0);
    }

    #[test]
    fn test_unknown_section_ignored() {
        let config: Config = ron::from_str("(renderer: (msaa: 4))").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_tuple_ranges_parse() {
        let ron_str = "(generator: (planet_count: (2, 2), planet_size: (8.0, 9.5)))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.generator.planet_count, (2, 2));
        assert_eq!(config.generator.planet_size, (8.0, 9.5));
        assert!(config.generator.validate().is_ok());
    }

    #[test]
    fn test_default_generator_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let generator = GeneratorConfig {
            planet_spacing: (100.0, 10.0),
            ..Default::default()
        };
        match generator.validate() {
            Err(ConfigError::InvalidRange { field, .. }) => assert_eq!(field, "planet_spacing"),
            other => panic!("expected InvalidRange, got {other:?}"),
        }
    }

    #[test]
    fn test_non_positive_size_rejected() {
        let generator = GeneratorConfig {
            planet_size: (0.0, 5.0),
            ..Default::default()
        };
        assert!(generator.validate().is_err());
    }

    #[test]
    fn test_reversed_chance_bounds() {
        let generator = GeneratorConfig {
            reversed_orbit_chance: 1.5,
            ..Default::default()
        };
        assert!(generator.validate().is_err());
    }

    #[test]
    fn test_saved_values_survive_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.system.seed = "saved".to_string();
        config.generator.planet_count = (2, 3);
        config.debug.log_level = "debug".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.system.speed_multiplier = 10.0;
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap();
        assert_eq!(reloaded.map(|c| c.system.speed_multiplier), Some(10.0));
        assert!(modified.reload(dir.path()).unwrap().is_none(), "unchanged file must not reload");
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(Config::file_path(dir.path()), "{{not valid}}").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }
}
