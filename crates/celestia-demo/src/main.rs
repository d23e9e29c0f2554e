//! Headless demo: plans and meshes a seeded solar system, then runs the clock.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p celestia-demo -- --seed 42 --ticks 120`.

mod system_demos;

use std::path::{Path, PathBuf};

use celestia_config::{CliArgs, Config};
use celestia_space::{SolarSystem, SystemError, SystemGenerator, WordList};
use celestia_terrain::NoiseSeed;
use clap::Parser;
use tracing::{error, info, warn};

fn main() {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(Config::default_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    celestia_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let words = match args.word_list.as_deref().map(load_word_list) {
        Some(Ok(words)) => words,
        Some(Err(e)) => {
            warn!("Ignoring word list: {e}");
            WordList::default()
        }
        None => WordList::default(),
    };

    match run(&config, words, args.ticks, args.dt) {
        Ok(system) => info!(
            "Finished after {:.2} simulated seconds with {} bodies",
            system.clock().elapsed(),
            system.len()
        ),
        Err(e) => {
            error!("System generation failed: {e}");
            std::process::exit(1);
        }
    }
}

fn load_word_list(path: &Path) -> Result<WordList, SystemError> {
    let words = WordList::from_path(path)?;
    info!("Loaded {} reserved words from {}", words.len(), path.display());
    Ok(words)
}

fn run(config: &Config, words: WordList, ticks: u32, dt: f64) -> Result<SolarSystem, SystemError> {
    let seed: NoiseSeed = config.system.seed.parse().unwrap_or_default();
    info!("Generating system for seed '{seed}'");

    let generator = SystemGenerator::from_config(config)?.with_word_list(words);
    let mut system = generator.generate(&seed)?;
    system.set_all_orbits_visibility(config.system.show_orbits);
    system.set_speed_multiplier(config.system.speed_multiplier);

    system_demos::demonstrate_surfaces(&system)?;
    system_demos::demonstrate_biome_ramps(&system)?;
    system_demos::demonstrate_simulation(&mut system, ticks, dt);
    system_demos::demonstrate_shading(&system);
    system_demos::demonstrate_orbit_rings(&system);

    Ok(system)
}
