//! Command-line argument parsing for Celestia.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Celestia command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "celestia", about = "Procedural solar system simulator")]
pub struct CliArgs {
    /// System seed (numbers are used as-is, text is hashed).
    #[arg(long)]
    pub seed: Option<String>,

    /// Simulated seconds per real second.
    #[arg(long)]
    pub speed: Option<f64>,

    /// Number of clock advances to run.
    #[arg(long, default_value_t = 10)]
    pub ticks: u32,

    /// Real seconds per clock advance.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f64,

    /// Fixed planet count (overrides the configured range).
    #[arg(long)]
    pub planets: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON array of reserved words the name generator must avoid.
    #[arg(long)]
    pub word_list: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref seed) = args.seed {
            self.system.seed = seed.clone();
        }
        if let Some(speed) = args.speed {
            self.system.speed_multiplier = speed;
        }
        if let Some(planets) = args.planets {
            self.generator.planet_count = (planets, planets);
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
