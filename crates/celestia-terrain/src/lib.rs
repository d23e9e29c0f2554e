//! Procedural surface data: seeded noise, weight-gated layered elevation, and biome colour ramps.

mod biome;
mod color_ramp;
mod error;
mod layered;
mod noise_field;
mod seed;

pub use biome::{
    BiomeData, BiomeSettings, GradientStop, arid, default_biome_layers, frost,
    generated_biome_layers, temperate,
};
pub use color_ramp::{BiomeBlend, BiomeColorRamp, RAMP_WIDTH};
pub use error::TerrainError;
pub use layered::{LayeredElevation, TerrainSettings};
pub use noise_field::NoiseField;
pub use seed::{NoiseSeed, seeded_rng};
