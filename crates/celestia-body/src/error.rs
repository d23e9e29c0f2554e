//! Body construction and generation errors.

use celestia_cubesphere::{MeshError, MIN_RESOLUTION};
use celestia_terrain::TerrainError;

use crate::BodyId;

/// Errors raised by [`crate::CelestialBody`] operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BodyError {
    /// The face grid needs at least two vertices per edge.
    #[error("resolution {0} is below the minimum of {min}", min = MIN_RESOLUTION)]
    InvalidResolution(u32),

    /// The base radius must be positive, finite, and below the surface ceiling.
    #[error("minimal centre {0} must be finite and in (0, 100]")]
    InvalidMinimalCentre(f64),

    /// Water sits above the base radius and below the surface ceiling.
    #[error("water level offset {0} must be finite, non-negative, and keep the water line within 100")]
    InvalidWaterOffset(f64),

    /// Terrain or biome settings failed validation.
    #[error("invalid terrain settings: {0}")]
    InvalidTerrain(#[from] TerrainError),

    /// The mesher rejected its grid.
    #[error("mesher rejected settings: {0}")]
    Mesh(#[from] MeshError),

    /// Surface data was requested before [`crate::CelestialBody::generate`].
    #[error("body '{0}' has not been generated")]
    NotGenerated(String),

    /// A body cannot orbit itself.
    #[error("body {0} cannot orbit itself")]
    SelfOrbit(BodyId),
}
