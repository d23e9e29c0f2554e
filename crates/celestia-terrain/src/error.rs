//! Terrain configuration error types.

/// Errors raised while validating terrain or biome settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// Layered noise needs at least one layer to produce any signal.
    #[error("terrain needs at least one noise layer, got {0}")]
    InvalidLayers(u32),

    /// A biome gradient needs a start and an end stop.
    #[error("biome {biome} has {count} color stops, at least 2 are required")]
    TooFewStops {
        /// Index of the biome in its set.
        biome: usize,
        /// Number of stops found.
        count: usize,
    },

    /// The first stop must sit at offset 0.
    #[error("biome {biome} starts at offset {offset}, expected 0")]
    FirstStopNotZero {
        /// Index of the biome in its set.
        biome: usize,
        /// Offending offset.
        offset: f64,
    },

    /// The last stop must sit at offset 1.
    #[error("biome {biome} ends at offset {offset}, expected 1")]
    LastStopNotOne {
        /// Index of the biome in its set.
        biome: usize,
        /// Offending offset.
        offset: f64,
    },

    /// Stop offsets must be non-decreasing and inside `[0, 1]`.
    #[error("biome {biome} stop {stop} has offset {offset} out of order or outside [0, 1]")]
    BadStopOffset {
        /// Index of the biome in its set.
        biome: usize,
        /// Index of the stop within the biome.
        stop: usize,
        /// Offending offset.
        offset: f64,
    },

    /// A biome's row position must lie in `[0, 1)`.
    #[error("biome {biome} row offset {offset} outside [0, 1)")]
    BadRowOffset {
        /// Index of the biome in its set.
        biome: usize,
        /// Offending offset.
        offset: f64,
    },
}
