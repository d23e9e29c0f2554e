//! Biome gradients: colour stops keyed by elevation percent.
//!
//! Each biome is one row of the colour ramp. The row offset positions it on
//! the vertical axis a shader blends along, using the biome noise parameters
//! carried in [`BiomeSettings`].

use serde::{Deserialize, Serialize};

use crate::TerrainError;

/// A colour at a normalised elevation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the elevation axis, in `[0, 1]`.
    pub offset: f64,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl GradientStop {
    pub const fn new(offset: f64, r: u8, g: u8, b: u8) -> Self {
        Self { offset, r, g, b }
    }

    /// The stop colour as `[r, g, b]`.
    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// One biome row: an elevation gradient plus its row position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomeData {
    pub stops: Vec<GradientStop>,
    /// Row position in `[0, 1)`.
    pub offset: f64,
}

impl BiomeData {
    pub fn new(stops: Vec<GradientStop>, offset: f64) -> Self {
        Self { stops, offset }
    }

    /// Check the stop invariants. `index` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Fails when there are fewer than two stops, the first offset is not 0,
    /// the last is not 1, offsets decrease or leave `[0, 1]`, or the row
    /// offset is outside `[0, 1)`.
    pub fn validate(&self, index: usize) -> Result<(), TerrainError> {
        if !(0.0..1.0).contains(&self.offset) {
            return Err(TerrainError::BadRowOffset {
                biome: index,
                offset: self.offset,
            });
        }
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Err(TerrainError::TooFewStops {
                biome: index,
                count: 0,
            });
        };
        if self.stops.len() < 2 {
            return Err(TerrainError::TooFewStops {
                biome: index,
                count: self.stops.len(),
            });
        }
        if first.offset != 0.0 {
            return Err(TerrainError::FirstStopNotZero {
                biome: index,
                offset: first.offset,
            });
        }
        if last.offset != 1.0 {
            return Err(TerrainError::LastStopNotOne {
                biome: index,
                offset: last.offset,
            });
        }
        let mut previous = 0.0;
        for (stop_index, stop) in self.stops.iter().enumerate() {
            if !(0.0..=1.0).contains(&stop.offset) || stop.offset < previous {
                return Err(TerrainError::BadStopOffset {
                    biome: index,
                    stop: stop_index,
                    offset: stop.offset,
                });
            }
            previous = stop.offset;
        }
        Ok(())
    }
}

/// Biome rows plus the blend parameters handed to the surface shader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeSettings {
    pub noise_scale: f64,
    pub noise_frequency: f64,
    /// Width of the blend band between adjacent biome rows.
    pub blending_size: f64,
    pub layers: Vec<BiomeData>,
}

impl Default for BiomeSettings {
    fn default() -> Self {
        Self {
            noise_scale: 0.2,
            noise_frequency: 0.2,
            blending_size: 0.05,
            layers: default_biome_layers(),
        }
    }
}

impl BiomeSettings {
    /// Validate every biome row.
    ///
    /// # Errors
    ///
    /// Returns the first failing row's [`TerrainError`].
    pub fn validate(&self) -> Result<(), TerrainError> {
        self.layers
            .iter()
            .enumerate()
            .try_for_each(|(i, biome)| biome.validate(i))
    }
}

/// Sand shore, green lowlands, grey rock, snow caps.
pub fn temperate() -> Vec<GradientStop> {
    vec![
        GradientStop::new(0.0, 209, 191, 113),
        GradientStop::new(0.4, 0, 50, 0),
        GradientStop::new(0.5, 15, 112, 0),
        GradientStop::new(0.85, 100, 100, 100),
        GradientStop::new(0.9, 255, 255, 255),
        GradientStop::new(1.0, 255, 255, 255),
    ]
}

/// Desert sands into rust-brown highlands.
pub fn arid() -> Vec<GradientStop> {
    vec![
        GradientStop::new(0.0, 218, 194, 124),
        GradientStop::new(0.3, 215, 175, 114),
        GradientStop::new(1.0, 168, 101, 30),
    ]
}

/// Near-white ice.
pub fn frost() -> Vec<GradientStop> {
    vec![
        GradientStop::new(0.0, 255, 255, 255),
        GradientStop::new(0.3, 230, 230, 230),
        GradientStop::new(1.0, 255, 255, 255),
    ]
}

/// Rows used by a body built with default settings.
pub fn default_biome_layers() -> Vec<BiomeData> {
    vec![
        BiomeData::new(temperate(), 0.0),
        BiomeData::new(arid(), 0.4),
        BiomeData::new(temperate(), 0.6),
    ]
}

/// Rows used by generated planets: the defaults plus a temperate band and a
/// frost cap.
pub fn generated_biome_layers() -> Vec<BiomeData> {
    let mut layers = default_biome_layers();
    layers.push(BiomeData::new(temperate(), 0.8));
    layers.push(BiomeData::new(frost(), 0.9));
    layers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_palettes_valid() {
        for (i, stops) in [temperate(), arid(), frost()].into_iter().enumerate() {
            BiomeData::new(stops, 0.0)
                .validate(i)
                .unwrap_or_else(|e| panic!("palette {i} invalid: {e}"));
        }
        BiomeSettings::default().validate().unwrap();
        let generated = BiomeSettings {
            layers: generated_biome_layers(),
            ..Default::default()
        };
        generated.validate().unwrap();
    }

    #[test]
    fn test_single_stop_rejected() {
        let biome = BiomeData::new(vec![GradientStop::new(0.0, 1, 2, 3)], 0.0);
        assert_eq!(
            biome.validate(4),
            Err(TerrainError::TooFewStops { biome: 4, count: 1 })
        );
    }

    #[test]
    fn test_empty_stops_rejected() {
        let biome = BiomeData::new(Vec::new(), 0.0);
        assert!(matches!(
            biome.validate(0),
            Err(TerrainError::TooFewStops { count: 0, .. })
        ));
    }

    #[test]
    fn test_first_and_last_offsets_enforced() {
        let late_start = BiomeData::new(
            vec![GradientStop::new(0.1, 0, 0, 0), GradientStop::new(1.0, 0, 0, 0)],
            0.0,
        );
        assert!(matches!(
            late_start.validate(0),
            Err(TerrainError::FirstStopNotZero { .. })
        ));

        let early_end = BiomeData::new(
            vec![GradientStop::new(0.0, 0, 0, 0), GradientStop::new(0.9, 0, 0, 0)],
            0.0,
        );
        assert!(matches!(
            early_end.validate(0),
            Err(TerrainError::LastStopNotOne { .. })
        ));
    }

    #[test]
    fn test_unsorted_stops_rejected() {
        let biome = BiomeData::new(
            vec![
                GradientStop::new(0.0, 0, 0, 0),
                GradientStop::new(0.7, 0, 0, 0),
                GradientStop::new(0.3, 0, 0, 0),
                GradientStop::new(1.0, 0, 0, 0),
            ],
            0.0,
        );
        assert_eq!(
            biome.validate(2),
            Err(TerrainError::BadStopOffset {
                biome: 2,
                stop: 2,
                offset: 0.3
            })
        );
    }

    #[test]
    fn test_row_offset_range() {
        let mut biome = BiomeData::new(arid(), 1.0);
        assert!(matches!(
            biome.validate(0),
            Err(TerrainError::BadRowOffset { .. })
        ));
        biome.offset = 0.99;
        assert!(biome.validate(0).is_ok());
    }

    #[test]
    fn test_generated_layers_extend_defaults() {
        let layers = generated_biome_layers();
        assert_eq!(layers.len(), 5);
        assert_eq!(&layers[..3], &default_biome_layers()[..]);
        assert_eq!(layers[4].stops, frost());
    }
}
