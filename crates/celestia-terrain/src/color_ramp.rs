//! Biome colour ramp: a 2D RGBA lookup, one row per biome.
//!
//! Columns map linearly to elevation percent. Each consecutive stop pair of a
//! biome fills the columns between their offsets by linear interpolation.

use crate::{BiomeSettings, TerrainError};

/// Number of columns in a ramp row.
pub const RAMP_WIDTH: usize = 2560;

/// Blend parameters forwarded to the surface shader alongside the ramp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeBlend {
    pub noise_scale: f64,
    pub noise_frequency: f64,
    pub blending_size: f64,
}

/// Baked RGBA rows for a body's biomes.
#[derive(Clone, Debug)]
pub struct BiomeColorRamp {
    width: usize,
    pixels: Vec<[u8; 4]>,
    offsets: Vec<f64>,
    blend: BiomeBlend,
}

impl BiomeColorRamp {
    /// Bake the ramp at [`RAMP_WIDTH`] columns.
    ///
    /// # Errors
    ///
    /// Returns a [`TerrainError`] if any biome row is malformed.
    pub fn build(settings: &BiomeSettings) -> Result<Self, TerrainError> {
        Self::build_with_width(settings, RAMP_WIDTH)
    }

    /// Bake the ramp at an explicit column count.
    ///
    /// # Errors
    ///
    /// Returns a [`TerrainError`] if any biome row is malformed.
    pub fn build_with_width(settings: &BiomeSettings, width: usize) -> Result<Self, TerrainError> {
        settings.validate()?;

        let height = settings.layers.len();
        let mut pixels = vec![[0, 0, 0, 255]; width * height];
        for (row, biome) in settings.layers.iter().enumerate() {
            let line = &mut pixels[row * width..(row + 1) * width];
            for pair in biome.stops.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let start = (width as f64 * a.offset).floor() as usize;
                let end = ((width as f64 * b.offset).floor() as usize).min(width);
                if end <= start {
                    continue;
                }
                let count = end - start;
                // The segment touching the row end includes its end colour.
                let denominator = if end == width { count - 1 } else { count };
                let (ca, cb) = (a.rgb(), b.rgb());
                for (j, pixel) in line[start..end].iter_mut().enumerate() {
                    let t = if denominator == 0 {
                        1.0
                    } else {
                        j as f64 / denominator as f64
                    };
                    for c in 0..3 {
                        let v = f64::from(ca[c]) + (f64::from(cb[c]) - f64::from(ca[c])) * t;
                        pixel[c] = v.floor().clamp(0.0, 255.0) as u8;
                    }
                }
            }
        }

        tracing::debug!(width, height, "Baked biome colour ramp");

        Ok(Self {
            width,
            pixels,
            offsets: settings.layers.iter().map(|b| b.offset).collect(),
            blend: BiomeBlend {
                noise_scale: settings.noise_scale,
                noise_frequency: settings.noise_frequency,
                blending_size: settings.blending_size,
            },
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of biome rows.
    pub fn height(&self) -> usize {
        self.offsets.len()
    }

    /// Row offsets, in biome order.
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    pub fn blend(&self) -> BiomeBlend {
        self.blend
    }

    /// The pixel at `(row, column)`, or `None` outside the ramp.
    pub fn pixel(&self, row: usize, column: usize) -> Option<[u8; 4]> {
        if row >= self.height() || column >= self.width {
            return None;
        }
        self.pixels.get(row * self.width + column).copied()
    }

    /// Look up the colour for an elevation percent in `[0, 1]` on `row`.
    ///
    /// Percentages outside the range are clamped; a non-finite value reads
    /// column 0.
    pub fn sample(&self, row: usize, elevation_percent: f64) -> Option<[u8; 4]> {
        if self.width == 0 {
            return None;
        }
        let p = if elevation_percent.is_finite() {
            elevation_percent.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let column = (p * (self.width - 1) as f64).round() as usize;
        self.pixel(row, column)
    }

    /// Row-major RGBA bytes, ready for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
