//! Per-frame shading records handed to an external renderer.
//!
//! Suns are flattened into light records; bodies with an atmosphere get a
//! scattering record pointing at the system's barycenter, so a single
//! atmosphere pass serves every light source.

use bytemuck::{Pod, Zeroable};
use glam::DVec3;

use crate::AtmosphereSettings;

/// Added to a body's highest surface radius to get the atmosphere's inner shell.
pub const ATMOSPHERE_SURFACE_MARGIN: f64 = 0.25;
/// Ray-march samples along the view ray.
pub const IN_SCATTER_POINTS: u32 = 10;
/// Ray-march samples toward the light.
pub const OPTICAL_DEPTH_POINTS: u32 = 10;

/// A light emitted by a sun body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunShading {
    pub position: DVec3,
    pub radius: f64,
    pub color: [f32; 3],
}

impl SunShading {
    /// White light at `position`.
    pub fn white(position: DVec3, radius: f64) -> Self {
        Self {
            position,
            radius,
            color: [1.0, 1.0, 1.0],
        }
    }
}

/// Wavelength-dependent scattering, `(400 / λ)^4 · strength` per channel.
///
/// A non-positive or non-finite wavelength scatters nothing.
pub fn scattering_coefficients(atmosphere: &AtmosphereSettings) -> DVec3 {
    let channel = |wave_length: f64| {
        if wave_length > 0.0 && wave_length.is_finite() {
            (400.0 / wave_length).powi(4) * atmosphere.scattering_strength
        } else {
            0.0
        }
    };
    DVec3::new(
        channel(atmosphere.wave_length_red),
        channel(atmosphere.wave_length_green),
        channel(atmosphere.wave_length_blue),
    )
}

/// Atmosphere parameters for one body at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtmosphereShading {
    pub planet_centre: DVec3,
    pub planet_radius: f64,
    pub atmosphere_radius: f64,
    /// Unit vector from the body toward the barycenter of the suns.
    pub dir_to_sun: DVec3,
    pub in_scatter_points: u32,
    pub optical_depth_points: u32,
    pub scattering_coefficients: DVec3,
    pub density_falloff: f64,
    pub intensity: f64,
}

impl AtmosphereShading {
    /// Build the record for a body whose tallest vertex is at `max_radius`.
    pub fn new(
        atmosphere: &AtmosphereSettings,
        planet_centre: DVec3,
        max_radius: f64,
        sun_point: DVec3,
    ) -> Self {
        let planet_radius = max_radius + ATMOSPHERE_SURFACE_MARGIN;
        Self {
            planet_centre,
            planet_radius,
            atmosphere_radius: planet_radius * (atmosphere.scale + 1.0),
            dir_to_sun: (sun_point - planet_centre).normalize_or_zero(),
            in_scatter_points: IN_SCATTER_POINTS,
            optical_depth_points: OPTICAL_DEPTH_POINTS,
            scattering_coefficients: scattering_coefficients(atmosphere),
            density_falloff: atmosphere.fall_off,
            intensity: atmosphere.intensity,
        }
    }

    /// Pack into the GPU layout.
    pub fn to_uniform(&self) -> AtmosphereUniform {
        AtmosphereUniform {
            planet_centre: self.planet_centre.as_vec3().to_array(),
            planet_radius: self.planet_radius as f32,
            dir_to_sun: self.dir_to_sun.as_vec3().to_array(),
            atmosphere_radius: self.atmosphere_radius as f32,
            scattering_coefficients: self.scattering_coefficients.as_vec3().to_array(),
            density_falloff: self.density_falloff as f32,
            intensity: self.intensity as f32,
            in_scatter_points: self.in_scatter_points,
            optical_depth_points: self.optical_depth_points,
            _padding: 0.0,
        }
    }
}

/// GPU-side atmosphere record. Each vec3 is followed by a scalar so the
/// struct packs into 16-byte rows.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct AtmosphereUniform {
    /// (offset 0)
    pub planet_centre: [f32; 3],
    /// (offset 12)
    pub planet_radius: f32,
    /// (offset 16)
    pub dir_to_sun: [f32; 3],
    /// (offset 28)
    pub atmosphere_radius: f32,
    /// (offset 32)
    pub scattering_coefficients: [f32; 3],
    /// (offset 44)
    pub density_falloff: f32,
    /// (offset 48)
    pub intensity: f32,
    /// (offset 52)
    pub in_scatter_points: u32,
    /// (offset 56)
    pub optical_depth_points: u32,
    /// (offset 60)
    pub _padding: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scattering_coefficients() {
        let c = scattering_coefficients(&AtmosphereSettings::default());
        assert!((c.x - (400.0_f64 / 700.0).powi(4) * 20.0).abs() < 1e-12);
        // Blue scatters most.
        assert!(c.z > c.y && c.y > c.x);
    }

    #[test]
    fn test_zero_wavelength_guarded() {
        let atmosphere = AtmosphereSettings {
            wave_length_red: 0.0,
            ..Default::default()
        };
        let c = scattering_coefficients(&atmosphere);
        assert_eq!(c.x, 0.0);
        assert!(c.y.is_finite() && c.z.is_finite());
    }

    #[test]
    fn test_radii_and_direction() {
        let shading = AtmosphereShading::new(
            &AtmosphereSettings::default(),
            DVec3::new(100.0, 0.0, 0.0),
            16.0,
            DVec3::ZERO,
        );
        assert_eq!(shading.planet_radius, 16.25);
        assert_eq!(shading.atmosphere_radius, 32.5);
        assert!((shading.dir_to_sun - DVec3::NEG_X).length() < 1e-12);
        assert_eq!(shading.in_scatter_points, 10);
        assert_eq!(shading.optical_depth_points, 10);
    }

    #[test]
    fn test_body_at_barycenter_has_zero_direction() {
        let shading =
            AtmosphereShading::new(&AtmosphereSettings::default(), DVec3::ZERO, 16.0, DVec3::ZERO);
        assert_eq!(shading.dir_to_sun, DVec3::ZERO);
    }

    #[test]
    fn test_uniform_size() {
        assert_eq!(std::mem::size_of::<AtmosphereUniform>(), 64);
        let shading =
            AtmosphereShading::new(&AtmosphereSettings::default(), DVec3::X, 16.0, DVec3::ZERO);
        let uniform = shading.to_uniform();
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 64);
        assert_eq!(uniform.planet_radius, 16.25);
    }
}
