//! Celestial bodies: settings, surface generation, self-rotation, hosted orbits, and shading records.

mod body;
mod error;
mod id;
mod orbit;
mod settings;
mod shading;

pub use body::{BodyTransform, CelestialBody, ChildPlacement, GeneratedSurface};
pub use error::BodyError;
pub use id::{BodyId, BodyKind};
pub use orbit::{Orbit, OrbitHandle, OrbitParent, orbit_angle, orbit_offset};
pub use settings::{
    AtmosphereSettings, BodySettings, BodySettingsBuilder, RotationSettings, SizeSettings,
    WaterSettings,
};
pub use shading::{
    ATMOSPHERE_SURFACE_MARGIN, AtmosphereShading, AtmosphereUniform, IN_SCATTER_POINTS,
    OPTICAL_DEPTH_POINTS, SunShading, scattering_coefficients,
};
