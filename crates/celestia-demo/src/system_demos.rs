//! Walkthroughs of a generated system, logged step by step.

use celestia_body::BodyKind;
use celestia_space::{SolarSystem, SystemError};
use glam::DVec3;
use tracing::{debug, info};

/// Logs each body's mesh size and surface radii.
pub(crate) fn demonstrate_surfaces(system: &SolarSystem) -> Result<(), SystemError> {
    info!("Surfaces of {} bodies", system.len());

    let mut total_vertices = 0;
    let mut total_triangles = 0;
    for (id, body) in system.iter() {
        let surface = body.surface()?;
        let extrema = body.extrema();
        total_vertices += surface.mesh.vertex_count();
        total_triangles += surface.mesh.triangle_count();
        info!(
            "{} {} '{}': {} vertices ({} before welding), radius {:.3}..{:.3}, water {}",
            id,
            body.kind(),
            body.name(),
            surface.mesh.vertex_count(),
            surface.stream_vertex_count,
            extrema.min_radius,
            extrema.max_radius,
            extrema
                .water_radius
                .map_or_else(|| "none".to_string(), |w| format!("{w:.3}"))
        );
    }

    info!(
        "Surface totals: {} vertices, {} triangles",
        total_vertices, total_triangles
    );
    Ok(())
}

/// Samples every biome ramp at the lowest, middle, and highest elevation.
pub(crate) fn demonstrate_biome_ramps(system: &SolarSystem) -> Result<(), SystemError> {
    for (_, body) in system.iter().filter(|(_, b)| b.kind() != BodyKind::Sun) {
        let Some(ramp) = body.biome_ramp()? else {
            continue;
        };
        let extrema = body.extrema();
        let middle = (extrema.min_radius + extrema.max_radius) * 0.5;
        let samples: Vec<[u8; 4]> = [extrema.min_radius, middle, extrema.max_radius]
            .into_iter()
            .filter_map(|radius| ramp.sample(0, body.elevation_percent(radius)))
            .collect();
        debug!(
            "'{}' ramp {}x{}: {:?}",
            body.name(),
            ramp.width(),
            ramp.height(),
            samples
        );
    }
    Ok(())
}

/// Advances the clock and logs where every body ends up.
pub(crate) fn demonstrate_simulation(system: &mut SolarSystem, ticks: u32, dt: f64) {
    let start: Vec<DVec3> = system.bodies().iter().map(|b| b.position()).collect();

    for _ in 0..ticks {
        system.advance(dt);
    }

    info!(
        "Ran {} ticks of {:.4}s at {}x speed: {:.3} simulated seconds",
        ticks,
        dt,
        system.clock().speed_multiplier(),
        system.clock().elapsed()
    );
    for ((id, body), from) in system.iter().zip(start) {
        let position = body.position();
        info!(
            "{} '{}' at ({:.2}, {:.2}, {:.2}), moved {:.3}",
            id,
            body.name(),
            position.x,
            position.y,
            position.z,
            from.distance(position)
        );
    }
}

/// Logs the per-frame light and atmosphere records.
pub(crate) fn demonstrate_shading(system: &SolarSystem) {
    for sun in system.sun_shading() {
        info!(
            "Light at {:?} with radius {:.2}",
            sun.position, sun.radius
        );
    }

    info!(
        "{} bodies with atmospheres, barycenter {:?}",
        system.atmosphere_body_count(),
        system.center_mass_point()
    );
    for (id, shading) in system.atmosphere_shading() {
        debug!(
            "{}: shell {:.2}..{:.2}, scattering {:?}, toward sun {:?}",
            id,
            shading.planet_radius,
            shading.atmosphere_radius,
            shading.scattering_coefficients,
            shading.dir_to_sun
        );
    }
}

/// Logs the orbit ring polylines a renderer would draw.
pub(crate) fn demonstrate_orbit_rings(system: &SolarSystem) {
    let rings = system.orbit_rings();
    let visible = rings.iter().filter(|r| r.visible).count();
    let points: usize = rings.iter().map(|r| r.points.len()).sum();
    info!(
        "{} orbit rings ({} visible), {} polyline points",
        rings.len(),
        visible,
        points
    );
}
