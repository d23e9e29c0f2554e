//! A single celestial body: settings, generated surface, and orbits it hosts.

use celestia_cubesphere::{CubeSphereMesher, FlatElevation, SurfaceExtrema, SurfaceMesh};
use celestia_terrain::{BiomeColorRamp, LayeredElevation, NoiseField};
use glam::{DMat4, DVec3};
use tracing::info;

use crate::{
    AtmosphereShading, BodyError, BodyId, BodyKind, BodySettings, Orbit, OrbitHandle, OrbitParent,
    orbit_angle,
};

/// Transient placement, rewritten on every time update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyTransform {
    pub position: DVec3,
    /// Spin about the body's Y axis, in radians.
    pub rotation_y: f64,
    /// Tilt about the X axis, in radians.
    pub axis_tilt: f64,
}

impl BodyTransform {
    /// `T · Rx(tilt) · Ry(rotation)`.
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_translation(self.position)
            * DMat4::from_rotation_x(self.axis_tilt)
            * DMat4::from_rotation_y(self.rotation_y)
    }
}

/// Output of [`CelestialBody::generate`].
#[derive(Clone, Debug)]
pub struct GeneratedSurface {
    pub mesh: SurfaceMesh,
    /// Biome colours; suns have none.
    pub ramp: Option<BiomeColorRamp>,
    /// Length of the raw triangle stream before welding.
    pub stream_vertex_count: usize,
}

/// Where a hosted orbit puts its body this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChildPlacement {
    pub body: BodyId,
    pub position: DVec3,
}

/// A sun, planet, or moon.
#[derive(Clone, Debug)]
pub struct CelestialBody {
    kind: BodyKind,
    name: String,
    settings: BodySettings,
    extrema: SurfaceExtrema,
    surface: Option<GeneratedSurface>,
    orbits: Vec<Orbit>,
    own_orbit: Option<OrbitHandle>,
    index_orbital_plane: Option<usize>,
    transform: BodyTransform,
    weld_vertices: bool,
}

impl CelestialBody {
    /// Validate `settings` for `kind` and create an ungenerated body.
    ///
    /// # Errors
    ///
    /// Returns the [`BodyError`] from [`BodySettings::validate`].
    pub fn new(
        kind: BodyKind,
        name: impl Into<String>,
        settings: BodySettings,
    ) -> Result<Self, BodyError> {
        settings.validate(kind)?;
        let extrema = SurfaceExtrema::new(settings.surface_water_radius(kind));
        let transform = BodyTransform {
            axis_tilt: settings.rotation.axis_tilt.to_radians(),
            ..Default::default()
        };
        Ok(Self {
            kind,
            name: name.into(),
            settings,
            extrema,
            surface: None,
            orbits: Vec::new(),
            own_orbit: None,
            index_orbital_plane: None,
            transform,
            weld_vertices: true,
        })
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn settings(&self) -> &BodySettings {
        &self.settings
    }

    /// Radii found by the last generation.
    pub fn extrema(&self) -> &SurfaceExtrema {
        &self.extrema
    }

    /// Highest surface radius, or the base radius before generation.
    pub fn max_radius(&self) -> f64 {
        if self.surface.is_some() {
            self.extrema.max_radius
        } else {
            self.settings.size.minimal_centre
        }
    }

    pub fn is_generated(&self) -> bool {
        self.surface.is_some()
    }

    /// Merge coincident vertices when building the mesh. On by default.
    pub fn set_weld_vertices(&mut self, weld: bool) {
        self.weld_vertices = weld;
    }

    pub fn weld_vertices(&self) -> bool {
        self.weld_vertices
    }

    /// Build the surface mesh and biome ramp from the current settings.
    ///
    /// Any previous surface and extrema are dropped first, so a failure
    /// leaves the body ungenerated.
    ///
    /// # Errors
    ///
    /// Returns a [`BodyError`] if the settings no longer validate.
    pub fn generate(&mut self) -> Result<(), BodyError> {
        let water_radius = self.settings.surface_water_radius(self.kind);
        self.surface = None;
        self.extrema = SurfaceExtrema::new(water_radius);
        self.settings.validate(self.kind)?;

        let size = &self.settings.size;
        let mesher = CubeSphereMesher::new(size.resolution)?.with_water_radius(water_radius);

        let (soup, ramp) = if self.kind.has_terrain() {
            let source = LayeredElevation::new(
                NoiseField::new(self.settings.seed.clone()),
                self.settings.terrain.clone(),
                size.minimal_centre,
                self.settings.water.as_ref().map(|w| w.level_offset),
            )?;
            let ramp = BiomeColorRamp::build(&self.settings.biomes)?;
            (mesher.build(&source), Some(ramp))
        } else {
            (mesher.build(&FlatElevation::new(size.minimal_centre)), None)
        };

        let mesh = SurfaceMesh::from_triangles(&soup.vertices, self.weld_vertices);

        info!(
            "Generated {} '{}': {} stream vertices, {} mesh vertices, radius {:.3}..{:.3}",
            self.kind,
            self.name,
            soup.vertices.len(),
            mesh.vertex_count(),
            soup.extrema.min_radius,
            soup.extrema.max_radius
        );

        self.extrema = soup.extrema;
        self.surface = Some(GeneratedSurface {
            mesh,
            ramp,
            stream_vertex_count: soup.vertices.len(),
        });
        Ok(())
    }

    /// Replace the settings and drop the generated surface.
    ///
    /// Name, hosted orbits, and own orbit are kept.
    ///
    /// # Errors
    ///
    /// Returns a [`BodyError`] and leaves the body untouched if `settings`
    /// do not validate.
    pub fn reconfigure(&mut self, settings: BodySettings) -> Result<(), BodyError> {
        settings.validate(self.kind)?;
        self.extrema = SurfaceExtrema::new(settings.surface_water_radius(self.kind));
        self.transform.axis_tilt = settings.rotation.axis_tilt.to_radians();
        self.settings = settings;
        self.surface = None;
        Ok(())
    }

    /// # Errors
    ///
    /// [`BodyError::NotGenerated`] before [`CelestialBody::generate`].
    pub fn surface(&self) -> Result<&GeneratedSurface, BodyError> {
        self.surface
            .as_ref()
            .ok_or_else(|| BodyError::NotGenerated(self.name.clone()))
    }

    /// # Errors
    ///
    /// [`BodyError::NotGenerated`] before [`CelestialBody::generate`].
    pub fn mesh(&self) -> Result<&SurfaceMesh, BodyError> {
        self.surface().map(|s| &s.mesh)
    }

    /// The biome ramp, `None` for suns.
    ///
    /// # Errors
    ///
    /// [`BodyError::NotGenerated`] before [`CelestialBody::generate`].
    pub fn biome_ramp(&self) -> Result<Option<&BiomeColorRamp>, BodyError> {
        self.surface().map(|s| s.ramp.as_ref())
    }

    /// Where `radius` falls between the lowest and highest surface radius,
    /// clamped to `[0, 1]`. Flat or ungenerated bodies report 0.
    pub fn elevation_percent(&self, radius: f64) -> f64 {
        let relief = self.extrema.relief();
        if self.surface.is_none() || relief <= 0.0 || !radius.is_finite() {
            return 0.0;
        }
        ((radius - self.extrema.min_radius) / relief).clamp(0.0, 1.0)
    }

    pub fn transform(&self) -> &BodyTransform {
        &self.transform
    }

    pub fn position(&self) -> DVec3 {
        self.transform.position
    }

    pub fn set_position(&mut self, position: DVec3) {
        self.transform.position = position;
    }

    pub fn world_matrix(&self) -> DMat4 {
        self.transform.matrix()
    }

    /// Spin the body and advance hosted orbits to `elapsed` simulated seconds.
    ///
    /// Returns the new position of every body this one hosts, centred on this
    /// body's current position.
    pub fn on_time_update(&mut self, elapsed: f64) -> Vec<ChildPlacement> {
        let rotation = &self.settings.rotation;
        let degrees = orbit_angle(elapsed, rotation.period_seconds, false) + rotation.period_start_angle;
        self.transform.rotation_y = degrees.to_radians();
        self.transform.axis_tilt = rotation.axis_tilt.to_radians();

        let center = self.transform.position;
        self.orbits
            .iter_mut()
            .map(|orbit| {
                orbit.update(elapsed);
                ChildPlacement {
                    body: orbit.body,
                    position: orbit.position_around(center),
                }
            })
            .collect()
    }

    /// Host `child` on an orbit around this body, which the caller knows as `this`.
    ///
    /// # Errors
    ///
    /// [`BodyError::SelfOrbit`] when `child == this`.
    pub fn attach_orbiting_body(
        &mut self,
        child: BodyId,
        this: BodyId,
        distance_to_center: f64,
        start_angle: f64,
        period_seconds: f64,
        reversed: bool,
    ) -> Result<OrbitHandle, BodyError> {
        if child == this {
            return Err(BodyError::SelfOrbit(this));
        }
        let parent = OrbitParent::Body(this);
        self.orbits.push(Orbit::new(
            child,
            parent,
            distance_to_center,
            start_angle,
            period_seconds,
            reversed,
        ));
        Ok(OrbitHandle {
            parent,
            index: self.orbits.len() - 1,
        })
    }

    /// Orbits hosted by this body.
    pub fn orbits(&self) -> &[Orbit] {
        &self.orbits
    }

    pub fn orbits_mut(&mut self) -> &mut [Orbit] {
        &mut self.orbits
    }

    /// The orbit this body travels on, if any.
    pub fn own_orbit(&self) -> Option<OrbitHandle> {
        self.own_orbit
    }

    pub fn set_own_orbit(&mut self, handle: Option<OrbitHandle>) {
        self.own_orbit = handle;
    }

    /// Slot among the system's orbital planes, for planets.
    pub fn index_orbital_plane(&self) -> Option<usize> {
        self.index_orbital_plane
    }

    pub fn set_index_orbital_plane(&mut self, index: Option<usize>) {
        self.index_orbital_plane = index;
    }

    /// Scattering record for this frame, if the body has an atmosphere.
    pub fn atmosphere_shading(&self, sun_point: DVec3) -> Option<AtmosphereShading> {
        self.settings.atmosphere.as_ref().map(|atmosphere| {
            AtmosphereShading::new(atmosphere, self.transform.position, self.max_radius(), sun_point)
        })
    }
}
