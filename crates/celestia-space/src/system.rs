//! The solar system arena: bodies, their orbit hierarchy, and simulated time.

use std::collections::VecDeque;
use std::time::Instant;

use celestia_body::{
    AtmosphereShading, BodyId, BodyKind, CelestialBody, Orbit, OrbitHandle,
    OrbitParent, SunShading,
};
use glam::DVec3;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{SimClock, SystemError};

/// A drawable orbit path.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitRing {
    /// The body travelling on the ring.
    pub body: BodyId,
    pub center: DVec3,
    /// Closed polyline; the last point repeats the first.
    pub points: Vec<DVec3>,
    pub visible: bool,
}

/// Owns every body and the orbits around the system root.
///
/// Bodies are addressed by [`BodyId`], their index in the arena. Orbits around
/// another body live on that body; system orbits live here and circle the
/// fixed `origin`. The barycenter of the suns is only a light source.
#[derive(Debug, Default)]
pub struct SolarSystem {
    bodies: Vec<CelestialBody>,
    orbits: Vec<Orbit>,
    clock: SimClock,
    origin: DVec3,
    center_mass_point: DVec3,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body and return its id.
    pub fn add_body(&mut self, body: CelestialBody) -> BodyId {
        let id = BodyId(self.bodies.len());
        debug!("Added {} '{}' as {}", body.kind(), body.name(), id);
        self.bodies.push(body);
        id
    }

    /// # Errors
    ///
    /// [`SystemError::UnknownBody`] for an id not in this system.
    pub fn body(&self, id: BodyId) -> Result<&CelestialBody, SystemError> {
        self.bodies.get(id.0).ok_or(SystemError::UnknownBody(id))
    }

    /// # Errors
    ///
    /// [`SystemError::UnknownBody`] for an id not in this system.
    pub fn body_mut(&mut self, id: BodyId) -> Result<&mut CelestialBody, SystemError> {
        self.bodies.get_mut(id.0).ok_or(SystemError::UnknownBody(id))
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    /// Bodies paired with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &CelestialBody)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// First body with exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .position(|b| b.name() == name)
            .map(BodyId)
    }

    /// Orbits around the barycenter.
    pub fn system_orbits(&self) -> &[Orbit] {
        &self.orbits
    }

    /// Resolve an orbit handle.
    pub fn orbit(&self, handle: OrbitHandle) -> Option<&Orbit> {
        match handle.parent {
            OrbitParent::Barycenter => self.orbits.get(handle.index),
            OrbitParent::Body(id) => self.bodies.get(id.0)?.orbits().get(handle.index),
        }
    }

    /// Put `body` on an orbit around the barycenter of the suns.
    ///
    /// The orbit's slot is also recorded as the body's orbital plane index.
    ///
    /// # Errors
    ///
    /// [`SystemError::UnknownBody`] or [`SystemError::AlreadyOrbiting`].
    pub fn attach_to_barycenter(
        &mut self,
        body: BodyId,
        distance_to_center: f64,
        start_angle: f64,
        period_seconds: f64,
        reversed: bool,
    ) -> Result<OrbitHandle, SystemError> {
        self.ensure_free(body)?;

        let index = self.orbits.len();
        self.orbits.push(Orbit::new(
            body,
            OrbitParent::Barycenter,
            distance_to_center,
            start_angle,
            period_seconds,
            reversed,
        ));
        let handle = OrbitHandle {
            parent: OrbitParent::Barycenter,
            index,
        };

        let target = &mut self.bodies[body.0];
        target.set_own_orbit(Some(handle));
        target.set_index_orbital_plane(Some(index));
        Ok(handle)
    }

    /// Put `child` on an orbit around `parent`.
    ///
    /// # Errors
    ///
    /// [`SystemError::UnknownBody`], [`SystemError::AlreadyOrbiting`],
    /// [`SystemError::OrbitCycle`] when `parent` already orbits `child`, or a
    /// wrapped [`celestia_body::BodyError::SelfOrbit`].
    pub fn attach_to_body(
        &mut self,
        child: BodyId,
        parent: BodyId,
        distance_to_center: f64,
        start_angle: f64,
        period_seconds: f64,
        reversed: bool,
    ) -> Result<OrbitHandle, SystemError> {
        self.body(parent)?;
        self.ensure_free(child)?;
        if child != parent && self.orbits_around(parent, child) {
            return Err(SystemError::OrbitCycle { child, parent });
        }

        let handle = self.bodies[parent.0].attach_orbiting_body(
            child,
            parent,
            distance_to_center,
            start_angle,
            period_seconds,
            reversed,
        )?;
        self.bodies[child.0].set_own_orbit(Some(handle));
        Ok(handle)
    }

    fn ensure_free(&self, id: BodyId) -> Result<(), SystemError> {
        if self.body(id)?.own_orbit().is_some() {
            return Err(SystemError::AlreadyOrbiting(id));
        }
        Ok(())
    }

    /// Whether `body` circles `ancestor`, directly or through intermediate bodies.
    fn orbits_around(&self, body: BodyId, ancestor: BodyId) -> bool {
        let mut cursor = body;
        while let Some(OrbitHandle {
            parent: OrbitParent::Body(parent),
            ..
        }) = self.bodies.get(cursor.0).and_then(|b| b.own_orbit())
        {
            if parent == ancestor {
                return true;
            }
            cursor = parent;
        }
        false
    }

    /// Generate every body's surface in parallel.
    ///
    /// # Errors
    ///
    /// Returns the first body failure encountered.
    pub fn generate_all(&mut self) -> Result<(), SystemError> {
        let start = Instant::now();
        self.bodies
            .par_iter_mut()
            .try_for_each(CelestialBody::generate)?;
        info!(
            "Generated {} bodies in {:.2?}",
            self.bodies.len(),
            start.elapsed()
        );
        Ok(())
    }

    /// Weld setting for every body's next generation.
    pub fn set_weld_vertices(&mut self, weld: bool) {
        for body in &mut self.bodies {
            body.set_weld_vertices(weld);
        }
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn set_speed_multiplier(&mut self, speed: f64) {
        self.clock.set_speed_multiplier(speed);
    }

    /// Advance the clock by `delta` real seconds and move every body.
    ///
    /// Returns the simulated time.
    pub fn advance(&mut self, delta: f64) -> f64 {
        let elapsed = self.clock.advance(delta);
        self.update_at(elapsed);
        elapsed
    }

    /// Root point that system orbits circle.
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Move the system root. Takes effect on the next update.
    pub fn set_origin(&mut self, origin: DVec3) {
        self.origin = origin;
    }

    /// Place every body for `elapsed` simulated seconds.
    ///
    /// System orbits go first, around the fixed origin, then each body places
    /// its satellites, parents before children. The barycenter is recomputed
    /// last and never feeds back into placement, so the result depends only
    /// on `elapsed`.
    pub fn update_at(&mut self, elapsed: f64) {
        self.clock.set_elapsed(elapsed);

        let center = self.origin;
        for orbit in &mut self.orbits {
            orbit.update(elapsed);
            if let Some(body) = self.bodies.get_mut(orbit.body.0) {
                body.set_position(orbit.position_around(center));
            }
        }

        let mut queue: VecDeque<BodyId> = self
            .iter()
            .filter(|(_, b)| {
                !matches!(
                    b.own_orbit(),
                    Some(OrbitHandle {
                        parent: OrbitParent::Body(_),
                        ..
                    })
                )
            })
            .map(|(id, _)| id)
            .collect();

        while let Some(id) = queue.pop_front() {
            let placements = self.bodies[id.0].on_time_update(elapsed);
            for placement in placements {
                if let Some(child) = self.bodies.get_mut(placement.body.0) {
                    child.set_position(placement.position);
                    queue.push_back(placement.body);
                }
            }
        }

        self.center_mass_point = self.compute_center_mass();
    }

    /// Mean position of the suns, or the origin without suns.
    fn compute_center_mass(&self) -> DVec3 {
        let (sum, count) = self
            .bodies
            .iter()
            .filter(|b| b.kind() == BodyKind::Sun)
            .fold((DVec3::ZERO, 0u32), |(sum, n), b| (sum + b.position(), n + 1));
        if count == 0 {
            DVec3::ZERO
        } else {
            sum / f64::from(count)
        }
    }

    /// The point every atmosphere scatters light from.
    pub fn center_mass_point(&self) -> DVec3 {
        self.center_mass_point
    }

    /// Show or hide every orbit ring.
    pub fn set_all_orbits_visibility(&mut self, visible: bool) {
        for orbit in &mut self.orbits {
            orbit.is_visual = visible;
        }
        for body in &mut self.bodies {
            for orbit in body.orbits_mut() {
                orbit.is_visual = visible;
            }
        }
    }

    /// Ring polylines for every orbit, centred on its parent's current position.
    pub fn orbit_rings(&self) -> Vec<OrbitRing> {
        let ring = |orbit: &Orbit, center: DVec3| OrbitRing {
            body: orbit.body,
            center,
            points: orbit.ring_points(center),
            visible: orbit.is_visual,
        };

        let mut rings: Vec<OrbitRing> = self
            .orbits
            .iter()
            .map(|o| ring(o, self.origin))
            .collect();
        for body in &self.bodies {
            rings.extend(body.orbits().iter().map(|o| ring(o, body.position())));
        }
        rings
    }

    /// One white light per sun.
    pub fn sun_shading(&self) -> Vec<SunShading> {
        self.bodies
            .iter()
            .filter(|b| b.kind() == BodyKind::Sun)
            .map(|b| SunShading::white(b.position(), b.settings().size.minimal_centre))
            .collect()
    }

    /// Scattering records for every non-sun body with an atmosphere.
    pub fn atmosphere_shading(&self) -> Vec<(BodyId, AtmosphereShading)> {
        self.iter()
            .filter(|(_, b)| b.kind().has_terrain())
            .filter_map(|(id, b)| {
                b.atmosphere_shading(self.center_mass_point)
                    .map(|shading| (id, shading))
            })
            .collect()
    }

    pub fn atmosphere_body_count(&self) -> usize {
        self.bodies
            .iter()
            .filter(|b| b.kind().has_terrain() && b.settings().atmosphere.is_some())
            .count()
    }
}
