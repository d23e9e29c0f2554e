//! Circular orbit kinematics.
//!
//! An orbit's angle is a pure function of simulated time, so any frame can be
//! reproduced without replaying the ones before it. Orbits lie in the Y = 0
//! plane of their parent.

use glam::DVec3;

use crate::BodyId;

/// What an orbit circles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrbitParent {
    /// Another body, e.g. a moon around its planet.
    Body(BodyId),
    /// The average position of the system's suns.
    Barycenter,
}

/// Locates an orbit record: which list holds it and where.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OrbitHandle {
    pub parent: OrbitParent,
    /// Position in the parent's orbit list.
    pub index: usize,
}

/// Angle in degrees after `elapsed` seconds for a given period.
///
/// Reversed orbits run clockwise. A zero or non-finite period never moves.
pub fn orbit_angle(elapsed: f64, period_seconds: f64, reversed: bool) -> f64 {
    if period_seconds == 0.0 || !period_seconds.is_finite() {
        return 0.0;
    }
    let angle = elapsed / (period_seconds / 360.0);
    if reversed { -angle } else { angle }
}

/// Offset from the orbit centre for an angle and start angle, both in degrees.
pub fn orbit_offset(angle: f64, start_angle: f64, distance: f64) -> DVec3 {
    let radians = (angle + start_angle).to_radians();
    DVec3::new(radians.cos(), 0.0, radians.sin()) * distance
}

/// One body circling a parent.
#[derive(Clone, Debug, PartialEq)]
pub struct Orbit {
    pub body: BodyId,
    pub parent: OrbitParent,
    pub distance_to_center: f64,
    /// Current angle in degrees, refreshed by [`Orbit::update`].
    pub angle: f64,
    pub start_angle: f64,
    pub period_seconds: f64,
    pub is_reversed: bool,
    /// Whether the orbit ring should be drawn.
    pub is_visual: bool,
}

impl Orbit {
    pub fn new(
        body: BodyId,
        parent: OrbitParent,
        distance_to_center: f64,
        start_angle: f64,
        period_seconds: f64,
        is_reversed: bool,
    ) -> Self {
        Self {
            body,
            parent,
            distance_to_center,
            angle: 0.0,
            start_angle,
            period_seconds,
            is_reversed,
            is_visual: false,
        }
    }

    /// Recompute the angle for `elapsed` simulated seconds.
    pub fn update(&mut self, elapsed: f64) -> f64 {
        self.angle = orbit_angle(elapsed, self.period_seconds, self.is_reversed);
        self.angle
    }

    /// Where the orbiting body sits for the current angle around `center`.
    pub fn position_around(&self, center: DVec3) -> DVec3 {
        center + orbit_offset(self.angle, self.start_angle, self.distance_to_center)
    }

    /// Closed ring polyline around `center`, at least three segments.
    ///
    /// The segment count follows the radius so larger rings stay smooth.
    pub fn ring_points(&self, center: DVec3) -> Vec<DVec3> {
        let segments = (self.distance_to_center.floor() as usize).max(3);
        (0..=segments)
            .map(|j| {
                let theta = j as f64 / segments as f64 * std::f64::consts::TAU;
                center + DVec3::new(theta.cos(), 0.0, theta.sin()) * self.distance_to_center
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orbit(period: f64, reversed: bool) -> Orbit {
        Orbit::new(BodyId(1), OrbitParent::Body(BodyId(0)), 10.0, 0.0, period, reversed)
    }

    #[test]
    fn test_angle_linear_in_time() {
        assert_eq!(orbit_angle(0.0, 60.0, false), 0.0);
        assert!((orbit_angle(15.0, 60.0, false) - 90.0).abs() < 1e-12);
        assert!((orbit_angle(15.0, 60.0, true) + 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_period_never_moves() {
        assert_eq!(orbit_angle(123.0, 0.0, false), 0.0);
        assert_eq!(orbit_angle(123.0, f64::NAN, true), 0.0);
        assert_eq!(orbit_angle(123.0, f64::INFINITY, false), 0.0);
    }

    #[test]
    fn test_orbit_closes_after_one_period() {
        for reversed in [false, true] {
            let mut o = orbit(37.5, reversed);
            o.start_angle = 42.0;
            o.update(3.0);
            let before = o.position_around(DVec3::ZERO);
            o.update(3.0 + 37.5);
            let after = o.position_around(DVec3::ZERO);
            assert!(
                before.distance(after) < 1e-9,
                "orbit did not close: {before} vs {after}"
            );
        }
    }

    #[test]
    fn test_position_keeps_distance_and_plane() {
        let mut o = orbit(20.0, false);
        let center = DVec3::new(5.0, 2.0, -3.0);
        for step in 0..50 {
            o.update(step as f64 * 0.7);
            let p = o.position_around(center);
            assert!((p.distance(center) - 10.0).abs() < 1e-9);
            assert_eq!(p.y, center.y);
        }
    }

    #[test]
    fn test_start_angle_offsets_position() {
        let mut o = orbit(10.0, false);
        o.start_angle = 90.0;
        o.update(0.0);
        let p = o.position_around(DVec3::ZERO);
        assert!(p.x.abs() < 1e-9 && (p.z - 10.0).abs() < 1e-9, "got {p}");
    }

    #[test]
    fn test_ring_segment_count() {
        let o = orbit(10.0, false);
        assert_eq!(o.ring_points(DVec3::ZERO).len(), 11);

        let mut tiny = orbit(10.0, false);
        tiny.distance_to_center = 0.5;
        assert_eq!(tiny.ring_points(DVec3::ZERO).len(), 4);
    }

    #[test]
    fn test_ring_is_closed() {
        let o = orbit(10.0, false);
        let ring = o.ring_points(DVec3::X);
        let (first, last) = (ring[0], ring[ring.len() - 1]);
        assert!(first.distance(last) < 1e-9);
    }
}
