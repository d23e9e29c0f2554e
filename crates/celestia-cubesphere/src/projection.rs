//! Face grid to cube and sphere projection.
//!
//! A face grid of `resolution × resolution` vertices is laid over the
//! `[-1, 1]` cube face and pushed out onto the unit sphere by plain
//! normalisation.

use glam::DVec3;

use crate::CubeFace;

/// Fraction along a face edge for grid index `index`, in `[0, 1]`.
///
/// `resolution` must be at least 2; index `resolution - 1` maps to exactly 1.
#[inline]
#[must_use]
pub fn grid_percent(index: u32, resolution: u32) -> f64 {
    debug_assert!(resolution >= 2, "resolution must be at least 2");
    f64::from(index) / f64::from(resolution - 1)
}

/// Convert a face percent pair to a point on the surface of the `[-1, 1]` cube.
///
/// `(0.5, 0.5)` maps to the face's up vector.
#[inline]
#[must_use]
pub fn face_point_on_cube(face: CubeFace, percent_x: f64, percent_y: f64) -> DVec3 {
    let a = face.axis_a() * ((percent_x - 0.5) * 2.0);
    let b = face.axis_b() * ((percent_y - 0.5) * 2.0);
    face.up() + a + b
}

/// Project a face percent pair onto the unit sphere.
#[inline]
#[must_use]
pub fn face_point_on_sphere(face: CubeFace, percent_x: f64, percent_y: f64) -> DVec3 {
    face_point_on_cube(face, percent_x, percent_y).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_face_center_maps_to_up() {
        for face in CubeFace::ALL {
            let sphere_pt = face_point_on_sphere(face, 0.5, 0.5);
            let expected = face.up();
            assert!(
                (sphere_pt - expected).length() < EPSILON,
                "Face center of {face:?} did not map to up: got {sphere_pt:?}, expected {expected:?}"
            );
        }
    }

    #[test]
    fn test_all_outputs_on_unit_sphere() {
        for face in CubeFace::ALL {
            for x in 0..=10 {
                for y in 0..=10 {
                    let px = grid_percent(x, 11);
                    let py = grid_percent(y, 11);
                    let sphere_pt = face_point_on_sphere(face, px, py);
                    assert!(
                        (sphere_pt.length() - 1.0).abs() < EPSILON,
                        "Point not on unit sphere for {face:?} at ({px}, {py}): length = {}",
                        sphere_pt.length()
                    );
                }
            }
        }
    }

    #[test]
    fn test_grid_percent_endpoints() {
        assert_eq!(grid_percent(0, 50), 0.0);
        assert_eq!(grid_percent(49, 50), 1.0);
        assert_eq!(grid_percent(1, 2), 1.0);
    }

    #[test]
    fn test_cube_corners_lie_on_cube() {
        for face in CubeFace::ALL {
            for (px, py) in [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)] {
                let p = face_point_on_cube(face, px, py);
                let max_abs = p.x.abs().max(p.y.abs()).max(p.z.abs());
                assert!(
                    (max_abs - 1.0).abs() < EPSILON,
                    "Corner ({px}, {py}) of {face:?} is off the cube: {p:?}"
                );
                assert!(
                    (p.length() - 3.0_f64.sqrt()).abs() < EPSILON,
                    "Corner ({px}, {py}) of {face:?} is not a cube vertex: {p:?}"
                );
            }
        }
    }

    #[test]
    fn test_shared_edge_points_coincide() {
        // +Y face at percent_x = 1 lies on the x = 1 edge, which +X covers at percent_y = 0.
        let steps = 20;
        for i in 0..=steps {
            let t = grid_percent(i, steps + 1);
            let on_pos_y = face_point_on_sphere(CubeFace::PosY, 1.0, t);
            let on_pos_x = face_point_on_sphere(CubeFace::PosX, 1.0 - t, 0.0);
            assert!(
                (on_pos_y - on_pos_x).length() < EPSILON,
                "Edge mismatch at t={t}: {on_pos_y:?} vs {on_pos_x:?}"
            );
        }
    }
}
