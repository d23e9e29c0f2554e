//! Winding order checks for cube-sphere triangle streams.
//!
//! Every triangle must wind counter-clockwise when viewed from outside the
//! body so that backface culling keeps the visible side on all six faces.

use glam::DVec3;

/// Check if a triangle has correct outward-facing winding order.
///
/// Returns `true` if the triangle's computed normal (via cross product)
/// points away from the body centre, i.e. has a positive dot product with
/// the centroid direction.
///
/// `v0`, `v1`, `v2` are body-relative positions.
pub fn triangle_winds_outward(v0: DVec3, v1: DVec3, v2: DVec3) -> bool {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let face_normal = edge1.cross(edge2);

    let centroid = (v0 + v1 + v2) / 3.0;

    face_normal.dot(centroid) > 0.0
}

/// Count the triangles of a stream (three vertices each) that face inward.
pub fn inward_triangle_count(vertices: &[DVec3]) -> usize {
    vertices
        .chunks_exact(3)
        .filter(|tri| !triangle_winds_outward(tri[0], tri[1], tri[2]))
        .count()
}
