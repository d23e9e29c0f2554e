//! Cube-sphere geometry: face basis vectors, face grid projection, elevation
//! sampling, and closed triangle mesh construction.

mod cube_face;
mod mesh;
mod mesher;
mod projection;
mod winding;

pub use cube_face::CubeFace;
pub use mesh::{SurfaceMesh, SurfaceVertex, WELD_TOLERANCE};
pub use mesher::{
    CubeSphereMesher, ElevationSource, FaceGrid, FlatElevation, MAX_SURFACE_RADIUS,
    MIN_RESOLUTION, MeshError, SurfaceExtrema, TriangleSoup,
};
pub use projection::{face_point_on_cube, face_point_on_sphere, grid_percent};
pub use winding::{inward_triangle_count, triangle_winds_outward};
