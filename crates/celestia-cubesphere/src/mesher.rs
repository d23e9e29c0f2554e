//! Cube-sphere mesher: samples an elevation source over all six face grids
//! and stitches the grids into one triangle stream.

use glam::DVec3;
use tracing::debug;

use crate::CubeFace;
use crate::projection::{face_point_on_sphere, grid_percent};

/// Upper bound for any generated surface radius.
///
/// Elevation sources clamp against this ceiling so runaway noise sums can
/// never produce a body that swallows its neighbours.
pub const MAX_SURFACE_RADIUS: f64 = 100.0;

/// Smallest grid resolution that still forms a quad per face.
pub const MIN_RESOLUTION: u32 = 2;

/// A radial height function over the unit sphere.
///
/// Implementations must be pure: the same direction always yields the same
/// radius. The mesher may call them from several threads when bodies are
/// generated in parallel.
pub trait ElevationSource: Sync {
    /// Distance from the body centre to the surface along `unit`.
    fn elevation(&self, unit: DVec3) -> f64;
}

/// Constant-radius surface: a perfect sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatElevation {
    radius: f64,
}

impl FlatElevation {
    /// Sphere of the given radius.
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl ElevationSource for FlatElevation {
    fn elevation(&self, _unit: DVec3) -> f64 {
        self.radius
    }
}

/// Errors raised when a mesher is configured with an unusable grid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// Fewer than two vertices per face edge cannot form a triangle.
    #[error("resolution {0} is below the minimum of {min} vertices per face edge", min = MIN_RESOLUTION)]
    DegenerateResolution(u32),
}

/// Lowest and highest surface radii found while sampling a body.
///
/// Vertex positions carry f64 rounding, so a vertex on the ceiling can
/// measure a few ulps past [`MAX_SURFACE_RADIUS`]. Reported radii are capped
/// at the ceiling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceExtrema {
    /// Smallest reported vertex distance. Pinned to the water radius when
    /// any vertex sits at or below the water line.
    pub min_radius: f64,
    /// Largest vertex distance from the centre.
    pub max_radius: f64,
    /// Water line radius, when the body has water.
    pub water_radius: Option<f64>,
    /// Vertex that set `min_radius`.
    pub lowest_point: DVec3,
    /// Vertex that set `max_radius`.
    pub highest_point: DVec3,
}

impl SurfaceExtrema {
    /// Fresh trackers: `min_radius` starts at `f64::MAX`, `max_radius` at zero.
    pub fn new(water_radius: Option<f64>) -> Self {
        Self {
            min_radius: f64::MAX,
            max_radius: 0.0,
            water_radius,
            lowest_point: DVec3::ZERO,
            highest_point: DVec3::ZERO,
        }
    }

    /// Fold one surface vertex into the trackers.
    pub fn observe(&mut self, point: DVec3) {
        let length = point.length().min(MAX_SURFACE_RADIUS);
        let reported = match self.water_radius {
            Some(water) if length <= water => water,
            _ => length,
        };

        if reported < self.min_radius {
            self.min_radius = reported;
            self.lowest_point = point;
        }
        if length > self.max_radius {
            self.max_radius = length;
            self.highest_point = point;
        }
    }

    /// Combine trackers from two disjoint vertex sets.
    pub fn merge(&mut self, other: &SurfaceExtrema) {
        if other.min_radius < self.min_radius {
            self.min_radius = other.min_radius;
            self.lowest_point = other.lowest_point;
        }
        if other.max_radius > self.max_radius {
            self.max_radius = other.max_radius;
            self.highest_point = other.highest_point;
        }
    }

    /// Difference between the highest and lowest reported radius.
    pub fn relief(&self) -> f64 {
        (self.max_radius - self.min_radius).max(0.0)
    }
}

/// Displaced vertices for one cube face, row-major (`row * resolution + column`).
#[derive(Clone, Debug)]
pub struct FaceGrid {
    /// Which face was sampled.
    pub face: CubeFace,
    /// Vertices per face edge.
    pub resolution: u32,
    /// Surface points, `resolution²` of them.
    pub points: Vec<DVec3>,
    /// Extrema over this face only.
    pub extrema: SurfaceExtrema,
}

impl FaceGrid {
    /// Append the two triangles of every grid cell to `out`.
    ///
    /// For a cell with corners c0 (lower-left), c1 (lower-right),
    /// c2 (upper-left) and c3 (upper-right) the triangles are
    /// `{c0, c1, c3}` and `{c0, c3, c2}`.
    pub fn triangulate_into(&self, out: &mut Vec<DVec3>) {
        let res = self.resolution as usize;
        out.reserve((res - 1) * (res - 1) * 6);

        for row in 0..res - 1 {
            for column in 0..res - 1 {
                let c0 = self.points[row * res + column];
                let c1 = self.points[row * res + column + 1];
                let c2 = self.points[(row + 1) * res + column];
                let c3 = self.points[(row + 1) * res + column + 1];

                out.extend_from_slice(&[c0, c1, c3, c0, c3, c2]);
            }
        }
    }
}

/// Concatenated triangle list for all six faces, three vertices per triangle.
///
/// Vertices along face seams are duplicated; see [`crate::SurfaceMesh`] for welding.
#[derive(Clone, Debug)]
pub struct TriangleSoup {
    /// Triangle corners, three consecutive entries per triangle.
    pub vertices: Vec<DVec3>,
    /// Extrema over every face.
    pub extrema: SurfaceExtrema,
}

impl TriangleSoup {
    /// Number of triangles in the stream.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// Builds closed cube-sphere triangle meshes from an [`ElevationSource`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeSphereMesher {
    resolution: u32,
    water_radius: Option<f64>,
}

impl CubeSphereMesher {
    /// Create a mesher with `resolution` vertices per face edge.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::DegenerateResolution`] when `resolution < 2`.
    pub fn new(resolution: u32) -> Result<Self, MeshError> {
        if resolution < MIN_RESOLUTION {
            return Err(MeshError::DegenerateResolution(resolution));
        }
        Ok(Self {
            resolution,
            water_radius: None,
        })
    }

    /// Report vertices at or below `water_radius` as sitting on the water line.
    #[must_use]
    pub fn with_water_radius(mut self, water_radius: Option<f64>) -> Self {
        self.water_radius = water_radius;
        self
    }

    /// Vertices per face edge.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Number of triangle-stream vertices a full build produces.
    pub fn expected_vertex_count(&self) -> usize {
        let cells = (self.resolution as usize - 1).pow(2);
        CubeFace::ALL.len() * cells * 6
    }

    /// Sample one face grid.
    pub fn sample_face<E: ElevationSource + ?Sized>(&self, face: CubeFace, source: &E) -> FaceGrid {
        let res = self.resolution;
        let mut points = Vec::with_capacity((res * res) as usize);
        let mut extrema = SurfaceExtrema::new(self.water_radius);

        for y in 0..res {
            let percent_y = grid_percent(y, res);
            for x in 0..res {
                let percent_x = grid_percent(x, res);
                let unit = face_point_on_sphere(face, percent_x, percent_y);
                let point = unit * source.elevation(unit);
                extrema.observe(point);
                points.push(point);
            }
        }

        FaceGrid {
            face,
            resolution: res,
            points,
            extrema,
        }
    }

    /// Sample and triangulate all six faces into one stream.
    pub fn build<E: ElevationSource + ?Sized>(&self, source: &E) -> TriangleSoup {
        let mut vertices = Vec::with_capacity(self.expected_vertex_count());
        let mut extrema = SurfaceExtrema::new(self.water_radius);

        for face in CubeFace::ALL {
            let grid = self.sample_face(face, source);
            extrema.merge(&grid.extrema);
            grid.triangulate_into(&mut vertices);
        }

        debug!(
            resolution = self.resolution,
            vertices = vertices.len(),
            min_radius = extrema.min_radius,
            max_radius = extrema.max_radius,
            "cube-sphere stream built"
        );

        TriangleSoup { vertices, extrema }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Elevation that bulges along +Y so extrema are predictable.
    struct PolarBulge;

    impl ElevationSource for PolarBulge {
        fn elevation(&self, unit: DVec3) -> f64 {
            10.0 + unit.y.max(0.0) * 5.0
        }
    }

    #[test]
    fn test_resolution_below_two_rejected() {
        assert_eq!(
            CubeSphereMesher::new(1),
            Err(MeshError::DegenerateResolution(1))
        );
        assert_eq!(
            CubeSphereMesher::new(0),
            Err(MeshError::DegenerateResolution(0))
        );
        assert!(CubeSphereMesher::new(2).is_ok());
    }

    #[test]
    fn test_vertex_count_matches_six_faces_of_quads() {
        let mesher = CubeSphereMesher::new(5).unwrap();
        let soup = mesher.build(&FlatElevation::new(1.0));
        assert_eq!(soup.vertices.len(), 6 * 4 * 4 * 6);
        assert_eq!(soup.vertices.len(), mesher.expected_vertex_count());
        assert_eq!(soup.triangle_count(), 6 * 4 * 4 * 2);
    }

    #[test]
    fn test_flat_elevation_produces_sphere() {
        let soup = CubeSphereMesher::new(8)
            .unwrap()
            .build(&FlatElevation::new(15.0));
        for v in &soup.vertices {
            assert!((v.length() - 15.0).abs() < 1e-9, "vertex off sphere: {v:?}");
        }
        assert!((soup.extrema.min_radius - 15.0).abs() < 1e-9);
        assert!((soup.extrema.max_radius - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_extrema_track_bulge() {
        let soup = CubeSphereMesher::new(9).unwrap().build(&PolarBulge);
        assert!((soup.extrema.max_radius - 15.0).abs() < 1e-9);
        assert!((soup.extrema.min_radius - 10.0).abs() < 1e-9);
        assert!(soup.extrema.highest_point.y > 14.9);
        assert!(soup.extrema.lowest_point.y <= 1e-9);
    }

    #[test]
    fn test_reported_radius_never_passes_ceiling() {
        let mut extrema = SurfaceExtrema::new(None);
        extrema.observe(DVec3::new(MAX_SURFACE_RADIUS + 1e-12, 0.0, 0.0));
        assert_eq!(extrema.max_radius, MAX_SURFACE_RADIUS);

        let soup = CubeSphereMesher::new(17)
            .unwrap()
            .build(&FlatElevation::new(MAX_SURFACE_RADIUS));
        assert!(soup.extrema.max_radius <= MAX_SURFACE_RADIUS);
        for v in &soup.vertices {
            assert!((v.length() - MAX_SURFACE_RADIUS).abs() < 1e-9);
        }
    }

    #[test]
    fn test_water_radius_pins_minimum() {
        let soup = CubeSphereMesher::new(9)
            .unwrap()
            .with_water_radius(Some(11.0))
            .build(&PolarBulge);
        assert_eq!(soup.extrema.min_radius, 11.0);
        assert_eq!(soup.extrema.water_radius, Some(11.0));
        assert!(soup.extrema.min_radius <= soup.extrema.max_radius);
    }

    #[test]
    fn test_minimum_not_pinned_when_all_above_water() {
        let soup = CubeSphereMesher::new(9)
            .unwrap()
            .with_water_radius(Some(5.0))
            .build(&PolarBulge);
        assert!((soup.extrema.min_radius - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_triangles_wind_outward() {
        let soup = CubeSphereMesher::new(6).unwrap().build(&PolarBulge);
        for tri in soup.vertices.chunks_exact(3) {
            let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
            let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "inward triangle at {centroid:?}");
        }
    }

    #[test]
    fn test_face_grid_is_row_major() {
        let mesher = CubeSphereMesher::new(3).unwrap();
        let grid = mesher.sample_face(CubeFace::PosZ, &FlatElevation::new(1.0));
        assert_eq!(grid.points.len(), 9);
        // Centre of a 3x3 grid is the face up vector.
        assert!((grid.points[4] - DVec3::Z).length() < 1e-12);
        // Index 1 is one step along axis_a from index 0.
        let step = grid.points[1] - grid.points[0];
        assert!(step.dot(CubeFace::PosZ.axis_a()) > 0.0);
    }

    #[test]
    fn test_extrema_merge_keeps_outer_values() {
        let mut a = SurfaceExtrema::new(None);
        a.observe(DVec3::new(0.0, 12.0, 0.0));
        let mut b = SurfaceExtrema::new(None);
        b.observe(DVec3::new(0.0, 0.0, 9.0));
        b.observe(DVec3::new(14.0, 0.0, 0.0));
        a.merge(&b);
        assert_eq!(a.min_radius, 9.0);
        assert_eq!(a.max_radius, 14.0);
        assert_eq!(a.highest_point, DVec3::new(14.0, 0.0, 0.0));
        assert_eq!(a.relief(), 5.0);
    }
}
