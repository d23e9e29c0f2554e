//! Indexed surface mesh built from a triangle stream: optional vertex
//! welding across face seams and per-vertex normals.

use bytemuck::{Pod, Zeroable};
use glam::DVec3;
use rustc_hash::{FxHashMap, FxHashSet};

/// Positions closer than this are merged by the welding pass.
pub const WELD_TOLERANCE: f64 = 1e-7;

/// GPU-ready vertex: position and normal as `f32`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SurfaceVertex {
    /// Body-local position.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
}

impl SurfaceVertex {
    /// Reinterpret a vertex slice as raw bytes for upload.
    pub fn as_bytes(vertices: &[SurfaceVertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

/// Indexed triangle mesh with per-vertex normals.
#[derive(Clone, Debug, Default)]
pub struct SurfaceMesh {
    positions: Vec<DVec3>,
    normals: Vec<DVec3>,
    indices: Vec<u32>,
    welded: bool,
}

impl SurfaceMesh {
    /// Build a mesh from a triangle stream (three vertices per triangle).
    ///
    /// With `weld` set, coincident positions are merged and normals are
    /// area-weighted averages over every triangle touching a position, which
    /// hides face seams. Without it, vertices stay duplicated and each one
    /// carries its triangle's flat normal.
    pub fn from_triangles(vertices: &[DVec3], weld: bool) -> Self {
        debug_assert!(vertices.len() % 3 == 0, "triangle stream length not a multiple of 3");

        let (positions, indices) = if weld {
            weld_positions(vertices, WELD_TOLERANCE)
        } else {
            (vertices.to_vec(), (0..vertices.len() as u32).collect())
        };

        let normals = if weld {
            smooth_normals(&positions, &indices)
        } else {
            flat_normals(&positions)
        };

        Self {
            positions,
            normals,
            indices,
            welded: weld,
        }
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Unit normals, one per position.
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    /// Triangle indices into [`positions`](Self::positions).
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Whether the welding pass ran.
    pub fn is_welded(&self) -> bool {
        self.welded
    }

    /// Number of distinct vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaved `f32` vertices for the renderer.
    pub fn surface_vertices(&self) -> Vec<SurfaceVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| SurfaceVertex {
                position: p.as_vec3().to_array(),
                normal: n.as_vec3().to_array(),
            })
            .collect()
    }

    /// Number of directed edges whose reverse edge is missing.
    ///
    /// Zero for a closed, consistently wound mesh. Only meaningful on welded
    /// meshes; an unwelded stream has no shared vertices.
    pub fn open_edge_count(&self) -> usize {
        let mut edges: FxHashSet<(u32, u32)> = FxHashSet::default();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                edges.insert((a, b));
            }
        }
        edges.iter().filter(|(a, b)| !edges.contains(&(*b, *a))).count()
    }
}

/// Merge positions within `tolerance`, returning unique positions and the
/// index of each input vertex.
///
/// Positions are bucketed on a grid of cell size `tolerance`; each lookup
/// scans the 27 neighbouring cells so merges never miss across a cell border.
fn weld_positions(vertices: &[DVec3], tolerance: f64) -> (Vec<DVec3>, Vec<u32>) {
    let mut positions: Vec<DVec3> = Vec::with_capacity(vertices.len() / 6);
    let mut indices = Vec::with_capacity(vertices.len());
    let mut buckets: FxHashMap<[i64; 3], Vec<u32>> = FxHashMap::default();

    let cell_of = |p: DVec3| -> [i64; 3] {
        let c = (p / tolerance).floor();
        [c.x as i64, c.y as i64, c.z as i64]
    };

    for &vertex in vertices {
        let cell = cell_of(vertex);
        let mut found = None;

        'search: for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let key = [cell[0] + dx, cell[1] + dy, cell[2] + dz];
                    if let Some(candidates) = buckets.get(&key) {
                        for &idx in candidates {
                            if positions[idx as usize].distance(vertex) <= tolerance {
                                found = Some(idx);
                                break 'search;
                            }
                        }
                    }
                }
            }
        }

        let idx = found.unwrap_or_else(|| {
            let idx = positions.len() as u32;
            positions.push(vertex);
            buckets.entry(cell).or_default().push(idx);
            idx
        });
        indices.push(idx);
    }

    (positions, indices)
}

/// Area-weighted vertex normals: the unnormalised cross product of each
/// triangle is added to its three corners.
fn smooth_normals(positions: &[DVec3], indices: &[u32]) -> Vec<DVec3> {
    let mut accum = vec![DVec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let face_normal = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        accum[a] += face_normal;
        accum[b] += face_normal;
        accum[c] += face_normal;
    }

    accum
        .into_iter()
        .zip(positions)
        .map(|(n, p)| n.try_normalize().unwrap_or_else(|| p.normalize_or_zero()))
        .collect()
}

fn flat_normals(positions: &[DVec3]) -> Vec<DVec3> {
    let mut normals = Vec::with_capacity(positions.len());
    for tri in positions.chunks_exact(3) {
        let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
        let n = (tri[1] - tri[0])
            .cross(tri[2] - tri[0])
            .try_normalize()
            .unwrap_or_else(|| centroid.normalize_or_zero());
        normals.extend_from_slice(&[n, n, n]);
    }
    normals
}
