//! Faces of the inflated cube and the frame each face grid is laid out in.

use glam::DVec3;

/// One face of the cube that is inflated into a body's sphere.
///
/// Declaration order is generation order: both poles first, then the
/// equatorial faces. Meshes concatenate faces in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum CubeFace {
    PosY = 0,
    NegY = 1,
    NegX = 2,
    PosX = 3,
    PosZ = 4,
    NegZ = 5,
}

const UPS: [DVec3; 6] = [
    DVec3::Y,
    DVec3::NEG_Y,
    DVec3::NEG_X,
    DVec3::X,
    DVec3::Z,
    DVec3::NEG_Z,
];

impl CubeFace {
    /// Every face, in generation order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::NegX,
        CubeFace::PosX,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Position in [`CubeFace::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Outward unit vector through the face centre.
    #[must_use]
    pub fn up(self) -> DVec3 {
        UPS[self.index()]
    }

    /// Column axis: `up` with its components rotated to `(y, z, x)`.
    #[must_use]
    pub fn axis_a(self) -> DVec3 {
        let up = self.up();
        DVec3::new(up.y, up.z, up.x)
    }

    /// Row axis, `up × axis_a`.
    ///
    /// `axis_a × axis_b == up`, so a grid walked column-then-row winds
    /// counter-clockwise seen from outside.
    #[must_use]
    pub fn axis_b(self) -> DVec3 {
        self.up().cross(self.axis_a())
    }
}
