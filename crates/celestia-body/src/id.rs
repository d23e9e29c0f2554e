//! Body identity and classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a body in its system's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub usize);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a body is, which decides how its surface is generated and shaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    #[default]
    Generic,
    /// Flat emissive sphere; a light source for every other body.
    Sun,
    Planet,
    Moon,
}

impl BodyKind {
    /// Whether the surface is displaced by layered noise.
    pub fn has_terrain(self) -> bool {
        self != BodyKind::Sun
    }
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BodyKind::Generic => "Generic",
            BodyKind::Sun => "Sun",
            BodyKind::Planet => "Planet",
            BodyKind::Moon => "Moon",
        };
        f.write_str(name)
    }
}
