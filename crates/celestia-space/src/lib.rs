//! Solar systems: the body arena, simulated time, names, and seeded generation.

pub mod clock;
pub mod error;
pub mod generator;
pub mod names;
pub mod system;

pub use clock::SimClock;
pub use error::SystemError;
pub use generator::SystemGenerator;
pub use names::{GREEK_PREFIXES, NameGenerator, WordList, romanize};
pub use system::{OrbitRing, SolarSystem};
