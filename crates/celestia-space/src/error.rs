//! Solar system error types.

use celestia_body::{BodyError, BodyId};
use celestia_config::ConfigError;

/// Errors raised while assembling, generating, or updating a system.
#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    /// No body with this id exists in the arena.
    #[error("unknown body {0}")]
    UnknownBody(BodyId),

    /// The body already travels on an orbit.
    #[error("body {0} already orbits something")]
    AlreadyOrbiting(BodyId),

    /// Attaching would make a body orbit one of its own satellites.
    #[error("attaching {child} to {parent} would create an orbit cycle")]
    OrbitCycle {
        /// Body that would be attached.
        child: BodyId,
        /// Requested parent.
        parent: BodyId,
    },

    /// A body rejected its settings or failed to generate.
    #[error(transparent)]
    Body(#[from] BodyError),

    /// Generator ranges are unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The reserved word list is not a JSON array of strings.
    #[error("failed to parse word list: {0}")]
    WordList(#[from] serde_json::Error),
}
