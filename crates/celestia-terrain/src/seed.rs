//! Deterministic seed handling.
//!
//! Seeds arrive either as numbers or as free-form strings typed by a user.
//! Both are reduced to a `u64` that is stable across processes, then derived
//! into noise permutation seeds and RNG streams.

use std::convert::Infallible;
use std::fmt;
use std::hash::Hasher;
use std::str::FromStr;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

/// A user-facing seed value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoiseSeed {
    /// Numeric seed, used as-is.
    Number(u64),
    /// Text seed, hashed into a number.
    Text(String),
}

impl NoiseSeed {
    /// Reduce the seed to a stable 64-bit value.
    ///
    /// Text seeds go through `FxHasher`, which has no per-process random
    /// state, so the same string yields the same value on every run.
    pub fn to_u64(&self) -> u64 {
        match self {
            NoiseSeed::Number(n) => *n,
            NoiseSeed::Text(text) => {
                let mut hasher = FxHasher::default();
                hasher.write(text.as_bytes());
                hasher.write_u8(0xff);
                hasher.finish()
            }
        }
    }

    /// Fold the seed into the 32-bit seed expected by `noise` generators.
    pub fn to_u32(&self) -> u32 {
        let v = self.to_u64();
        (v ^ (v >> 32)) as u32
    }
}

impl Default for NoiseSeed {
    fn default() -> Self {
        NoiseSeed::Number(0)
    }
}

impl fmt::Display for NoiseSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoiseSeed::Number(n) => write!(f, "{n}"),
            NoiseSeed::Text(text) => f.write_str(text),
        }
    }
}

impl From<u64> for NoiseSeed {
    fn from(value: u64) -> Self {
        NoiseSeed::Number(value)
    }
}

impl From<&str> for NoiseSeed {
    fn from(value: &str) -> Self {
        NoiseSeed::Text(value.to_owned())
    }
}

impl From<String> for NoiseSeed {
    fn from(value: String) -> Self {
        NoiseSeed::Text(value)
    }
}

/// Digits-only input becomes a numeric seed, anything else a text seed.
impl FromStr for NoiseSeed {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<u64>()
            .map_or_else(|_| NoiseSeed::Text(s.to_owned()), NoiseSeed::Number))
    }
}

/// Build the deterministic RNG stream for a seed.
///
/// The returned RNG produces an identical sequence for the same seed,
/// regardless of thread or platform.
pub fn seeded_rng(seed: &NoiseSeed) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.to_u64())
}
