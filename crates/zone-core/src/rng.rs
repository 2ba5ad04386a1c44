//! Random number generation for zone generation
//!
//! Uses a seeded ChaCha RNG so that a seed reproduces the same zone.

use rand::distributions::Standard;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Source of uniform samples in `[0, 1)`
///
/// The maze generator only ever asks for one float at a time, so any
/// deterministic stream (including a scripted one in tests) can drive it.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..len`. Returns 0 if `len` is 0.
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }

    /// Returns true with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Zone random number generator
///
/// Wraps ChaCha8Rng. Only the seed is serialized; deserializing restarts the
/// stream from that seed.
#[derive(Debug, Clone)]
pub struct ZoneRng {
    rng: ChaCha8Rng,
    seed: [u8; 32],
}

impl Serialize for ZoneRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ZoneRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = <[u8; 32]>::deserialize(deserializer)?;
        Ok(ZoneRng::from_seed_bytes(seed))
    }
}

impl ZoneRng {
    /// Create a new RNG from a numeric seed
    pub fn new(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&seed.to_le_bytes());
        Self::from_seed_bytes(bytes)
    }

    /// Create a new RNG from a seed string
    ///
    /// The SHA-256 digest of the string is the ChaCha key, so equal strings
    /// give equal streams on every platform.
    pub fn from_seed_str(seed: &str) -> Self {
        let digest: [u8; 32] = Sha256::digest(seed.as_bytes()).into();
        Self::from_seed_bytes(digest)
    }

    fn from_seed_bytes(seed: [u8; 32]) -> Self {
        Self {
            rng: ChaCha8Rng::from_seed(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        Self::from_seed_bytes(rand::random())
    }

    /// Seed bytes this RNG was created from
    pub fn seed(&self) -> [u8; 32] {
        self.seed
    }
}

impl RandomSource for ZoneRng {
    fn next_f64(&mut self) -> f64 {
        self.rng.sample(Standard)
    }
}

impl Default for ZoneRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
