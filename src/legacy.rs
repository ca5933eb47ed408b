//! Legacy chain hash used before the Xelis v2 cutover
//!
//! The header runs through five 512-bit hash functions in a fixed order,
//! each consuming the previous 64-byte output, followed by three rounds of
//! SHA-256:
//!
//! ```text
//! blake512 -> simd512 -> echo512 -> cubehash512 -> shavite512 -> sha256^3
//! ```
//!
//! The five 512-bit functions are supplied by the host as [`Hash512`]
//! implementations, usually the sph shared libraries via [`SphLibrary`], and
//! resolved once into an immutable [`PrimitiveRegistry`].

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

mod sph;

pub use sph::SphLibrary;

/// A 512-bit hash function usable as one stage of the legacy chain
///
/// Implementations must be deterministic and hold no state between calls.
pub trait Hash512: Send + Sync {
    /// Human-readable algorithm name, for logs
    fn name(&self) -> &str;

    /// Hash `data` to 64 bytes
    fn hash(&self, data: &[u8]) -> [u8; 64];
}

/// Position in the legacy chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyStage {
    Blake,
    Simd,
    Echo,
    Cubehash,
    Shavite,
}

impl LegacyStage {
    /// Chain order; must not be permuted
    pub const ORDER: [LegacyStage; 5] = [
        LegacyStage::Blake,
        LegacyStage::Simd,
        LegacyStage::Echo,
        LegacyStage::Cubehash,
        LegacyStage::Shavite,
    ];

    /// Algorithm name of the stage
    pub fn name(self) -> &'static str {
        match self {
            LegacyStage::Blake => "blake512",
            LegacyStage::Simd => "simd512",
            LegacyStage::Echo => "echo512",
            LegacyStage::Cubehash => "cubehash512",
            LegacyStage::Shavite => "shavite512",
        }
    }

    /// Short family name used in sph library and symbol names
    pub fn kind(self) -> &'static str {
        match self {
            LegacyStage::Blake => "blake",
            LegacyStage::Simd => "simd",
            LegacyStage::Echo => "echo",
            LegacyStage::Cubehash => "cubehash",
            LegacyStage::Shavite => "shavite",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LegacyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The five resolved legacy stages, in chain order
#[derive(Clone)]
pub struct PrimitiveRegistry {
    stages: [Arc<dyn Hash512>; 5],
}

impl PrimitiveRegistry {
    /// Start collecting stage implementations
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Implementation registered for `stage`
    pub fn get(&self, stage: LegacyStage) -> &dyn Hash512 {
        self.stages[stage.index()].as_ref()
    }
}

impl fmt::Debug for PrimitiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.stages.iter().map(|stage| stage.name()))
            .finish()
    }
}

/// Collects stage implementations before the registry is frozen
#[derive(Default)]
pub struct RegistryBuilder {
    slots: [Option<Arc<dyn Hash512>>; 5],
}

impl RegistryBuilder {
    /// Register `primitive` for `stage`, replacing any earlier registration
    pub fn register(mut self, stage: LegacyStage, primitive: Arc<dyn Hash512>) -> Self {
        debug!(stage = %stage, primitive = primitive.name(), "registered legacy primitive");
        self.slots[stage.index()] = Some(primitive);
        self
    }

    /// Register the sph shared library for every stage
    ///
    /// Libraries in `dir` take precedence over the system search path. Fails
    /// with [`Error::PrimitiveUnavailable`] on the first stage that cannot be
    /// loaded.
    pub fn register_sph(mut self, dir: Option<&Path>) -> Result<Self> {
        for stage in LegacyStage::ORDER {
            self = self.register(stage, Arc::new(SphLibrary::open(stage, dir)?));
        }
        Ok(self)
    }

    /// Freeze the registry
    ///
    /// Fails with [`Error::PrimitiveUnavailable`] naming the first missing
    /// stage in chain order. No fallback algorithm is ever substituted.
    pub fn build(self) -> Result<PrimitiveRegistry> {
        let [blake, simd, echo, cubehash, shavite] = self.slots;

        let stages = [
            require(LegacyStage::Blake, blake)?,
            require(LegacyStage::Simd, simd)?,
            require(LegacyStage::Echo, echo)?,
            require(LegacyStage::Cubehash, cubehash)?,
            require(LegacyStage::Shavite, shavite)?,
        ];

        info!("legacy primitive registry resolved");
        Ok(PrimitiveRegistry { stages })
    }
}

fn require(stage: LegacyStage, slot: Option<Arc<dyn Hash512>>) -> Result<Arc<dyn Hash512>> {
    slot.ok_or_else(|| {
        warn!(stage = %stage, "legacy primitive missing");
        Error::PrimitiveUnavailable(stage)
    })
}

/// Legacy chain hasher over a resolved registry
#[derive(Debug, Clone)]
pub struct LegacyHasher {
    registry: PrimitiveRegistry,
}

impl LegacyHasher {
    pub fn new(registry: PrimitiveRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PrimitiveRegistry {
        &self.registry
    }

    /// Hash a header that has already passed length validation
    pub fn hash(&self, header: &[u8]) -> [u8; 32] {
        let mut digest = self.registry.stages[0].hash(header);
        for primitive in &self.registry.stages[1..] {
            digest = primitive.hash(&digest);
        }

        let first = Sha256::digest(digest);
        let second = Sha256::digest(first);
        Sha256::digest(second).into()
    }
}
