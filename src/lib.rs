//! PEPEPOW Header Hashing
//!
//! Proof-of-work hashing for PEPEPOW block headers. The chain switched hash
//! algorithms at height 1,930,000:
//!
//! - **Legacy**: blake512 -> simd512 -> echo512 -> cubehash512 -> shavite512,
//!   then triple SHA-256. The five 512-bit functions are injected by the host,
//!   normally from the sph shared libraries through [`SphLibrary`].
//! - **Xelis v2**: a memory-hard hash over a 429 KiB scratchpad (see the
//!   `pepepow-hash-core` crate, re-exported here as [`algorithm`]).
//!
//! A known height selects the algorithm; without one, header version bit
//! `0x8000` does.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pepepow_hash::{Hash512, HeaderHasher, LegacyHasher, LegacyStage, PrimitiveRegistry};
//!
//! // Real deployments use `RegistryBuilder::register_sph` instead
//! struct Placeholder;
//!
//! impl Hash512 for Placeholder {
//!     fn name(&self) -> &str {
//!         "placeholder"
//!     }
//!
//!     fn hash(&self, data: &[u8]) -> [u8; 64] {
//!         let mut out = [0u8; 64];
//!         for (i, byte) in data.iter().enumerate() {
//!             out[i % 64] ^= byte;
//!         }
//!         out
//!     }
//! }
//!
//! let mut builder = PrimitiveRegistry::builder();
//! for stage in LegacyStage::ORDER {
//!     builder = builder.register(stage, Arc::new(Placeholder));
//! }
//! let hasher = HeaderHasher::pepepow(LegacyHasher::new(builder.build().unwrap()));
//!
//! let header = [0u8; 80];
//! let digest = hasher.header_hash(&header, Some(1_930_000)).unwrap();
//! assert_eq!(digest, pepepow_hash::algorithm::hash(&header));
//!
//! assert!(hasher.header_hash(&header[..79], None).is_err());
//! ```

// Re-export the core algorithm
pub use pepepow_hash_core as algorithm;

pub mod config;
pub mod error;
pub mod legacy;
pub mod selector;

#[cfg(test)]
mod test_support;

// Convenience re-exports
pub use config::ChainParams;
pub use error::{Error, Result};
pub use legacy::{
    Hash512, LegacyHasher, LegacyStage, PrimitiveRegistry, RegistryBuilder, SphLibrary,
};
pub use selector::{Algorithm, HeaderHasher, display_hex, version};
