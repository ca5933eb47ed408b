//! # PEPEPOW Xelis v2 Core Algorithm
//!
//! The memory-hard proof-of-work hash PEPEPOW block headers switched to at
//! its algorithm cutover. This crate is the pure algorithm: given header bytes
//! it returns a 32-byte digest. Which headers take this path, and the legacy
//! chain hash used before the cutover, live in the `pepepow-hash` crate.
//!
//! ## Algorithm
//!
//! - Input window: first 112 bytes of the header, zero-padded
//! - Scratchpad: 54,912 words (429 KiB), split into two halves
//! - Fill: BLAKE3-keyed ChaCha8 keystream in 4 chained chunks
//! - Diffuse: 3 passes x 27,456 steps of data-dependent mixing with
//!   one AES round per pass and 16 integer mixers (including exact
//!   128-bit multiply, divide and modulo)
//! - Output: BLAKE3-256 of the final scratchpad
//!
//! ## Example
//!
//! ```rust
//! use pepepow_hash_core::hash;
//!
//! let header = [0x01u8; 80];
//! let digest = hash(&header);
//! assert_eq!(digest.len(), 32);
//! ```
//!
//! ## no_std Support
//!
//! This crate supports `no_std` environments with the `alloc` crate:
//!
//! ```toml
//! [dependencies]
//! pepepow-hash-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod chacha;
mod params;
mod primitives;
mod xelis;

#[cfg(feature = "std")]
mod ffi;

pub use chacha::{ChaCha, Rounds};
pub use params::*;
pub use primitives::aes_round;
pub use xelis::{hash, mix, prepare_input};

#[cfg(test)]
mod tests;
