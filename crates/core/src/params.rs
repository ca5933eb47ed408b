//! Xelis v2 Algorithm Parameters
//!
//! These values define the PEPEPOW v2 proof-of-work and must match the
//! deployed chain bit for bit.

use crate::chacha::Rounds;

/// Header bytes consumed by the hash; longer input is truncated, shorter is zero-padded
pub const INPUT_LEN: usize = 112;

/// Scratchpad size in 64-bit words
pub const MEMORY_SIZE: usize = 429 * 128;

/// Words per scratchpad half (`mem_a` and `mem_b`)
pub const BUFFER_SIZE: usize = MEMORY_SIZE / 2;

/// Scratchpad size in bytes
pub const SCRATCHPAD_BYTES: usize = MEMORY_SIZE * 8;

/// Number of keystream chunks written during scratchpad fill
pub const CHUNKS: usize = 4;

/// Bytes of key material per chunk
pub const CHUNK_SIZE: usize = 32;

/// Bytes of keystream per chunk
pub const CHUNK_BYTES: usize = SCRATCHPAD_BYTES / CHUNKS;

/// Scratchpad words per chunk
pub const CHUNK_WORDS: usize = MEMORY_SIZE / CHUNKS;

/// BLAKE3 output size used throughout
pub const HASH_SIZE: usize = 32;

/// ChaCha nonce size (IETF, 96-bit)
pub const NONCE_SIZE: usize = 12;

/// Outer iterations of the diffusion loop
pub const SCRATCHPAD_ITERS: usize = 3;

/// ChaCha rounds used to fill the scratchpad
pub const KEYSTREAM_ROUNDS: Rounds = Rounds::R8;

/// Round key for the single AES round in the diffusion loop
pub const AES_KEY: [u8; 16] = *b"xelishash-pow-v2";

/// AES block size
pub const AES_BLOCK_SIZE: usize = 16;
