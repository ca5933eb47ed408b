//! Xelis v2 memory-hard hash
//!
//! Three phases over a fresh 429 KiB scratchpad of 64-bit words:
//! - Fill: four BLAKE3-keyed ChaCha8 keystream chunks, each chunk's nonce
//!   taken from the tail of the previous one
//! - Diffuse: three passes of data-dependent reads and writes across the two
//!   scratchpad halves, driven by one AES round and sixteen integer mixers
//! - Finalize: BLAKE3 over the whole scratchpad, little-endian

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::chacha::ChaCha;
use crate::params::*;
use crate::primitives::{aes_round, combine, isqrt, mul_hi, udiv};

/// Scratchpad words consumed per BLAKE3 update during finalization
const FINALIZE_WORDS: usize = 128;

/// Working memory for one hash
///
/// Words `[0, BUFFER_SIZE)` form `mem_a`, `[BUFFER_SIZE, MEMORY_SIZE)` form `mem_b`.
pub(crate) struct Scratchpad {
    words: Vec<u64>,
}

impl Scratchpad {
    pub(crate) fn new() -> Self {
        Self {
            words: vec![0u64; MEMORY_SIZE],
        }
    }

    #[cfg(test)]
    pub(crate) fn words(&self) -> &[u64] {
        &self.words
    }

    /// Fill the scratchpad with ChaCha8 keystream keyed from the input
    pub(crate) fn fill(&mut self, input: &[u8; INPUT_LEN]) {
        // Key material: the input followed by zeros, read 32 bytes per chunk
        let mut key = [0u8; CHUNK_SIZE * CHUNKS];
        let key_len = INPUT_LEN.min(key.len());
        key[..key_len].copy_from_slice(&input[..key_len]);

        // buffer = running_hash || key_chunk
        let mut buffer = [0u8; CHUNK_SIZE * 2];
        buffer[..HASH_SIZE].copy_from_slice(blake3::hash(input).as_bytes());

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&buffer[..NONCE_SIZE]);

        let mut stream = vec![0u8; CHUNK_BYTES];
        for (chunk, key_chunk) in key.chunks_exact(CHUNK_SIZE).enumerate() {
            buffer[CHUNK_SIZE..].copy_from_slice(key_chunk);
            let input_hash: [u8; HASH_SIZE] = blake3::hash(&buffer).into();

            ChaCha::new(&input_hash, &nonce, KEYSTREAM_ROUNDS).fill(&mut stream);

            let words = &mut self.words[chunk * CHUNK_WORDS..(chunk + 1) * CHUNK_WORDS];
            for (word, bytes) in words.iter_mut().zip(stream.chunks_exact(8)) {
                *word = read_u64_le(bytes);
            }

            // Next chunk's nonce is the tail of this one
            nonce.copy_from_slice(&stream[CHUNK_BYTES - NONCE_SIZE..]);
            buffer[..HASH_SIZE].copy_from_slice(&input_hash);
        }
    }

    /// Run the diffusion passes in place
    pub(crate) fn diffuse(&mut self) {
        let (mem_a, mem_b) = self.words.split_at_mut(BUFFER_SIZE);
        let size = BUFFER_SIZE as u64;

        let mut addr_a = mem_b[BUFFER_SIZE - 1];
        let mut addr_b = mem_a[BUFFER_SIZE - 1] >> 32;
        let mut r: usize = 0;

        for i in 0..SCRATCHPAD_ITERS {
            let mem_a_val = mem_a[(addr_a % size) as usize];
            let mem_b_val = mem_b[(addr_b % size) as usize];

            let mut block = [0u8; AES_BLOCK_SIZE];
            block[..8].copy_from_slice(&mem_b_val.to_le_bytes());
            block[8..].copy_from_slice(&mem_a_val.to_le_bytes());
            let block = aes_round(&block, &AES_KEY);

            let hash1 = read_u64_le(&block[..8]);
            let hash2 = mem_a_val ^ mem_b_val;
            addr_a = !(hash1 ^ hash2);

            for j in 0..BUFFER_SIZE {
                let a = mem_a[(addr_a % size) as usize];
                let b = mem_b[(!addr_a.rotate_right(r as u32) % size) as usize];
                let c = if r < BUFFER_SIZE {
                    mem_a[r]
                } else {
                    mem_b[r - BUFFER_SIZE]
                };
                r = (r + 1) % MEMORY_SIZE;

                // Only the low 32 bits of c pick the rotation
                let op = (addr_a.rotate_left(c as u32) & 0xf) as u8;
                let v = mix(op, a, b, c, r as u32, addr_a, (i * j) as u32);
                addr_a = (addr_a ^ v).rotate_left(1);

                let target = BUFFER_SIZE - j - 1;
                let t = mem_a[target] ^ addr_a;
                mem_a[target] = t;
                mem_b[j] ^= t.rotate_right(addr_a as u32);
            }

            addr_b = isqrt(addr_a);
        }
    }

    /// BLAKE3 of the scratchpad as little-endian bytes
    pub(crate) fn finalize(&self) -> [u8; HASH_SIZE] {
        let mut hasher = blake3::Hasher::new();
        let mut bytes = [0u8; FINALIZE_WORDS * 8];

        for words in self.words.chunks(FINALIZE_WORDS) {
            for (dst, word) in bytes.chunks_exact_mut(8).zip(words) {
                dst.copy_from_slice(&word.to_le_bytes());
            }
            hasher.update(&bytes[..words.len() * 8]);
        }

        hasher.finalize().into()
    }
}

/// Copy up to `INPUT_LEN` bytes of `input` into a zero-padded window
#[inline(always)]
pub fn prepare_input(input: &[u8]) -> [u8; INPUT_LEN] {
    let mut prepared = [0u8; INPUT_LEN];
    let len = input.len().min(INPUT_LEN);
    prepared[..len].copy_from_slice(&input[..len]);
    prepared
}

/// One of the sixteen diffusion mixers, selected by the low four bits of `op`
///
/// `r` is the already-advanced scratchpad cursor, `result` the address word
/// before this step and `ij` the product of the outer and inner loop indices.
/// All arithmetic wraps; 128-bit intermediates are exact.
#[inline(always)]
pub fn mix(op: u8, a: u64, b: u64, c: u64, r: u32, result: u64, ij: u32) -> u64 {
    match op & 0xf {
        0 => c.rotate_left(ij) ^ b,
        1 => c.rotate_right(ij) ^ a,
        2 => a ^ b ^ c,
        3 => a.wrapping_add(b).wrapping_mul(c),
        4 => b.wrapping_sub(c).wrapping_mul(a),
        5 => c.wrapping_sub(a).wrapping_add(b),
        6 => a.wrapping_sub(b).wrapping_add(c),
        7 => b.wrapping_mul(c).wrapping_add(a),
        8 => c.wrapping_mul(a).wrapping_add(b),
        9 => a.wrapping_mul(b).wrapping_mul(c),
        10 => (combine(a, b) % (c | 1) as u128) as u64,
        11 => {
            let t2 = combine(result.rotate_left(r), a | 2);
            let cb = combine(b, c);
            if t2 > cb { c } else { (cb % t2) as u64 }
        }
        12 => udiv(c, a, b | 4),
        13 => {
            let t1 = combine(result.rotate_left(r), b);
            let t2 = combine(a, c | 8);
            if t1 > t2 && t2 != 0 {
                (t1 / t2) as u64
            } else {
                a ^ b
            }
        }
        14 => mul_hi(combine(b, a), c as u128),
        _ => mul_hi(combine(a, c), combine(result.rotate_right(r), b)),
    }
}

#[inline(always)]
fn read_u64_le(bytes: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(word)
}

/// Compute the Xelis v2 hash of `input`
///
/// Only the first `INPUT_LEN` bytes are used; shorter input is zero-padded.
/// Header length rules belong to the caller.
pub fn hash(input: &[u8]) -> [u8; HASH_SIZE] {
    let prepared = prepare_input(input);

    let mut scratchpad = Scratchpad::new();
    scratchpad.fill(&prepared);
    scratchpad.diffuse();
    scratchpad.finalize()
}
