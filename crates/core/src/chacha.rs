//! ChaCha stream generator with a selectable round count
//!
//! IETF layout: 256-bit key, 96-bit nonce, 32-bit block counter starting
//! at zero. The scratchpad fill runs it at 8 rounds over an implicit
//! all-zero plaintext, i.e. it copies raw keystream.

use crate::params::NONCE_SIZE;

/// "expand 32-byte k" as little-endian words
const CONSTANTS: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

/// Keystream block size in bytes
pub const BLOCK_LEN: usize = 64;

/// Supported round counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounds {
    R8,
    R12,
    R20,
}

impl Rounds {
    /// Number of double rounds (column + diagonal)
    #[inline(always)]
    fn double_rounds(self) -> usize {
        match self {
            Rounds::R8 => 4,
            Rounds::R12 => 6,
            Rounds::R20 => 10,
        }
    }
}

/// ChaCha keystream state
///
/// Each 64-byte block is produced from `(key, counter, nonce)`; a partially
/// consumed block is kept so consecutive calls continue the same stream.
pub struct ChaCha {
    key: [u32; 8],
    nonce: [u32; 3],
    counter: u32,
    rounds: Rounds,
    block: [u8; BLOCK_LEN],
    block_pos: usize,
}

impl ChaCha {
    /// Create a generator positioned at block 0
    pub fn new(key: &[u8; 32], nonce: &[u8; NONCE_SIZE], rounds: Rounds) -> Self {
        let mut key_words = [0u32; 8];
        for (word, chunk) in key_words.iter_mut().zip(key.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        let mut nonce_words = [0u32; 3];
        for (word, chunk) in nonce_words.iter_mut().zip(nonce.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        Self {
            key: key_words,
            nonce: nonce_words,
            counter: 0,
            rounds,
            block: [0u8; BLOCK_LEN],
            block_pos: BLOCK_LEN,
        }
    }

    /// Start the stream at block `counter` instead of 0
    pub fn with_counter(mut self, counter: u32) -> Self {
        self.counter = counter;
        self.block_pos = BLOCK_LEN;
        self
    }

    /// Overwrite `out` with keystream
    pub fn fill(&mut self, out: &mut [u8]) {
        out.fill(0);
        self.apply_keystream(out);
    }

    /// XOR `data` in place with keystream (encryption and decryption are identical)
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        let mut offset = 0;

        // Drain a partially consumed block first
        while self.block_pos < BLOCK_LEN && offset < data.len() {
            data[offset] ^= self.block[self.block_pos];
            self.block_pos += 1;
            offset += 1;
        }

        while offset < data.len() {
            self.block = self.next_block();
            let take = (data.len() - offset).min(BLOCK_LEN);
            for (byte, ks) in data[offset..offset + take].iter_mut().zip(&self.block) {
                *byte ^= ks;
            }
            self.block_pos = take;
            offset += take;
        }
    }

    /// Produce the block at the current counter and advance
    fn next_block(&mut self) -> [u8; BLOCK_LEN] {
        let out = block(&self.key, self.counter, &self.nonce, self.rounds);
        self.counter = self.counter.wrapping_add(1);
        out
    }
}

/// Compute one keystream block
#[inline(always)]
fn block(key: &[u32; 8], counter: u32, nonce: &[u32; 3], rounds: Rounds) -> [u8; BLOCK_LEN] {
    let mut state = [0u32; 16];
    state[0..4].copy_from_slice(&CONSTANTS);
    state[4..12].copy_from_slice(key);
    state[12] = counter;
    state[13..16].copy_from_slice(nonce);

    let original = state;

    for _ in 0..rounds.double_rounds() {
        // Column rounds
        quarter_round(&mut state, 0, 4, 8, 12);
        quarter_round(&mut state, 1, 5, 9, 13);
        quarter_round(&mut state, 2, 6, 10, 14);
        quarter_round(&mut state, 3, 7, 11, 15);

        // Diagonal rounds
        quarter_round(&mut state, 0, 5, 10, 15);
        quarter_round(&mut state, 1, 6, 11, 12);
        quarter_round(&mut state, 2, 7, 8, 13);
        quarter_round(&mut state, 3, 4, 9, 14);
    }

    let mut out = [0u8; BLOCK_LEN];
    for ((chunk, word), orig) in out.chunks_exact_mut(4).zip(&state).zip(&original) {
        chunk.copy_from_slice(&word.wrapping_add(*orig).to_le_bytes());
    }
    out
}

#[inline(always)]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(7);
}
