//! Tests for the Xelis v2 algorithm

use crate::params::*;
use crate::xelis::Scratchpad;
use crate::{ChaCha, Rounds, aes_round, hash, mix, prepare_input};

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

fn ones_header() -> [u8; 80] {
    [0x01; 80]
}

#[test]
fn test_basic_hash() {
    let result = hash(&ones_header());

    // Hash should be 32 bytes
    assert_eq!(result.len(), 32);

    // Hash should be deterministic
    assert_eq!(result, hash(&ones_header()));
}

/// Golden vectors recorded from a reference run of the deployed algorithm.
/// Any change to rotate directions, the mixer table or a constant breaks these.
#[test]
fn test_known_vectors() {
    assert_eq!(
        hex::encode(hash(&ones_header())),
        "fb930e48241aa629dd9d20327419cc0c66e94fd0b8e4b1d60cbc40be665653f8"
    );
    assert_eq!(
        hex::encode(hash(&[0u8; 80])),
        "7edb70f0748573902728a4691e9e2d7e4043ee34c823a11390d3d6e15fbe921b"
    );

    // Version 0x8000 (v2 flag) with an otherwise zero header
    let mut flagged = [0u8; 80];
    flagged[..4].copy_from_slice(&0x8000u32.to_le_bytes());
    assert_eq!(
        hex::encode(hash(&flagged)),
        "7322e35f75e8a5e05cf9c9cde6fb2987a506d6da88fc25e1809010cb582ca894"
    );
}

#[test]
fn test_input_window_truncates_at_112_bytes() {
    let long: Vec<u8> = (0u8..120).collect();
    let expected = "c4686a2420492e75eeb6674ed79bb737346b38ddbfe3432f2d053df54df75dbf";

    assert_eq!(hex::encode(hash(&long)), expected);
    assert_eq!(hex::encode(hash(&long[..INPUT_LEN])), expected);
}

#[test]
fn test_short_input_is_zero_padded() {
    // Trailing zeros are indistinguishable from padding
    assert_eq!(hash(&[0u8; 80]), hash(&[0u8; INPUT_LEN]));
    assert_eq!(hash(&[]), hash(&[0u8; 80]));

    let prepared = prepare_input(&[0xAA; 5]);
    assert_eq!(&prepared[..5], &[0xAA; 5]);
    assert!(prepared[5..].iter().all(|&b| b == 0));
}

#[test]
fn test_avalanche_effect() {
    // Changing one bit should change ~50% of output bits
    let input1 = ones_header();
    let mut input2 = input1;
    input2[76] ^= 1; // Flip one nonce bit

    let hash1 = hash(&input1);
    let hash2 = hash(&input2);

    assert_eq!(
        hex::encode(hash2),
        "56e7aa18db58cfef6ea56cdccea89c6f5d5554ab5e8a3d74d635df558a7b4913"
    );

    // Count differing bits
    let mut diff_bits = 0;
    for i in 0..32 {
        diff_bits += (hash1[i] ^ hash2[i]).count_ones();
    }

    // Expect roughly 128 bits (50% of 256) to differ
    // Allow range of 90-166 (35%-65%)
    assert!(
        (90..=166).contains(&diff_bits),
        "Avalanche effect: {} bits differ (expected ~128)",
        diff_bits
    );
}

#[test]
fn test_mixer_table_vectors() {
    let a = 0x0123_4567_89ab_cdef;
    let b = 0xfedc_ba98_7654_3210;
    let c = 0x0f1e_2d3c_4b5a_6978;
    let r = 7;
    let result = 0xdead_beef_cafe_babe;
    let ij = 2 * 1000;

    let expected: [u64; 16] = [
        0xd3e0_f1c2_1f2c_3d0e,
        0x685b_4a79_a497_86b5,
        0xf0e1_d2c3_b4a5_9687,
        0xf0e1_d2c3_b4a5_9688,
        0xcc01_d5d0_7a5b_fde8,
        0x0cd7_a26d_3802_cd99,
        0x1164_b80b_5eb2_0557,
        0x9bd0_156b_d34b_d56f,
        0x5511_bd57_e159_c118,
        0x5015_f95e_64e8_8080,
        0x05dc_dcdc_dcdc_dcde,
        0x0cd7_a26d_3802_cd9a,
        0x0f2f_744b_6bb0_87a7,
        0x4c,
        0x9abe_036a_f4a0_6e5e,
        0x2ab9_da83_3b21_5b61,
    ];

    for (op, want) in expected.iter().enumerate() {
        assert_eq!(
            mix(op as u8, a, b, c, r, result, ij),
            *want,
            "mixer {} diverged",
            op
        );
    }
}

#[test]
fn test_mixer_division_edges() {
    // Mixer 10 divides by c | 1, never zero
    assert_eq!(mix(10, 0, 5, 0, 0, 0, 0), 0);
    // Mixer 13 falls back to a ^ b when t1 <= t2
    assert_eq!(mix(13, u64::MAX, 3, u64::MAX, 0, 0, 0), u64::MAX ^ 3);
    // Mixer 11 returns c when the rotated divisor exceeds the dividend
    assert_eq!(mix(11, 0, 0, 42, 0, u64::MAX, 0), 42);
    // Only the low four bits select the mixer
    assert_eq!(mix(0x12, 1, 2, 4, 0, 0, 0), mix(2, 1, 2, 4, 0, 0, 0));
}

#[test]
fn test_aes_round_vectors() {
    let block: [u8; 16] = core::array::from_fn(|i| i as u8);
    assert_eq!(
        hex::encode(aes_round(&block, &AES_KEY)),
        "120f302c5f055222d8f42d0e50b1576e"
    );
    assert_eq!(
        hex::encode(aes_round(&[0u8; 16], &AES_KEY)),
        "1b060f0a100b02100b4e130c144e1551"
    );
}

/// The hand-written round must agree with an independent AES implementation
#[test]
fn test_aes_round_matches_rustcrypto() {
    let cases: [[u8; 16]; 4] = [
        [0u8; 16],
        [0xFF; 16],
        core::array::from_fn(|i| (i as u8).wrapping_mul(37)),
        *b"pepepow-header!!",
    ];

    for (i, state) in cases.iter().enumerate() {
        let ours = aes_round(state, &AES_KEY);

        let mut block = aes::Block::clone_from_slice(state);
        aes::hazmat::cipher_round(&mut block, &aes::Block::clone_from_slice(&AES_KEY));

        assert_eq!(block.as_slice(), &ours[..], "aes round mismatch on case {}", i);
    }
}

#[test]
fn test_chacha_matches_rustcrypto() {
    use cipher::{KeyIvInit, StreamCipher};

    let key: [u8; 32] = core::array::from_fn(|i| i as u8);
    let nonce: [u8; 12] = core::array::from_fn(|i| i as u8);

    let mut ours = vec![0u8; 200];
    let mut theirs = vec![0u8; 200];

    ChaCha::new(&key, &nonce, Rounds::R8).fill(&mut ours);
    chacha20::ChaCha8::new(&key.into(), &nonce.into()).apply_keystream(&mut theirs);
    assert_eq!(ours, theirs, "ChaCha8 mismatch");

    // Recorded reference keystream (first 80 bytes, 8 rounds)
    assert_eq!(
        hex::encode(&ours[..80]),
        "2e214501d03825e75ac476151531939d6db48e04588d91cb6cac080f87cdf6a9\
         5c6a0245e0333a970bb8e8c373a0ca81e2592224712b8002d3aa52835df513f5\
         d4cccd346e24968a9bbe43c770ef5639"
    );

    ours.fill(0);
    theirs.fill(0);
    ChaCha::new(&key, &nonce, Rounds::R12).fill(&mut ours);
    chacha20::ChaCha12::new(&key.into(), &nonce.into()).apply_keystream(&mut theirs);
    assert_eq!(ours, theirs, "ChaCha12 mismatch");

    ours.fill(0);
    theirs.fill(0);
    ChaCha::new(&key, &nonce, Rounds::R20).fill(&mut ours);
    chacha20::ChaCha20::new(&key.into(), &nonce.into()).apply_keystream(&mut theirs);
    assert_eq!(ours, theirs, "ChaCha20 mismatch");
}

/// Each fill chunk is keyed by BLAKE3(previous hash || key chunk) and uses the
/// last 12 bytes of the previous chunk as its nonce
#[test]
fn test_fill_chains_chunks() {
    let prepared = prepare_input(&ones_header());
    let mut scratchpad = Scratchpad::new();
    scratchpad.fill(&prepared);
    let words = scratchpad.words();

    let to_bytes =
        |words: &[u64]| -> Vec<u8> { words.iter().flat_map(|w| w.to_le_bytes()).collect() };

    let mut key = [0u8; CHUNK_SIZE * CHUNKS];
    key[..INPUT_LEN].copy_from_slice(&prepared);

    let mut buffer = [0u8; 64];
    buffer[..32].copy_from_slice(blake3::hash(&prepared).as_bytes());

    // Chunk 0: nonce from the running hash
    buffer[32..].copy_from_slice(&key[..32]);
    let hash0: [u8; 32] = blake3::hash(&buffer).into();
    let mut nonce = [0u8; 12];
    nonce.copy_from_slice(&buffer[..12]);
    let mut chunk0 = vec![0u8; CHUNK_BYTES];
    ChaCha::new(&hash0, &nonce, Rounds::R8).fill(&mut chunk0);
    assert_eq!(to_bytes(&words[..CHUNK_WORDS]), chunk0);

    // Chunk 1: nonce from the tail of chunk 0
    buffer[..32].copy_from_slice(&hash0);
    buffer[32..].copy_from_slice(&key[32..64]);
    let hash1: [u8; 32] = blake3::hash(&buffer).into();
    nonce.copy_from_slice(&chunk0[CHUNK_BYTES - 12..]);
    let mut chunk1 = vec![0u8; CHUNK_BYTES];
    ChaCha::new(&hash1, &nonce, Rounds::R8).fill(&mut chunk1);
    assert_eq!(to_bytes(&words[CHUNK_WORDS..2 * CHUNK_WORDS]), chunk1);
}

#[test]
fn test_diffuse_rewrites_both_halves() {
    let mut scratchpad = Scratchpad::new();
    scratchpad.fill(&prepare_input(&ones_header()));
    let before = scratchpad.words().to_vec();

    scratchpad.diffuse();
    let after = scratchpad.words();

    let changed_a = (0..BUFFER_SIZE).filter(|&i| before[i] != after[i]).count();
    let changed_b = (BUFFER_SIZE..MEMORY_SIZE).filter(|&i| before[i] != after[i]).count();

    // Every word of both halves is XORed with fresh data each pass
    assert!(changed_a > BUFFER_SIZE * 99 / 100, "mem_a barely changed: {}", changed_a);
    assert!(changed_b > BUFFER_SIZE * 99 / 100, "mem_b barely changed: {}", changed_b);
}

#[test]
fn test_scratchpad_geometry() {
    assert_eq!(MEMORY_SIZE, 54_912);
    assert_eq!(BUFFER_SIZE * 2, MEMORY_SIZE);
    assert_eq!(CHUNK_WORDS * CHUNKS, MEMORY_SIZE);
    assert_eq!(CHUNK_BYTES % 64, 0);
    assert_eq!(&AES_KEY, b"xelishash-pow-v2");
}

#[cfg(feature = "std")]
#[test]
fn test_ffi_matches_hash() {
    use crate::ffi::pepepow_xelis_v2_hash;

    let header = ones_header();
    let mut out = [0u8; 32];
    let status = pepepow_xelis_v2_hash(header.as_ptr(), header.len(), out.as_mut_ptr());

    assert_eq!(status, 0);
    assert_eq!(out, hash(&header));

    assert_eq!(pepepow_xelis_v2_hash(core::ptr::null(), 0, out.as_mut_ptr()), -1);
    assert_eq!(pepepow_xelis_v2_hash(header.as_ptr(), header.len(), core::ptr::null_mut()), -1);
}

#[cfg(feature = "std")]
#[test]
#[ignore] // Run with: cargo test timing_breakdown -- --ignored --nocapture
fn timing_breakdown() {
    use std::time::Instant;

    let header = ones_header();
    let prepared = prepare_input(&header);
    let iterations = 10;

    // Warmup
    for _ in 0..3 {
        let _ = hash(&header);
    }

    let mut fill_time = std::time::Duration::ZERO;
    let mut diffuse_time = std::time::Duration::ZERO;
    let mut finalize_time = std::time::Duration::ZERO;

    for _ in 0..iterations {
        let mut scratchpad = Scratchpad::new();

        let start = Instant::now();
        scratchpad.fill(&prepared);
        fill_time += start.elapsed();

        let start = Instant::now();
        scratchpad.diffuse();
        diffuse_time += start.elapsed();

        let start = Instant::now();
        let _ = scratchpad.finalize();
        finalize_time += start.elapsed();
    }

    let total = fill_time + diffuse_time + finalize_time;
    println!("\n=== TIMING BREAKDOWN ===");
    println!("Total per hash: {:?}", total / iterations);
    println!("Hashrate: {:.1} H/s", iterations as f64 / total.as_secs_f64());
    println!("  Fill:     {:?}", fill_time / iterations);
    println!("  Diffuse:  {:?}", diffuse_time / iterations);
    println!("  Finalize: {:?}", finalize_time / iterations);
}
