//! C FFI bindings for miners and native node integrations

use core::slice;

use crate::params::HASH_SIZE;

/// Compute the Xelis v2 hash of a header
/// - input: pointer to header bytes
/// - input_len: length of the header
/// - output: pointer to a 32-byte buffer for the result
///
/// Returns 0 on success, -1 if any pointer is null.
#[unsafe(no_mangle)]
pub extern "C" fn pepepow_xelis_v2_hash(
    input: *const u8,
    input_len: usize,
    output: *mut u8,
) -> i32 {
    if input.is_null() || output.is_null() {
        return -1;
    }

    unsafe {
        let input_slice = slice::from_raw_parts(input, input_len);
        let result = crate::hash(input_slice);

        let output_slice = slice::from_raw_parts_mut(output, HASH_SIZE);
        output_slice.copy_from_slice(&result);
    }

    0
}

/// Benchmark: compute N hashes and return total microseconds
#[unsafe(no_mangle)]
pub extern "C" fn pepepow_xelis_v2_benchmark(iterations: u32) -> u64 {
    use std::time::Instant;

    let mut header = [0u8; 80];
    header[..4].copy_from_slice(&0x8000u32.to_le_bytes());

    let start = Instant::now();
    for i in 0..iterations {
        header[76..80].copy_from_slice(&i.to_le_bytes());
        let _ = crate::hash(&header);
    }
    let elapsed = start.elapsed();

    elapsed.as_micros() as u64
}
