//! Byte checksum: a non-cryptographic unsigned 64-bit additive sum of bytes.
//!
//! Accumulates into 8 lanes of `u64` in parallel so the final horizontal
//! reduction is the only sequential step, the same lane-then-reduce shape an
//! explicit SIMD loop would use, without needing explicit SIMD types.

/// Computes the unsigned 64-bit sum of every byte in `data`.
pub fn checksum(data: &[u8]) -> u64 {
    let mut lanes = [0u64; 8];
    let chunks = data.chunks_exact(8);
    let remainder = chunks.remainder();
    for chunk in chunks {
        for (lane, &byte) in lanes.iter_mut().zip(chunk) {
            *lane += byte as u64;
        }
    }
    let mut total: u64 = lanes.iter().sum();
    total += remainder.iter().map(|&b| b as u64).sum::<u64>();
    total
}
