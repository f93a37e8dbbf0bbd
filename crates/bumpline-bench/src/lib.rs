//! Benchmark workloads for the bumpline containers.
//!
//! - [`scrambled_values`]: deterministic pseudo-random values via seed
//! - [`fill_array`]: append a value stream to a fresh pool-backed array
//! - [`fill_list`]: append a value stream to a fresh chunked list

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use bumpline_collections::{Array, ChunkList};
use bumpline_pool::{AllocError, Pool};

/// Generate `n` deterministic values in `0..range` from `seed`.
///
/// Uses a 64-bit linear congruential step; the same seed always yields the
/// same sequence.
pub fn scrambled_values(n: usize, range: u64, seed: u64) -> Vec<u64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) % range.max(1)
        })
        .collect()
}

/// Append `values` one by one to an array created with `capacity` slots.
pub fn fill_array(pool: &mut Pool, capacity: usize, values: &[u64]) -> Result<Array, AllocError> {
    let mut array = Array::create(pool, capacity, 8)?;
    for v in values {
        array.push(pool)?.copy_from_slice(&v.to_le_bytes());
    }
    Ok(array)
}

/// Append `values` one by one to a list of `chunk_capacity`-slot chunks.
pub fn fill_list(
    pool: &mut Pool,
    chunk_capacity: usize,
    values: &[u64],
) -> Result<ChunkList, AllocError> {
    let mut list = ChunkList::create(pool, chunk_capacity, 8)?;
    for v in values {
        list.push(pool)?.copy_from_slice(&v.to_le_bytes());
    }
    Ok(list)
}
