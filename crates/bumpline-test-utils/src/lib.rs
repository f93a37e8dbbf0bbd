//! Test fixtures and helpers for bumpline development.
//!
//! Provides a [`TestNode`] that embeds a queue [`Link`], builders for
//! node storage with a ready-made queue ([`ring`]), and pool constructors
//! sized for exercising growth paths ([`small_pool`], [`single_block_pool`]).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{ring, ring_with_spares, tagged, values, TestNode};

use bumpline_pool::{Pool, PoolConfig};

/// A pool with `block_size`-byte blocks and the default block cap.
pub fn small_pool(block_size: usize) -> Pool {
    Pool::new(PoolConfig::new(block_size)).unwrap()
}

/// A pool that can never grow past one `block_size`-byte block.
///
/// Useful for driving `OutOfMemory` paths deterministically.
pub fn single_block_pool(block_size: usize) -> Pool {
    Pool::new(PoolConfig::new(block_size).with_max_blocks(1)).unwrap()
}

/// Read `slot` as a little-endian `u32`.
pub fn read_u32(slot: &[u8]) -> u32 {
    u32::from_le_bytes(slot.try_into().unwrap())
}

/// Read `slot` as a little-endian `u64`.
pub fn read_u64(slot: &[u8]) -> u64 {
    u64::from_le_bytes(slot.try_into().unwrap())
}
