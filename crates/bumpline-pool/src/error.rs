//! Pool-specific error types.
//!
//! Runtime allocation failures use [`AllocError`](bumpline_core::AllocError)
//! from the core crate; this module only covers pool construction.

use std::error::Error;
use std::fmt;

/// Errors from validating a [`PoolConfig`](crate::PoolConfig).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `block_size` was zero.
    ZeroBlockSize,
    /// `block_size` exceeds `max_block_size`.
    BlockSizeAboveMax {
        /// The configured first block size.
        block_size: usize,
        /// The configured cap.
        max_block_size: usize,
    },
    /// `max_blocks` was zero.
    ZeroMaxBlocks,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroBlockSize => write!(f, "block size must be non-zero"),
            Self::BlockSizeAboveMax {
                block_size,
                max_block_size,
            } => {
                write!(
                    f,
                    "block size {block_size} exceeds maximum block size {max_block_size}"
                )
            }
            Self::ZeroMaxBlocks => write!(f, "pool must allow at least one block"),
        }
    }
}

impl Error for ConfigError {}
