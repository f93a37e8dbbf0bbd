//! Pool configuration parameters.

use crate::error::ConfigError;

/// Configuration for the bump pool.
///
/// Controls block sizing and the total number of blocks the pool may own.
/// Validated by [`Pool::new`](crate::Pool::new); all values are immutable
/// after the pool is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Size of the first block in bytes.
    ///
    /// Default: 4096. Each subsequent block doubles in size until it
    /// reaches `max_block_size`.
    pub block_size: usize,

    /// Upper bound on the size of a regular block in bytes.
    ///
    /// Default: 1 MiB. A single allocation larger than this still gets a
    /// dedicated block of exactly its size.
    pub max_block_size: usize,

    /// Maximum number of blocks the pool may own.
    ///
    /// Default: 64. Allocations that would need block number
    /// `max_blocks + 1` fail with `OutOfMemory`.
    pub max_blocks: usize,
}

impl PoolConfig {
    /// Default first block size: one page.
    pub const DEFAULT_BLOCK_SIZE: usize = 4096;

    /// Default cap on regular block size.
    pub const DEFAULT_MAX_BLOCK_SIZE: usize = 1024 * 1024;

    /// Default maximum block count.
    pub const DEFAULT_MAX_BLOCKS: usize = 64;

    /// Create a config with the given first block size.
    ///
    /// The block size cap is raised to `block_size` if the default cap is
    /// smaller; all other parameters take their defaults.
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size,
            max_block_size: Self::DEFAULT_MAX_BLOCK_SIZE.max(block_size),
            max_blocks: Self::DEFAULT_MAX_BLOCKS,
        }
    }

    /// Set the maximum number of blocks.
    #[must_use]
    pub fn with_max_blocks(mut self, max_blocks: usize) -> Self {
        self.max_blocks = max_blocks;
        self
    }

    /// Set the cap on regular block size.
    #[must_use]
    pub fn with_max_block_size(mut self, max_block_size: usize) -> Self {
        self.max_block_size = max_block_size;
        self
    }

    /// Check the configuration for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.max_block_size < self.block_size {
            return Err(ConfigError::BlockSizeAboveMax {
                block_size: self.block_size,
                max_block_size: self.max_block_size,
            });
        }
        if self.max_blocks == 0 {
            return Err(ConfigError::ZeroMaxBlocks);
        }
        Ok(())
    }

    /// Size of the block that follows one of `previous` bytes.
    pub(crate) fn next_block_size(&self, previous: usize) -> usize {
        previous.saturating_mul(2).min(self.max_block_size)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BLOCK_SIZE)
    }
}
