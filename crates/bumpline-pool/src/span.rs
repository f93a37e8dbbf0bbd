//! Allocation spans.
//!
//! A [`Span`] names a contiguous byte range inside one block of a pool. It
//! is generation-scoped: the `generation` field lets the pool decide in O(1)
//! whether the span is still its most recent allocation.

use std::fmt;

use bumpline_core::{Generation, PoolId};

/// Location and provenance of one pool allocation.
///
/// Spans are plain tokens; holding one does not borrow the pool. Byte
/// access goes through [`Pool::bytes`](crate::Pool::bytes) and friends,
/// which check that the span belongs to that pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct Span {
    pub(crate) pool: PoolId,
    pub(crate) block: u32,
    pub(crate) offset: usize,
    pub(crate) len: usize,
    pub(crate) generation: Generation,
}

impl Span {
    pub(crate) fn new(
        pool: PoolId,
        block: u32,
        offset: usize,
        len: usize,
        generation: Generation,
    ) -> Self {
        Self {
            pool,
            block,
            offset,
            len,
            generation,
        }
    }

    /// The pool this span was allocated from.
    pub fn pool(&self) -> PoolId {
        self.pool
    }

    /// Index of the block holding this span.
    pub fn block(&self) -> u32 {
        self.block
    }

    /// Byte offset of the span within its block.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte offset one past the end of the span within its block.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Pool generation in which this span was allocated.
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Span(pool={}, block={}, off={}, len={}, gen={})",
            self.pool, self.block, self.offset, self.len, self.generation
        )
    }
}
