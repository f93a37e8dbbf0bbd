//! Contiguous byte blocks with bump allocation.
//!
//! A [`Block`] is a pre-allocated `Vec<u8>` with a cursor that advances on
//! each allocation. Blocks are never freed while the pool lives; they are
//! only rewound (by the most recent allocation) or reset in bulk.

use std::collections::TryReserveError;

/// A single contiguous memory block with bump allocation.
pub struct Block {
    /// Backing storage. Allocated to full capacity at creation.
    data: Vec<u8>,
    /// Bump pointer: next free byte.
    cursor: usize,
}

impl Block {
    /// Create a new zero-initialised block of `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            cursor: 0,
        }
    }

    /// Like [`Block::new`], but reports allocator refusal instead of
    /// aborting.
    pub fn try_new(capacity: usize) -> Result<Self, TryReserveError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)?;
        data.resize(capacity, 0);
        Ok(Self { data, cursor: 0 })
    }

    /// Bump-allocate `len` bytes from this block.
    ///
    /// Returns the starting offset, or `None` if the block does not have
    /// `len` bytes left. The returned region is zeroed.
    pub fn alloc(&mut self, len: usize) -> Option<usize> {
        let new_cursor = self.cursor.checked_add(len)?;
        if new_cursor > self.data.len() {
            return None;
        }
        let offset = self.cursor;
        // Zero-init: the bytes may hold data from before a reset or rewind.
        self.data[offset..new_cursor].fill(0);
        self.cursor = new_cursor;
        Some(offset)
    }

    /// Move the cursor back by `len` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the number of bytes in use.
    pub fn rewind(&mut self, len: usize) {
        assert!(len <= self.cursor, "rewind past the start of the block");
        self.cursor -= len;
    }

    /// Get a shared slice at the given offset and length.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len` exceeds the block's allocated region.
    pub fn slice(&self, offset: usize, len: usize) -> &[u8] {
        &self.data[offset..offset + len]
    }

    /// Get a mutable slice at the given offset and length.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len` exceeds the block's allocated region.
    pub fn slice_mut(&mut self, offset: usize, len: usize) -> &mut [u8] {
        &mut self.data[offset..offset + len]
    }

    /// Copy `len` bytes from `src` to `dst` within this block.
    pub(crate) fn copy_within(&mut self, src: usize, dst: usize, len: usize) {
        self.data.copy_within(src..src + len, dst);
    }

    /// Reset the bump pointer to zero without deallocating.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Number of bytes currently allocated (the cursor position).
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Remaining free capacity in bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }
}
