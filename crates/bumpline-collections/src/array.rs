//! Pool-backed growable array.
//!
//! [`Array`] stores fixed-width opaque elements contiguously in one pool
//! span. Appends are amortized O(1):
//!
//! - While `len < capacity` an append just hands out the next slot.
//! - When full and the buffer is still the pool's most recent allocation
//!   with enough room left in the block, the buffer is extended in place by
//!   exactly the requested number of slots. No bytes move.
//! - Otherwise a new buffer of twice the capacity is allocated, the live
//!   elements are copied over and the old buffer is abandoned to the pool.
//!
//! The array never frees memory on its own. [`Array::destroy`] rewinds the
//! pool only when the array's storage is provably the most recent
//! allocation.

use bumpline_core::{AllocError, PoolId};
use bumpline_pool::{Pool, Span};
use tracing::trace;

/// A growable array of `element_size`-byte slots drawn from a [`Pool`].
///
/// Elements are opaque byte slots; callers encode and decode their own
/// payloads. The buffer may move when the array reallocates, so slots are
/// addressed by index and borrowed from the pool per call.
#[derive(Debug)]
pub struct Array {
    buffer: Span,
    /// Pool-resident header footprint, absent for [`Array::init`] arrays.
    header: Option<Span>,
    len: usize,
    element_size: usize,
    capacity: usize,
    pool: PoolId,
}

impl Array {
    /// Bytes reserved in the pool for the header of an array made by
    /// [`Array::create`].
    pub const HEADER_BYTES: usize = std::mem::size_of::<Self>();

    /// Create an array whose header and buffer are both drawn from `pool`.
    ///
    /// The header footprint is allocated first, then a buffer of
    /// `capacity * element_size` bytes. If the buffer cannot be allocated
    /// the header is released again, so a failed `create` leaves nothing
    /// behind that a later [`destroy`](Self::destroy) could not reclaim.
    ///
    /// # Panics
    ///
    /// Panics if `element_size` is zero.
    pub fn create(
        pool: &mut Pool,
        capacity: usize,
        element_size: usize,
    ) -> Result<Self, AllocError> {
        assert!(element_size > 0, "array element size must be non-zero");
        let header = pool.alloc(Self::HEADER_BYTES)?;
        match Self::init(pool, capacity, element_size) {
            Ok(mut array) => {
                array.header = Some(header);
                Ok(array)
            }
            Err(err) => {
                pool.release(header);
                Err(err)
            }
        }
    }

    /// Create an array whose header lives with the caller.
    ///
    /// Only the element buffer is drawn from `pool`.
    ///
    /// # Panics
    ///
    /// Panics if `element_size` is zero.
    pub fn init(pool: &mut Pool, capacity: usize, element_size: usize) -> Result<Self, AllocError> {
        assert!(element_size > 0, "array element size must be non-zero");
        let bytes = capacity
            .checked_mul(element_size)
            .ok_or_else(|| capacity_overflow(pool))?;
        let buffer = pool.alloc(bytes)?;
        Ok(Self {
            buffer,
            header: None,
            len: 0,
            element_size,
            capacity,
            pool: pool.id(),
        })
    }

    /// Append one element and return its zeroed slot for writing.
    ///
    /// On `OutOfMemory` the array is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `pool` is not the pool this array was created from.
    pub fn push<'p>(&mut self, pool: &'p mut Pool) -> Result<&'p mut [u8], AllocError> {
        self.push_n(pool, 1)
    }

    /// Append `n` elements and return their contiguous slots for writing.
    ///
    /// In-place growth extends capacity by exactly `n`; reallocation grows
    /// it to `2 * max(n, capacity)`. On `OutOfMemory` the array is
    /// unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `pool` is not the pool this array was created from.
    pub fn push_n<'p>(&mut self, pool: &'p mut Pool, n: usize) -> Result<&'p mut [u8], AllocError> {
        self.check_pool(pool);
        let needed = self
            .len
            .checked_add(n)
            .ok_or_else(|| capacity_overflow(pool))?;
        if needed > self.capacity {
            self.grow(pool, n)?;
        }
        let start = self.len * self.element_size;
        self.len = needed;
        Ok(pool.slice_mut(&self.buffer, start, n * self.element_size))
    }

    fn grow(&mut self, pool: &mut Pool, n: usize) -> Result<(), AllocError> {
        let extra = n
            .checked_mul(self.element_size)
            .ok_or_else(|| capacity_overflow(pool))?;
        if pool.extend(&mut self.buffer, extra) {
            self.capacity += n;
            trace!(
                pool = %self.pool,
                capacity = self.capacity,
                "array extended in place"
            );
            return Ok(());
        }

        let capacity = n
            .max(self.capacity)
            .checked_mul(2)
            .ok_or_else(|| capacity_overflow(pool))?;
        let bytes = capacity
            .checked_mul(self.element_size)
            .ok_or_else(|| capacity_overflow(pool))?;
        let buffer = pool.alloc(bytes)?;
        pool.copy(&self.buffer, &buffer, self.len * self.element_size);
        trace!(
            pool = %self.pool,
            from = self.capacity,
            to = capacity,
            "array reallocated"
        );
        self.buffer = buffer;
        self.capacity = capacity;
        Ok(())
    }

    /// Best-effort reclamation of the array's storage.
    ///
    /// If the buffer ends at the pool frontier it is rewound by
    /// `element_size * capacity` bytes; then, if the pool-resident header
    /// ends at the (possibly moved) frontier, it is rewound too. Otherwise
    /// the pool is left alone and the bytes stay allocated until the pool is
    /// reset or dropped. Returns the number of bytes reclaimed.
    ///
    /// # Panics
    ///
    /// Panics if `pool` is not the pool this array was created from.
    pub fn destroy(self, pool: &mut Pool) -> usize {
        self.check_pool(pool);
        let mut reclaimed = pool.release(self.buffer);
        if let Some(header) = self.header {
            reclaimed += pool.release(header);
        }
        trace!(pool = %self.pool, reclaimed, "array destroyed");
        reclaimed
    }

    /// The element at `index`, or `None` if out of range.
    pub fn get<'p>(&self, pool: &'p Pool, index: usize) -> Option<&'p [u8]> {
        if index >= self.len {
            return None;
        }
        self.check_pool(pool);
        Some(pool.slice(&self.buffer, index * self.element_size, self.element_size))
    }

    /// Mutable access to the element at `index`, or `None` if out of range.
    pub fn get_mut<'p>(&self, pool: &'p mut Pool, index: usize) -> Option<&'p mut [u8]> {
        if index >= self.len {
            return None;
        }
        self.check_pool(pool);
        Some(pool.slice_mut(&self.buffer, index * self.element_size, self.element_size))
    }

    /// The live elements as one contiguous byte slice.
    pub fn as_bytes<'p>(&self, pool: &'p Pool) -> &'p [u8] {
        self.check_pool(pool);
        pool.slice(&self.buffer, 0, self.len * self.element_size)
    }

    /// Iterate over element slots in index order.
    pub fn iter<'p>(&self, pool: &'p Pool) -> std::slice::ChunksExact<'p, u8> {
        self.as_bytes(pool).chunks_exact(self.element_size)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the current buffer can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Width of one element in bytes.
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// The span currently backing the elements.
    pub fn buffer(&self) -> Span {
        self.buffer
    }

    fn check_pool(&self, pool: &Pool) {
        assert_eq!(
            pool.id(),
            self.pool,
            "array used with a pool it was not created from"
        );
    }
}

/// A size computation overflowed `usize`; no pool could satisfy it.
fn capacity_overflow(pool: &Pool) -> AllocError {
    AllocError::out_of_memory(usize::MAX, pool.remaining())
}
