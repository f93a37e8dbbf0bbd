//! Append-only chunked list.
//!
//! [`ChunkList`] keeps its elements in fixed-capacity chunks drawn from a
//! pool. Appending never moves existing elements: when the tail chunk is
//! full a new chunk is allocated and linked after it. Only the last chunk
//! may be partially filled.
//!
//! Traversal is sequential only, chunk by chunk, through [`ChunkList::iter`].
//!
//! Element storage always comes from the pool. The table of chunk records
//! is kept inline for the first four chunks and spills to the heap after
//! that; growing it is fallible and reported as `OutOfMemory`.

use bumpline_core::{AllocError, PoolId};
use bumpline_pool::{Pool, Span};
use smallvec::SmallVec;
use tracing::trace;

/// One fixed-capacity segment of a [`ChunkList`].
#[derive(Clone, Copy, Debug)]
struct Chunk {
    buffer: Span,
    used: usize,
}

/// An append-only sequence of `element_size`-byte slots stored in
/// fixed-capacity chunks.
///
/// Chunk buffers live in the pool. The chunk table lives in the list value
/// itself, inline up to four chunks and heap-allocated beyond.
#[derive(Debug)]
pub struct ChunkList {
    /// Chunks in link order; the last entry is the tail. Never empty.
    chunks: SmallVec<[Chunk; 4]>,
    element_size: usize,
    chunk_capacity: usize,
    len: usize,
    pool: PoolId,
}

impl ChunkList {
    /// Bytes reserved in the pool for the header of a list made by
    /// [`ChunkList::create`].
    pub const HEADER_BYTES: usize = std::mem::size_of::<Self>();

    /// Create a list whose header footprint and first chunk are both drawn
    /// from `pool`.
    ///
    /// If the first chunk cannot be allocated the header is released again.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_capacity` or `element_size` is zero.
    pub fn create(
        pool: &mut Pool,
        chunk_capacity: usize,
        element_size: usize,
    ) -> Result<Self, AllocError> {
        assert!(chunk_capacity > 0, "chunk capacity must be non-zero");
        assert!(element_size > 0, "list element size must be non-zero");
        let header = pool.alloc(Self::HEADER_BYTES)?;
        match Self::init(pool, chunk_capacity, element_size) {
            Ok(list) => Ok(list),
            Err(err) => {
                pool.release(header);
                Err(err)
            }
        }
    }

    /// Create a list whose header lives with the caller.
    ///
    /// Only the first chunk is drawn from `pool`.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_capacity` or `element_size` is zero.
    pub fn init(
        pool: &mut Pool,
        chunk_capacity: usize,
        element_size: usize,
    ) -> Result<Self, AllocError> {
        assert!(chunk_capacity > 0, "chunk capacity must be non-zero");
        assert!(element_size > 0, "list element size must be non-zero");
        let first = Self::alloc_chunk(pool, chunk_capacity, element_size)?;
        let mut chunks = SmallVec::new();
        chunks.push(first);
        Ok(Self {
            chunks,
            element_size,
            chunk_capacity,
            len: 0,
            pool: pool.id(),
        })
    }

    fn alloc_chunk(
        pool: &mut Pool,
        chunk_capacity: usize,
        element_size: usize,
    ) -> Result<Chunk, AllocError> {
        let bytes = chunk_capacity
            .checked_mul(element_size)
            .ok_or_else(|| AllocError::out_of_memory(usize::MAX, pool.remaining()))?;
        let buffer = pool.alloc(bytes)?;
        Ok(Chunk { buffer, used: 0 })
    }

    /// Append one element and return its zeroed slot for writing.
    ///
    /// If the tail chunk is full a new chunk is allocated and linked after
    /// it. On `OutOfMemory` earlier chunks stay valid and the list is
    /// unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `pool` is not the pool this list was created from.
    pub fn push<'p>(&mut self, pool: &'p mut Pool) -> Result<&'p mut [u8], AllocError> {
        self.check_pool(pool);
        let tail_full = self
            .chunks
            .last()
            .is_some_and(|tail| tail.used == self.chunk_capacity);
        if tail_full {
            self.chunks
                .try_reserve(1)
                .map_err(|_| AllocError::out_of_memory(self.chunk_bytes(), pool.remaining()))?;
            let chunk = Self::alloc_chunk(pool, self.chunk_capacity, self.element_size)?;
            self.chunks.push(chunk);
            trace!(
                pool = %self.pool,
                chunks = self.chunks.len(),
                "list chunk allocated"
            );
        }
        let size = self.element_size;
        // Never empty: `create` allocates the first chunk.
        let last = self.chunks.len() - 1;
        let tail = &mut self.chunks[last];
        let start = tail.used * size;
        tail.used += 1;
        self.len += 1;
        Ok(pool.slice_mut(&tail.buffer, start, size))
    }

    /// Iterate over element slots in append order.
    ///
    /// The iterator is lazy and `Clone`; calling `iter` again restarts from
    /// the first chunk.
    ///
    /// # Panics
    ///
    /// Panics if `pool` is not the pool this list was created from.
    pub fn iter<'a>(&'a self, pool: &'a Pool) -> Iter<'a> {
        self.check_pool(pool);
        Iter {
            pool,
            chunks: &self.chunks,
            element_size: self.element_size,
            chunk: 0,
            index: 0,
            remaining: self.len,
        }
    }

    /// Iterate over each chunk's used bytes, in link order.
    ///
    /// # Panics
    ///
    /// Panics if `pool` is not the pool this list was created from.
    pub fn chunks<'a>(&'a self, pool: &'a Pool) -> impl Iterator<Item = &'a [u8]> + 'a {
        self.check_pool(pool);
        let size = self.element_size;
        self.chunks
            .iter()
            .map(move |chunk| pool.slice(&chunk.buffer, 0, chunk.used * size))
    }

    fn chunk_bytes(&self) -> usize {
        self.chunk_capacity.saturating_mul(self.element_size)
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of chunks allocated so far.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Elements per chunk.
    pub fn chunk_capacity(&self) -> usize {
        self.chunk_capacity
    }

    /// Width of one element in bytes.
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    fn check_pool(&self, pool: &Pool) {
        assert_eq!(
            pool.id(),
            self.pool,
            "list used with a pool it was not created from"
        );
    }
}

/// Sequential iterator over a [`ChunkList`]'s element slots.
#[derive(Clone)]
pub struct Iter<'a> {
    pool: &'a Pool,
    chunks: &'a [Chunk],
    element_size: usize,
    chunk: usize,
    index: usize,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let chunk = self.chunks.get(self.chunk)?;
            if self.index < chunk.used {
                let start = self.index * self.element_size;
                self.index += 1;
                self.remaining -= 1;
                return Some(self.pool.slice(&chunk.buffer, start, self.element_size));
            }
            self.chunk += 1;
            self.index = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
