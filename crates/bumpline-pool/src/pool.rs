//! The bump pool.
//!
//! [`Pool`] owns a growable list of [`Block`]s and hands out [`Span`]s by
//! advancing the current block's cursor. When the current block is full it
//! moves to the next block, creating one if needed. Blocks grow
//! progressively larger (doubling up to `max_block_size`) so long-lived
//! pools settle into a handful of large blocks.
//!
//! Besides allocation, the pool exposes the narrow frontier contract the
//! containers rely on:
//!
//! - [`Pool::is_last`] / [`Pool::remaining`] / [`Pool::extend`] for
//!   in-place growth of the most recent allocation,
//! - [`Pool::release`] for best-effort rewind of the most recent
//!   allocation.

use bumpline_core::{AllocError, Generation, PoolId};
use tracing::debug;

use crate::block::Block;
use crate::config::PoolConfig;
use crate::error::ConfigError;
use crate::span::Span;

/// Position of the pool's bump cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frontier {
    /// Index of the block currently being filled.
    pub block: u32,
    /// Byte offset of the next allocation within that block.
    pub offset: usize,
}

/// A block-based bump allocator with generation-tagged spans.
///
/// Single-threaded. Every container drawing from a pool borrows it mutably
/// for the duration of a growing call, so growth from several containers is
/// serialized by the borrow checker.
pub struct Pool {
    id: PoolId,
    config: PoolConfig,
    blocks: Vec<Block>,
    /// Index of the block currently being filled.
    current: usize,
    /// Size the next regular block will get.
    next_block_size: usize,
    generation: Generation,
    /// Generations of the live allocations in the current block, oldest
    /// first. The top one ends at the frontier.
    tail: Vec<Generation>,
}

impl Pool {
    /// Create a pool with one pre-allocated block.
    pub fn new(config: PoolConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: PoolConfig) -> Self {
        let first = Block::new(config.block_size);
        let next_block_size = config.next_block_size(config.block_size);
        Self {
            id: PoolId::next(),
            config,
            blocks: vec![first],
            current: 0,
            next_block_size,
            generation: Generation::ZERO,
            tail: Vec::new(),
        }
    }

    /// Bump-allocate `len` zeroed bytes.
    ///
    /// Tries the current block, then any later block kept from before a
    /// [`reset`](Self::reset), then a fresh block. Returns
    /// `AllocError::OutOfMemory` once `max_blocks` blocks exist and none has
    /// room, or when the system allocator refuses a new block. Advances the
    /// pool generation on success.
    pub fn alloc(&mut self, len: usize) -> Result<Span, AllocError> {
        if self.tail.try_reserve(1).is_err() {
            return Err(AllocError::out_of_memory(len, self.remaining()));
        }

        if let Some(offset) = self.blocks[self.current].alloc(len) {
            return Ok(self.issue(offset, len));
        }

        for index in self.current + 1..self.blocks.len() {
            if let Some(offset) = self.blocks[index].alloc(len) {
                self.enter_block(index);
                return Ok(self.issue(offset, len));
            }
        }

        if self.blocks.len() >= self.config.max_blocks {
            let available = self.remaining();
            debug!(
                pool = %self.id,
                requested = len,
                available,
                blocks = self.blocks.len(),
                "pool exhausted"
            );
            return Err(AllocError::out_of_memory(len, available));
        }

        // Oversized requests get a dedicated block of exactly their size.
        let size = self.next_block_size.max(len);
        if self.blocks.try_reserve(1).is_err() {
            return Err(AllocError::out_of_memory(len, self.remaining()));
        }
        let mut block = match Block::try_new(size) {
            Ok(block) => block,
            Err(err) => {
                let available = self.remaining();
                debug!(
                    pool = %self.id,
                    requested = len,
                    size,
                    error = %err,
                    "pool block allocation refused"
                );
                return Err(AllocError::out_of_memory(len, available));
            }
        };
        let Some(offset) = block.alloc(len) else {
            return Err(AllocError::out_of_memory(len, 0));
        };
        self.blocks.push(block);
        self.enter_block(self.blocks.len() - 1);
        if size == self.next_block_size {
            self.next_block_size = self.config.next_block_size(size);
        }
        debug!(
            pool = %self.id,
            block = self.current,
            size,
            "allocated pool block"
        );
        Ok(self.issue(offset, len))
    }

    /// Allocations left behind in the previous block can never end at the
    /// frontier again before a reset.
    fn enter_block(&mut self, index: usize) {
        self.current = index;
        self.tail.clear();
    }

    fn issue(&mut self, offset: usize, len: usize) -> Span {
        self.generation = self.generation.advance();
        self.tail.push(self.generation);
        Span::new(self.id, self.current as u32, offset, len, self.generation)
    }

    /// Whether `span` is this pool's most recent allocation.
    ///
    /// True only if the span's generation matches the pool's current
    /// generation and the span ends exactly at the frontier of the current
    /// block. Spans from another pool are never last.
    pub fn is_last(&self, span: &Span) -> bool {
        span.generation == self.generation && self.ends_at_frontier(span)
    }

    /// Whether `span` is the newest live allocation of the current block
    /// and ends at the frontier.
    fn ends_at_frontier(&self, span: &Span) -> bool {
        span.pool == self.id
            && self.tail.last() == Some(&span.generation)
            && span.block as usize == self.current
            && span.end() == self.blocks[self.current].used()
    }

    /// Bytes left before the end of the current block.
    pub fn remaining(&self) -> usize {
        self.blocks[self.current].remaining()
    }

    /// Grow `span` in place by `additional` bytes.
    ///
    /// Succeeds only if `span` is the most recent allocation
    /// ([`is_last`](Self::is_last)) and the current block has at least
    /// `additional` bytes left. On success the frontier advances, the span's
    /// length grows and the generation is left unchanged, so the span stays
    /// the most recent allocation. Returns `false` without touching anything
    /// otherwise.
    pub fn extend(&mut self, span: &mut Span, additional: usize) -> bool {
        if !self.is_last(span) || self.remaining() < additional {
            return false;
        }
        match self.blocks[self.current].alloc(additional) {
            Some(_) => {
                span.len += additional;
                true
            }
            None => false,
        }
    }

    /// Best-effort reclamation of `span`.
    ///
    /// If the span is the newest live allocation and ends exactly at the
    /// frontier of the current block, the frontier is rewound by the span's
    /// length and the number of bytes reclaimed is returned. The allocation
    /// before it then becomes releasable in turn. Otherwise nothing changes
    /// and `0` is returned; the bytes stay allocated until the pool is reset
    /// or dropped. A copy of a span that was already released is never
    /// reclaimed twice.
    pub fn release(&mut self, span: Span) -> usize {
        if !self.ends_at_frontier(&span) {
            return 0;
        }
        self.tail.pop();
        self.blocks[self.current].rewind(span.len);
        self.generation = self.generation.advance();
        span.len
    }

    /// Shared view of a span's bytes.
    ///
    /// # Panics
    ///
    /// Panics if `span` was allocated from a different pool.
    pub fn bytes(&self, span: &Span) -> &[u8] {
        self.check_owner(span);
        self.blocks[span.block as usize].slice(span.offset, span.len)
    }

    /// Mutable view of a span's bytes.
    ///
    /// # Panics
    ///
    /// Panics if `span` was allocated from a different pool.
    pub fn bytes_mut(&mut self, span: &Span) -> &mut [u8] {
        self.check_owner(span);
        self.blocks[span.block as usize].slice_mut(span.offset, span.len)
    }

    /// Shared view of `len` bytes starting `start` bytes into `span`.
    ///
    /// # Panics
    ///
    /// Panics if `span` belongs to a different pool or the range does not
    /// lie within the span.
    pub fn slice(&self, span: &Span, start: usize, len: usize) -> &[u8] {
        self.check_range(span, start, len);
        self.blocks[span.block as usize].slice(span.offset + start, len)
    }

    /// Mutable view of `len` bytes starting `start` bytes into `span`.
    ///
    /// # Panics
    ///
    /// Panics if `span` belongs to a different pool or the range does not
    /// lie within the span.
    pub fn slice_mut(&mut self, span: &Span, start: usize, len: usize) -> &mut [u8] {
        self.check_range(span, start, len);
        self.blocks[span.block as usize].slice_mut(span.offset + start, len)
    }

    /// Copy the first `len` bytes of `src` into the start of `dst`.
    ///
    /// # Panics
    ///
    /// Panics if either span belongs to a different pool or is shorter
    /// than `len`.
    pub fn copy(&mut self, src: &Span, dst: &Span, len: usize) {
        self.check_range(src, 0, len);
        self.check_range(dst, 0, len);
        let (s, d) = (src.block as usize, dst.block as usize);
        if s == d {
            self.blocks[s].copy_within(src.offset, dst.offset, len);
        } else if s < d {
            let (lo, hi) = self.blocks.split_at_mut(d);
            hi[0]
                .slice_mut(dst.offset, len)
                .copy_from_slice(lo[s].slice(src.offset, len));
        } else {
            let (lo, hi) = self.blocks.split_at_mut(s);
            lo[d]
                .slice_mut(dst.offset, len)
                .copy_from_slice(hi[0].slice(src.offset, len));
        }
    }

    fn check_owner(&self, span: &Span) {
        assert_eq!(
            span.pool, self.id,
            "span from pool {} used with pool {}",
            span.pool, self.id
        );
    }

    fn check_range(&self, span: &Span, start: usize, len: usize) {
        self.check_owner(span);
        assert!(
            start.checked_add(len).is_some_and(|end| end <= span.len),
            "range {start}+{len} outside span of {} bytes",
            span.len
        );
    }

    /// Rewind every block and start allocating from the first one again.
    ///
    /// Blocks are kept for reuse. Every span issued before the reset
    /// becomes stale: it is never [`is_last`](Self::is_last) and
    /// [`release`](Self::release) ignores it.
    pub fn reset(&mut self) {
        for block in &mut self.blocks {
            block.reset();
        }
        self.enter_block(0);
        self.generation = self.generation.advance();
        debug!(pool = %self.id, blocks = self.blocks.len(), "pool reset");
    }

    /// The current bump cursor.
    pub fn frontier(&self) -> Frontier {
        Frontier {
            block: self.current as u32,
            offset: self.blocks[self.current].used(),
        }
    }

    /// Byte offset of the end of the current block.
    pub fn block_end(&self) -> usize {
        self.blocks[self.current].capacity()
    }

    /// This pool's identity.
    pub fn id(&self) -> PoolId {
        self.id
    }

    /// The current allocation generation.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The configuration this pool was built with.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Number of blocks currently owned.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Bytes handed out across all blocks, counting abandoned tails.
    pub fn used(&self) -> usize {
        self.blocks.iter().map(Block::used).sum()
    }

    /// Total bytes owned across all blocks.
    pub fn memory_bytes(&self) -> usize {
        self.blocks.iter().map(Block::capacity).sum()
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::from_valid(PoolConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_pool() -> Pool {
        Pool::new(PoolConfig::new(128).with_max_block_size(512)).unwrap()
    }

    #[test]
    fn invalid_config_rejected() {
        assert!(matches!(
            Pool::new(PoolConfig::new(0)),
            Err(ConfigError::ZeroBlockSize)
        ));
    }

    #[test]
    fn alloc_advances_frontier_and_generation() {
        let mut pool = small_pool();
        let a = pool.alloc(16).unwrap();
        let b = pool.alloc(8).unwrap();
        assert_eq!(a.offset(), 0);
        assert_eq!(b.offset(), 16);
        assert_eq!(pool.frontier(), Frontier { block: 0, offset: 24 });
        assert_eq!(a.generation(), Generation(1));
        assert_eq!(b.generation(), Generation(2));
        assert_eq!(pool.generation(), Generation(2));
    }

    #[test]
    fn only_most_recent_allocation_is_last() {
        let mut pool = small_pool();
        let a = pool.alloc(16).unwrap();
        assert!(pool.is_last(&a));
        let b = pool.alloc(16).unwrap();
        assert!(!pool.is_last(&a));
        assert!(pool.is_last(&b));
    }

    #[test]
    fn overflow_moves_to_larger_block() {
        let mut pool = small_pool();
        pool.alloc(100).unwrap();
        let s = pool.alloc(100).unwrap();
        assert_eq!(s.block(), 1);
        assert_eq!(pool.block_count(), 2);
        assert_eq!(pool.block_end(), 256);
    }

    #[test]
    fn oversized_alloc_gets_dedicated_block() {
        let mut pool = small_pool();
        let s = pool.alloc(2000).unwrap();
        assert_eq!(s.len(), 2000);
        assert_eq!(pool.block_end(), 2000);
        assert_eq!(pool.remaining(), 0);
    }

    #[test]
    fn max_blocks_yields_out_of_memory() {
        let mut pool = Pool::new(PoolConfig::new(64).with_max_blocks(1)).unwrap();
        pool.alloc(60).unwrap();
        let err = pool.alloc(8).unwrap_err();
        assert_eq!(err, AllocError::out_of_memory(8, 4));
        // Failure leaves the pool untouched.
        assert_eq!(pool.frontier().offset, 60);
    }

    #[test]
    fn extend_grows_last_span_in_place() {
        let mut pool = small_pool();
        let mut s = pool.alloc(16).unwrap();
        let gen = pool.generation();
        assert!(pool.extend(&mut s, 8));
        assert_eq!(s.len(), 24);
        assert_eq!(s.offset(), 0);
        assert_eq!(pool.frontier().offset, 24);
        assert_eq!(pool.generation(), gen);
        assert!(pool.is_last(&s));
    }

    #[test]
    fn extend_refuses_non_last_span() {
        let mut pool = small_pool();
        let mut a = pool.alloc(16).unwrap();
        let _b = pool.alloc(16).unwrap();
        assert!(!pool.extend(&mut a, 8));
        assert_eq!(a.len(), 16);
        assert_eq!(pool.frontier().offset, 32);
    }

    #[test]
    fn extend_refuses_when_block_too_small() {
        let mut pool = small_pool();
        let mut s = pool.alloc(120).unwrap();
        assert!(!pool.extend(&mut s, 16));
        assert!(pool.extend(&mut s, 8));
        assert_eq!(pool.remaining(), 0);
    }

    #[test]
    fn extend_after_rewind_of_later_span_is_refused() {
        // `a` ends at the frontier again after `b` is released, but the
        // generation has moved on, so `a` is no longer the last allocation.
        let mut pool = small_pool();
        let mut a = pool.alloc(16).unwrap();
        let b = pool.alloc(16).unwrap();
        assert_eq!(pool.release(b), 16);
        assert!(!pool.is_last(&a));
        assert!(!pool.extend(&mut a, 4));
    }

    #[test]
    fn release_rewinds_only_at_frontier() {
        let mut pool = small_pool();
        let a = pool.alloc(16).unwrap();
        let b = pool.alloc(8).unwrap();
        assert_eq!(pool.release(a), 0);
        assert_eq!(pool.frontier().offset, 24);
        assert_eq!(pool.release(b), 8);
        assert_eq!(pool.frontier().offset, 16);
        // `a` now ends at the frontier and can be reclaimed too.
        assert_eq!(pool.release(a), 16);
        assert_eq!(pool.frontier().offset, 0);
    }

    #[test]
    fn released_span_copy_cannot_rewind_later_allocation() {
        let mut pool = small_pool();
        let a = pool.alloc(16).unwrap();
        assert_eq!(pool.release(a), 16);
        let b = pool.alloc(16).unwrap();
        assert_eq!(b.offset(), a.offset());
        pool.bytes_mut(&b).fill(7);

        assert_eq!(pool.release(a), 0);
        assert_eq!(pool.frontier().offset, 16);
        let c = pool.alloc(16).unwrap();
        assert_eq!(c.offset(), 16);
        assert!(pool.bytes(&b).iter().all(|&x| x == 7));
    }

    #[test]
    fn zero_length_allocation_shields_the_one_before() {
        let mut pool = small_pool();
        let a = pool.alloc(16).unwrap();
        let empty = pool.alloc(0).unwrap();
        assert_eq!(pool.release(a), 0);
        assert_eq!(pool.release(empty), 0);
        assert_eq!(pool.release(a), 16);
        assert_eq!(pool.frontier().offset, 0);
    }

    #[test]
    fn extended_span_releases_full_length() {
        let mut pool = small_pool();
        let header = pool.alloc(8).unwrap();
        let mut buffer = pool.alloc(16).unwrap();
        let short = buffer;
        assert!(pool.extend(&mut buffer, 8));
        assert_eq!(pool.release(short), 0);
        assert_eq!(pool.release(buffer), 24);
        assert_eq!(pool.release(header), 8);
        assert_eq!(pool.used(), 0);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn refused_block_yields_out_of_memory() {
        let mut pool = small_pool();
        let a = pool.alloc(16).unwrap();
        let frontier = pool.frontier();
        let err = pool.alloc(1 << 60).unwrap_err();
        assert!(matches!(err, AllocError::OutOfMemory { requested, .. } if requested == 1 << 60));
        assert_eq!(pool.frontier(), frontier);
        assert_eq!(pool.block_count(), 1);
        assert!(pool.is_last(&a));
    }

    #[test]
    fn release_ignores_spans_in_earlier_blocks() {
        let mut pool = small_pool();
        let a = pool.alloc(100).unwrap();
        pool.alloc(100).unwrap();
        assert_eq!(pool.release(a), 0);
    }

    #[test]
    fn release_ignores_foreign_span() {
        let mut pool = small_pool();
        let mut other = small_pool();
        pool.alloc(16).unwrap();
        let foreign = other.alloc(16).unwrap();
        assert_eq!(pool.release(foreign), 0);
        assert_eq!(pool.frontier().offset, 16);
    }

    #[test]
    fn reset_makes_old_spans_stale() {
        let mut pool = small_pool();
        let old = pool.alloc(16).unwrap();
        pool.reset();
        assert_eq!(pool.used(), 0);
        let fresh = pool.alloc(16).unwrap();
        assert_eq!(fresh.offset(), old.offset());
        assert_eq!(pool.release(old), 0);
        assert!(!pool.is_last(&old));
        assert_eq!(pool.release(fresh), 16);
    }

    #[test]
    fn reset_reuses_later_blocks() {
        let mut pool = small_pool();
        pool.alloc(100).unwrap();
        pool.alloc(200).unwrap();
        assert_eq!(pool.block_count(), 2);
        pool.reset();
        pool.alloc(100).unwrap();
        let s = pool.alloc(200).unwrap();
        assert_eq!(s.block(), 1);
        assert_eq!(pool.block_count(), 2);
    }

    #[test]
    fn copy_between_blocks() {
        let mut pool = small_pool();
        let src = pool.alloc(100).unwrap();
        pool.bytes_mut(&src)[..4].copy_from_slice(&[9, 8, 7, 6]);
        let dst = pool.alloc(100).unwrap();
        assert_ne!(src.block(), dst.block());
        pool.copy(&src, &dst, 4);
        assert_eq!(&pool.bytes(&dst)[..4], &[9, 8, 7, 6]);
    }

    #[test]
    fn copy_within_one_block() {
        let mut pool = small_pool();
        let src = pool.alloc(8).unwrap();
        pool.bytes_mut(&src).copy_from_slice(&[1; 8]);
        let dst = pool.alloc(16).unwrap();
        pool.copy(&src, &dst, 8);
        assert_eq!(pool.slice(&dst, 0, 8), &[1; 8]);
        assert_eq!(pool.slice(&dst, 8, 8), &[0; 8]);
    }

    #[test]
    #[should_panic(expected = "used with pool")]
    fn foreign_span_access_panics() {
        let mut a = small_pool();
        let b = small_pool();
        let s = a.alloc(8).unwrap();
        let _ = b.bytes(&s);
    }

    #[test]
    #[should_panic(expected = "outside span")]
    fn slice_outside_span_panics() {
        let mut pool = small_pool();
        let s = pool.alloc(8).unwrap();
        let _ = pool.slice(&s, 4, 8);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn spans_in_one_block_never_overlap(
                sizes in proptest::collection::vec(0usize..200, 1..40),
            ) {
                let mut pool = small_pool();
                let mut spans: Vec<Span> = Vec::new();
                for len in sizes {
                    spans.push(pool.alloc(len).unwrap());
                }
                for (i, a) in spans.iter().enumerate() {
                    for b in &spans[i + 1..] {
                        if a.block() == b.block() {
                            prop_assert!(a.end() <= b.offset());
                        }
                    }
                }
            }

            #[test]
            fn last_span_always_releasable(
                sizes in proptest::collection::vec(1usize..64, 1..20),
            ) {
                let mut pool = small_pool();
                let mut last = None;
                for len in sizes {
                    last = Some(pool.alloc(len).unwrap());
                }
                let span = last.unwrap();
                let before = pool.frontier().offset;
                prop_assert!(pool.is_last(&span));
                prop_assert_eq!(pool.release(span), span.len());
                prop_assert_eq!(pool.frontier().offset, before - span.len());
            }

            #[test]
            fn releasing_stale_copies_never_overlaps_live_spans(
                ops in proptest::collection::vec((any::<bool>(), 1usize..48, any::<usize>()), 1..60),
            ) {
                let mut pool = small_pool();
                let mut live: Vec<Span> = Vec::new();
                let mut issued: Vec<Span> = Vec::new();
                for (is_alloc, len, pick) in ops {
                    if is_alloc || issued.is_empty() {
                        let span = pool.alloc(len).unwrap();
                        for other in &live {
                            if other.block() == span.block() {
                                prop_assert!(
                                    other.end() <= span.offset() || span.end() <= other.offset()
                                );
                            }
                        }
                        live.push(span);
                        issued.push(span);
                    } else {
                        let span = issued[pick % issued.len()];
                        if pool.release(span) > 0 {
                            let index = live.iter().position(|s| *s == span);
                            prop_assert!(index.is_some());
                            if let Some(index) = index {
                                live.remove(index);
                            }
                        }
                    }
                }
            }
        }
    }
}
