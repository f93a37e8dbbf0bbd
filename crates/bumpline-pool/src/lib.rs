//! Block-based bump pool for short-lived scratch containers.
//!
//! The pool carves allocations from progressively larger byte blocks with a
//! forward-only cursor (the *frontier*). Memory is reclaimed in bulk by
//! [`Pool::reset`] or by dropping the pool; the only individual reclamation
//! is a best-effort rewind of the most recent allocation.
//!
//! # Architecture
//!
//! ```text
//! Pool
//! ├── PoolConfig (block sizing and limits, validated at construction)
//! ├── Block[] (Vec<u8> + bump cursor, sizes doubling up to a cap)
//! └── Generation (advanced on every alloc and rewind)
//!
//! Span (allocation token: pool id, block, offset, len, generation)
//! ```
//!
//! Allocations are addressed through [`Span`] tokens rather than raw
//! pointers. A span is the pool's most recent allocation only while its
//! generation matches the pool's and the pool confirms it ends exactly at
//! the frontier; containers use this to extend buffers in place.
//!
//! All storage is zero-initialised `Vec<u8>`. No `unsafe`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod config;
pub mod error;
pub mod pool;
pub mod span;

// Public re-exports for the primary API surface.
pub use bumpline_core::{AllocError, Generation, PoolId};
pub use config::PoolConfig;
pub use error::ConfigError;
pub use pool::{Frontier, Pool};
pub use span::Span;
