//! Bumpline: scratch containers on a bump pool.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! bumpline sub-crates. For most users, adding `bumpline` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use bumpline::prelude::*;
//!
//! let mut pool = Pool::new(PoolConfig::new(1024)).unwrap();
//!
//! // A growable array of u32 slots.
//! let mut array = Array::create(&mut pool, 2, 4).unwrap();
//! for v in [3u32, 1, 2] {
//!     array.push(&mut pool).unwrap().copy_from_slice(&v.to_le_bytes());
//! }
//! assert_eq!(array.len(), 3);
//!
//! // An append-only list in chunks of two.
//! let mut list = ChunkList::create(&mut pool, 2, 4).unwrap();
//! for slot in array.iter(&pool).map(<[u8]>::to_vec).collect::<Vec<_>>() {
//!     list.push(&mut pool).unwrap().copy_from_slice(&slot);
//! }
//! assert_eq!(list.chunk_count(), 2);
//!
//! // An intrusive queue over caller-owned nodes, sentinel in slot 0.
//! #[derive(Default)]
//! struct Task { weight: u32, link: Link<u32> }
//! impl Linked<u32> for Task {
//!     fn link(&self) -> &Link<u32> { &self.link }
//!     fn link_mut(&mut self) -> &mut Link<u32> { &mut self.link }
//! }
//!
//! let mut tasks: Vec<Task> = std::iter::once(Task::default())
//!     .chain(list.iter(&pool).map(|slot| Task {
//!         weight: u32::from_le_bytes(slot.try_into().unwrap()),
//!         ..Task::default()
//!     }))
//!     .collect();
//! let queue = Queue::init(&mut tasks, 0);
//! for key in 1..tasks.len() as u32 {
//!     queue.insert_tail(&mut tasks, key);
//! }
//! queue.sort(&mut tasks, |a, b| a.weight.cmp(&b.weight));
//! let weights: Vec<u32> = queue.iter(&tasks).map(|k| tasks[k as usize].weight).collect();
//! assert_eq!(weights, vec![1, 2, 3]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `bumpline-core` | Pool IDs, generations, `AllocError` |
//! | [`pool`] | `bumpline-pool` | The bump pool, spans, and `PoolConfig` |
//! | [`collections`] | `bumpline-collections` | `Array`, `ChunkList`, and the intrusive queue |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core identifiers and errors (`bumpline-core`).
pub use bumpline_core as types;

/// The bump pool (`bumpline-pool`).
///
/// [`pool::Pool`] hands out [`pool::Span`]s and supports in-place growth of
/// its most recent allocation.
pub use bumpline_pool as pool;

/// Pool-backed containers (`bumpline-collections`).
///
/// [`collections::Array`], [`collections::ChunkList`], and the
/// [`collections::queue`] module.
pub use bumpline_collections as collections;

/// Common imports for typical bumpline usage.
///
/// ```rust
/// use bumpline::prelude::*;
/// ```
pub mod prelude {
    // Pool
    pub use bumpline_pool::{Pool, PoolConfig, Span};

    // Errors
    pub use bumpline_core::AllocError;
    pub use bumpline_pool::ConfigError;

    // Containers
    pub use bumpline_collections::{Array, ChunkList, Key, Link, Linked, Nodes, Queue};
}
