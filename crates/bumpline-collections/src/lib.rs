//! Scratch containers built on a bump pool.
//!
//! Three independent primitives for short-lived, single-owner construction:
//!
//! - [`Array`]: contiguous growable array. When its buffer is the pool's
//!   most recent allocation it grows in place one slot (or `n` slots) at a
//!   time; otherwise it reallocates at double capacity and abandons the old
//!   buffer to the pool.
//! - [`ChunkList`]: append-only list of fixed-capacity chunks. Existing
//!   elements never move; growth only adds chunks.
//! - [`queue`]: intrusive circular doubly-linked queue over caller-owned
//!   node storage, linked by index. O(1) insert, remove, split and
//!   concatenate, plus median-finding and a stable insertion sort.
//!
//! Containers never hold a borrow of the pool. Each growing call takes
//! `&mut Pool`, and each read takes `&Pool`; the container remembers which
//! pool it came from and panics if handed another one.
//!
//! ```
//! use bumpline_collections::Array;
//! use bumpline_pool::Pool;
//!
//! let mut pool = Pool::default();
//! let mut array = Array::create(&mut pool, 4, 8).unwrap();
//! for i in 0..5u64 {
//!     array.push(&mut pool).unwrap().copy_from_slice(&i.to_le_bytes());
//! }
//! assert_eq!(array.len(), 5);
//! assert_eq!(array.get(&pool, 4), Some(&4u64.to_le_bytes()[..]));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod key;
pub mod list;
pub mod queue;

pub use array::Array;
pub use key::Key;
pub use list::ChunkList;
pub use queue::{Link, Linked, Nodes, Queue};
