//! Core types for the bumpline workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! identifiers shared between the pool and the containers drawing from it
//! (pool identity and allocation generations) and the allocation error
//! type propagated by every growing container.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;

pub use error::AllocError;
pub use id::{Generation, PoolId};
