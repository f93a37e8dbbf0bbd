//! Allocation error type shared by the pool and its containers.

use std::error::Error;
use std::fmt;

/// Errors that can occur while drawing memory from a pool.
///
/// Allocation exhaustion is the only runtime failure of the pool and the
/// containers built on it. It is propagated synchronously to the caller;
/// nothing in this workspace retries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The pool cannot satisfy the request.
    OutOfMemory {
        /// Number of bytes requested.
        requested: usize,
        /// Bytes still available in the current block when the request failed.
        available: usize,
    },
}

impl AllocError {
    /// Shorthand for an out-of-memory error.
    pub fn out_of_memory(requested: usize, available: usize) -> Self {
        Self::OutOfMemory {
            requested,
            available,
        }
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory {
                requested,
                available,
            } => {
                write!(
                    f,
                    "pool out of memory: requested {requested} bytes, {available} bytes available"
                )
            }
        }
    }
}

impl Error for AllocError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_both_sizes() {
        let err = AllocError::out_of_memory(128, 16);
        assert_eq!(
            err.to_string(),
            "pool out of memory: requested 128 bytes, 16 bytes available"
        );
    }
}
