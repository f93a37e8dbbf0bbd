//! Strongly-typed identifiers for pools and their allocations.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`PoolId`] allocation.
static POOL_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a pool.
///
/// Allocated from a monotonic atomic counter via [`PoolId::next`]. Two
/// distinct pools always have different IDs, even if one is dropped and
/// the next is created at the same address. Containers record the ID of
/// the pool they draw from and refuse to operate on any other pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolId(u64);

impl PoolId {
    /// Allocate a fresh, unique pool ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(POOL_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Allocation generation of a pool.
///
/// A pool advances its generation on every allocation and every rewind of
/// its frontier. An allocation remembers the generation it was made in, so
/// "is this still the most recent allocation?" is a single integer
/// comparison plus an adjacency check by the pool, never a raw address
/// comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation of a freshly created pool.
    pub const ZERO: Self = Self(0);

    /// The generation that follows this one.
    #[must_use]
    pub fn advance(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Generation {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_ids_are_unique() {
        let a = PoolId::next();
        let b = PoolId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn generation_advances_by_one() {
        assert_eq!(Generation::ZERO.advance(), Generation(1));
        assert_eq!(Generation(41).advance().to_string(), "42");
    }

    #[test]
    fn generation_wraps_instead_of_panicking() {
        assert_eq!(Generation(u64::MAX).advance(), Generation::ZERO);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn advance_is_strictly_increasing_below_max(g in 0u64..u64::MAX) {
                let gen = Generation(g);
                prop_assert!(gen.advance() > gen);
            }
        }
    }
}
