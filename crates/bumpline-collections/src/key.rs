//! Key trait for queue node indices.
//!
//! The [`Key`] trait abstracts over the index types used to link queue
//! nodes. It provides a sentinel value (`NONE`) and conversion to a
//! storage index.

use std::fmt::Debug;

/// Trait for key/index types that address nodes in caller storage.
///
/// `NONE` marks an absent link; it is what a removed node's links are reset
/// to when the `clear-unlinked` feature is enabled.
///
/// # Example
///
/// ```
/// use bumpline_collections::Key;
///
/// let key: u32 = 42;
/// assert!(!key.is_none());
/// assert!(u32::NONE.is_none());
/// assert_eq!(key.as_usize(), 42);
/// ```
pub trait Key: Copy + Eq + Debug {
    /// Sentinel value representing "no node".
    const NONE: Self;

    /// Returns the key as a storage index.
    fn as_usize(&self) -> usize;

    /// Returns `true` if this is the `NONE` value.
    #[inline]
    fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

macro_rules! impl_key {
    ($($t:ty),*) => {
        $(
            impl Key for $t {
                const NONE: Self = <$t>::MAX;

                #[inline]
                fn as_usize(&self) -> usize {
                    *self as usize
                }
            }
        )*
    };
}

impl_key!(u16, u32, u64, usize);
