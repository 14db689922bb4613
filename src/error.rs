//! Error types for the strong-lru crate.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Describes an internal invariant that no longer holds
//!   (size accounting out of step with the resident entries).
//! - [`CacheError`]: Returned by mutating cache operations. Either the
//!   accounting is inconsistent (fatal, usually a weigher that reports
//!   different weights for the same entry over time) or admitting an entry
//!   would overflow the size accumulator.
//!
//! ## Example Usage
//!
//! ```
//! use strong_lru::LruCache;
//! use strong_lru::error::CacheError;
//!
//! let cache: LruCache<u32, usize, _> = LruCache::builder(usize::MAX)
//!     .weigher(|_: &u32, v: &usize| *v)
//!     .build();
//! cache.put(1, usize::MAX).unwrap();
//!
//! // One more unit would overflow the accumulator; nothing is mutated.
//! let err = cache.put(2, 1).unwrap_err();
//! assert!(matches!(err, CacheError::WeightOverflow { .. }));
//! assert_eq!(cache.put_count(), 1);
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Detail of a size-accounting violation, carried by
/// [`CacheError::Inconsistent`].
///
/// The text names the broken rule and the numbers involved, e.g. a leftover
/// size on an empty cache or a weight larger than the recorded total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self(detail.into())
    }

    /// What went wrong, without the `CacheError` prefix.
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// CacheError
// ---------------------------------------------------------------------------

/// Error returned by mutating [`LruCache`](crate::LruCache) operations.
///
/// `Inconsistent` means the cache can no longer be trusted and should be
/// treated as a defect rather than recovered in place. `WeightOverflow` is
/// rejected before any state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Size accounting disagrees with the resident entries.
    Inconsistent(InvariantError),
    /// Admitting an entry of `weight` on top of `size` would overflow.
    WeightOverflow { size: usize, weight: usize },
}

impl CacheError {
    /// Returns `true` for accounting violations.
    pub fn is_inconsistent(&self) -> bool {
        matches!(self, CacheError::Inconsistent(_))
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Inconsistent(err) => {
                write!(f, "weigher is reporting inconsistent results: {}", err)
            },
            CacheError::WeightOverflow { size, weight } => {
                write!(f, "entry weight {} overflows cache size {}", weight, size)
            },
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Inconsistent(err) => Some(err),
            CacheError::WeightOverflow { .. } => None,
        }
    }
}

impl From<InvariantError> for CacheError {
    fn from(err: InvariantError) -> Self {
        CacheError::Inconsistent(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
