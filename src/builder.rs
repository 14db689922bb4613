//! Construction-time configuration for [`LruCache`].
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use strong_lru::{LruCache, RemovalCause};
//!
//! let evictions = Arc::new(AtomicUsize::new(0));
//! let seen = Arc::clone(&evictions);
//!
//! let cache: LruCache<u64, Vec<u8>, _, _> = LruCache::builder(1024)
//!     .weigher(|_: &u64, v: &Vec<u8>| v.len())
//!     .listener(move |cause: RemovalCause, _: &u64, _: &Arc<Vec<u8>>, _: Option<&Arc<Vec<u8>>>| {
//!         if cause.was_evicted() {
//!             seen.fetch_add(1, Ordering::Relaxed);
//!         }
//!     })
//!     .initial_capacity(64)
//!     .build();
//!
//! cache.put(1, vec![0; 600]).unwrap();
//! cache.put(2, vec![0; 600]).unwrap();
//! assert_eq!(evictions.load(Ordering::Relaxed), 1);
//! assert_eq!(cache.size(), 600);
//! ```

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::cache::LruCache;
use crate::listener::{NoopListener, RemovalListener};
use crate::weight::{UnitWeigher, Weigher};

/// Builder for [`LruCache`].
///
/// Only `max_size` is required; the weigher defaults to [`UnitWeigher`] and
/// the listener to [`NoopListener`].
pub struct LruCacheBuilder<K, V, W = UnitWeigher, L = NoopListener> {
    max_size: usize,
    initial_capacity: usize,
    weigher: W,
    listener: L,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> LruCacheBuilder<K, V> {
    /// Starts a builder for a cache whose total weight may not exceed
    /// `max_size`.
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            initial_capacity: 0,
            weigher: UnitWeigher,
            listener: NoopListener,
            _marker: PhantomData,
        }
    }
}

impl<K, V, W, L> LruCacheBuilder<K, V, W, L> {
    /// Replaces the weigher.
    pub fn weigher<W2>(self, weigher: W2) -> LruCacheBuilder<K, V, W2, L>
    where
        W2: Weigher<K, V>,
    {
        LruCacheBuilder {
            max_size: self.max_size,
            initial_capacity: self.initial_capacity,
            weigher,
            listener: self.listener,
            _marker: PhantomData,
        }
    }

    /// Replaces the removal listener.
    pub fn listener<L2>(self, listener: L2) -> LruCacheBuilder<K, V, W, L2>
    where
        L2: RemovalListener<K, V>,
    {
        LruCacheBuilder {
            max_size: self.max_size,
            initial_capacity: self.initial_capacity,
            weigher: self.weigher,
            listener,
            _marker: PhantomData,
        }
    }

    /// Pre-sizes the index and node arena for `entries` entries.
    pub fn initial_capacity(mut self, entries: usize) -> Self {
        self.initial_capacity = entries;
        self
    }

    /// Overrides the maximum size given to [`new`](LruCacheBuilder::new).
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }
}

impl<K, V, W, L> LruCacheBuilder<K, V, W, L>
where
    K: Eq + Hash + Clone,
    W: Weigher<K, V>,
    L: RemovalListener<K, V>,
{
    pub fn build(self) -> LruCache<K, V, W, L> {
        LruCache::from_parts(
            self.max_size,
            self.initial_capacity,
            self.weigher,
            self.listener,
        )
    }
}

impl<K, V, W, L> fmt::Debug for LruCacheBuilder<K, V, W, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheBuilder")
            .field("max_size", &self.max_size)
            .field("initial_capacity", &self.initial_capacity)
            .finish_non_exhaustive()
    }
}
