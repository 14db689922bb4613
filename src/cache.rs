//! # Thread-safe weighted LRU cache
//!
//! [`LruCache`] keeps strong references to its values and bounds the total
//! weight of resident entries by evicting the least recently used ones.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                      LruCache<K, V, W, L>                            │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │              parking_lot::Mutex<LruCore<K, V, W>>            │   │
//!   │   │   FxHashMap<K, NodeId> + RecencyList + size + CacheStats     │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   │                                                                      │
//!   │   listener: L   (called only after the guard is dropped)             │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   put(k, v)                               trim loop (one step per lock)
//!   ═══════════════════════════             ═══════════════════════════════
//!   lock ─► weigh, insert/overwrite         lock ─► check accounting
//!        ─► promote to MRU                       ─► size <= target? stop
//!   unlock                                       ─► unlink LRU, size -= w
//!   listener(Replaced) if overwritten       unlock
//!   trim to max_size ─────────────────────► listener(Evicted) ─► repeat
//! ```
//!
//! ## Methods
//!
//! | Method               | Listener cause | Description                             |
//! |----------------------|----------------|-----------------------------------------|
//! | `put(k, v)`          | `Replaced`, `Evicted` | Insert or overwrite, then trim   |
//! | `get(&k)`            | -              | Lookup, promote to MRU, count hit/miss  |
//! | `peek(&k)`           | -              | Lookup without promotion or counting    |
//! | `remove(&k)`         | `Explicit`     | Remove one entry                        |
//! | `evict_all()`        | `Evicted`      | Drain every entry                       |
//! | `trim_to_size(n)`    | `Evicted`      | Evict LRU entries until `size <= n`; 0 empties |
//! | `resize(n)`          | `Evicted`      | Change `max_size` and trim to it        |
//! | `snapshot()`         | -              | Resident entries, LRU first             |
//!
//! ## Concurrency Model
//!
//! A single exclusive lock covers the index, the recency list, the size and
//! the counters; there is no reader/writer split because every `get`
//! reorders. Trimming takes the lock once per evicted entry, so other
//! threads may interleave between steps; each step re-checks the target.
//! Listeners run on the calling thread with the lock released and may call
//! back into the same cache.
//!
//! ## Example Usage
//!
//! ```
//! use strong_lru::LruCache;
//!
//! let cache: LruCache<&str, i32> = LruCache::new(2);
//! cache.put("a", 1).unwrap();
//! cache.put("b", 2).unwrap();
//! assert_eq!(cache.get("a").as_deref(), Some(&1));
//!
//! // "b" is now least recently used.
//! cache.put("c", 3).unwrap();
//! assert!(cache.get("b").is_none());
//! assert_eq!(cache.eviction_count(), 1);
//! assert_eq!(cache.to_string(), "LruCache[max_size=2,hits=1,misses=1,hit_rate=50%]");
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;

use crate::builder::LruCacheBuilder;
use crate::error::CacheError;
use crate::listener::{NoopListener, RemovalCause, RemovalListener};
use crate::lru_core::{Admission, LruCore, TrimTarget};
use crate::stats::CacheStats;
use crate::weight::{UnitWeigher, Weigher};

/// Bounded, weighted, thread-safe LRU cache.
///
/// `W` sizes entries (defaults to one unit per entry) and `L` is notified of
/// every removal (defaults to doing nothing). Share it between threads with
/// `Arc<LruCache<..>>`.
pub struct LruCache<K, V, W = UnitWeigher, L = NoopListener> {
    core: Mutex<LruCore<K, V, W>>,
    listener: L,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `max_size` entries.
    ///
    /// A `max_size` of 0 is legal: every put is admitted and then immediately
    /// evicted, whatever its weight.
    ///
    /// # Example
    ///
    /// ```
    /// use strong_lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(100);
    /// assert_eq!(cache.max_size(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(max_size: usize) -> Self {
        LruCacheBuilder::new(max_size).build()
    }

    /// Starts a builder for a cache with a custom weigher or listener.
    pub fn builder(max_size: usize) -> LruCacheBuilder<K, V> {
        LruCacheBuilder::new(max_size)
    }
}

impl<K, V, W, L> LruCache<K, V, W, L>
where
    K: Eq + Hash + Clone,
    W: Weigher<K, V>,
    L: RemovalListener<K, V>,
{
    pub(crate) fn from_parts(
        max_size: usize,
        initial_capacity: usize,
        weigher: W,
        listener: L,
    ) -> Self {
        Self {
            core: Mutex::new(LruCore::new(max_size, initial_capacity, weigher)),
            listener,
        }
    }

    /// Caches `value` for `key`, returning the value it replaced.
    ///
    /// The entry becomes most recently used. If a previous value existed the
    /// listener sees it with [`RemovalCause::Replaced`]. Afterwards the cache
    /// is trimmed to `max_size`, which may evict other entries or, when its
    /// own weight exceeds `max_size`, the new entry itself.
    ///
    /// # Errors
    ///
    /// [`CacheError::WeightOverflow`] if the new total would not fit in a
    /// `usize` (nothing is changed), or [`CacheError::Inconsistent`] if the
    /// weigher reported unstable weights.
    ///
    /// # Example
    ///
    /// ```
    /// use strong_lru::LruCache;
    ///
    /// let cache: LruCache<u32, &str> = LruCache::new(10);
    /// assert!(cache.put(1, "first").unwrap().is_none());
    /// assert_eq!(cache.put(1, "second").unwrap().as_deref(), Some(&"first"));
    /// assert_eq!(cache.put_count(), 2);
    /// ```
    pub fn put(&self, key: K, value: V) -> Result<Option<Arc<V>>, CacheError> {
        self.put_arc(key, Arc::new(value))
    }

    /// Like [`put`](Self::put) for a value that is already shared.
    pub fn put_arc(&self, key: K, value: Arc<V>) -> Result<Option<Arc<V>>, CacheError> {
        let admission = self.core.lock().insert(key, Arc::clone(&value))?;

        let previous = match admission {
            Admission::Vacant => None,
            Admission::Occupied { key, previous } => {
                self.listener
                    .on_removal(RemovalCause::Replaced, &key, &previous, Some(&value));
                Some(previous)
            },
        };

        self.trim(TrimTarget::Capacity)?;
        Ok(previous)
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// Records a hit or a miss. Never changes the size.
    pub fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.lock().get(key)
    }

    /// Returns the value for `key` without promoting it or recording stats.
    ///
    /// # Example
    ///
    /// ```
    /// use strong_lru::LruCache;
    ///
    /// let cache: LruCache<u32, u32> = LruCache::new(2);
    /// cache.put(1, 10).unwrap();
    /// cache.put(2, 20).unwrap();
    /// assert_eq!(cache.peek(&1).as_deref(), Some(&10));
    ///
    /// // Key 1 is still least recently used.
    /// cache.put(3, 30).unwrap();
    /// assert!(!cache.contains(&1));
    /// assert_eq!(cache.hit_count(), 0);
    /// ```
    pub fn peek<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.lock().peek(key)
    }

    /// Returns `true` if `key` is resident. Does not affect recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.lock().contains(key)
    }

    /// Removes `key`, returning its value.
    ///
    /// The listener sees the removal with [`RemovalCause::Explicit`]. Never
    /// trims.
    ///
    /// # Errors
    ///
    /// [`CacheError::Inconsistent`] if the entry now weighs more than the
    /// recorded total; the entry stays resident.
    pub fn remove<Q>(&self, key: &Q) -> Result<Option<Arc<V>>, CacheError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.core.lock().remove(key)?;
        Ok(removed.map(|(key, value)| {
            self.listener
                .on_removal(RemovalCause::Explicit, &key, &value, None);
            value
        }))
    }

    /// Evicts every entry, notifying the listener with
    /// [`RemovalCause::Evicted`] for each one.
    ///
    /// # Example
    ///
    /// ```
    /// use strong_lru::LruCache;
    ///
    /// let cache: LruCache<u32, u32> = LruCache::new(10);
    /// for i in 0..5 {
    ///     cache.put(i, i).unwrap();
    /// }
    /// cache.evict_all().unwrap();
    /// assert_eq!(cache.size(), 0);
    /// assert_eq!(cache.eviction_count(), 5);
    /// ```
    pub fn evict_all(&self) -> Result<(), CacheError> {
        debug!("evicting all entries (len={})", self.len());
        self.trim(TrimTarget::Empty)
    }

    /// Evicts least recently used entries until `size() <= max_size`.
    ///
    /// A `max_size` of 0 empties the cache, zero-weight entries included.
    pub fn trim_to_size(&self, max_size: usize) -> Result<(), CacheError> {
        self.trim(TrimTarget::Size(max_size))
    }

    /// Changes the maximum size and trims to it.
    pub fn resize(&self, max_size: usize) -> Result<(), CacheError> {
        let previous = {
            let mut core = self.core.lock();
            let previous = core.max_size();
            core.set_max_size(max_size);
            previous
        };
        debug!("resized cache from {} to {}", previous, max_size);
        self.trim(TrimTarget::Capacity)
    }

    /// Evicts until `target` is met, one locked step at a time.
    fn trim(&self, target: TrimTarget) -> Result<(), CacheError> {
        loop {
            // The guard must be gone before the listener runs.
            let step = self.core.lock().evict_step(target);
            let Some((key, value)) = step? else {
                return Ok(());
            };
            self.listener
                .on_removal(RemovalCause::Evicted, &key, &value, None);
        }
    }

    /// Returns the resident entries from least to most recently used.
    ///
    /// Neither recency nor statistics are affected.
    pub fn snapshot(&self) -> Vec<(K, Arc<V>)> {
        self.core.lock().snapshot()
    }
}

impl<K, V, W, L> LruCache<K, V, W, L>
where
    K: Eq + Hash + Clone,
    W: Weigher<K, V>,
{
    /// Total weight of the resident entries. With the default weigher this
    /// is the number of entries.
    pub fn size(&self) -> usize {
        self.core.lock().size()
    }

    /// Maximum total weight.
    pub fn max_size(&self) -> usize {
        self.core.lock().max_size()
    }

    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.core.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of successful `put` calls.
    pub fn put_count(&self) -> u64 {
        self.core.lock().stats().put_count
    }

    /// Number of `get` calls that returned a value.
    pub fn hit_count(&self) -> u64 {
        self.core.lock().stats().hit_count
    }

    /// Number of `get` calls that returned `None`.
    pub fn miss_count(&self) -> u64 {
        self.core.lock().stats().miss_count
    }

    /// Number of entries evicted to satisfy a size target.
    pub fn eviction_count(&self) -> u64 {
        self.core.lock().stats().eviction_count
    }

    /// Consistent snapshot of all counters.
    pub fn stats(&self) -> CacheStats {
        self.core.lock().stats()
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with a default maximum of 16 entries.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V, W, L> fmt::Debug for LruCache<K, V, W, L>
where
    K: Eq + Hash + Clone,
    W: Weigher<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.core.lock();
        f.debug_struct("LruCache")
            .field("len", &core.len())
            .field("size", &core.size())
            .field("max_size", &core.max_size())
            .finish_non_exhaustive()
    }
}

impl<K, V, W, L> fmt::Display for LruCache<K, V, W, L>
where
    K: Eq + Hash + Clone,
    W: Weigher<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (max_size, stats) = {
            let core = self.core.lock();
            (core.max_size(), core.stats())
        };
        write!(
            f,
            "LruCache[max_size={},hits={},misses={},hit_rate={}%]",
            max_size,
            stats.hit_count,
            stats.miss_count,
            stats.hit_rate_percent()
        )
    }
}
