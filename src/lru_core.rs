//! Single-threaded LRU core: recency list, key index, weighted size and
//! counters.
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                       LruCore<K, V, W>                       │
//!   │                                                              │
//!   │   FxHashMap<K, NodeId> ──┐                                   │
//!   │                          ▼                                   │
//!   │   head (MRU) ─► [Entry] ◄──► [Entry] ◄──► [Entry] ◄── tail   │
//!   │                                                     (LRU)    │
//!   │   size = Σ weigher.weigh(key, value)   max_size   stats      │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core never calls removal listeners and never loops: every method is
//! one bounded mutation, so the wrapper in [`crate::cache`] can release its
//! lock between eviction steps and notify listeners without holding it.
//! Weights are re-computed on the way out, and every subtraction is checked,
//! so an unstable weigher is reported instead of silently skewing the total.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use log::{error, trace};
use rustc_hash::FxHashMap;

use crate::ds::{NodeId, RecencyList};
use crate::error::{CacheError, InvariantError};
use crate::stats::CacheStats;
use crate::weight::Weigher;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: Arc<V>,
}

/// Outcome of [`LruCore::insert`].
#[derive(Debug)]
pub(crate) enum Admission<K, V> {
    /// The key was not resident.
    Vacant,
    /// The key was resident; hands back the unused key and the old value.
    Occupied { key: K, previous: Arc<V> },
}

/// Size target for one trim step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrimTarget {
    /// The cache's current `max_size`.
    Capacity,
    /// An explicit size limit. A limit of 0 drains the cache.
    Size(usize),
    /// Nothing may remain, including zero-weight entries.
    Empty,
}

pub(crate) struct LruCore<K, V, W> {
    map: FxHashMap<K, NodeId>,
    list: RecencyList<Entry<K, V>>,
    size: usize,
    max_size: usize,
    weigher: W,
    stats: CacheStats,
}

impl<K, V, W> LruCore<K, V, W>
where
    K: Eq + Hash + Clone,
    W: Weigher<K, V>,
{
    pub(crate) fn new(max_size: usize, initial_capacity: usize, weigher: W) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(initial_capacity, Default::default()),
            list: RecencyList::with_capacity(initial_capacity),
            size: 0,
            max_size,
            weigher,
            stats: CacheStats::default(),
        }
    }

    #[inline]
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub(crate) fn max_size(&self) -> usize {
        self.max_size
    }

    #[inline]
    pub(crate) fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Inserts or overwrites `key`, moving it to the MRU position.
    ///
    /// All fallible arithmetic happens before the first write, so an error
    /// leaves the map, the size and the counters untouched.
    pub(crate) fn insert(
        &mut self,
        key: K,
        value: Arc<V>,
    ) -> Result<Admission<K, V>, CacheError> {
        let weight = self.weigher.weigh(&key, &value);

        if let Some(&id) = self.map.get(&key) {
            let old_weight = {
                let entry = self.entry(id)?;
                self.weigher.weigh(&entry.key, &entry.value)
            };
            let released = self.checked_release(old_weight)?;
            let size = released
                .checked_add(weight)
                .ok_or(CacheError::WeightOverflow {
                    size: released,
                    weight,
                })?;

            let previous = match self.list.get_mut(id) {
                Some(entry) => std::mem::replace(&mut entry.value, value),
                None => return Err(self.missing(id)),
            };
            self.list.move_to_front(id);
            self.size = size;
            self.stats.record_put();
            return Ok(Admission::Occupied { key, previous });
        }

        let size = self
            .size
            .checked_add(weight)
            .ok_or(CacheError::WeightOverflow {
                size: self.size,
                weight,
            })?;

        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.map.insert(key, id);
        self.size = size;
        self.stats.record_put();
        Ok(Admission::Vacant)
    }

    /// Looks up `key`, promoting it to MRU and recording a hit or miss.
    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&id) = self.map.get(key) else {
            self.stats.record_miss();
            return None;
        };

        self.list.move_to_front(id);
        self.stats.record_hit();
        self.list.get(id).map(|entry| Arc::clone(&entry.value))
    }

    /// Looks up `key` without touching recency or counters.
    pub(crate) fn peek<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let &id = self.map.get(key)?;
        self.list.get(id).map(|entry| Arc::clone(&entry.value))
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Removes `key`, returning the owned key and value.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Result<Option<(K, Arc<V>)>, CacheError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&id) = self.map.get(key) else {
            return Ok(None);
        };
        let size = {
            let entry = self.entry(id)?;
            let weight = self.weigher.weigh(&entry.key, &entry.value);
            self.checked_release(weight)?
        };

        self.map.remove(key);
        let entry = self.detach(id)?;
        self.size = size;
        Ok(Some((entry.key, entry.value)))
    }

    /// Performs one trim step towards `target`.
    ///
    /// Returns `Ok(None)` once the target is met, otherwise the evicted LRU
    /// entry. Consistency is verified before every step.
    pub(crate) fn evict_step(
        &mut self,
        target: TrimTarget,
    ) -> Result<Option<(K, Arc<V>)>, CacheError> {
        self.check_consistency()?;

        // A limit of 0 admits nothing, not even zero-weight entries.
        let done = match target {
            TrimTarget::Capacity => self.size <= self.max_size && self.max_size > 0,
            TrimTarget::Size(limit) => self.size <= limit && limit > 0,
            TrimTarget::Empty => false,
        };
        if done || self.map.is_empty() {
            return Ok(None);
        }

        let Some(id) = self.list.back_id() else {
            return Err(self.inconsistent(format!(
                "index holds {} entries but the recency list is empty",
                self.map.len()
            )));
        };
        let weight = {
            let entry = self.entry(id)?;
            self.weigher.weigh(&entry.key, &entry.value)
        };
        let size = self.checked_release(weight)?;

        let entry = self.detach(id)?;
        self.map.remove(&entry.key);
        self.size = size;
        self.stats.record_eviction();
        trace!(
            "evicted lru entry (weight={}, size={}, target={:?})",
            weight, size, target
        );
        Ok(Some((entry.key, entry.value)))
    }

    /// Clones out the resident entries from LRU to MRU.
    pub(crate) fn snapshot(&self) -> Vec<(K, Arc<V>)> {
        self.list
            .iter_lru()
            .map(|entry| (entry.key.clone(), Arc::clone(&entry.value)))
            .collect()
    }

    fn check_consistency(&self) -> Result<(), CacheError> {
        if self.map.is_empty() && self.size != 0 {
            return Err(self.inconsistent(format!(
                "size is {} but the cache holds no entries",
                self.size
            )));
        }
        if self.map.len() != self.list.len() {
            return Err(self.inconsistent(format!(
                "index holds {} entries, recency list holds {}",
                self.map.len(),
                self.list.len()
            )));
        }
        Ok(())
    }

    /// `size - weight`, or an accounting error if that would go negative.
    fn checked_release(&self, weight: usize) -> Result<usize, CacheError> {
        self.size.checked_sub(weight).ok_or_else(|| {
            self.inconsistent(format!(
                "releasing weight {} from size {} would go negative",
                weight, self.size
            ))
        })
    }

    fn entry(&self, id: NodeId) -> Result<&Entry<K, V>, CacheError> {
        self.list.get(id).ok_or_else(|| self.missing(id))
    }

    fn detach(&mut self, id: NodeId) -> Result<Entry<K, V>, CacheError> {
        match self.list.remove(id) {
            Some(entry) => Ok(entry),
            None => Err(self.missing(id)),
        }
    }

    fn missing(&self, id: NodeId) -> CacheError {
        self.inconsistent(format!("indexed node {} is missing", id.index()))
    }

    fn inconsistent(&self, msg: String) -> CacheError {
        error!(
            "lru accounting violated (size={}, max_size={}, len={}): {}",
            self.size,
            self.max_size,
            self.map.len(),
            msg
        );
        CacheError::from(InvariantError::new(msg))
    }

    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        assert_eq!(self.map.len(), self.list.len());
        for entry in self.list.iter_lru() {
            assert!(self.map.contains_key(&entry.key));
        }
        let total: usize = self
            .list
            .iter_lru()
            .map(|entry| self.weigher.weigh(&entry.key, &entry.value))
            .sum();
        assert_eq!(total, self.size);
    }
}
