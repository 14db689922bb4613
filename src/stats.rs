//! Cache statistics.
//!
//! Counters are plain integers owned by the cache core and only touched
//! under the cache lock, so a [`CacheStats`] snapshot is always internally
//! consistent. All counters are monotonically non-decreasing.

use std::fmt;

/// Snapshot of the lifetime counters of a cache.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Successful `put` calls (inserts and overwrites).
    pub put_count: u64,
    /// `get` calls that found their key.
    pub hit_count: u64,
    /// `get` calls that did not find their key.
    pub miss_count: u64,
    /// Entries removed to satisfy a size target.
    pub eviction_count: u64,
}

impl CacheStats {
    /// Total number of `get` calls.
    #[inline]
    pub fn lookups(&self) -> u64 {
        self.hit_count + self.miss_count
    }

    /// Hits as a whole percentage of lookups; 0 when nothing was looked up.
    pub fn hit_rate_percent(&self) -> u64 {
        match self.lookups() {
            0 => 0,
            lookups => 100 * self.hit_count / lookups,
        }
    }

    /// Hits as a fraction of lookups in `[0.0, 1.0]`.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            lookups => self.hit_count as f64 / lookups as f64,
        }
    }

    pub(crate) fn record_put(&mut self) {
        self.put_count += 1;
    }

    pub(crate) fn record_hit(&mut self) {
        self.hit_count += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.miss_count += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.eviction_count += 1;
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "puts={},hits={},misses={},evictions={},hit_rate={}%",
            self.put_count,
            self.hit_count,
            self.miss_count,
            self.eviction_count,
            self.hit_rate_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stats_have_zero_hit_rate() {
        let stats = CacheStats::default();
        assert_eq!(stats.lookups(), 0);
        assert_eq!(stats.hit_rate_percent(), 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn hit_rate_truncates_to_whole_percent() {
        let mut stats = CacheStats::default();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();

        assert_eq!(stats.lookups(), 3);
        assert_eq!(stats.hit_rate_percent(), 66);
        assert!((stats.hit_rate() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn display_lists_every_counter() {
        let mut stats = CacheStats::default();
        stats.record_put();
        stats.record_put();
        stats.record_hit();
        stats.record_eviction();

        assert_eq!(
            stats.to_string(),
            "puts=2,hits=1,misses=0,evictions=1,hit_rate=100%"
        );
    }
}
