// ==============================================
// LRU CACHE SCENARIO TESTS (integration)
// ==============================================
//
// End-to-end behaviour through the public API only: eviction order, removal
// notifications, weighted sizing and the accounting fault path.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use strong_lru::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Removal {
    cause: RemovalCause,
    key: String,
    old: String,
    new: Option<String>,
}

/// Collects notifications for later inspection.
#[derive(Clone, Default)]
struct Journal(Arc<Mutex<Vec<Removal>>>);

impl Journal {
    fn drain(&self) -> Vec<Removal> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

impl RemovalListener<String, String> for Journal {
    fn on_removal(
        &self,
        cause: RemovalCause,
        key: &String,
        old_value: &Arc<String>,
        new_value: Option<&Arc<String>>,
    ) {
        self.0.lock().unwrap().push(Removal {
            cause,
            key: key.clone(),
            old: old_value.as_str().to_owned(),
            new: new_value.map(|v| v.as_str().to_owned()),
        });
    }
}

fn removal(cause: RemovalCause, key: &str, old: &str, new: Option<&str>) -> Removal {
    Removal {
        cause,
        key: key.to_owned(),
        old: old.to_owned(),
        new: new.map(str::to_owned),
    }
}

fn journaled(max_size: usize) -> (LruCache<String, String, UnitWeigher, Journal>, Journal) {
    let journal = Journal::default();
    let cache = LruCache::builder(max_size)
        .listener(journal.clone())
        .build();
    (cache, journal)
}

fn put(cache: &LruCache<String, String, impl Weigher<String, String>, Journal>, k: &str, v: &str) {
    cache.put(k.to_owned(), v.to_owned()).unwrap();
}

// ==============================================
// Eviction order
// ==============================================

mod eviction_order {
    use super::*;

    #[test]
    fn n_plus_one_puts_evict_the_first_key() {
        common::initialize_logger();
        for capacity in 1..=8usize {
            let cache: LruCache<usize, usize> = LruCache::new(capacity);
            for i in 0..=capacity {
                cache.put(i, i).unwrap();
            }
            assert!(!cache.contains(&0), "capacity {capacity}");
            assert_eq!(cache.len(), capacity);
            assert_eq!(cache.eviction_count(), 1);
        }
    }

    #[test]
    fn touching_the_first_key_evicts_the_second() {
        for capacity in 2..=8usize {
            let cache: LruCache<usize, usize> = LruCache::new(capacity);
            for i in 0..capacity {
                cache.put(i, i).unwrap();
            }
            assert!(cache.get(&0).is_some());
            cache.put(capacity, capacity).unwrap();

            assert!(cache.contains(&0), "capacity {capacity}");
            assert!(!cache.contains(&1), "capacity {capacity}");
        }
    }

    #[test]
    fn refreshed_entry_survives() {
        let (cache, journal) = journaled(2);
        put(&cache, "a", "1");
        put(&cache, "b", "2");
        assert_eq!(cache.get("a").as_deref().map(String::as_str), Some("1"));
        put(&cache, "c", "3");

        let resident: Vec<(String, String)> = cache
            .snapshot()
            .into_iter()
            .map(|(k, v)| (k, v.as_str().to_owned()))
            .collect();
        assert_eq!(
            resident,
            vec![
                ("a".to_owned(), "1".to_owned()),
                ("c".to_owned(), "3".to_owned())
            ]
        );
        assert_eq!(cache.eviction_count(), 1);
        assert_eq!(
            journal.drain(),
            vec![removal(RemovalCause::Evicted, "b", "2", None)]
        );
    }
}

// ==============================================
// Notifications
// ==============================================

mod notifications {
    use super::*;

    #[test]
    fn each_removal_kind_is_distinguished() {
        let (cache, journal) = journaled(2);
        put(&cache, "a", "1");
        put(&cache, "a", "2");
        put(&cache, "b", "3");
        put(&cache, "c", "4");
        cache.remove("c").unwrap();

        assert_eq!(
            journal.drain(),
            vec![
                removal(RemovalCause::Replaced, "a", "1", Some("2")),
                removal(RemovalCause::Evicted, "a", "2", None),
                removal(RemovalCause::Explicit, "c", "4", None),
            ]
        );
    }

    #[test]
    fn evict_all_notifies_every_resident_entry() {
        common::initialize_logger();
        let (cache, journal) = journaled(10);
        for (k, v) in [("x", "1"), ("y", "2"), ("z", "3")] {
            put(&cache, k, v);
        }

        cache.evict_all().unwrap();

        let drained = journal.drain();
        assert_eq!(drained.len(), 3);
        assert!(drained.iter().all(|r| r.cause == RemovalCause::Evicted && r.new.is_none()));
        assert_eq!(cache.size(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.eviction_count(), 3);
    }
}

// ==============================================
// Weighted sizing
// ==============================================

mod weighted {
    use super::*;

    #[allow(clippy::ptr_arg)]
    fn by_len(key: &String, value: &String) -> usize {
        key.len() + value.len()
    }

    #[test]
    fn size_tracks_weights_across_overwrites() {
        let journal = Journal::default();
        let cache = LruCache::builder(12)
            .weigher(by_len)
            .listener(journal.clone())
            .build();

        put(&cache, "k1", "aaaa");
        put(&cache, "k2", "bb");
        assert_eq!(cache.size(), 10);

        put(&cache, "k2", "b");
        assert_eq!(cache.size(), 9);

        put(&cache, "k3", "ccc");
        assert_eq!(cache.size(), 8);
        assert!(!cache.contains("k1"));
        assert!(cache.size() <= cache.max_size());
    }

    #[test]
    fn capacity_zero_round_trip() {
        let cache: LruCache<&str, i32> = LruCache::new(0);
        cache.put("a", 1).unwrap();

        assert_eq!(cache.size(), 0);
        assert_eq!(cache.eviction_count(), 1);
        assert!(cache.get("a").is_none());
        assert_eq!(cache.miss_count(), 1);
        assert_eq!(cache.hit_count(), 0);
    }

    #[test]
    fn capacity_zero_evicts_weightless_entries() {
        let cache: LruCache<u32, u32, _> = LruCache::builder(0)
            .weigher(|_: &u32, _: &u32| 0usize)
            .build();
        cache.put(1, 1).unwrap();

        assert!(cache.is_empty(), "len={} size={}", cache.len(), cache.size());
        assert_eq!(cache.eviction_count(), 1);
        assert!(cache.get(&1).is_none());
    }
}

// ==============================================
// Accounting faults
// ==============================================

mod faults {
    use super::*;

    #[test]
    fn shrinking_weigher_is_reported_by_trim() {
        common::initialize_logger();
        let dial = Arc::new(AtomicUsize::new(4));
        let weigher = {
            let dial = Arc::clone(&dial);
            move |_: &u32, _: &u32| dial.load(Ordering::SeqCst)
        };
        let cache: LruCache<u32, u32, _> = LruCache::builder(100).weigher(weigher).build();
        cache.put(1, 1).unwrap();

        dial.store(1, Ordering::SeqCst);
        cache.remove(&1).unwrap();

        match cache.evict_all() {
            Err(CacheError::Inconsistent(err)) => {
                assert!(err.message().contains("no entries"), "{err}");
            },
            other => panic!("expected an accounting fault, got {other:?}"),
        }
    }

    #[test]
    fn growing_weigher_is_reported_by_remove() {
        let dial = Arc::new(AtomicUsize::new(1));
        let weigher = {
            let dial = Arc::clone(&dial);
            move |_: &u32, _: &u32| dial.load(Ordering::SeqCst)
        };
        let cache: LruCache<u32, u32, _> = LruCache::builder(100).weigher(weigher).build();
        cache.put(1, 1).unwrap();

        dial.store(50, Ordering::SeqCst);
        let err = cache.remove(&1).unwrap_err();
        assert!(err.is_inconsistent());
        assert!(cache.contains(&1));
        assert_eq!(cache.size(), 1);
    }
}
