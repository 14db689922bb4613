//! Entry weighing strategies.
//!
//! A [`Weigher`] attributes an accounting weight to each resident entry; the
//! cache compares the running total against its `max_size`. The default
//! [`UnitWeigher`] charges 1 per entry, so `max_size` counts entries. Any
//! `Fn(&K, &V) -> usize` closure is also a weigher:
//!
//! ```
//! use strong_lru::LruCache;
//!
//! // Bound the cache by total string length instead of entry count.
//! let cache: LruCache<u32, String, _> = LruCache::builder(8)
//!     .weigher(|_: &u32, v: &String| v.len())
//!     .build();
//! cache.put(1, "abcd".to_string()).unwrap();
//! cache.put(2, "efgh".to_string()).unwrap();
//! assert_eq!(cache.size(), 8);
//!
//! cache.put(3, "ij".to_string()).unwrap();
//! assert!(cache.get(&1).is_none());
//! assert_eq!(cache.size(), 6);
//! ```
//!
//! Weights are re-computed when an entry leaves the cache, so a weigher must
//! report the same weight for an entry for as long as it is resident.
//! Violations surface as [`CacheError::Inconsistent`](crate::error::CacheError).

/// Computes the accounting weight of a cache entry.
pub trait Weigher<K, V> {
    fn weigh(&self, key: &K, value: &V) -> usize;
}

/// Charges every entry a weight of 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitWeigher;

impl<K, V> Weigher<K, V> for UnitWeigher {
    #[inline]
    fn weigh(&self, _key: &K, _value: &V) -> usize {
        1
    }
}

impl<K, V, F> Weigher<K, V> for F
where
    F: Fn(&K, &V) -> usize,
{
    #[inline]
    fn weigh(&self, key: &K, value: &V) -> usize {
        self(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::ptr_arg)]
    fn weight_by_len(_key: &&str, value: &String) -> usize {
        value.len()
    }

    #[test]
    fn unit_weigher_is_constant() {
        let weigher = UnitWeigher;
        assert_eq!(Weigher::<u32, u32>::weigh(&weigher, &1, &1_000), 1);
        assert_eq!(
            Weigher::<&str, String>::weigh(&weigher, &"k", &"x".repeat(64)),
            1
        );
    }

    #[test]
    fn fn_pointer_is_a_weigher() {
        let weigher = weight_by_len;
        assert_eq!(weigher.weigh(&"k", &"hello".to_string()), 5);
        assert_eq!(weigher.weigh(&"k", &String::new()), 0);
    }

    #[test]
    fn closure_can_weigh_key_and_value() {
        let weigher = |k: &String, v: &Vec<u8>| k.len() + v.len();
        assert_eq!(weigher.weigh(&"abc".to_string(), &vec![0; 4]), 7);
    }
}
