//! Run with: cargo run --example basic_lru

use strong_lru::{CacheError, LruCache};

fn main() -> Result<(), CacheError> {
    let cache: LruCache<u32, String> = LruCache::new(2);

    cache.put(1, "alpha".to_string())?;
    cache.put(2, "beta".to_string())?;

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {}", value.as_str());
    }

    cache.put(3, "gamma".to_string())?;

    println!("contains 2? {}", cache.contains(&2));
    println!("{}", cache);
    Ok(())
}

// Expected output:
// hit 1: alpha
// contains 2? false
// LruCache[max_size=2,hits=1,misses=0,hit_rate=100%]
//
// Explanation: max_size=2; after get(&1), key 1 is MRU and key 2 is LRU.
// Putting key 3 evicts key 2, so contains(2) is false.
