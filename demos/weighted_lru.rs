//! Byte-bounded cache with a removal listener.
//!
//! Run with: cargo run --example weighted_lru

use std::sync::Arc;

use strong_lru::{CacheError, LruCache, RemovalCause};

fn main() -> Result<(), CacheError> {
    let cache: LruCache<&str, Vec<u8>, _, _> = LruCache::builder(16)
        .weigher(|_: &&str, body: &Vec<u8>| body.len())
        .listener(
            |cause: RemovalCause, key: &&str, old: &Arc<Vec<u8>>, new: Option<&Arc<Vec<u8>>>| {
                match new {
                    Some(new) => println!("{:?} {}: {} -> {} bytes", cause, key, old.len(), new.len()),
                    None => println!("{:?} {}: {} bytes", cause, key, old.len()),
                }
            },
        )
        .build();

    cache.put("index.html", vec![0; 6])?;
    cache.put("style.css", vec![0; 4])?;
    cache.put("app.js", vec![0; 5])?;
    println!("size after three puts: {}/{}", cache.size(), cache.max_size());

    cache.get("index.html");
    cache.put("style.css", vec![0; 2])?;
    cache.put("logo.png", vec![0; 8])?;
    println!("size after churn: {}/{}", cache.size(), cache.max_size());

    cache.remove("logo.png")?;
    cache.evict_all()?;
    println!("{}", cache.stats());
    Ok(())
}

// Expected output:
// size after three puts: 15/16
// Replaced style.css: 4 -> 2 bytes
// Evicted app.js: 5 bytes
// size after churn: 16/16
// Explicit logo.png: 8 bytes
// Evicted index.html: 6 bytes
// Evicted style.css: 2 bytes
// puts=5,hits=1,misses=0,evictions=3,hit_rate=100%
