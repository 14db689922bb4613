pub use crate::builder::LruCacheBuilder;
pub use crate::cache::LruCache;
pub use crate::error::CacheError;
pub use crate::listener::{RemovalCause, RemovalListener};
pub use crate::stats::CacheStats;
pub use crate::weight::{UnitWeigher, Weigher};
