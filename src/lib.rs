//! strong-lru: a bounded, weighted, thread-safe LRU cache that holds strong
//! references to its values and reports every removal to a listener.
//!
//! See [`cache`] for the architecture and concurrency model.

pub mod builder;
pub mod cache;
pub(crate) mod ds;
pub mod error;
pub mod listener;
mod lru_core;
pub mod prelude;
pub mod stats;
pub mod weight;

pub use crate::builder::LruCacheBuilder;
pub use crate::cache::LruCache;
pub use crate::error::{CacheError, InvariantError};
pub use crate::listener::{NoopListener, RemovalCause, RemovalListener};
pub use crate::stats::CacheStats;
pub use crate::weight::{UnitWeigher, Weigher};
