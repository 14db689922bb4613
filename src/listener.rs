//! Removal notifications.
//!
//! A [`RemovalListener`] is told about every entry that leaves the cache,
//! together with the [`RemovalCause`]:
//!
//! | Cause      | Trigger                                   | `new_value` |
//! |------------|-------------------------------------------|-------------|
//! | `Evicted`  | capacity trim, `evict_all`, `trim_to_size`| `None`      |
//! | `Replaced` | `put` over an existing key                | `Some(new)` |
//! | `Explicit` | `remove`                                  | `None`      |
//!
//! Listeners run on the calling thread after the cache lock has been
//! released. A listener may call back into the cache, but the cache may
//! already have moved past the mutation that produced the notification.

use std::sync::Arc;

/// Why an entry left the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemovalCause {
    /// Removed to bring the total weight back under a size target.
    Evicted,
    /// Overwritten by a `put` for the same key.
    Replaced,
    /// Removed by an explicit `remove`.
    Explicit,
}

impl RemovalCause {
    /// Returns `true` when the entry was removed to free space.
    #[inline]
    pub fn was_evicted(self) -> bool {
        matches!(self, RemovalCause::Evicted)
    }
}

/// Receives one call per entry removal.
pub trait RemovalListener<K, V> {
    fn on_removal(
        &self,
        cause: RemovalCause,
        key: &K,
        old_value: &Arc<V>,
        new_value: Option<&Arc<V>>,
    );
}

/// Listener that ignores every notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopListener;

impl<K, V> RemovalListener<K, V> for NoopListener {
    #[inline]
    fn on_removal(&self, _: RemovalCause, _: &K, _: &Arc<V>, _: Option<&Arc<V>>) {}
}

impl<K, V, F> RemovalListener<K, V> for F
where
    F: Fn(RemovalCause, &K, &Arc<V>, Option<&Arc<V>>),
{
    #[inline]
    fn on_removal(
        &self,
        cause: RemovalCause,
        key: &K,
        old_value: &Arc<V>,
        new_value: Option<&Arc<V>>,
    ) {
        self(cause, key, old_value, new_value)
    }
}
