#![deny(clippy::all)]

use crate::Result;
use crate::domain::CacheConfig;
use std::sync::Arc;

// Ports are the pluggable extension points for underlying store implementations

/// Port for creating store backends from configuration
/// This allows different storage strategies to be plugged in
pub trait StorageFactory<K, V>: Send + Sync + 'static {
    /// Create a new cache store from configuration
    fn create_from_config(&self, config: &CacheConfig) -> Result<Arc<dyn CacheStore<K, V>>>;
}

/// Port for the in-memory key/value store behind the image cache.
///
/// Every operation is safe to call from any number of threads without
/// external synchronization; implementations own their locking discipline
/// and keep critical sections O(1). A miss is a normal absent result,
/// never an error.
pub trait CacheStore<K, V>: Send + Sync + 'static {
    /// The payload currently stored for `key`, if any. Copy-out semantics:
    /// callers own the returned value.
    fn get(&self, key: &K) -> Option<V>;

    /// Store or replace the payload for `key`. A replacement is atomic;
    /// readers observe either the old value or the new one, never a torn
    /// entry.
    fn insert(&self, key: K, value: V);

    /// Delete the entry for `key`, reporting whether one existed.
    fn remove(&self, key: &K) -> bool;

    /// Empty the store. Concurrent readers observe the pre-clear or
    /// post-clear state for any given key.
    fn clear(&self);

    /// Whether an entry currently exists for `key`.
    fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Number of live entries.
    fn entry_count(&self) -> usize;
}
