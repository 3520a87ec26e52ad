pub mod sharded_cache;

pub use sharded_cache::ShardedCache;

use parking_lot::RwLock;
use prism::domain::CacheConfig;
use prism::ports::{CacheStore, StorageFactory};
use prism::{Error, Result};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// Single-guard in-memory cache implementation
/// The whole mapping sits behind one read-write lock; every critical
/// section is O(1)
pub struct MemoryCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    name: String,
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> MemoryCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    /// Create a new empty cache
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create a new cache with a pre-sized mapping
    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            entries: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }
}

impl<K, V> CacheStore<K, V> for MemoryCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    fn get(&self, key: &K) -> Option<V> {
        self.entries.read().get(key).cloned()
    }

    fn insert(&self, key: K, value: V) {
        self.entries.write().insert(key, value);
    }

    fn remove(&self, key: &K) -> bool {
        self.entries.write().remove(key).is_some()
    }

    fn clear(&self) {
        self.entries.write().clear();
        tracing::debug!("Cleared cache '{}'", self.name);
    }

    fn contains(&self, key: &K) -> bool {
        self.entries.read().contains_key(key)
    }

    fn entry_count(&self) -> usize {
        self.entries.read().len()
    }
}

impl<K, V> Debug for MemoryCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("name", &self.name)
            .field("entry_count", &self.entries.read().len())
            .finish()
    }
}

/// Factory that picks a store backend from configuration:
/// no shard count means the single-guard map, a shard count means
/// the lock-striped one
pub struct MemoryStoreFactory;

impl<K, V> StorageFactory<K, V> for MemoryStoreFactory
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    fn create_from_config(&self, config: &CacheConfig) -> Result<Arc<dyn CacheStore<K, V>>> {
        match config.shards {
            Some(0) => Err(Error::InvalidConfig(format!(
                "cache '{}': shard count must be non-zero",
                config.name
            ))),
            Some(shards) => Ok(Arc::new(ShardedCache::with_shards(
                &config.name,
                shards,
                config.initial_capacity,
            ))),
            None => Ok(Arc::new(match config.initial_capacity {
                Some(capacity) => MemoryCache::with_capacity(&config.name, capacity),
                None => MemoryCache::new(&config.name),
            })),
        }
    }
}
