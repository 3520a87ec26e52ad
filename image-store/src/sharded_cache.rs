use dashmap::DashMap;
use prism::ports::CacheStore;
use std::fmt::Debug;
use std::hash::Hash;

/// Lock-striped cache implementation backed by a sharded hash map
/// Reads of independent keys proceed without contending on a single guard
pub struct ShardedCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    name: String,
    entries: DashMap<K, V>,
}

impl<K, V> ShardedCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    /// Create a new cache with the default shard count
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: DashMap::new(),
        }
    }

    /// Create a new cache with an explicit shard count and optional capacity.
    /// The shard count is rounded up to what the underlying map accepts,
    /// a power of two of at least 2.
    pub fn with_shards(name: impl Into<String>, shards: usize, capacity: Option<usize>) -> Self {
        Self {
            name: name.into(),
            entries: DashMap::with_capacity_and_shard_amount(
                capacity.unwrap_or(0),
                shards.next_power_of_two().max(2),
            ),
        }
    }
}

impl<K, V> CacheStore<K, V> for ShardedCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn insert(&self, key: K, value: V) {
        self.entries.insert(key, value);
    }

    fn remove(&self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    // Sweeps shard by shard: an insert racing the sweep may land in an
    // already-cleared shard and survive, but the map is never corrupted.
    fn clear(&self) {
        self.entries.clear();
        tracing::debug!("Cleared cache '{}'", self.name);
    }

    fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> Debug for ShardedCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardedCache")
            .field("name", &self.name)
            .field("entry_count", &self.entries.len())
            .finish()
    }
}
