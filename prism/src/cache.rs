use crate::domain::{ImageCacheKey, ImageContainer, ImageRequest};
use crate::ports::CacheStore;
use std::sync::Arc;

/// Pipeline-facing handle over the in-memory image store.
///
/// Constructed explicitly and handed to consumers; the store is injected so
/// lifetime and test isolation stay in the caller's hands. All methods are
/// safe for unsynchronized concurrent callers.
#[derive(Clone)]
pub struct PipelineCache {
    store: Arc<dyn CacheStore<ImageCacheKey, ImageContainer>>,
}

impl PipelineCache {
    pub fn new(store: Arc<dyn CacheStore<ImageCacheKey, ImageContainer>>) -> Self {
        Self { store }
    }

    /// The cached artifact for `request`, derived-key lookup.
    pub fn cached_image(&self, request: &ImageRequest) -> Option<ImageContainer> {
        self.store.get(&ImageCacheKey::for_request(request))
    }

    /// Store the decoded artifact for `request`, replacing any previous one.
    pub fn store_cached_image(&self, request: &ImageRequest, container: ImageContainer) {
        tracing::debug!("Storing decoded image for '{}'", request.image_id());
        self.store
            .insert(ImageCacheKey::for_request(request), container);
    }

    /// Drop the cached artifact for `request`, reporting whether one existed.
    pub fn remove_cached_image(&self, request: &ImageRequest) -> bool {
        let removed = self.store.remove(&ImageCacheKey::for_request(request));
        if removed {
            tracing::debug!("Removed cached image for '{}'", request.image_id());
        }
        removed
    }

    /// Key-level lookup, for caller-supplied custom keys.
    pub fn get(&self, key: &ImageCacheKey) -> Option<ImageContainer> {
        self.store.get(key)
    }

    /// Key-level store, for caller-supplied custom keys.
    pub fn insert(&self, key: ImageCacheKey, container: ImageContainer) {
        self.store.insert(key, container);
    }

    /// Key-level removal.
    pub fn remove(&self, key: &ImageCacheKey) -> bool {
        self.store.remove(key)
    }

    /// Empty the whole cache.
    pub fn remove_all(&self) {
        self.store.clear();
        tracing::debug!("Cleared in-memory image cache");
    }
}

impl std::fmt::Debug for PipelineCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineCache")
            .field("store", &"<dyn CacheStore>")
            .finish()
    }
}
