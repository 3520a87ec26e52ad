use bytes::Bytes;

/// Identity of a cached image.
///
/// Wraps either an opaque caller-supplied key or a key derived from the
/// cache-relevant fields of an [`ImageRequest`]. The two identity domains
/// never compare equal to each other.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageCacheKey {
    key: Inner,
}

// Closed two-variant identity; no dynamic dispatch on hash or equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Inner {
    Custom(String),
    Derived(MemoryCacheKey),
}

impl ImageCacheKey {
    /// Key from an opaque caller-supplied string.
    pub fn custom(key: impl Into<String>) -> Self {
        Self {
            key: Inner::Custom(key.into()),
        }
    }

    /// Key derived from the cache-relevant fields of a request.
    pub fn for_request(request: &ImageRequest) -> Self {
        Self {
            key: Inner::Derived(MemoryCacheKey::new(request)),
        }
    }
}

/// Key derived deterministically from a request.
///
/// Carries only the fields that affect the decoded payload: the image id
/// and the ordered processor identifiers. Scheduling metadata never enters
/// the key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemoryCacheKey {
    image_id: String,
    processors: Vec<String>,
}

impl MemoryCacheKey {
    fn new(request: &ImageRequest) -> Self {
        Self {
            image_id: request.image_id().to_string(),
            processors: request.processors.clone(),
        }
    }
}

/// A request for a decoded image.
///
/// Only the parts that matter to caching are modeled here; fetching and
/// decoding live elsewhere in the pipeline.
#[derive(Clone, Debug)]
pub struct ImageRequest {
    /// Resource location of the source image.
    pub url: String,
    /// Caller-supplied identity override, used instead of the URL when
    /// deriving cache keys.
    pub override_image_id: Option<String>,
    /// Identifiers of the processing steps applied after decoding, in order.
    pub processors: Vec<String>,
    /// Scheduling hint; never part of the cache identity.
    pub priority: RequestPriority,
}

impl ImageRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            override_image_id: None,
            processors: Vec::new(),
            priority: RequestPriority::default(),
        }
    }

    pub fn with_processors(mut self, processors: Vec<String>) -> Self {
        self.processors = processors;
        self
    }

    pub fn with_priority(mut self, priority: RequestPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_image_id(mut self, image_id: impl Into<String>) -> Self {
        self.override_image_id = Some(image_id.into());
        self
    }

    /// The identity the cache keys on: the override id when present,
    /// otherwise the URL.
    pub fn image_id(&self) -> &str {
        self.override_image_id.as_deref().unwrap_or(&self.url)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum RequestPriority {
    VeryLow,
    Low,
    #[default]
    Normal,
    High,
    VeryHigh,
}

/// Decoded image artifact stored against a cache key.
///
/// The store treats this as an opaque payload; `Bytes` keeps copy-out O(1).
#[derive(Clone, Debug, PartialEq)]
pub struct ImageContainer {
    pub data: Bytes,
    pub content_type: String,
}

impl ImageContainer {
    pub fn new(data: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub name: String,                    // unique store name
    pub initial_capacity: Option<usize>, // pre-sized map
    pub shards: Option<usize>,           // None = single guard, Some(n) = lock striping
}

impl CacheConfig {
    pub fn new(
        name: impl Into<String>,
        initial_capacity: Option<usize>,
        shards: Option<usize>,
    ) -> Self {
        Self {
            name: name.into(),
            initial_capacity,
            shards,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_custom_keys_from_distinct_strings_differ() {
        assert_ne!(
            ImageCacheKey::custom("profile-a"),
            ImageCacheKey::custom("profile-b")
        );
    }

    #[test]
    fn test_custom_keys_from_equal_strings_match() {
        let a = ImageCacheKey::custom("avatar-42");
        let b = ImageCacheKey::custom("avatar-42");
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_equivalent_requests_derive_equal_keys() {
        let r1 = ImageRequest::new("https://example.com/cat.jpg")
            .with_processors(vec!["resize:200x200".into(), "round_corners".into()]);
        let r2 = ImageRequest::new("https://example.com/cat.jpg")
            .with_processors(vec!["resize:200x200".into(), "round_corners".into()]);

        let k1 = ImageCacheKey::for_request(&r1);
        let k2 = ImageCacheKey::for_request(&r2);
        assert_eq!(k1, k2);
        assert_eq!(hash_of(&k1), hash_of(&k2));
    }

    #[test]
    fn test_priority_is_not_cache_significant() {
        let low = ImageRequest::new("https://example.com/cat.jpg")
            .with_priority(RequestPriority::VeryLow);
        let high = ImageRequest::new("https://example.com/cat.jpg")
            .with_priority(RequestPriority::VeryHigh);

        assert_eq!(
            ImageCacheKey::for_request(&low),
            ImageCacheKey::for_request(&high)
        );
    }

    #[test]
    fn test_override_image_id_replaces_url_in_key() {
        let by_url = ImageRequest::new("https://cdn-1.example.com/cat.jpg");
        let by_id = ImageRequest::new("https://cdn-2.example.com/cat.jpg")
            .with_image_id("https://cdn-1.example.com/cat.jpg");

        // Same logical identity through two different URLs.
        assert_eq!(
            ImageCacheKey::for_request(&by_url),
            ImageCacheKey::for_request(&by_id)
        );
    }

    #[test]
    fn test_processor_order_is_cache_significant() {
        let ab = ImageRequest::new("https://example.com/cat.jpg")
            .with_processors(vec!["a".into(), "b".into()]);
        let ba = ImageRequest::new("https://example.com/cat.jpg")
            .with_processors(vec!["b".into(), "a".into()]);

        assert_ne!(
            ImageCacheKey::for_request(&ab),
            ImageCacheKey::for_request(&ba)
        );
    }

    #[test]
    fn test_custom_key_never_equals_derived_key() {
        // The request-derived key for a bare URL and a custom key holding
        // that same URL string must stay distinct identities.
        let custom = ImageCacheKey::custom("https://example.com/cat.jpg");
        let derived = ImageCacheKey::for_request(&ImageRequest::new("https://example.com/cat.jpg"));
        assert_ne!(custom, derived);
    }
}
