//! Session-local image cache
//!
//! The persisted schema carries attachment metadata only; the actual
//! bytes live here, scoped to the browsing session, and are dropped with
//! the process. Nothing in this cache is ever written to the store.

use dashmap::DashMap;
use tmods_model::{ActionId, ImageMeta};

/// A cached attachment: persisted metadata plus session-only bytes
#[derive(Debug, Clone)]
pub struct CachedImage {
    pub meta: ImageMeta,
    pub bytes: Vec<u8>,
}

/// Transient image byte cache, keyed by the owning action
#[derive(Debug, Default)]
pub struct SessionImageCache {
    inner: DashMap<ActionId, CachedImage>,
}

impl SessionImageCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache the bytes for an action's attachment, replacing any previous
    /// attachment for the same action
    pub fn insert(&self, action: ActionId, meta: ImageMeta, bytes: Vec<u8>) {
        self.inner.insert(action, CachedImage { meta, bytes });
    }

    /// Fetch an action's cached attachment, if this session has one
    #[must_use]
    pub fn get(&self, action: ActionId) -> Option<CachedImage> {
        self.inner.get(&action).map(|entry| entry.value().clone())
    }

    /// Drop an action's cached attachment
    pub fn remove(&self, action: ActionId) {
        self.inner.remove(&action);
    }

    /// Number of cached attachments
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_round_trip() {
        let cache = SessionImageCache::new();
        let action = ActionId::new();
        cache.insert(action, ImageMeta::new("before.jpg"), vec![1, 2, 3]);

        let cached = cache.get(action).unwrap();
        assert_eq!(cached.meta.name, "before.jpg");
        assert_eq!(cached.bytes, vec![1, 2, 3]);

        cache.remove(action);
        assert!(cache.get(action).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn reattach_replaces_previous_bytes() {
        let cache = SessionImageCache::new();
        let action = ActionId::new();
        cache.insert(action, ImageMeta::new("v1.jpg"), vec![1]);
        cache.insert(action, ImageMeta::new("v2.jpg"), vec![2, 2]);

        let cached = cache.get(action).unwrap();
        assert_eq!(cached.meta.name, "v2.jpg");
        assert_eq!(cached.bytes, vec![2, 2]);
        assert_eq!(cache.len(), 1);
    }
}
