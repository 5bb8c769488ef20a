//! Bounded classification cache.
//!
//! Memoizes successful classifications by exact utterance text so that
//! repeating an utterance (or re-rendering a page) does not re-issue the
//! same NLU request. Size-bounded with moka's TinyLFU eviction; entries can
//! additionally expire after a configured time-to-live.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use witchat_types::config::CacheConfig;
use witchat_types::intent::Classification;

/// Shared, bounded map from utterance text to its classification.
///
/// Cloning is cheap; clones share the same underlying cache.
#[derive(Clone)]
pub struct ClassificationCache {
    inner: Cache<String, Arc<Classification>>,
    capacity: u64,
}

impl ClassificationCache {
    pub fn new(config: &CacheConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.capacity);
        if let Some(ttl) = config.ttl_secs {
            builder = builder.time_to_live(Duration::from_secs(ttl));
        }
        Self {
            inner: builder.build(),
            capacity: config.capacity,
        }
    }

    /// Look up a cached classification.
    pub async fn get(&self, utterance: &str) -> Option<Arc<Classification>> {
        self.inner.get(utterance).await
    }

    pub async fn insert(&self, utterance: &str, classification: Arc<Classification>) {
        self.inner.insert(utterance.to_string(), classification).await;
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.inner.invalidate_all();
    }

    /// Approximate entry count (exact after pending maintenance has run).
    pub async fn len(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use witchat_types::intent::Intent;

    fn classification(name: &str) -> Arc<Classification> {
        Arc::new(Classification {
            text: None,
            intents: vec![Intent {
                id: None,
                name: name.to_string(),
                confidence: 0.8,
            }],
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_get_after_insert() {
        let cache = ClassificationCache::new(&CacheConfig::default());
        assert!(cache.get("hola").await.is_none());

        cache.insert("hola", classification("greet")).await;
        let hit = cache.get("hola").await.unwrap();
        assert_eq!(hit.top_intent().unwrap().name, "greet");
    }

    #[tokio::test]
    async fn test_exact_text_match_only() {
        let cache = ClassificationCache::new(&CacheConfig::default());
        cache.insert("hola", classification("greet")).await;
        assert!(cache.get("Hola").await.is_none());
        assert!(cache.get("hola ").await.is_none());
    }

    #[tokio::test]
    async fn test_capacity_is_bounded() {
        let cache = ClassificationCache::new(&CacheConfig {
            capacity: 4,
            ttl_secs: None,
        });
        for i in 0..64 {
            cache.insert(&format!("utterance {i}"), classification("x")).await;
        }
        assert!(cache.len().await <= 4);
        assert_eq!(cache.capacity(), 4);
    }

    #[tokio::test]
    async fn test_clear_drops_entries() {
        let cache = ClassificationCache::new(&CacheConfig::default());
        cache.insert("hola", classification("greet")).await;
        cache.clear();
        assert!(cache.get("hola").await.is_none());
    }
}
