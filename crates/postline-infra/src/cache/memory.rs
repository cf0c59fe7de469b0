//! In-memory cache - used when Redis is not configured.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use postline_core::ports::{Cache, CacheError};

struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
}

/// Process-local cache over a HashMap with an async RwLock.
///
/// Entries vanish on restart, which is acceptable for the post-list
/// snapshots this service caches: they repopulate on the next read.
pub struct InMemoryCache {
    store: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    fn is_expired(entry: &CacheEntry) -> bool {
        entry
            .expires_at
            .map(|exp| Instant::now() > exp)
            .unwrap_or(false)
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let store = self.store.read().await;
        let entry = store.get(key)?;

        if Self::is_expired(entry) {
            drop(store);
            // Evict lazily under the write lock.
            let mut store = self.store.write().await;
            store.remove(key);
            return None;
        }

        Some(entry.value.clone())
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at: ttl.map(|d| Instant::now() + d),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_delete_round_trip() {
        let cache = InMemoryCache::new();
        cache.set("posts:u1", "[]", None).await.unwrap();
        assert_eq!(cache.get("posts:u1").await, Some("[]".to_string()));

        cache.delete("posts:u1").await.unwrap();
        assert_eq!(cache.get("posts:u1").await, None);
    }

    #[tokio::test]
    async fn expired_entries_read_as_misses() {
        let cache = InMemoryCache::new();
        cache
            .set("posts:u1", "[]", Some(Duration::from_millis(20)))
            .await
            .unwrap();
        assert!(cache.get("posts:u1").await.is_some());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(cache.get("posts:u1").await, None);
    }
}
