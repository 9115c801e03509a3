//! In-process setting cache
//!
//! DashMap storage with lazy expiry: an expired entry is removed on the
//! `get` that finds it. Used by tests and cache-less deployments.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;

use lhi_core::cache::SettingCache;
use lhi_core::error::DomainError;

struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Default)]
pub struct MemorySettingCache {
    storage: DashMap<String, CacheEntry>,
}

impl MemorySettingCache {
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl SettingCache for MemorySettingCache {
    async fn get(&self, key: &str) -> Result<Option<Value>, DomainError> {
        let Some(entry) = self.storage.get(key) else {
            return Ok(None);
        };

        if entry.is_expired() {
            drop(entry); // Release read lock
            self.storage.remove(key);
            debug!("Cache entry {} expired, removed", key);
            return Ok(None);
        }

        Ok(Some(entry.value.clone()))
    }

    async fn put(&self, key: &str, value: &Value, ttl: Duration) -> Result<(), DomainError> {
        self.storage.insert(
            key.to_string(),
            CacheEntry {
                value: value.clone(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn forget(&self, key: &str) -> Result<(), DomainError> {
        self.storage.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_cache_basic_operations() {
        let cache = MemorySettingCache::new();

        cache
            .put("system_setting_app_name", &json!("LHI"), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.len(), 1);

        let value = cache.get("system_setting_app_name").await.unwrap();
        assert_eq!(value, Some(json!("LHI")));

        cache.forget("system_setting_app_name").await.unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.get("system_setting_app_name").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_cached_null_is_a_hit() {
        let cache = MemorySettingCache::new();
        cache
            .put("k", &Value::Null, Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(cache.get("k").await.unwrap(), Some(Value::Null));
    }

    #[tokio::test]
    async fn test_expired_entry_is_removed_on_read() {
        let cache = MemorySettingCache::new();
        cache
            .put("k", &json!(1), Duration::from_millis(10))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(cache.is_empty());
    }
}
