//! System settings service with caching support.
//!
//! Read-through on `get`, write-invalidate on `set`: a write evicts the
//! cache entry and leaves repopulation to the next read. `has` and `all`
//! go straight to the store.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::cache::SettingCache;
use crate::domain::SystemSetting;
use crate::error::DomainError;
use crate::repositories::SettingRepository;

/// Cache key prefix for settings.
const CACHE_PREFIX: &str = "system_setting_";

/// Cache TTL in seconds (1 hour).
const CACHE_TTL: Duration = Duration::from_secs(3600);

pub struct SettingService<R: SettingRepository, C: SettingCache> {
    repo: Arc<R>,
    cache: Arc<C>,
}

impl<R: SettingRepository, C: SettingCache> SettingService<R, C> {
    pub fn new(repo: Arc<R>, cache: Arc<C>) -> Self {
        Self { repo, cache }
    }

    fn cache_key(key: &str) -> String {
        format!("{}{}", CACHE_PREFIX, key)
    }

    /// Get a setting value.
    ///
    /// On a miss the loaded value is cached for the full TTL — including
    /// the caller's `default` when the key is absent, so a later `get`
    /// with a different default still returns the first cached one until
    /// the entry expires or is invalidated.
    pub async fn get(&self, key: &str, default: Value) -> Result<Value, DomainError> {
        let cache_key = Self::cache_key(key);

        if let Some(cached) = self.cache.get(&cache_key).await? {
            debug!("Setting {} served from cache", key);
            return Ok(cached);
        }

        let value = self.repo.get_value(key).await?.unwrap_or(default);
        self.cache.put(&cache_key, &value, CACHE_TTL).await?;

        Ok(value)
    }

    /// Set a setting value (create if absent, overwrite if present).
    pub async fn set(&self, key: &str, value: Value) -> Result<SystemSetting, DomainError> {
        let setting = self.repo.upsert(key, &value).await?;

        // Evict only; the next read repopulates.
        self.cache.forget(&Self::cache_key(key)).await?;

        Ok(setting)
    }

    /// Check if a setting exists. Always asks the store.
    pub async fn has(&self, key: &str) -> Result<bool, DomainError> {
        self.repo.exists(key).await
    }

    /// Delete a setting; returns whether a row was actually deleted.
    pub async fn forget(&self, key: &str) -> Result<bool, DomainError> {
        self.cache.forget(&Self::cache_key(key)).await?;
        self.repo.delete(key).await
    }

    /// All stored settings as a key → value mapping, straight from the
    /// store.
    pub async fn all(&self) -> Result<BTreeMap<String, Value>, DomainError> {
        let settings = self.repo.all().await?;
        Ok(settings.into_iter().map(|s| (s.key, s.value)).collect())
    }

    /// Evict every known key from the cache without touching stored
    /// values.
    pub async fn clear_cache(&self) -> Result<(), DomainError> {
        for key in self.repo.keys().await? {
            self.cache.forget(&Self::cache_key(&key)).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MockSettingCache;
    use crate::repositories::setting_repository::MockSettingRepository;

    use std::collections::HashMap;

    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::json;
    use tokio::sync::Mutex;

    fn setting(key: &str, value: Value) -> SystemSetting {
        SystemSetting {
            id: 1,
            key: key.to_string(),
            value,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_prefers_cached_value() {
        let mut repo = MockSettingRepository::new();
        repo.expect_get_value().never();

        let mut cache = MockSettingCache::new();
        cache
            .expect_get()
            .withf(|k| k == "system_setting_app_name")
            .returning(|_| Ok(Some(json!("Cached"))));

        let service = SettingService::new(Arc::new(repo), Arc::new(cache));
        let value = service.get("app_name", json!("Default")).await.unwrap();
        assert_eq!(value, json!("Cached"));
    }

    #[tokio::test]
    async fn test_get_miss_loads_store_and_populates_cache() {
        let mut repo = MockSettingRepository::new();
        repo.expect_get_value()
            .withf(|k| k == "app_name")
            .returning(|_| Ok(Some(json!("Stored"))));

        let mut cache = MockSettingCache::new();
        cache.expect_get().returning(|_| Ok(None));
        cache
            .expect_put()
            .withf(|k, v, ttl| {
                k == "system_setting_app_name"
                    && *v == json!("Stored")
                    && *ttl == Duration::from_secs(3600)
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = SettingService::new(Arc::new(repo), Arc::new(cache));
        let value = service.get("app_name", json!("Default")).await.unwrap();
        assert_eq!(value, json!("Stored"));
    }

    #[tokio::test]
    async fn test_get_caches_fallback_default() {
        let mut repo = MockSettingRepository::new();
        repo.expect_get_value().returning(|_| Ok(None));

        let mut cache = MockSettingCache::new();
        cache.expect_get().returning(|_| Ok(None));
        cache
            .expect_put()
            .withf(|_, v, _| *v == json!("Default"))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = SettingService::new(Arc::new(repo), Arc::new(cache));
        let value = service.get("app_name", json!("Default")).await.unwrap();
        assert_eq!(value, json!("Default"));
    }

    #[tokio::test]
    async fn test_set_evicts_and_never_repopulates() {
        let mut repo = MockSettingRepository::new();
        repo.expect_upsert()
            .withf(|k, v| k == "app_name" && *v == json!("Real"))
            .returning(|k, v| Ok(setting(k, v.clone())));

        let mut cache = MockSettingCache::new();
        cache.expect_put().never();
        cache
            .expect_forget()
            .withf(|k| k == "system_setting_app_name")
            .times(1)
            .returning(|_| Ok(()));

        let service = SettingService::new(Arc::new(repo), Arc::new(cache));
        let stored = service.set("app_name", json!("Real")).await.unwrap();
        assert_eq!(stored.value, json!("Real"));
    }

    #[tokio::test]
    async fn test_has_bypasses_cache() {
        let mut repo = MockSettingRepository::new();
        repo.expect_exists()
            .withf(|k| k == "app_name")
            .returning(|_| Ok(true));

        let mut cache = MockSettingCache::new();
        cache.expect_get().never();

        let service = SettingService::new(Arc::new(repo), Arc::new(cache));
        assert!(service.has("app_name").await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_cache_evicts_every_known_key() {
        let mut repo = MockSettingRepository::new();
        repo.expect_keys()
            .returning(|| Ok(vec!["app_name".to_string(), "panel_color".to_string()]));

        let mut cache = MockSettingCache::new();
        cache
            .expect_forget()
            .withf(|k| k.starts_with("system_setting_"))
            .times(2)
            .returning(|_| Ok(()));

        let service = SettingService::new(Arc::new(repo), Arc::new(cache));
        service.clear_cache().await.unwrap();
    }

    // In-memory fakes for end-to-end flows.

    #[derive(Default)]
    struct MemSettingRepo {
        rows: Mutex<BTreeMap<String, Value>>,
    }

    #[async_trait]
    impl SettingRepository for MemSettingRepo {
        async fn get_value(&self, key: &str) -> Result<Option<Value>, DomainError> {
            Ok(self.rows.lock().await.get(key).cloned())
        }

        async fn upsert(&self, key: &str, value: &Value) -> Result<SystemSetting, DomainError> {
            self.rows
                .lock()
                .await
                .insert(key.to_string(), value.clone());
            Ok(setting(key, value.clone()))
        }

        async fn exists(&self, key: &str) -> Result<bool, DomainError> {
            Ok(self.rows.lock().await.contains_key(key))
        }

        async fn delete(&self, key: &str) -> Result<bool, DomainError> {
            Ok(self.rows.lock().await.remove(key).is_some())
        }

        async fn all(&self) -> Result<Vec<SystemSetting>, DomainError> {
            Ok(self
                .rows
                .lock()
                .await
                .iter()
                .map(|(k, v)| setting(k, v.clone()))
                .collect())
        }

        async fn keys(&self) -> Result<Vec<String>, DomainError> {
            Ok(self.rows.lock().await.keys().cloned().collect())
        }
    }

    // TTL is ignored here; expiry behavior belongs to the cache adapters.
    #[derive(Default)]
    struct MemCache {
        map: Mutex<HashMap<String, Value>>,
    }

    #[async_trait]
    impl SettingCache for MemCache {
        async fn get(&self, key: &str) -> Result<Option<Value>, DomainError> {
            Ok(self.map.lock().await.get(key).cloned())
        }

        async fn put(&self, key: &str, value: &Value, _ttl: Duration) -> Result<(), DomainError> {
            self.map.lock().await.insert(key.to_string(), value.clone());
            Ok(())
        }

        async fn forget(&self, key: &str) -> Result<(), DomainError> {
            self.map.lock().await.remove(key);
            Ok(())
        }
    }

    fn mem_service() -> SettingService<MemSettingRepo, MemCache> {
        SettingService::new(Arc::new(MemSettingRepo::default()), Arc::new(MemCache::default()))
    }

    #[tokio::test]
    async fn test_round_trip_ignores_default_once_set() {
        let service = mem_service();
        service.set("x", json!({"a": 1})).await.unwrap();
        let value = service.get("x", Value::Null).await.unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_set_is_idempotent() {
        let service = mem_service();
        service.set("x", json!("v")).await.unwrap();
        service.set("x", json!("v")).await.unwrap();
        assert_eq!(service.get("x", Value::Null).await.unwrap(), json!("v"));
        assert!(service.has("x").await.unwrap());
    }

    #[tokio::test]
    async fn test_invalidation_takes_effect_before_next_read() {
        let service = mem_service();
        service.set("k", json!("v1")).await.unwrap();
        assert_eq!(service.get("k", Value::Null).await.unwrap(), json!("v1"));

        // v1 is cached at this point; the write must evict it.
        service.set("k", json!("v2")).await.unwrap();
        assert_eq!(service.get("k", Value::Null).await.unwrap(), json!("v2"));
    }

    #[tokio::test]
    async fn test_cached_default_until_invalidated() {
        let service = mem_service();

        // Empty store: the default comes back and is cached.
        let value = service.get("app_name", json!("Default")).await.unwrap();
        assert_eq!(value, json!("Default"));

        // A different default within the TTL window loses to the cached one.
        let value = service.get("app_name", json!("Other")).await.unwrap();
        assert_eq!(value, json!("Default"));

        // A write invalidates; the next read sees the stored value.
        service.set("app_name", json!("Real")).await.unwrap();
        let value = service.get("app_name", json!("Default")).await.unwrap();
        assert_eq!(value, json!("Real"));
    }

    #[tokio::test]
    async fn test_forget_reports_whether_row_existed() {
        let service = mem_service();
        service.set("x", json!("v")).await.unwrap();

        assert!(service.forget("x").await.unwrap());
        assert!(!service.has("x").await.unwrap());
        assert!(!service.forget("x").await.unwrap());
    }

    #[tokio::test]
    async fn test_all_reads_store_directly() {
        let service = mem_service();
        service.set("a", json!(1)).await.unwrap();
        service.set("b", json!(2)).await.unwrap();

        let all = service.all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["a"], json!(1));
        assert_eq!(all["b"], json!(2));
    }

    #[tokio::test]
    async fn test_clear_cache_keeps_stored_values() {
        let service = mem_service();
        service.set("a", json!(1)).await.unwrap();
        // Cache the value, then clear.
        service.get("a", Value::Null).await.unwrap();
        service.clear_cache().await.unwrap();

        assert_eq!(service.get("a", Value::Null).await.unwrap(), json!(1));
        assert!(service.has("a").await.unwrap());
    }
}
