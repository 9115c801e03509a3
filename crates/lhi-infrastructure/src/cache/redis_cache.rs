//! Redis setting cache
//!
//! Values are stored as serialized JSON, so a cached JSON `null` remains
//! distinguishable from an absent key.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::redis::cmd;
use deadpool_redis::{Config, Pool, Runtime};
use serde_json::Value;
use tracing::{error, info};

use lhi_core::cache::SettingCache;
use lhi_core::error::DomainError;

pub struct RedisSettingCache {
    pool: Pool,
}

impl RedisSettingCache {
    pub fn new(url: &str, max_connections: usize) -> Result<Self, DomainError> {
        info!("Connecting setting cache to redis at {}", url);

        let pool = Config::from_url(url)
            .builder()
            .map_err(|e| DomainError::CacheError(e.to_string()))?
            .max_size(max_connections)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| DomainError::CacheError(e.to_string()))?;

        Ok(Self { pool })
    }

    async fn connection(&self) -> Result<deadpool_redis::Connection, DomainError> {
        self.pool.get().await.map_err(|e| {
            error!("Redis connection error: {}", e);
            DomainError::CacheError(e.to_string())
        })
    }
}

#[async_trait]
impl SettingCache for RedisSettingCache {
    async fn get(&self, key: &str) -> Result<Option<Value>, DomainError> {
        let mut conn = self.connection().await?;

        let payload: Option<String> = cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Redis error reading {}: {}", key, e);
                DomainError::CacheError(e.to_string())
            })?;

        match payload {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| DomainError::CacheError(e.to_string())),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: &Value, ttl: Duration) -> Result<(), DomainError> {
        let raw =
            serde_json::to_string(value).map_err(|e| DomainError::CacheError(e.to_string()))?;

        let mut conn = self.connection().await?;

        let _: () = cmd("SETEX")
            .arg(key)
            .arg(ttl.as_secs())
            .arg(raw)
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Redis error writing {}: {}", key, e);
                DomainError::CacheError(e.to_string())
            })?;

        Ok(())
    }

    async fn forget(&self, key: &str) -> Result<(), DomainError> {
        let mut conn = self.connection().await?;

        let _: i64 = cmd("DEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Redis error deleting {}: {}", key, e);
                DomainError::CacheError(e.to_string())
            })?;

        Ok(())
    }
}
