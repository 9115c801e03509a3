//! Setting cache trait (port)
//!
//! Key/value cache with TTL put and single-key eviction. A transparent
//! accelerator over the settings store, never a resilience layer: backend
//! failures propagate to the caller.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingCache: Send + Sync {
    /// `Ok(None)` is a miss. A cached JSON `null` is a hit.
    async fn get(&self, key: &str) -> Result<Option<Value>, DomainError>;
    async fn put(&self, key: &str, value: &Value, ttl: Duration) -> Result<(), DomainError>;
    async fn forget(&self, key: &str) -> Result<(), DomainError>;
}
