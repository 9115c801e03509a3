//! Setting repository trait (port)
//!
//! The settings store is the source of truth; the cache in front of it is
//! disposable.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::SystemSetting;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingRepository: Send + Sync {
    async fn get_value(&self, key: &str) -> Result<Option<Value>, DomainError>;
    /// Create the row when the key is unseen, overwrite the value otherwise.
    async fn upsert(&self, key: &str, value: &Value) -> Result<SystemSetting, DomainError>;
    async fn exists(&self, key: &str) -> Result<bool, DomainError>;
    /// Returns whether a row was actually deleted.
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;
    async fn all(&self) -> Result<Vec<SystemSetting>, DomainError>;
    async fn keys(&self) -> Result<Vec<String>, DomainError>;
}
