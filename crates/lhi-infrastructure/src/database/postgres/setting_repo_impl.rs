//! PostgreSQL system settings repository
//!
//! The `system_settings` table is the source of truth for the settings
//! cache; every value is stored as JSONB.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::error;

use lhi_core::domain::SystemSetting;
use lhi_core::error::DomainError;
use lhi_core::repositories::SettingRepository;

pub struct PgSettingRepository {
    pool: PgPool,
}

impl PgSettingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct SettingRow {
    pub id: i64,
    pub key: String,
    pub value: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SettingRow> for SystemSetting {
    fn from(row: SettingRow) -> Self {
        SystemSetting {
            id: row.id,
            key: row.key,
            value: row.value,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl SettingRepository for PgSettingRepository {
    async fn get_value(&self, key: &str) -> Result<Option<Value>, DomainError> {
        let value: Option<Value> =
            sqlx::query_scalar("SELECT value FROM system_settings WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e: sqlx::Error| {
                    error!("Database error reading setting {}: {}", key, e);
                    DomainError::DatabaseError(e.to_string())
                })?;

        Ok(value)
    }

    async fn upsert(&self, key: &str, value: &Value) -> Result<SystemSetting, DomainError> {
        let row: SettingRow = sqlx::query_as(
            r#"
            INSERT INTO system_settings (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE
            SET value = EXCLUDED.value, updated_at = NOW()
            RETURNING id, key, value, created_at, updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error upserting setting {}: {}", key, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM system_settings WHERE key = $1)")
                .bind(key)
                .fetch_one(&self.pool)
                .await
                .map_err(|e: sqlx::Error| {
                    error!("Database error checking setting {}: {}", key, e);
                    DomainError::DatabaseError(e.to_string())
                })?;

        Ok(exists)
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM system_settings WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting setting {}: {}", key, e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn all(&self) -> Result<Vec<SystemSetting>, DomainError> {
        let rows: Vec<SettingRow> = sqlx::query_as(
            "SELECT id, key, value, created_at, updated_at FROM system_settings ORDER BY key",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing settings: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn keys(&self) -> Result<Vec<String>, DomainError> {
        let keys: Vec<String> = sqlx::query_scalar("SELECT key FROM system_settings")
            .fetch_all(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error listing setting keys: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(keys)
    }
}
