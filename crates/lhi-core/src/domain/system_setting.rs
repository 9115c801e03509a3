//! System setting domain entity
//!
//! Global key/value settings. Never school-scoped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSetting {
    pub id: i64,
    pub key: String,
    pub value: Value,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
