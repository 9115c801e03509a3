//! User domain entity
//!
//! Users carry the school relationship but the record itself is NOT
//! school-scoped: users are loaded during authentication, before any
//! request context exists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::tenancy::SchoolId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    /// `None` marks a global actor (super admin); scoping is bypassed for
    /// such users.
    pub school_id: Option<SchoolId>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_global(&self) -> bool {
        self.school_id.is_none()
    }
}

/// Draft for creating a user; the id is assigned by the database.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUser {
    pub school_id: Option<SchoolId>,

    #[validate(length(min = 2, max = 255, message = "Name must be between 2 and 255 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email"))]
    pub email: String,

    pub password_hash: String,
    pub is_active: bool,
}
