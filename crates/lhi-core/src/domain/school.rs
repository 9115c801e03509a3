//! School domain entity
//!
//! A school is the tenant unit of the system: every scoped record belongs
//! to exactly one school, and scoped queries never cross school borders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::tenancy::SchoolId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    /// Globally unique human-readable identifier.
    pub code: String,
    /// Nomor Pokok Sekolah Nasional.
    pub npsn: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Draft for creating a school; the id is assigned by the database.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewSchool {
    #[validate(length(min = 2, max = 255, message = "School name must be between 2 and 255 characters"))]
    pub name: String,

    #[validate(length(min = 2, max = 50, message = "School code must be between 2 and 50 characters"))]
    pub code: String,

    #[validate(length(max = 20, message = "NPSN too long"))]
    pub npsn: Option<String>,

    pub address: Option<String>,
    pub phone: Option<String>,

    #[validate(email(message = "Invalid school email"))]
    pub email: Option<String>,

    pub is_active: bool,
}

impl NewSchool {
    pub fn new(name: String, code: String) -> Result<Self, validator::ValidationErrors> {
        let school = Self {
            name: name.trim().to_string(),
            code: code.trim().to_string(),
            npsn: None,
            address: None,
            phone: None,
            email: None,
            is_active: true,
        };

        school.validate()?;
        Ok(school)
    }
}
