//! Student domain entity
//!
//! The sample school-owned record: reads and writes go through the
//! scoped repository paths.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::tenancy::{SchoolId, SchoolScoped};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    /// Stamped at enrollment; `None` when created by a global actor that
    /// supplied no school.
    pub school_id: Option<SchoolId>,
    /// Nomor Induk Siswa, unique within a school.
    pub nis: String,
    pub name: String,
    pub is_active: bool,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SchoolScoped for Student {
    fn school_id(&self) -> Option<SchoolId> {
        self.school_id
    }
}

/// Draft for enrolling a student.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewStudent {
    /// `None` means the caller did not set a school; the ambient school
    /// is stamped at enrollment. An explicit `Some` always wins.
    pub school_id: Option<SchoolId>,

    #[validate(length(min = 1, max = 30, message = "NIS must be between 1 and 30 characters"))]
    pub nis: String,

    #[validate(length(min = 2, max = 255, message = "Name must be between 2 and 255 characters"))]
    pub name: String,
}

impl NewStudent {
    pub fn new(nis: String, name: String) -> Self {
        Self {
            school_id: None,
            nis: nis.trim().to_string(),
            name: name.trim().to_string(),
        }
    }

    /// Pin the student to a specific school instead of the ambient one.
    pub fn for_school(mut self, school_id: SchoolId) -> Self {
        self.school_id = Some(school_id);
        self
    }
}
