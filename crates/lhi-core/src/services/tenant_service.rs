//! Multi-tenancy management service.
//!
//! School lifecycle: creation, updates, activation. Scoping of
//! school-owned records lives in [`crate::tenancy`]; this service manages
//! the schools themselves, which are global records.

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::domain::{NewSchool, School};
use crate::error::DomainError;
use crate::repositories::SchoolRepository;
use crate::tenancy::SchoolId;

pub struct TenantService<R: SchoolRepository> {
    school_repo: Arc<R>,
}

impl<R: SchoolRepository> TenantService<R> {
    pub fn new(school_repo: Arc<R>) -> Self {
        Self { school_repo }
    }

    /// All active schools, ordered by name.
    pub async fn list_active_schools(&self) -> Result<Vec<School>, DomainError> {
        self.school_repo.list_active().await
    }

    pub async fn find_school_by_id(&self, id: SchoolId) -> Result<Option<School>, DomainError> {
        self.school_repo.find_by_id(id).await
    }

    pub async fn find_school_by_code(&self, code: &str) -> Result<Option<School>, DomainError> {
        self.school_repo.find_by_code(code).await
    }

    pub async fn create_school(&self, school: NewSchool) -> Result<School, DomainError> {
        school
            .validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        if self.school_repo.code_exists(&school.code, None).await? {
            warn!("School creation failed: code already exists: {}", school.code);
            return Err(DomainError::SchoolCodeAlreadyExists(school.code.clone()));
        }

        let created = self.school_repo.create(&school).await?;
        info!("School created: {} ({})", created.name, created.code);
        Ok(created)
    }

    pub async fn update_school(&self, school: &School) -> Result<School, DomainError> {
        if self
            .school_repo
            .code_exists(&school.code, Some(school.id))
            .await?
        {
            return Err(DomainError::SchoolCodeAlreadyExists(school.code.clone()));
        }
        self.school_repo.update(school).await
    }

    /// Returns `false` when the school does not exist.
    pub async fn set_school_active(
        &self,
        id: SchoolId,
        active: bool,
    ) -> Result<bool, DomainError> {
        let Some(mut school) = self.school_repo.find_by_id(id).await? else {
            return Ok(false);
        };

        school.is_active = active;
        self.school_repo.update(&school).await?;
        info!("School {} set active={}", id, active);
        Ok(true)
    }

    pub async fn activate_school(&self, id: SchoolId) -> Result<bool, DomainError> {
        self.set_school_active(id, true).await
    }

    pub async fn deactivate_school(&self, id: SchoolId) -> Result<bool, DomainError> {
        self.set_school_active(id, false).await
    }

    /// Whether `code` is free, optionally ignoring one school (for
    /// updates).
    pub async fn is_school_code_available(
        &self,
        code: &str,
        exclude_id: Option<SchoolId>,
    ) -> Result<bool, DomainError> {
        Ok(!self.school_repo.code_exists(code, exclude_id).await?)
    }
}
