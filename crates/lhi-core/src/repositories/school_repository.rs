//! School repository trait (port)

use async_trait::async_trait;

use crate::domain::{NewSchool, School};
use crate::error::DomainError;
use crate::tenancy::SchoolId;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    async fn find_by_id(&self, id: SchoolId) -> Result<Option<School>, DomainError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<School>, DomainError>;
    async fn list_active(&self) -> Result<Vec<School>, DomainError>;
    async fn create(&self, school: &NewSchool) -> Result<School, DomainError>;
    async fn update(&self, school: &School) -> Result<School, DomainError>;
    async fn code_exists(
        &self,
        code: &str,
        exclude_id: Option<SchoolId>,
    ) -> Result<bool, DomainError>;
}
