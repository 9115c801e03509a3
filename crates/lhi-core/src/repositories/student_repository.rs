//! Student repository trait (port)
//!
//! Every default read/update/delete path takes an explicit [`SchoolScope`];
//! adapters translate it into the storage-level filter.

use async_trait::async_trait;

use crate::domain::{NewStudent, Student};
use crate::error::DomainError;
use crate::tenancy::SchoolScope;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// The draft's `school_id` must already be stamped by the caller.
    async fn create(&self, student: &NewStudent) -> Result<Student, DomainError>;
    async fn find_by_id(&self, scope: SchoolScope, id: i64)
        -> Result<Option<Student>, DomainError>;
    async fn list(&self, scope: SchoolScope) -> Result<Vec<Student>, DomainError>;
    async fn count(&self, scope: SchoolScope) -> Result<i64, DomainError>;
    async fn set_active(
        &self,
        scope: SchoolScope,
        id: i64,
        active: bool,
    ) -> Result<bool, DomainError>;
    async fn delete_by_id(&self, scope: SchoolScope, id: i64) -> Result<bool, DomainError>;
}
