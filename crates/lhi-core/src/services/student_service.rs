//! Student service.
//!
//! The sample school-owned flow: every read passes an explicit
//! [`SchoolScope`] to the repository, and enrollment stamps the school id
//! from the request context unless the caller set one.

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::domain::{NewStudent, Student};
use crate::error::DomainError;
use crate::repositories::StudentRepository;
use crate::tenancy::{assign_school_id, RequestContext, SchoolId, SchoolScope};

pub struct StudentService<R: StudentRepository> {
    student_repo: Arc<R>,
}

impl<R: StudentRepository> StudentService<R> {
    pub fn new(student_repo: Arc<R>) -> Self {
        Self { student_repo }
    }

    /// Enroll a student. An explicit `school_id` on the draft wins;
    /// otherwise the ambient school is stamped; a context without a
    /// school enrolls unstamped.
    pub async fn enroll(
        &self,
        ctx: &RequestContext,
        student: NewStudent,
    ) -> Result<Student, DomainError> {
        student
            .validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let mut student = student;
        student.school_id = assign_school_id(student.school_id, ctx);

        let created = self.student_repo.create(&student).await?;
        info!(
            "Student enrolled: {} (nis {}, school {:?})",
            created.name, created.nis, created.school_id
        );
        Ok(created)
    }

    /// Students visible to the caller: the caller's school, or every
    /// school when the context has none.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Student>, DomainError> {
        self.student_repo.list(SchoolScope::from_context(ctx)).await
    }

    /// Cross-school administrative listing for one school.
    pub async fn list_for_school(&self, school_id: SchoolId) -> Result<Vec<Student>, DomainError> {
        self.student_repo
            .list(SchoolScope::for_school(school_id))
            .await
    }

    /// Unfiltered listing for administrative flows.
    pub async fn list_all(&self) -> Result<Vec<Student>, DomainError> {
        self.student_repo.list(SchoolScope::All).await
    }

    pub async fn find(
        &self,
        ctx: &RequestContext,
        id: i64,
    ) -> Result<Option<Student>, DomainError> {
        self.student_repo
            .find_by_id(SchoolScope::from_context(ctx), id)
            .await
    }

    pub async fn count(&self, ctx: &RequestContext) -> Result<i64, DomainError> {
        self.student_repo
            .count(SchoolScope::from_context(ctx))
            .await
    }

    pub async fn set_active(
        &self,
        ctx: &RequestContext,
        id: i64,
        active: bool,
    ) -> Result<bool, DomainError> {
        self.student_repo
            .set_active(SchoolScope::from_context(ctx), id, active)
            .await
    }

    /// Scoped delete; returns whether a visible record was removed.
    pub async fn withdraw(&self, ctx: &RequestContext, id: i64) -> Result<bool, DomainError> {
        self.student_repo
            .delete_by_id(SchoolScope::from_context(ctx), id)
            .await
    }
}
