//! PostgreSQL student repository
//!
//! Every default read, count, update, and delete renders the caller's
//! [`SchoolScope`] as an explicit WHERE branch; there is no unscoped path
//! other than `SchoolScope::All`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use lhi_core::domain::{NewStudent, Student};
use lhi_core::error::DomainError;
use lhi_core::repositories::StudentRepository;
use lhi_core::tenancy::SchoolScope;

pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct StudentRow {
    pub id: i64,
    pub school_id: Option<i64>,
    pub nis: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Student {
            id: row.id,
            school_id: row.school_id,
            nis: row.nis,
            name: row.name,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn create(&self, student: &NewStudent) -> Result<Student, DomainError> {
        info!("Creating student: {} ({})", student.name, student.nis);

        let row: StudentRow = sqlx::query_as(
            r#"
            INSERT INTO students (school_id, nis, name)
            VALUES ($1, $2, $3)
            RETURNING id, school_id, nis, name, is_active, created_at, updated_at
            "#,
        )
        .bind(student.school_id)
        .bind(&student.nis)
        .bind(&student.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating student: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::NisAlreadyExists(student.nis.clone())
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        Ok(row.into())
    }

    async fn find_by_id(
        &self,
        scope: SchoolScope,
        id: i64,
    ) -> Result<Option<Student>, DomainError> {
        let row: Option<StudentRow> = match scope {
            SchoolScope::School(school_id) => {
                sqlx::query_as(
                    r#"
                    SELECT id, school_id, nis, name, is_active, created_at, updated_at
                    FROM students
                    WHERE id = $1 AND school_id = $2
                    "#,
                )
                .bind(id)
                .bind(school_id)
                .fetch_optional(&self.pool)
                .await
            }
            SchoolScope::All => {
                sqlx::query_as(
                    r#"
                    SELECT id, school_id, nis, name, is_active, created_at, updated_at
                    FROM students
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await
            }
        }
        .map_err(|e: sqlx::Error| {
            error!("Database error finding student by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list(&self, scope: SchoolScope) -> Result<Vec<Student>, DomainError> {
        let rows: Vec<StudentRow> = match scope {
            SchoolScope::School(school_id) => {
                sqlx::query_as(
                    r#"
                    SELECT id, school_id, nis, name, is_active, created_at, updated_at
                    FROM students
                    WHERE school_id = $1
                    ORDER BY name
                    "#,
                )
                .bind(school_id)
                .fetch_all(&self.pool)
                .await
            }
            SchoolScope::All => {
                sqlx::query_as(
                    r#"
                    SELECT id, school_id, nis, name, is_active, created_at, updated_at
                    FROM students
                    ORDER BY name
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e: sqlx::Error| {
            error!("Database error listing students: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn count(&self, scope: SchoolScope) -> Result<i64, DomainError> {
        let count: i64 = match scope {
            SchoolScope::School(school_id) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE school_id = $1")
                    .bind(school_id)
                    .fetch_one(&self.pool)
                    .await
            }
            SchoolScope::All => {
                sqlx::query_scalar("SELECT COUNT(*) FROM students")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e: sqlx::Error| {
            error!("Database error counting students: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(count)
    }

    async fn set_active(
        &self,
        scope: SchoolScope,
        id: i64,
        active: bool,
    ) -> Result<bool, DomainError> {
        let result = match scope {
            SchoolScope::School(school_id) => {
                sqlx::query(
                    r#"
                    UPDATE students
                    SET is_active = $3, updated_at = NOW()
                    WHERE id = $1 AND school_id = $2
                    "#,
                )
                .bind(id)
                .bind(school_id)
                .bind(active)
                .execute(&self.pool)
                .await
            }
            SchoolScope::All => {
                sqlx::query(
                    r#"
                    UPDATE students
                    SET is_active = $2, updated_at = NOW()
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .bind(active)
                .execute(&self.pool)
                .await
            }
        }
        .map_err(|e: sqlx::Error| {
            error!("Database error updating student: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, scope: SchoolScope, id: i64) -> Result<bool, DomainError> {
        let result = match scope {
            SchoolScope::School(school_id) => {
                sqlx::query("DELETE FROM students WHERE id = $1 AND school_id = $2")
                    .bind(id)
                    .bind(school_id)
                    .execute(&self.pool)
                    .await
            }
            SchoolScope::All => {
                sqlx::query("DELETE FROM students WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool)
                    .await
            }
        }
        .map_err(|e: sqlx::Error| {
            error!("Database error deleting student: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }
}
