//! PostgreSQL school repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use lhi_core::domain::{NewSchool, School};
use lhi_core::error::DomainError;
use lhi_core::repositories::SchoolRepository;
use lhi_core::tenancy::SchoolId;

pub struct PgSchoolRepository {
    pool: PgPool,
}

impl PgSchoolRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct SchoolRow {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub npsn: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SchoolRow> for School {
    fn from(row: SchoolRow) -> Self {
        School {
            id: row.id,
            name: row.name,
            code: row.code,
            npsn: row.npsn,
            address: row.address,
            phone: row.phone,
            email: row.email,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl SchoolRepository for PgSchoolRepository {
    async fn find_by_id(&self, id: SchoolId) -> Result<Option<School>, DomainError> {
        let row: Option<SchoolRow> = sqlx::query_as(
            r#"
            SELECT
                id, name, code, npsn, address, phone, email,
                is_active, created_at, updated_at
            FROM schools
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding school by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<School>, DomainError> {
        let row: Option<SchoolRow> = sqlx::query_as(
            r#"
            SELECT
                id, name, code, npsn, address, phone, email,
                is_active, created_at, updated_at
            FROM schools
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding school by code: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_active(&self) -> Result<Vec<School>, DomainError> {
        let rows: Vec<SchoolRow> = sqlx::query_as(
            r#"
            SELECT
                id, name, code, npsn, address, phone, email,
                is_active, created_at, updated_at
            FROM schools
            WHERE is_active = TRUE
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing active schools: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, school: &NewSchool) -> Result<School, DomainError> {
        info!("Creating school: {}", school.name);

        let row: SchoolRow = sqlx::query_as(
            r#"
            INSERT INTO schools (name, code, npsn, address, phone, email, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id, name, code, npsn, address, phone, email,
                is_active, created_at, updated_at
            "#,
        )
        .bind(&school.name)
        .bind(&school.code)
        .bind(&school.npsn)
        .bind(&school.address)
        .bind(&school.phone)
        .bind(&school.email)
        .bind(school.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating school: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::SchoolCodeAlreadyExists(school.code.clone())
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        info!("School created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, school: &School) -> Result<School, DomainError> {
        let row: SchoolRow = sqlx::query_as(
            r#"
            UPDATE schools
            SET
                name = $2,
                code = $3,
                npsn = $4,
                address = $5,
                phone = $6,
                email = $7,
                is_active = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, name, code, npsn, address, phone, email,
                is_active, created_at, updated_at
            "#,
        )
        .bind(school.id)
        .bind(&school.name)
        .bind(&school.code)
        .bind(&school.npsn)
        .bind(&school.address)
        .bind(&school.phone)
        .bind(&school.email)
        .bind(school.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating school: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn code_exists(
        &self,
        code: &str,
        exclude_id: Option<SchoolId>,
    ) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM schools
                WHERE code = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(code)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error checking school code: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(exists)
    }
}
