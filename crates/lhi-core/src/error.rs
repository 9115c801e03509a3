//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("School not found")]
    SchoolNotFound,

    #[error("School code already exists: {0}")]
    SchoolCodeAlreadyExists(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Student number already exists: {0}")]
    NisAlreadyExists(String),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
