//! Password hashing with Argon2

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

/// Minimum length accepted for seeded account passwords.
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
    #[error("Password must be at least {MIN_PASSWORD_LEN} characters")]
    TooShort,
}

pub struct PasswordService;

impl PasswordService {
    pub fn validate_length(password: &str) -> Result<(), PasswordError> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(PasswordError::TooShort);
        }
        Ok(())
    }

    pub fn hash(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordError::HashError(e.to_string()))
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = PasswordService::hash("rahasia-123").unwrap();
        assert_ne!(hash, "rahasia-123");
        assert!(PasswordService::verify("rahasia-123", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = PasswordService::hash("rahasia-123").unwrap();
        assert!(!PasswordService::verify("salah-456", &hash).unwrap());
    }

    #[test]
    fn test_length_policy() {
        assert!(PasswordService::validate_length("12345678").is_ok());
        assert!(matches!(
            PasswordService::validate_length("pendek"),
            Err(PasswordError::TooShort)
        ));
    }
}
