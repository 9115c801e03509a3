//! # LHI Security
//!
//! Password hashing used by the install/seed flow.

pub mod password;

pub use password::{PasswordError, PasswordService, MIN_PASSWORD_LEN};
