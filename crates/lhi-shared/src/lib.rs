//! # LHI Shared
//!
//! Configuration, error types, and telemetry shared across crates.

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::AppConfig;
pub use error::AppError;
