//! # LHI Infrastructure
//!
//! Database and cache implementations (adapters).

pub mod cache;
pub mod database;

pub use cache::{MemorySettingCache, RedisSettingCache};
pub use database::{
    create_pool, run_migrations, PgSchoolRepository, PgSettingRepository, PgStudentRepository,
    PgUserRepository,
};
