//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub redis: RedisSettings,
    pub install: InstallSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisSettings {
    pub url: String,
    pub max_connections: u32,
}

/// Defaults used by the `lhi-install` seeding flow.
#[derive(Debug, Deserialize, Clone)]
pub struct InstallSettings {
    pub school_name: String,
    pub school_code: String,
    #[serde(default)]
    pub school_npsn: Option<String>,
    pub admin_name: String,
    pub admin_email: String,
    pub admin_password: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.name", "SIT LHI Admin")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("redis.url", "redis://127.0.0.1:6379")?
            .set_default("redis.max_connections", 8)?
            .set_default("install.school_name", "SIT LHI Demo")?
            .set_default("install.school_code", "DEMO001")?
            .set_default("install.admin_name", "Super Admin")?
            .set_default("install.admin_email", "admin@lhi.sch.id")?
            .set_default("install.admin_password", "")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
