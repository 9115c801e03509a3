//! SIT LHI installer.
//!
//! Migrates the database and seeds the default school, super-admin user,
//! and default settings. Safe to re-run.

use std::sync::Arc;

use tracing::{error, info};

use lhi_core::services::{InstallDefaults, InstallService, SettingService};
use lhi_infrastructure::cache::RedisSettingCache;
use lhi_infrastructure::database::{
    connection, PgSchoolRepository, PgSettingRepository, PgUserRepository,
};
use lhi_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    lhi_shared::telemetry::init_telemetry();

    info!("SIT LHI installer starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to Database
    info!("Connecting to database...");
    let pool = connection::create_pool(&config.database).await?;
    info!("Database connection established.");

    // Run migrations
    info!("Running migrations...");
    connection::run_migrations(&pool).await?;
    info!("Migrations complete.");

    // Wire repositories and the settings cache
    let school_repo = Arc::new(PgSchoolRepository::new(pool.clone()));
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let setting_repo = Arc::new(PgSettingRepository::new(pool.clone()));
    let cache = Arc::new(RedisSettingCache::new(
        &config.redis.url,
        config.redis.max_connections as usize,
    )?);
    let settings = Arc::new(SettingService::new(setting_repo, cache));

    let installer = InstallService::new(school_repo, user_repo, settings);
    let defaults = InstallDefaults::from(&config.install);

    let report = installer.install(&defaults).await?;

    info!(
        "School: {} ({}){}",
        report.school.name,
        report.school.code,
        if report.school_created {
            ""
        } else {
            " [already present]"
        }
    );
    info!(
        "Super admin: {}{}",
        report.admin.email,
        if report.admin_created { "" } else { " [updated]" }
    );
    info!("Settings seeded: {}", report.settings_seeded);
    info!("Installation finished.");

    Ok(())
}
