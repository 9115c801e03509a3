//! Installation service.
//!
//! Seeds the baseline data a fresh deployment needs: the default school,
//! the super-admin user, and the default settings. Safe to re-run; every
//! step skips or updates what already exists.

use std::sync::Arc;

use lhi_security::password::PasswordService;
use serde_json::{json, Value};
use tracing::{info, warn};
use validator::Validate;

use crate::cache::SettingCache;
use crate::domain::{NewSchool, NewUser, School, User};
use crate::error::DomainError;
use crate::repositories::{SchoolRepository, SettingRepository, UserRepository};
use crate::services::SettingService;

/// Settings written on first install.
fn default_settings() -> Vec<(&'static str, Value)> {
    vec![
        ("app_name", json!("SIT LHI Admin")),
        ("panel_color", json!("#f59e0b")),
    ]
}

#[derive(Debug, Clone)]
pub struct InstallDefaults {
    pub school_name: String,
    pub school_code: String,
    pub school_npsn: Option<String>,
    pub admin_name: String,
    pub admin_email: String,
    pub admin_password: String,
}

impl From<&lhi_shared::config::InstallSettings> for InstallDefaults {
    fn from(settings: &lhi_shared::config::InstallSettings) -> Self {
        Self {
            school_name: settings.school_name.clone(),
            school_code: settings.school_code.clone(),
            school_npsn: settings.school_npsn.clone(),
            admin_name: settings.admin_name.clone(),
            admin_email: settings.admin_email.clone(),
            admin_password: settings.admin_password.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InstallReport {
    pub school: School,
    pub school_created: bool,
    pub admin: User,
    pub admin_created: bool,
    pub settings_seeded: usize,
}

pub struct InstallService<SR, UR, R, C>
where
    SR: SchoolRepository,
    UR: UserRepository,
    R: SettingRepository,
    C: SettingCache,
{
    school_repo: Arc<SR>,
    user_repo: Arc<UR>,
    settings: Arc<SettingService<R, C>>,
}

impl<SR, UR, R, C> InstallService<SR, UR, R, C>
where
    SR: SchoolRepository,
    UR: UserRepository,
    R: SettingRepository,
    C: SettingCache,
{
    pub fn new(
        school_repo: Arc<SR>,
        user_repo: Arc<UR>,
        settings: Arc<SettingService<R, C>>,
    ) -> Self {
        Self {
            school_repo,
            user_repo,
            settings,
        }
    }

    pub async fn install(&self, defaults: &InstallDefaults) -> Result<InstallReport, DomainError> {
        PasswordService::validate_length(&defaults.admin_password)
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let (school, school_created) = self.ensure_default_school(defaults).await?;
        let (admin, admin_created) = self.ensure_super_admin(defaults, &school).await?;
        let settings_seeded = self.seed_default_settings().await?;

        self.settings.clear_cache().await?;

        info!(
            "Installation completed: school {} ({}), admin {}",
            school.name, school.code, admin.email
        );

        Ok(InstallReport {
            school,
            school_created,
            admin,
            admin_created,
            settings_seeded,
        })
    }

    async fn ensure_default_school(
        &self,
        defaults: &InstallDefaults,
    ) -> Result<(School, bool), DomainError> {
        if let Some(existing) = self.school_repo.find_by_code(&defaults.school_code).await? {
            info!("School {} already exists, skipping", existing.code);
            return Ok((existing, false));
        }

        let draft = NewSchool {
            name: defaults.school_name.trim().to_string(),
            code: defaults.school_code.trim().to_string(),
            npsn: defaults.school_npsn.clone().filter(|n| !n.is_empty()),
            address: Some("Default Address".to_string()),
            phone: Some("021-12345678".to_string()),
            email: Some(format!(
                "contact@{}.sch.id",
                defaults.school_code.to_lowercase()
            )),
            is_active: true,
        };
        draft
            .validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let school = self.school_repo.create(&draft).await?;
        info!("Default school created: {} ({})", school.name, school.code);
        Ok((school, true))
    }

    async fn ensure_super_admin(
        &self,
        defaults: &InstallDefaults,
        school: &School,
    ) -> Result<(User, bool), DomainError> {
        let password_hash = PasswordService::hash(&defaults.admin_password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        if let Some(existing) = self.user_repo.find_by_email(&defaults.admin_email).await? {
            warn!("User {} already exists, updating", existing.email);
            let mut user = existing;
            user.name = defaults.admin_name.clone();
            user.password_hash = password_hash;
            user.school_id = Some(school.id);
            let updated = self.user_repo.update(&user).await?;
            return Ok((updated, false));
        }

        let draft = NewUser {
            school_id: Some(school.id),
            name: defaults.admin_name.clone(),
            email: defaults.admin_email.clone(),
            password_hash,
            is_active: true,
        };
        draft
            .validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let user = self.user_repo.create(&draft).await?;
        info!("Super admin created: {}", user.email);
        Ok((user, true))
    }

    /// Write each default setting only when the key is absent; returns
    /// how many were written.
    async fn seed_default_settings(&self) -> Result<usize, DomainError> {
        let mut seeded = 0;
        for (key, value) in default_settings() {
            if !self.settings.has(key).await? {
                self.settings.set(key, value).await?;
                seeded += 1;
            }
        }
        Ok(seeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MockSettingCache;
    use crate::repositories::school_repository::MockSchoolRepository;
    use crate::repositories::setting_repository::MockSettingRepository;
    use crate::repositories::user_repository::MockUserRepository;
    use crate::tenancy::SchoolId;

    use chrono::Utc;

    fn defaults() -> InstallDefaults {
        InstallDefaults {
            school_name: "SIT LHI Demo".to_string(),
            school_code: "DEMO001".to_string(),
            school_npsn: None,
            admin_name: "Super Admin".to_string(),
            admin_email: "admin@lhi.sch.id".to_string(),
            admin_password: "rahasia-123".to_string(),
        }
    }

    fn school(id: SchoolId, code: &str) -> School {
        School {
            id,
            name: "SIT LHI Demo".to_string(),
            code: code.to_string(),
            npsn: None,
            address: None,
            phone: None,
            email: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sys_setting(key: &str, value: Value) -> crate::domain::SystemSetting {
        crate::domain::SystemSetting {
            id: 1,
            key: key.to_string(),
            value,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn user(id: i64, email: &str, school_id: Option<SchoolId>) -> User {
        User {
            id,
            school_id,
            name: "Super Admin".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn settings_with(
        repo: MockSettingRepository,
        cache: MockSettingCache,
    ) -> Arc<SettingService<MockSettingRepository, MockSettingCache>> {
        Arc::new(SettingService::new(Arc::new(repo), Arc::new(cache)))
    }

    #[tokio::test]
    async fn test_fresh_install_seeds_everything() {
        let mut school_repo = MockSchoolRepository::new();
        school_repo.expect_find_by_code().returning(|_| Ok(None));
        school_repo
            .expect_create()
            .withf(|s| s.code == "DEMO001" && s.email.as_deref() == Some("contact@demo001.sch.id"))
            .times(1)
            .returning(|s| Ok(school(1, &s.code)));

        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_email().returning(|_| Ok(None));
        user_repo
            .expect_create()
            .withf(|u| u.school_id == Some(1) && u.password_hash != "rahasia-123")
            .times(1)
            .returning(|u| Ok(user(1, &u.email, u.school_id)));

        let mut setting_repo = MockSettingRepository::new();
        setting_repo.expect_exists().returning(|_| Ok(false));
        setting_repo
            .expect_upsert()
            .times(2)
            .returning(|k, v| Ok(sys_setting(k, v.clone())));
        setting_repo
            .expect_keys()
            .returning(|| Ok(vec!["app_name".to_string(), "panel_color".to_string()]));

        let mut cache = MockSettingCache::new();
        cache.expect_forget().returning(|_| Ok(()));

        let service = InstallService::new(
            Arc::new(school_repo),
            Arc::new(user_repo),
            settings_with(setting_repo, cache),
        );

        let report = service.install(&defaults()).await.unwrap();
        assert!(report.school_created);
        assert!(report.admin_created);
        assert_eq!(report.settings_seeded, 2);
    }

    #[tokio::test]
    async fn test_second_run_creates_nothing_new() {
        let mut school_repo = MockSchoolRepository::new();
        school_repo
            .expect_find_by_code()
            .returning(|code| Ok(Some(school(1, code))));
        school_repo.expect_create().never();

        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_email()
            .returning(|email| Ok(Some(user(1, email, Some(1)))));
        user_repo.expect_create().never();
        user_repo
            .expect_update()
            .times(1)
            .returning(|u| Ok(u.clone()));

        let mut setting_repo = MockSettingRepository::new();
        setting_repo.expect_exists().returning(|_| Ok(true));
        setting_repo.expect_upsert().never();
        setting_repo.expect_keys().returning(|| Ok(vec![]));

        let cache = MockSettingCache::new();

        let service = InstallService::new(
            Arc::new(school_repo),
            Arc::new(user_repo),
            settings_with(setting_repo, cache),
        );

        let report = service.install(&defaults()).await.unwrap();
        assert!(!report.school_created);
        assert!(!report.admin_created);
        assert_eq!(report.settings_seeded, 0);
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let service = InstallService::new(
            Arc::new(MockSchoolRepository::new()),
            Arc::new(MockUserRepository::new()),
            settings_with(MockSettingRepository::new(), MockSettingCache::new()),
        );

        let mut bad = defaults();
        bad.admin_password = "pendek".to_string();
        let err = service.install(&bad).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }
}
