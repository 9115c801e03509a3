//! Domain services

pub mod install_service;
pub mod setting_service;
pub mod student_service;
pub mod tenant_service;

pub use install_service::{InstallDefaults, InstallReport, InstallService};
pub use setting_service::SettingService;
pub use student_service::StudentService;
pub use tenant_service::TenantService;
