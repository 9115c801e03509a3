//! PostgreSQL repository implementations

pub mod school_repo_impl;
pub mod setting_repo_impl;
pub mod student_repo_impl;
pub mod user_repo_impl;

pub use school_repo_impl::PgSchoolRepository;
pub use setting_repo_impl::PgSettingRepository;
pub use student_repo_impl::PgStudentRepository;
pub use user_repo_impl::PgUserRepository;
