//! Repository traits (ports)

pub mod school_repository;
pub mod setting_repository;
pub mod student_repository;
pub mod user_repository;

pub use school_repository::SchoolRepository;
pub use setting_repository::SettingRepository;
pub use student_repository::StudentRepository;
pub use user_repository::UserRepository;
