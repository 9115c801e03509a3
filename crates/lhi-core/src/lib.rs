//! # LHI Core
//!
//! Domain layer of the SIT LHI school-administration system: entities,
//! repository ports, school-based tenancy, and the services that
//! orchestrate them.

pub mod cache;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;
pub mod tenancy;

pub use error::DomainError;
pub use tenancy::{CurrentUser, RequestContext, SchoolId, SchoolScope, SchoolScoped};
