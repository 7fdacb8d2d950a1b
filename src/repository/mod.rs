//! Database repository layer
//!
//! Each call runs under the configured query timeout. Missing rows become
//! `AppError::NotFound` and unique violations become `AppError::Conflict`
//! here, so services never see raw `sqlx` errors for those cases.

pub mod account_repo;
pub mod person_repo;
pub mod publisher_repo;

pub use account_repo::*;
pub use person_repo::*;
pub use publisher_repo::*;
