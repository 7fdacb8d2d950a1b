//! Business logic services layer

pub mod account_service;
pub mod person_service;
pub mod publisher_service;

pub use account_service::AccountService;
pub use person_service::PersonService;
pub use publisher_service::PublisherService;
