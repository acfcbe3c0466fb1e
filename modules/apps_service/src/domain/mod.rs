//! Domain layer - business logic and services

pub mod entity;
pub mod repository;
pub mod service;
pub mod validation;

pub use entity::ManagedEntity;
pub use repository::{AppsRepository, StorageError, StorageResult};
pub use service::Service;
pub use validation::Validate;
