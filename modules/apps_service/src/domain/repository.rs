//! Repository trait for data access
//!
//! This trait defines the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs; tests substitute an
//! in-memory fake.

use crate::contract::{App, AppChanges};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Storage-level failures the service knows how to translate
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The addressed row does not exist (anymore)
    #[error("record not found")]
    NotFound,

    /// A unique constraint rejected the write
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Repository for apps
#[async_trait]
pub trait AppsRepository: Send + Sync {
    /// Insert a new app
    async fn create(&self, app: &App) -> StorageResult<App>;

    /// Find an app by id
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<App>>;

    /// List all apps ordered by `created_at` descending
    async fn list_all(&self) -> StorageResult<Vec<App>>;

    /// Apply changes and refresh `updated_at`. `NotFound` if the row is gone.
    async fn update(&self, id: Uuid, changes: &AppChanges, now: DateTime<Utc>)
        -> StorageResult<App>;

    /// Hard delete. `NotFound` if the row is gone.
    async fn delete(&self, id: Uuid) -> StorageResult<()>;

    /// Check if an app exists
    async fn exists(&self, id: Uuid) -> StorageResult<bool>;
}
