//! Domain service - business logic orchestration
//!
//! Every operation follows the same chain: validate input, check existence,
//! persist, return. Storage failures are translated into `AppsError`.

use super::repository::{AppsRepository, StorageError};
use super::validation::{parse_app_id, Validate};
use crate::contract::{App, AppChanges, AppPatch, AppsError, NewApp};
use std::sync::Arc;
use uuid::Uuid;

/// Domain service for apps management
pub struct Service {
    repo: Arc<dyn AppsRepository>,
}

impl Service {
    /// Create a new service instance
    pub fn new(repo: Arc<dyn AppsRepository>) -> Self {
        Self { repo }
    }

    /// Create an app. Omitted optional fields receive their defaults.
    pub async fn create(&self, input: NewApp) -> Result<App, AppsError> {
        let valid = input.validate()?;
        let app = valid.into_app(Uuid::new_v4(), chrono::Utc::now());

        let created = self.repo.create(&app).await.map_err(|e| match e {
            StorageError::UniqueViolation(_) => AppsError::Conflict {
                reason: "App with this name already exists".to_string(),
            },
            other => internal(other),
        })?;

        tracing::info!(app_id = %created.id, tenant_id = %created.tenant_id, "App created");
        Ok(created)
    }

    /// List all apps, newest first
    pub async fn find_all(&self) -> Result<Vec<App>, AppsError> {
        self.repo.list_all().await.map_err(internal)
    }

    /// Get a specific app
    pub async fn find_one(&self, id: &str) -> Result<App, AppsError> {
        let uuid = parse_app_id(id)?;
        self.require(uuid).await
    }

    /// Apply a partial update. `tenant_id` cannot be part of it.
    pub async fn update(&self, id: &str, patch: AppPatch) -> Result<App, AppsError> {
        let uuid = parse_app_id(id)?;
        let changes = patch.validate()?;
        self.require(uuid).await?;

        let updated = self.apply(uuid, &changes).await?;
        tracing::debug!(app_id = %uuid, "App updated");
        Ok(updated)
    }

    /// Hard delete an app, returning the record as it was before deletion
    pub async fn remove(&self, id: &str) -> Result<App, AppsError> {
        let uuid = parse_app_id(id)?;
        let existing = self.require(uuid).await?;

        self.repo.delete(uuid).await.map_err(|e| match e {
            StorageError::NotFound => AppsError::not_found(uuid),
            other => internal(other),
        })?;

        tracing::info!(app_id = %uuid, "App deleted");
        Ok(existing)
    }

    /// Flip status between `normal` and `disabled`; `maintenance` goes back to `normal`
    pub async fn toggle_status(&self, id: &str) -> Result<App, AppsError> {
        let uuid = parse_app_id(id)?;
        let current = self.require(uuid).await?;
        let next = current.status.toggled();

        let updated = self.apply(uuid, &AppChanges::status(next)).await?;
        tracing::info!(app_id = %uuid, from = %current.status, to = %next, "App status toggled");
        Ok(updated)
    }

    // ===== Helper Methods =====

    /// Load an app or fail with `NotFound`
    async fn require(&self, id: Uuid) -> Result<App, AppsError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| AppsError::not_found(id))
    }

    /// The row may disappear between the existence check and the write;
    /// that race surfaces as the same `NotFound`.
    async fn apply(&self, id: Uuid, changes: &AppChanges) -> Result<App, AppsError> {
        self.repo
            .update(id, changes, chrono::Utc::now())
            .await
            .map_err(|e| match e {
                StorageError::NotFound => AppsError::not_found(id),
                StorageError::UniqueViolation(_) => AppsError::Conflict {
                    reason: "App with this name already exists".to_string(),
                },
                other => internal(other),
            })
    }
}

fn internal(err: StorageError) -> AppsError {
    tracing::error!(error = %err, "Storage failure");
    AppsError::internal(err)
}
