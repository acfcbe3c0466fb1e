//! Capability interface for apps management
//!
//! Consumers (the admin console, other modules) talk to this trait only.
//! The backend behind it is swappable: in-process service or remote REST gateway.

use super::{
    error::AppsError,
    model::{App, AppPatch, NewApp},
};
use async_trait::async_trait;

/// Apps service API
#[async_trait]
pub trait AppsApi: Send + Sync {
    /// Create an app, filling defaults for omitted optional fields
    async fn create_app(&self, input: NewApp) -> Result<App, AppsError>;

    /// List all apps, newest first
    async fn list_apps(&self) -> Result<Vec<App>, AppsError>;

    /// Get a single app by its UUID string
    async fn get_app(&self, id: &str) -> Result<App, AppsError>;

    /// Apply a partial update
    async fn update_app(&self, id: &str, patch: AppPatch) -> Result<App, AppsError>;

    /// Hard delete an app, returning the deleted record
    async fn delete_app(&self, id: &str) -> Result<App, AppsError>;

    /// Flip status between normal and disabled
    async fn toggle_app_status(&self, id: &str) -> Result<App, AppsError>;
}
