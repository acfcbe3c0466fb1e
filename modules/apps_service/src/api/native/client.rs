//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{App, AppPatch, AppsApi, AppsError, NewApp};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// This client is used for in-process communication without HTTP overhead.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl AppsApi for NativeClient {
    async fn create_app(&self, input: NewApp) -> Result<App, AppsError> {
        self.service.create(input).await
    }

    async fn list_apps(&self) -> Result<Vec<App>, AppsError> {
        self.service.find_all().await
    }

    async fn get_app(&self, id: &str) -> Result<App, AppsError> {
        self.service.find_one(id).await
    }

    async fn update_app(&self, id: &str, patch: AppPatch) -> Result<App, AppsError> {
        self.service.update(id, patch).await
    }

    async fn delete_app(&self, id: &str) -> Result<App, AppsError> {
        self.service.remove(id).await
    }

    async fn toggle_app_status(&self, id: &str) -> Result<App, AppsError> {
        self.service.toggle_status(id).await
    }
}
