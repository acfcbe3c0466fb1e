//! List state for the admin console
//!
//! `EntityList` holds the `loading -> ready | failed` state for any managed
//! entity. `AppListController` drives it against an `AppsApi` backend and
//! keeps the local copy in step with each mutation.

use super::envelope::{failure_message, ApiResponse};
use super::form::{AppForm, FormMode};
use crate::contract::{App, AppsApi, AppsError};
use crate::domain::entity::ManagedEntity;
use std::sync::Arc;

/// Load state of a list
#[derive(Debug, Clone, PartialEq)]
pub enum ListState<E> {
    Loading,
    Ready(Vec<E>),
    Failed(String),
}

/// In-memory list of managed entities
#[derive(Debug, Clone, PartialEq)]
pub struct EntityList<E: ManagedEntity> {
    state: ListState<E>,
}

impl<E: ManagedEntity> Default for EntityList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ManagedEntity> EntityList<E> {
    /// A list starts out loading
    pub fn new() -> Self {
        Self {
            state: ListState::Loading,
        }
    }

    pub fn state(&self) -> &ListState<E> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ListState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ListState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Items currently shown; empty unless ready
    pub fn items(&self) -> &[E] {
        match &self.state {
            ListState::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn get(&self, key: &str) -> Option<&E> {
        self.items().iter().find(|e| e.key() == key)
    }

    pub fn begin_load(&mut self) {
        self.state = ListState::Loading;
    }

    pub fn finish_load(&mut self, result: Result<Vec<E>, String>) {
        self.state = match result {
            Ok(items) => ListState::Ready(items),
            Err(message) => ListState::Failed(message),
        };
    }

    /// Swap in a fresh copy of an entity, matched by key
    pub fn replace(&mut self, entity: E) -> bool {
        if let ListState::Ready(items) = &mut self.state {
            let key = entity.key();
            if let Some(slot) = items.iter_mut().find(|e| e.key() == key) {
                *slot = entity;
                return true;
            }
        }
        false
    }

    /// Add a newly created entity at the top
    pub fn prepend(&mut self, entity: E) {
        if let ListState::Ready(items) = &mut self.state {
            items.insert(0, entity);
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        if let ListState::Ready(items) = &mut self.state {
            let before = items.len();
            items.retain(|e| e.key() != key);
            return items.len() != before;
        }
        false
    }
}

/// Callback fired after each successful mutation so sibling views can refresh
pub type RefreshCallback = Box<dyn Fn() + Send + Sync>;

/// Drives the app list against a storage-agnostic backend
pub struct AppListController {
    api: Arc<dyn AppsApi>,
    list: EntityList<App>,
    on_refresh: RefreshCallback,
}

impl AppListController {
    pub fn new(api: Arc<dyn AppsApi>, on_refresh: RefreshCallback) -> Self {
        Self {
            api,
            list: EntityList::new(),
            on_refresh,
        }
    }

    pub fn list(&self) -> &EntityList<App> {
        &self.list
    }

    /// Fetch the full list, replacing the local copy
    pub async fn load(&mut self) -> &ListState<App> {
        self.list.begin_load();
        let result = self.api.list_apps().await;
        let response = ApiResponse::from_result(result, None);
        self.list.finish_load(match (response.success, response.data) {
            (true, Some(apps)) => Ok(apps),
            _ => Err(response
                .message
                .unwrap_or_else(|| "Failed to load apps".to_string())),
        });
        self.list.state()
    }

    /// Delete an app and drop it from the local list
    pub async fn delete(&mut self, id: &str) -> ApiResponse<bool> {
        match self.api.delete_app(id).await {
            Ok(app) => {
                tracing::debug!(app = %app.label(), "Removing app from list");
                self.list.remove(&app.key());
                (self.on_refresh)();
                ApiResponse::ok(true, Some("App deleted".to_string()))
            }
            Err(err) => self.failed(err),
        }
    }

    /// Toggle an app's status and patch the local copy
    pub async fn toggle_status(&mut self, id: &str) -> ApiResponse<App> {
        match self.api.toggle_app_status(id).await {
            Ok(app) => {
                let message = format!("App status switched to {}", app.status);
                self.list.replace(app.clone());
                (self.on_refresh)();
                ApiResponse::ok(app, Some(message))
            }
            Err(err) => self.failed(err),
        }
    }

    /// Submit a form: local validation first, then create or update by form mode
    pub async fn save(&mut self, form: &mut AppForm) -> ApiResponse<App> {
        if !form.validate() {
            return ApiResponse::failed(&AppsError::Validation {
                errors: form.errors().clone(),
            });
        }

        let (result, message) = match form.mode().clone() {
            FormMode::Create => (self.api.create_app(form.to_new_app()).await, "App created"),
            FormMode::Edit { id } => (
                self.api.update_app(&id, form.to_patch()).await,
                "App updated",
            ),
        };

        match result {
            Ok(app) => {
                if !self.list.replace(app.clone()) {
                    self.list.prepend(app.clone());
                }
                (self.on_refresh)();
                ApiResponse::ok(app, Some(message.to_string()))
            }
            Err(err) => {
                form.absorb(&err);
                self.failed(err)
            }
        }
    }

    fn failed<T>(&self, err: AppsError) -> ApiResponse<T> {
        tracing::warn!(error = %err, message = %failure_message(&err), "Console action failed");
        ApiResponse::failed(&err)
    }
}
