//! Common test utilities and an in-memory apps repository

#![allow(dead_code)]

use apps_service::contract::{App, AppChanges};
use apps_service::domain::repository::{AppsRepository, StorageError, StorageResult};
use apps_service::domain::Service;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

/// In-memory repository with the same uniqueness rule as the real table
#[derive(Clone, Default)]
pub struct InMemoryAppsRepository {
    data: Arc<RwLock<HashMap<Uuid, App>>>,
    calls: Arc<AtomicUsize>,
    /// When set, the row vanishes right before the next write
    vanish_before_write: Arc<RwLock<bool>>,
}

impl InMemoryAppsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of repository calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn count(&self) -> usize {
        self.data.read().len()
    }

    /// Simulate a concurrent delete between the existence check and the write
    pub fn vanish_before_next_write(&self) {
        *self.vanish_before_write.write() = true;
    }

    /// Print verbose information about repository state
    pub fn print_state(&self, context: &str) {
        let data = self.data.read();
        println!("\n========== AppsRepository State: {} ==========", context);
        println!("Total apps: {}", data.len());
        if data.is_empty() {
            println!("  (empty)");
        }
        for app in data.values() {
            println!("\n  ID: {}", app.id);
            println!("    Tenant: {}", app.tenant_id);
            println!("    Name: {}", app.name);
            println!("    Mode: {}", app.mode);
            println!("    Status: {}", app.status);
        }
        println!("====================================================\n");
    }

    fn track(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn take_vanish(&self, id: Uuid) {
        let mut flag = self.vanish_before_write.write();
        if *flag {
            *flag = false;
            self.data.write().remove(&id);
        }
    }
}

#[async_trait]
impl AppsRepository for InMemoryAppsRepository {
    async fn create(&self, app: &App) -> StorageResult<App> {
        self.track();
        let mut data = self.data.write();
        if data.values().any(|a| a.name == app.name) {
            return Err(StorageError::UniqueViolation("apps.name".to_string()));
        }
        data.insert(app.id, app.clone());
        Ok(app.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<App>> {
        self.track();
        Ok(self.data.read().get(&id).cloned())
    }

    async fn list_all(&self) -> StorageResult<Vec<App>> {
        self.track();
        let mut apps: Vec<App> = self.data.read().values().cloned().collect();
        apps.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(apps)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &AppChanges,
        now: DateTime<Utc>,
    ) -> StorageResult<App> {
        self.track();
        self.take_vanish(id);
        let mut data = self.data.write();
        if let Some(name) = &changes.name {
            if data.values().any(|a| a.id != id && &a.name == name) {
                return Err(StorageError::UniqueViolation("apps.name".to_string()));
            }
        }
        let app = data.get_mut(&id).ok_or(StorageError::NotFound)?;
        changes.apply_to(app, now);
        Ok(app.clone())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        self.track();
        self.take_vanish(id);
        self.data
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }

    async fn exists(&self, id: Uuid) -> StorageResult<bool> {
        self.track();
        Ok(self.data.read().contains_key(&id))
    }
}

/// Service over a fresh in-memory repository
pub fn create_service() -> (Arc<Service>, InMemoryAppsRepository) {
    let repo = InMemoryAppsRepository::new();
    let service = Arc::new(Service::new(Arc::new(repo.clone())));
    (service, repo)
}
