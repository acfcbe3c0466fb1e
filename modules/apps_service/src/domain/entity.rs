//! Shared shape of records managed through the admin console

use crate::contract::{App, Bot};

/// A record with a stable key and a display label
pub trait ManagedEntity: Clone + Send + Sync + 'static {
    /// Stable identifier used to patch local lists
    fn key(&self) -> String;

    /// Human-readable label
    fn label(&self) -> &str;
}

impl ManagedEntity for App {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl ManagedEntity for Bot {
    fn key(&self) -> String {
        self.id.clone()
    }

    fn label(&self) -> &str {
        &self.name
    }
}
