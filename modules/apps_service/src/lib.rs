//! Apps Service Module
//!
//! CRUD and status management for Dify apps, exposed in-process through
//! `AppsApi`, over REST through the gateway, and to the admin console.

// Public exports
pub mod contract;
pub use contract::{
    client::AppsApi, error::AppsError, App, AppDefaults, AppMode, AppPatch, AppStatus, Bot,
    BotDraft, BotStatus, FieldErrors, NewApp,
};

pub mod console;

pub mod module;
pub use module::AppsServiceModule;

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
