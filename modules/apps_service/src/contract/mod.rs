//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the client capability trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::AppsApi;
pub use error::{AppsError, FieldErrors};
pub use model::{
    App, AppChanges, AppDefaults, AppMode, AppPatch, AppStatus, Bot, BotDraft, BotStatus, NewApp,
    UnknownVariant,
};
