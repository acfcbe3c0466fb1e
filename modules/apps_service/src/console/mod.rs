//! Admin console consumer
//!
//! Everything here talks to an `AppsApi` and never to storage, so the same
//! screens run against the in-process service or the REST gateway.

pub mod envelope;
pub mod form;
pub mod list;

pub use envelope::{failure_message, ApiResponse, NETWORK_RETRY_MESSAGE};
pub use form::{AppForm, AppFormFields, BotForm, FormMode, RateField};
pub use list::{AppListController, EntityList, ListState, RefreshCallback};
