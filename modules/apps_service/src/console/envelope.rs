//! Uniform `{ success, data, message }` envelope seen by console consumers

use crate::contract::{AppsError, FieldErrors};
use serde::Serialize;

/// Message shown when the gateway cannot be reached
pub const NETWORK_RETRY_MESSAGE: &str = "Network error, please try again later";

/// Normalized outcome of a console call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Per-field problems, for forms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrorsView>,
}

/// Serializable copy of field errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrorsView(pub std::collections::BTreeMap<String, String>);

impl From<&FieldErrors> for FieldErrorsView {
    fn from(errors: &FieldErrors) -> Self {
        Self(errors.as_map().clone())
    }
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: Option<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message,
            errors: None,
        }
    }

    pub fn failed(error: &AppsError) -> Self {
        let errors = match error {
            AppsError::Validation { errors } => Some(FieldErrorsView::from(errors)),
            _ => None,
        };
        Self {
            success: false,
            data: None,
            message: Some(failure_message(error)),
            errors,
        }
    }

    /// Wrap a call result, attaching `success_message` on success
    pub fn from_result(result: Result<T, AppsError>, success_message: Option<String>) -> Self {
        match result {
            Ok(data) => Self::ok(data, success_message),
            Err(err) => {
                tracing::debug!(error = %err, "Console call failed");
                Self::failed(&err)
            }
        }
    }
}

/// Text shown to the operator for a failed call
pub fn failure_message(error: &AppsError) -> String {
    match error {
        AppsError::Validation { errors } => format!("Please fix the highlighted fields: {errors}"),
        AppsError::BadFormat { .. } => "Invalid app ID".to_string(),
        AppsError::NotFound { .. } => "App does not exist".to_string(),
        AppsError::Conflict { reason } => reason.clone(),
        AppsError::Network { .. } => NETWORK_RETRY_MESSAGE.to_string(),
        AppsError::Internal { .. } => "Operation failed".to_string(),
    }
}
