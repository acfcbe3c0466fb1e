//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::{AppsError, FieldErrors};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Machine-readable problem codes carried in the `code` extension
pub mod codes {
    pub const VALIDATION: &str = "validation";
    pub const BAD_FORMAT: &str = "bad_format";
    pub const NOT_FOUND: &str = "not_found";
    pub const CONFLICT: &str = "conflict";
    pub const MALFORMED_BODY: &str = "malformed_body";
    pub const INTERNAL: &str = "internal";
}

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Machine-readable problem code
    #[serde(default)]
    pub code: String,

    /// Per-field validation messages
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>, code: &str) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            code: code.to_string(),
            errors: BTreeMap::new(),
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach per-field messages
    pub fn with_errors(mut self, errors: &FieldErrors) -> Self {
        self.errors = errors.as_map().clone();
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: AppsError) -> Problem {
    match &error {
        AppsError::Internal { message } => {
            tracing::error!("Internal error: {}", message);
        }
        other => tracing::warn!(error = %other, "Request failed"),
    }

    match error {
        AppsError::Validation { errors } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error", codes::VALIDATION)
                .with_detail(errors.to_string())
                .with_errors(&errors)
        }

        AppsError::BadFormat { .. } => {
            Problem::new(StatusCode::BAD_REQUEST, "Bad Format", codes::BAD_FORMAT)
                .with_detail("Invalid UUID format")
        }

        AppsError::NotFound { id } => {
            Problem::new(StatusCode::NOT_FOUND, "App Not Found", codes::NOT_FOUND)
                .with_detail(format!("App with ID {id} not found"))
        }

        AppsError::Conflict { reason } => {
            Problem::new(StatusCode::BAD_REQUEST, "Conflict", codes::CONFLICT).with_detail(reason)
        }

        AppsError::Network { .. } | AppsError::Internal { .. } => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            codes::INTERNAL,
        )
        .with_detail("An unexpected error occurred"),
    }
}

/// Map a JSON body rejection to a 400 problem
pub fn map_json_rejection(rejection: JsonRejection) -> Problem {
    tracing::debug!(error = %rejection, "Rejected request body");
    Problem::new(
        StatusCode::BAD_REQUEST,
        "Malformed Request Body",
        codes::MALFORMED_BODY,
    )
    .with_detail(rejection.body_text())
}

/// Recover the domain error from a problem returned by a remote gateway
impl From<Problem> for AppsError {
    fn from(problem: Problem) -> Self {
        let detail = problem.detail.clone().unwrap_or_else(|| problem.title.clone());
        match problem.code.as_str() {
            codes::VALIDATION => AppsError::Validation {
                errors: FieldErrors::from(problem.errors),
            },
            codes::BAD_FORMAT => AppsError::BadFormat { id: detail },
            codes::NOT_FOUND => AppsError::NotFound { id: detail },
            codes::CONFLICT => AppsError::Conflict { reason: detail },
            codes::MALFORMED_BODY => {
                let mut errors = FieldErrors::new();
                errors.add("body", detail);
                AppsError::Validation { errors }
            }
            _ => match problem.status {
                404 => AppsError::NotFound { id: detail },
                _ => AppsError::Internal { message: detail },
            },
        }
    }
}
