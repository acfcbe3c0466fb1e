//! Contract error types for apps service
//!
//! These errors are transport-agnostic and used for inter-module communication.

use std::collections::BTreeMap;
use std::fmt;

/// Field-level validation failures, keyed by field name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem with a field. The first message per field wins.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    /// Add every entry of `other` that is not already present
    pub fn merge(&mut self, other: &FieldErrors) {
        for (field, message) in other.iter() {
            self.add(field, message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    /// `Ok(value)` when nothing was recorded, otherwise a validation error
    pub fn into_result<T>(self, value: T) -> Result<T, AppsError> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(AppsError::Validation { errors: self })
        }
    }
}

impl From<BTreeMap<String, String>> for FieldErrors {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        f.write_str(&parts.join(", "))
    }
}

/// Apps service domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppsError {
    /// Input failed one or more field rules
    #[error("Validation failed: {errors}")]
    Validation { errors: FieldErrors },

    /// Identifier is not a well-formed UUID
    #[error("Invalid UUID format: {id}")]
    BadFormat { id: String },

    /// Referenced app does not exist
    #[error("App with ID {id} not found")]
    NotFound { id: String },

    /// Uniqueness constraint violated
    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    /// Client-side transport failure
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppsError {
    pub fn not_found(id: impl fmt::Display) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_message_per_field_is_kept() {
        let mut errors = FieldErrors::new();
        errors.add("name", "Name is required");
        errors.add("name", "Name is too long");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name"), Some("Name is required"));
    }

    #[test]
    fn into_result_reports_every_field() {
        let mut errors = FieldErrors::new();
        errors.add("api_rpm", "API RPM must not be negative");
        errors.add("api_rph", "API RPH must not be negative");
        match errors.into_result(()) {
            Err(AppsError::Validation { errors }) => {
                assert!(errors.contains("api_rpm"));
                assert!(errors.contains("api_rph"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
