//! Field validation for app and bot input
//!
//! Every rule runs before storage is touched. Problems are collected into a
//! `FieldErrors` map rather than failing on the first one.

use crate::contract::{
    App, AppChanges, AppDefaults, AppMode, AppPatch, AppStatus, AppsError, BotDraft, FieldErrors,
    NewApp,
};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

/// Longest accepted app name, in characters
pub const MAX_NAME_LEN: usize = 255;

/// Accepted token budget for bots
pub const BOT_MAX_TOKENS: std::ops::RangeInclusive<i64> = 100..=8000;

/// Accepted sampling temperature for bots
pub const BOT_TEMPERATURE: std::ops::RangeInclusive<f64> = 0.0..=2.0;

#[allow(clippy::expect_used)]
static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("UUID pattern is valid")
});

/// Input that can be checked as a whole and turned into a typed value
pub trait Validate {
    type Output;

    /// Check every rule and report all failures together
    fn validate(&self) -> Result<Self::Output, AppsError>;
}

/// Whether `value` matches the 8-4-4-4-12 UUID grammar (versions 1-5, RFC variant)
pub fn is_valid_uuid(value: &str) -> bool {
    UUID_RE.is_match(value)
}

/// Parse an identifier parameter, rejecting anything outside the UUID grammar
pub fn parse_app_id(id: &str) -> Result<Uuid, AppsError> {
    if !is_valid_uuid(id) {
        return Err(AppsError::BadFormat { id: id.to_string() });
    }
    Uuid::parse_str(id).map_err(|_| AppsError::BadFormat { id: id.to_string() })
}

/// Validated create input, still missing the storage-assigned parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidNewApp {
    pub tenant_id: String,
    pub name: String,
    pub mode: AppMode,
    pub icon: Option<String>,
    pub icon_background: Option<String>,
    pub app_model_config_id: Option<Uuid>,
    pub status: AppStatus,
    pub enable_site: bool,
    pub enable_api: bool,
    pub api_rpm: u32,
    pub api_rph: u32,
    pub is_demo: bool,
    pub is_public: bool,
    pub is_universal: bool,
}

impl ValidNewApp {
    pub fn into_app(self, id: Uuid, now: DateTime<Utc>) -> App {
        App {
            id,
            tenant_id: self.tenant_id,
            name: self.name,
            mode: self.mode,
            icon: self.icon,
            icon_background: self.icon_background,
            app_model_config_id: self.app_model_config_id,
            status: self.status,
            enable_site: self.enable_site,
            enable_api: self.enable_api,
            api_rpm: self.api_rpm,
            api_rph: self.api_rph,
            is_demo: self.is_demo,
            is_public: self.is_public,
            is_universal: self.is_universal,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Validate for NewApp {
    type Output = ValidNewApp;

    fn validate(&self) -> Result<ValidNewApp, AppsError> {
        let mut errors = FieldErrors::new();

        require(&mut errors, "tenant_id", &self.tenant_id, "Tenant ID is required");
        require(&mut errors, "name", &self.name, "App name is required");
        check_name_length(&mut errors, &self.name);
        require(&mut errors, "mode", &self.mode, "Mode is required");
        let mode = parse_mode(&mut errors, &self.mode);
        let status = self
            .status
            .as_deref()
            .and_then(|s| parse_status(&mut errors, s))
            .unwrap_or(AppDefaults::STATUS);
        let app_model_config_id =
            parse_config_id(&mut errors, self.app_model_config_id.as_deref());
        let api_rpm = self
            .api_rpm
            .and_then(|v| rate_limit(&mut errors, "api_rpm", "API RPM", v))
            .unwrap_or(AppDefaults::RATE_LIMIT);
        let api_rph = self
            .api_rph
            .and_then(|v| rate_limit(&mut errors, "api_rph", "API RPH", v))
            .unwrap_or(AppDefaults::RATE_LIMIT);

        errors.into_result(())?;

        Ok(ValidNewApp {
            tenant_id: self.tenant_id.clone(),
            name: self.name.clone(),
            mode: mode.unwrap_or(AppDefaults::MODE),
            icon: non_blank(self.icon.as_deref()),
            icon_background: non_blank(self.icon_background.as_deref()),
            app_model_config_id,
            status,
            enable_site: self.enable_site.unwrap_or(AppDefaults::FLAG),
            enable_api: self.enable_api.unwrap_or(AppDefaults::FLAG),
            api_rpm,
            api_rph,
            is_demo: self.is_demo.unwrap_or(AppDefaults::FLAG),
            is_public: self.is_public.unwrap_or(AppDefaults::FLAG),
            is_universal: self.is_universal.unwrap_or(AppDefaults::FLAG),
        })
    }
}

impl Validate for AppPatch {
    type Output = AppChanges;

    fn validate(&self) -> Result<AppChanges, AppsError> {
        let mut errors = FieldErrors::new();

        if let Some(name) = &self.name {
            require(&mut errors, "name", name, "App name is required");
            check_name_length(&mut errors, name);
        }
        let mode = self.mode.as_deref().and_then(|m| {
            require(&mut errors, "mode", m, "Mode is required");
            parse_mode(&mut errors, m)
        });
        let status = self
            .status
            .as_deref()
            .and_then(|s| parse_status(&mut errors, s));
        let app_model_config_id = self
            .app_model_config_id
            .as_ref()
            .map(|raw| parse_config_id(&mut errors, raw.as_deref()));
        let api_rpm = self
            .api_rpm
            .and_then(|v| rate_limit(&mut errors, "api_rpm", "API RPM", v));
        let api_rph = self
            .api_rph
            .and_then(|v| rate_limit(&mut errors, "api_rph", "API RPH", v));

        errors.into_result(AppChanges {
            name: self.name.clone(),
            mode,
            icon: self.icon.as_ref().map(|v| non_blank(v.as_deref())),
            icon_background: self.icon_background.as_ref().map(|v| non_blank(v.as_deref())),
            app_model_config_id,
            status,
            enable_site: self.enable_site,
            enable_api: self.enable_api,
            api_rpm,
            api_rph,
            is_demo: self.is_demo,
            is_public: self.is_public,
            is_universal: self.is_universal,
        })
    }
}

impl Validate for BotDraft {
    type Output = ();

    fn validate(&self) -> Result<(), AppsError> {
        let mut errors = FieldErrors::new();

        require(&mut errors, "name", &self.name, "Bot name is required");
        require(
            &mut errors,
            "description",
            &self.description,
            "Bot description is required",
        );
        require(&mut errors, "category", &self.category, "Category is required");
        if !BOT_MAX_TOKENS.contains(&self.max_tokens) {
            errors.add("max_tokens", "Max tokens must be between 100 and 8000");
        }
        if !BOT_TEMPERATURE.contains(&self.temperature) {
            errors.add("temperature", "Temperature must be between 0 and 2");
        }

        errors.into_result(())
    }
}

fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

fn check_name_length(errors: &mut FieldErrors, name: &str) {
    if name.chars().count() > MAX_NAME_LEN {
        errors.add(
            "name",
            format!("App name must be at most {MAX_NAME_LEN} characters"),
        );
    }
}

fn parse_mode(errors: &mut FieldErrors, raw: &str) -> Option<AppMode> {
    if raw.trim().is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(mode) => Some(mode),
        Err(_) => {
            errors.add("mode", "Mode must be one of chat, completion, workflow");
            None
        }
    }
}

fn parse_status(errors: &mut FieldErrors, raw: &str) -> Option<AppStatus> {
    match raw.parse() {
        Ok(status) => Some(status),
        Err(_) => {
            errors.add(
                "status",
                "Status must be one of normal, disabled, maintenance",
            );
            None
        }
    }
}

/// Optional text columns store blanks as absent
fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Blank config ids are treated as absent; the console form sends "" for "none".
fn parse_config_id(errors: &mut FieldErrors, raw: Option<&str>) -> Option<Uuid> {
    let raw = non_blank(raw)?;
    let raw = raw.as_str();
    match parse_app_id(raw) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.add(
                "app_model_config_id",
                "App model config ID must be a valid UUID",
            );
            None
        }
    }
}

fn rate_limit(errors: &mut FieldErrors, field: &str, label: &str, value: i64) -> Option<u32> {
    if value < 0 {
        errors.add(field, format!("{label} must not be negative"));
        return None;
    }
    match i32::try_from(value) {
        Ok(v) => u32::try_from(v).ok(),
        Err(_) => {
            errors.add(field, format!("{label} must be at most {}", i32::MAX));
            None
        }
    }
}
