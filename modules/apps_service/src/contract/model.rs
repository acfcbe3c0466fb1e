//! Contract models for apps service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A managed Dify app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    /// Unique identifier, immutable after creation
    pub id: Uuid,
    /// Owning tenant, immutable after creation
    pub tenant_id: String,
    /// Display name (unique)
    pub name: String,
    /// Interaction mode
    pub mode: AppMode,
    /// Icon reference
    pub icon: Option<String>,
    /// Icon background color
    pub icon_background: Option<String>,
    /// Linked model configuration
    pub app_model_config_id: Option<Uuid>,
    /// Lifecycle status
    pub status: AppStatus,
    pub enable_site: bool,
    pub enable_api: bool,
    /// API requests per minute
    pub api_rpm: u32,
    /// API requests per hour
    pub api_rph: u32,
    pub is_demo: bool,
    pub is_public: bool,
    pub is_universal: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// App lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppStatus {
    #[default]
    Normal,
    Disabled,
    Maintenance,
}

impl AppStatus {
    /// Status after a toggle.
    ///
    /// `Normal` and `Disabled` flip into each other; `Maintenance` returns to `Normal`.
    pub fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Disabled,
            Self::Disabled | Self::Maintenance => Self::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Disabled => "disabled",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for AppStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "disabled" => Ok(Self::Disabled),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// App interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppMode {
    #[default]
    Chat,
    Completion,
    Workflow,
}

impl AppMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Completion => "completion",
            Self::Workflow => "workflow",
        }
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppMode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(Self::Chat),
            "completion" => Ok(Self::Completion),
            "workflow" => Ok(Self::Workflow),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Returned when a string does not name a known enum variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value '{}'", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

/// Defaults applied to omitted optional fields on create.
///
/// Shared by the service and the admin console form so both sides agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppDefaults;

impl AppDefaults {
    pub const STATUS: AppStatus = AppStatus::Normal;
    pub const MODE: AppMode = AppMode::Chat;
    pub const FLAG: bool = false;
    pub const RATE_LIMIT: u32 = 0;
    /// Pre-filled by the form only; the service stores `None` when omitted.
    pub const ICON_BACKGROUND: &'static str = "#4CAF50";
}

/// Unvalidated create input.
///
/// Fields are kept in their raw shape so every problem can be reported at once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewApp {
    pub tenant_id: String,
    pub name: String,
    pub mode: String,
    pub icon: Option<String>,
    pub icon_background: Option<String>,
    pub app_model_config_id: Option<String>,
    pub status: Option<String>,
    pub enable_site: Option<bool>,
    pub enable_api: Option<bool>,
    pub api_rpm: Option<i64>,
    pub api_rph: Option<i64>,
    pub is_demo: Option<bool>,
    pub is_public: Option<bool>,
    pub is_universal: Option<bool>,
}

impl NewApp {
    /// Create input with only the required fields set
    pub fn new(
        tenant_id: impl Into<String>,
        name: impl Into<String>,
        mode: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            name: name.into(),
            mode: mode.into(),
            ..Self::default()
        }
    }
}

/// Unvalidated partial update.
///
/// `tenant_id` is absent: it cannot be changed after creation. Optional
/// columns use `Some(None)` (or a blank value) to clear them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppPatch {
    pub name: Option<String>,
    pub mode: Option<String>,
    pub icon: Option<Option<String>>,
    pub icon_background: Option<Option<String>>,
    pub app_model_config_id: Option<Option<String>>,
    pub status: Option<String>,
    pub enable_site: Option<bool>,
    pub enable_api: Option<bool>,
    pub api_rpm: Option<i64>,
    pub api_rph: Option<i64>,
    pub is_demo: Option<bool>,
    pub is_public: Option<bool>,
    pub is_universal: Option<bool>,
}

impl AppPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Validated, typed changes ready to be applied by storage
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppChanges {
    pub name: Option<String>,
    pub mode: Option<AppMode>,
    /// `Some(None)` clears the column
    pub icon: Option<Option<String>>,
    pub icon_background: Option<Option<String>>,
    pub app_model_config_id: Option<Option<Uuid>>,
    pub status: Option<AppStatus>,
    pub enable_site: Option<bool>,
    pub enable_api: Option<bool>,
    pub api_rpm: Option<u32>,
    pub api_rph: Option<u32>,
    pub is_demo: Option<bool>,
    pub is_public: Option<bool>,
    pub is_universal: Option<bool>,
}

impl AppChanges {
    /// Changes that only set the status
    pub fn status(status: AppStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Apply the changes to an in-memory copy of an app
    pub fn apply_to(&self, app: &mut App, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            app.name = name.clone();
        }
        if let Some(mode) = self.mode {
            app.mode = mode;
        }
        if let Some(icon) = &self.icon {
            app.icon = icon.clone();
        }
        if let Some(bg) = &self.icon_background {
            app.icon_background = bg.clone();
        }
        if let Some(config_id) = self.app_model_config_id {
            app.app_model_config_id = config_id;
        }
        if let Some(status) = self.status {
            app.status = status;
        }
        if let Some(v) = self.enable_site {
            app.enable_site = v;
        }
        if let Some(v) = self.enable_api {
            app.enable_api = v;
        }
        if let Some(v) = self.api_rpm {
            app.api_rpm = v;
        }
        if let Some(v) = self.api_rph {
            app.api_rph = v;
        }
        if let Some(v) = self.is_demo {
            app.is_demo = v;
        }
        if let Some(v) = self.is_public {
            app.is_public = v;
        }
        if let Some(v) = self.is_universal {
            app.is_universal = v;
        }
        app.updated_at = now;
    }
}

// ===== Deprecated Bot entity (admin console only, never persisted) =====

/// Bot status as shown by the legacy bot console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotStatus {
    #[default]
    Active,
    Inactive,
    Maintenance,
}

impl BotStatus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive | Self::Maintenance => Self::Active,
        }
    }
}

/// Legacy bot record. Provider fields are stored opaquely and never called.
#[derive(Debug, Clone, PartialEq)]
pub struct Bot {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: BotStatus,
    pub model: String,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated bot form input
#[derive(Debug, Clone, PartialEq)]
pub struct BotDraft {
    pub name: String,
    pub description: String,
    pub model: String,
    pub max_tokens: i64,
    pub temperature: f64,
    pub category: String,
    pub tags: Vec<String>,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
}

impl Default for BotDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 2000,
            temperature: 0.7,
            category: String::new(),
            tags: Vec::new(),
            api_key: None,
            endpoint: None,
        }
    }
}

impl From<&Bot> for BotDraft {
    fn from(bot: &Bot) -> Self {
        Self {
            name: bot.name.clone(),
            description: bot.description.clone(),
            model: bot.model.clone(),
            max_tokens: i64::from(bot.max_tokens),
            temperature: bot.temperature,
            category: bot.category.clone(),
            tags: bot.tags.clone(),
            api_key: bot.api_key.clone(),
            endpoint: bot.endpoint.clone(),
        }
    }
}
