//! Create/edit forms for the admin console
//!
//! A form is in create mode when opened without a record and in edit mode
//! when opened with one. Pre-filled values come from `AppDefaults` and rules
//! come from the same `Validate` impls the service runs.

use crate::contract::{App, AppDefaults, AppPatch, AppsError, Bot, BotDraft, FieldErrors, NewApp};
use crate::domain::validation::Validate;

/// Whether a form creates a new record or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Values currently held by the app form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppFormFields {
    pub tenant_id: String,
    pub name: String,
    pub mode: String,
    pub icon: String,
    pub icon_background: String,
    pub app_model_config_id: String,
    pub status: String,
    pub enable_site: bool,
    pub enable_api: bool,
    pub api_rpm: i64,
    pub api_rph: i64,
    pub is_demo: bool,
    pub is_public: bool,
    pub is_universal: bool,
}

impl Default for AppFormFields {
    fn default() -> Self {
        Self {
            tenant_id: String::new(),
            name: String::new(),
            mode: AppDefaults::MODE.to_string(),
            icon: String::new(),
            icon_background: AppDefaults::ICON_BACKGROUND.to_string(),
            app_model_config_id: String::new(),
            status: AppDefaults::STATUS.to_string(),
            enable_site: AppDefaults::FLAG,
            enable_api: AppDefaults::FLAG,
            api_rpm: i64::from(AppDefaults::RATE_LIMIT),
            api_rph: i64::from(AppDefaults::RATE_LIMIT),
            is_demo: AppDefaults::FLAG,
            is_public: AppDefaults::FLAG,
            is_universal: AppDefaults::FLAG,
        }
    }
}

impl From<&App> for AppFormFields {
    fn from(app: &App) -> Self {
        Self {
            tenant_id: app.tenant_id.clone(),
            name: app.name.clone(),
            mode: app.mode.to_string(),
            icon: app.icon.clone().unwrap_or_default(),
            icon_background: app.icon_background.clone().unwrap_or_default(),
            app_model_config_id: app
                .app_model_config_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            status: app.status.to_string(),
            enable_site: app.enable_site,
            enable_api: app.enable_api,
            api_rpm: i64::from(app.api_rpm),
            api_rph: i64::from(app.api_rph),
            is_demo: app.is_demo,
            is_public: app.is_public,
            is_universal: app.is_universal,
        }
    }
}

/// Numeric inputs on the app form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateField {
    ApiRpm,
    ApiRph,
}

impl RateField {
    fn name(self) -> &'static str {
        match self {
            Self::ApiRpm => "api_rpm",
            Self::ApiRph => "api_rph",
        }
    }
}

/// Modal create/edit form for apps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppForm {
    mode: FormMode,
    pub fields: AppFormFields,
    errors: FieldErrors,
    /// Raw input that could not be parsed at all
    input_errors: FieldErrors,
    /// Values as loaded, in edit mode
    original: Option<AppFormFields>,
}

impl AppForm {
    /// Empty form for a new app
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            fields: AppFormFields::default(),
            errors: FieldErrors::new(),
            input_errors: FieldErrors::new(),
            original: None,
        }
    }

    /// Form pre-filled from an existing app
    pub fn edit(app: &App) -> Self {
        let fields = AppFormFields::from(app);
        Self {
            mode: FormMode::Edit {
                id: app.id.to_string(),
            },
            original: Some(fields.clone()),
            fields,
            errors: FieldErrors::new(),
            input_errors: FieldErrors::new(),
        }
    }

    /// Create mode without a record, edit mode with one
    pub fn open(app: Option<&App>) -> Self {
        app.map_or_else(Self::create, Self::edit)
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    /// Tenant is fixed once the app exists
    pub fn tenant_editable(&self) -> bool {
        !self.is_editing()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Drop the message for a field once the operator touches it
    pub fn clear_error(&mut self, field: &str) {
        self.errors.remove(field);
    }

    /// Set a tenant id; ignored in edit mode
    pub fn set_tenant_id(&mut self, value: impl Into<String>) {
        if self.tenant_editable() {
            self.fields.tenant_id = value.into();
            self.clear_error("tenant_id");
        }
    }

    /// Set a numeric field from raw input. Blank input counts as zero.
    pub fn set_rate(&mut self, field: RateField, raw: &str) {
        let raw = raw.trim();
        let parsed = if raw.is_empty() {
            Ok(0)
        } else {
            raw.parse::<i64>()
        };
        self.clear_error(field.name());
        self.input_errors.remove(field.name());
        match parsed {
            Ok(value) => match field {
                RateField::ApiRpm => self.fields.api_rpm = value,
                RateField::ApiRph => self.fields.api_rph = value,
            },
            Err(_) => {
                self.input_errors.add(field.name(), "Must be a whole number");
                self.errors.merge(&self.input_errors);
            }
        }
    }

    /// Run every rule; errors are kept on the form for display
    pub fn validate(&mut self) -> bool {
        let mut errors = self.input_errors.clone();
        if let Err(AppsError::Validation { errors: rule_errors }) = self.to_new_app().validate() {
            errors.merge(&rule_errors);
        }
        let valid = errors.is_empty();
        self.errors = errors;
        valid
    }

    /// Record errors reported by the backend after submit
    pub fn absorb(&mut self, error: &AppsError) {
        if let AppsError::Validation { errors } = error {
            self.errors = errors.clone();
        }
    }

    /// Full create input; every field is sent explicitly
    pub fn to_new_app(&self) -> NewApp {
        let f = &self.fields;
        NewApp {
            tenant_id: f.tenant_id.clone(),
            name: f.name.clone(),
            mode: f.mode.clone(),
            icon: non_blank(&f.icon),
            icon_background: non_blank(&f.icon_background),
            app_model_config_id: non_blank(&f.app_model_config_id),
            status: Some(f.status.clone()),
            enable_site: Some(f.enable_site),
            enable_api: Some(f.enable_api),
            api_rpm: Some(f.api_rpm),
            api_rph: Some(f.api_rph),
            is_demo: Some(f.is_demo),
            is_public: Some(f.is_public),
            is_universal: Some(f.is_universal),
        }
    }

    /// Update input holding only the fields the operator changed; never
    /// carries the tenant. A cleared optional field is sent as a clear.
    pub fn to_patch(&self) -> AppPatch {
        let f = &self.fields;
        let base = self.original.as_ref();
        let text = |new: &String, old: Option<&String>| {
            changed(new, old).map(|v| non_blank(&v))
        };
        AppPatch {
            name: changed(&f.name, base.map(|b| &b.name)),
            mode: changed(&f.mode, base.map(|b| &b.mode)),
            icon: text(&f.icon, base.map(|b| &b.icon)),
            icon_background: text(&f.icon_background, base.map(|b| &b.icon_background)),
            app_model_config_id: text(
                &f.app_model_config_id,
                base.map(|b| &b.app_model_config_id),
            ),
            status: changed(&f.status, base.map(|b| &b.status)),
            enable_site: changed(&f.enable_site, base.map(|b| &b.enable_site)),
            enable_api: changed(&f.enable_api, base.map(|b| &b.enable_api)),
            api_rpm: changed(&f.api_rpm, base.map(|b| &b.api_rpm)),
            api_rph: changed(&f.api_rph, base.map(|b| &b.api_rph)),
            is_demo: changed(&f.is_demo, base.map(|b| &b.is_demo)),
            is_public: changed(&f.is_public, base.map(|b| &b.is_public)),
            is_universal: changed(&f.is_universal, base.map(|b| &b.is_universal)),
        }
    }
}

fn changed<T: PartialEq + Clone>(new: &T, old: Option<&T>) -> Option<T> {
    (old != Some(new)).then(|| new.clone())
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Create/edit form for the legacy bot console
#[derive(Debug, Clone, PartialEq)]
pub struct BotForm {
    mode: FormMode,
    pub draft: BotDraft,
    pub tag_input: String,
    errors: FieldErrors,
}

impl BotForm {
    pub fn open(bot: Option<&Bot>) -> Self {
        match bot {
            Some(bot) => Self {
                mode: FormMode::Edit { id: bot.id.clone() },
                draft: BotDraft::from(bot),
                tag_input: String::new(),
                errors: FieldErrors::new(),
            },
            None => Self {
                mode: FormMode::Create,
                draft: BotDraft::default(),
                tag_input: String::new(),
                errors: FieldErrors::new(),
            },
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Move the pending tag input into the tag list, skipping blanks and duplicates
    pub fn add_tag(&mut self) -> bool {
        let tag = self.tag_input.trim().to_string();
        if tag.is_empty() || self.draft.tags.contains(&tag) {
            return false;
        }
        self.draft.tags.push(tag);
        self.tag_input.clear();
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.draft.tags.retain(|t| t != tag);
    }

    pub fn validate(&mut self) -> bool {
        match self.draft.validate() {
            Ok(()) => {
                self.errors = FieldErrors::new();
                true
            }
            Err(AppsError::Validation { errors }) => {
                self.errors = errors;
                false
            }
            Err(_) => false,
        }
    }
}
