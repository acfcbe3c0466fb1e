//! REST DTOs with serde derives for HTTP API

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// App response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppDto {
    pub id: Uuid,

    #[schema(example = "t1")]
    pub tenant_id: String,

    #[schema(example = "Support Bot")]
    pub name: String,

    /// chat, completion or workflow
    #[schema(example = "chat")]
    pub mode: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "#4CAF50")]
    pub icon_background: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_model_config_id: Option<Uuid>,

    /// normal, disabled or maintenance
    #[schema(example = "normal")]
    pub status: String,

    pub enable_site: bool,
    pub enable_api: bool,
    pub api_rpm: u32,
    pub api_rph: u32,
    pub is_demo: bool,
    pub is_public: bool,
    pub is_universal: bool,

    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Create app request
///
/// Required fields default to empty so that missing ones are reported by
/// field validation together with every other problem.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateAppRequest {
    #[serde(default)]
    #[schema(example = "t1")]
    pub tenant_id: String,

    #[serde(default)]
    #[schema(example = "Support Bot")]
    pub name: String,

    #[serde(default)]
    #[schema(example = "chat")]
    pub mode: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_background: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_model_config_id: Option<String>,

    /// Defaults to "normal"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_site: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_api: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_rpm: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_rph: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_demo: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_universal: Option<bool>,
}

/// Partial update request. Has no `tenant_id`; a supplied one is ignored.
///
/// Optional columns distinguish an absent key (unchanged) from `null` (cleared).
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAppRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// `null` or `""` clears the value
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub icon: Option<Option<String>>,

    /// `null` or `""` clears the value
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub icon_background: Option<Option<String>>,

    /// `null` or `""` clears the value
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub app_model_config_id: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_site: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_api: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_rpm: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_rph: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_demo: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_universal: Option<bool>,
}

/// Present keys become `Some`, so `null` survives as `Some(None)`
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// Note: Conversion implementations live in mapper.rs
