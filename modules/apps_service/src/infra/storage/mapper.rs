//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity;
use crate::contract::{App, AppChanges};
use anyhow::Context;
use sea_orm::ActiveValue::{NotSet, Set};

impl TryFrom<entity::Model> for App {
    type Error = anyhow::Error;

    fn try_from(row: entity::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            mode: row
                .mode
                .parse()
                .with_context(|| format!("app {} has invalid mode", row.id))?,
            status: row
                .status
                .parse()
                .with_context(|| format!("app {} has invalid status", row.id))?,
            api_rpm: u32::try_from(row.api_rpm).context("negative api_rpm in storage")?,
            api_rph: u32::try_from(row.api_rph).context("negative api_rph in storage")?,
            id: row.id,
            tenant_id: row.tenant_id,
            name: row.name,
            icon: row.icon,
            icon_background: row.icon_background,
            app_model_config_id: row.app_model_config_id,
            enable_site: row.enable_site,
            enable_api: row.enable_api,
            is_demo: row.is_demo,
            is_public: row.is_public,
            is_universal: row.is_universal,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<&App> for entity::ActiveModel {
    type Error = anyhow::Error;

    fn try_from(app: &App) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Set(app.id),
            tenant_id: Set(app.tenant_id.clone()),
            name: Set(app.name.clone()),
            mode: Set(app.mode.as_str().to_string()),
            icon: Set(app.icon.clone()),
            icon_background: Set(app.icon_background.clone()),
            app_model_config_id: Set(app.app_model_config_id),
            status: Set(app.status.as_str().to_string()),
            enable_site: Set(app.enable_site),
            enable_api: Set(app.enable_api),
            api_rpm: Set(i32::try_from(app.api_rpm).context("api_rpm out of range")?),
            api_rph: Set(i32::try_from(app.api_rph).context("api_rph out of range")?),
            is_demo: Set(app.is_demo),
            is_public: Set(app.is_public),
            is_universal: Set(app.is_universal),
            created_at: Set(app.created_at),
            updated_at: Set(app.updated_at),
        })
    }
}

/// Build a partial active model touching only the changed columns
pub fn changes_to_active(
    id: uuid::Uuid,
    changes: &AppChanges,
    now: chrono::DateTime<chrono::Utc>,
) -> anyhow::Result<entity::ActiveModel> {
    fn opt<T: Into<sea_orm::Value>>(v: Option<T>) -> sea_orm::ActiveValue<T> {
        match v {
            Some(v) => Set(v),
            None => NotSet,
        }
    }

    let rate = |v: Option<u32>, field: &str| -> anyhow::Result<sea_orm::ActiveValue<i32>> {
        match v {
            Some(v) => Ok(Set(
                i32::try_from(v).with_context(|| format!("{field} out of range"))?
            )),
            None => Ok(NotSet),
        }
    };

    Ok(entity::ActiveModel {
        id: Set(id),
        tenant_id: NotSet,
        name: opt(changes.name.clone()),
        mode: opt(changes.mode.map(|m| m.as_str().to_string())),
        icon: opt(changes.icon.clone()),
        icon_background: opt(changes.icon_background.clone()),
        app_model_config_id: opt(changes.app_model_config_id),
        status: opt(changes.status.map(|s| s.as_str().to_string())),
        enable_site: opt(changes.enable_site),
        enable_api: opt(changes.enable_api),
        api_rpm: rate(changes.api_rpm, "api_rpm")?,
        api_rph: rate(changes.api_rph, "api_rph")?,
        is_demo: opt(changes.is_demo),
        is_public: opt(changes.is_public),
        is_universal: opt(changes.is_universal),
        created_at: NotSet,
        updated_at: Set(now),
    })
}
