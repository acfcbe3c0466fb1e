//! SeaORM entity for the apps table

use sea_orm::entity::prelude::*;

/// Apps table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "apps")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub tenant_id: String,

    /// Unique across all tenants
    #[sea_orm(unique)]
    pub name: String,

    /// One of chat, completion, workflow
    pub mode: String,

    pub icon: Option<String>,

    pub icon_background: Option<String>,

    pub app_model_config_id: Option<Uuid>,

    /// One of normal, disabled, maintenance
    pub status: String,

    pub enable_site: bool,

    pub enable_api: bool,

    pub api_rpm: i32,

    pub api_rph: i32,

    pub is_demo: bool,

    pub is_public: bool,

    pub is_universal: bool,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
