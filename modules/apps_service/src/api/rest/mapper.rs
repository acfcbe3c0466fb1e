//! Mapper implementations for converting between DTOs and contract models
//!
//! Conversions run both ways: the gateway maps requests into contract input,
//! the HTTP client maps contract input back into requests.

use super::dto::{AppDto, CreateAppRequest, UpdateAppRequest};
use crate::contract::{self, UnknownVariant};

// ===== App conversions =====

impl From<contract::App> for AppDto {
    fn from(app: contract::App) -> Self {
        Self {
            id: app.id,
            tenant_id: app.tenant_id,
            name: app.name,
            mode: app.mode.to_string(),
            icon: app.icon,
            icon_background: app.icon_background,
            app_model_config_id: app.app_model_config_id,
            status: app.status.to_string(),
            enable_site: app.enable_site,
            enable_api: app.enable_api,
            api_rpm: app.api_rpm,
            api_rph: app.api_rph,
            is_demo: app.is_demo,
            is_public: app.is_public,
            is_universal: app.is_universal,
            created_at: app.created_at,
            updated_at: app.updated_at,
        }
    }
}

impl TryFrom<AppDto> for contract::App {
    type Error = UnknownVariant;

    fn try_from(dto: AppDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id,
            tenant_id: dto.tenant_id,
            name: dto.name,
            mode: dto.mode.parse()?,
            icon: dto.icon,
            icon_background: dto.icon_background,
            app_model_config_id: dto.app_model_config_id,
            status: dto.status.parse()?,
            enable_site: dto.enable_site,
            enable_api: dto.enable_api,
            api_rpm: dto.api_rpm,
            api_rph: dto.api_rph,
            is_demo: dto.is_demo,
            is_public: dto.is_public,
            is_universal: dto.is_universal,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        })
    }
}

// ===== Create conversions =====

impl From<CreateAppRequest> for contract::NewApp {
    fn from(req: CreateAppRequest) -> Self {
        Self {
            tenant_id: req.tenant_id,
            name: req.name,
            mode: req.mode,
            icon: req.icon,
            icon_background: req.icon_background,
            app_model_config_id: req.app_model_config_id,
            status: req.status,
            enable_site: req.enable_site,
            enable_api: req.enable_api,
            api_rpm: req.api_rpm,
            api_rph: req.api_rph,
            is_demo: req.is_demo,
            is_public: req.is_public,
            is_universal: req.is_universal,
        }
    }
}

impl From<contract::NewApp> for CreateAppRequest {
    fn from(input: contract::NewApp) -> Self {
        Self {
            tenant_id: input.tenant_id,
            name: input.name,
            mode: input.mode,
            icon: input.icon,
            icon_background: input.icon_background,
            app_model_config_id: input.app_model_config_id,
            status: input.status,
            enable_site: input.enable_site,
            enable_api: input.enable_api,
            api_rpm: input.api_rpm,
            api_rph: input.api_rph,
            is_demo: input.is_demo,
            is_public: input.is_public,
            is_universal: input.is_universal,
        }
    }
}

// ===== Update conversions =====

impl From<UpdateAppRequest> for contract::AppPatch {
    fn from(req: UpdateAppRequest) -> Self {
        Self {
            name: req.name,
            mode: req.mode,
            icon: req.icon,
            icon_background: req.icon_background,
            app_model_config_id: req.app_model_config_id,
            status: req.status,
            enable_site: req.enable_site,
            enable_api: req.enable_api,
            api_rpm: req.api_rpm,
            api_rph: req.api_rph,
            is_demo: req.is_demo,
            is_public: req.is_public,
            is_universal: req.is_universal,
        }
    }
}

impl From<contract::AppPatch> for UpdateAppRequest {
    fn from(patch: contract::AppPatch) -> Self {
        Self {
            name: patch.name,
            mode: patch.mode,
            icon: patch.icon,
            icon_background: patch.icon_background,
            app_model_config_id: patch.app_model_config_id,
            status: patch.status,
            enable_site: patch.enable_site,
            enable_api: patch.enable_api,
            api_rpm: patch.api_rpm,
            api_rph: patch.api_rph,
            is_demo: patch.is_demo,
            is_public: patch.is_public,
            is_universal: patch.is_universal,
        }
    }
}
