//! Route registration

use super::{
    dto::{AppDto, CreateAppRequest, UpdateAppRequest},
    error::Problem,
    handlers, openapi,
};
use crate::domain::Service;
use anyhow::bail;
use axum::{
    extract::{rejection::JsonRejection, Path},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;

/// Register all REST routes under `base_path` (e.g. `/dify`)
pub fn register_routes(
    router: Router,
    base_path: &str,
    service: Arc<Service>,
) -> anyhow::Result<Router> {
    if !base_path.starts_with('/') || (base_path.len() > 1 && base_path.ends_with('/')) {
        bail!("base_path must start with '/' and must not end with '/': {base_path}");
    }

    let doc = Arc::new(openapi::document(base_path));

    let api = Router::new()
        .route("/apps", get(list_apps_handler).post(create_app_handler))
        .route(
            "/app/{id}",
            get(get_app_handler)
                .patch(update_app_handler)
                .delete(delete_app_handler),
        )
        .route("/app/{id}/toggle", post(toggle_app_status_handler))
        .route("/openapi.json", get(openapi_handler))
        // Add service as extension for handlers
        .layer(Extension(service))
        .layer(Extension(doc));

    let router = if base_path == "/" {
        router.merge(api)
    } else {
        router.nest(base_path, api)
    };

    Ok(router)
}

// ===== Handler wrappers that extract service from Extension =====

async fn create_app_handler(
    Extension(service): Extension<Arc<Service>>,
    body: Result<Json<CreateAppRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AppDto>), Problem> {
    handlers::create_app(service, body).await
}

async fn list_apps_handler(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<Vec<AppDto>>, Problem> {
    handlers::list_apps(service).await
}

async fn get_app_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<String>,
) -> Result<Json<AppDto>, Problem> {
    handlers::get_app(service, path).await
}

async fn update_app_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<String>,
    body: Result<Json<UpdateAppRequest>, JsonRejection>,
) -> Result<Json<AppDto>, Problem> {
    handlers::update_app(service, path, body).await
}

async fn delete_app_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<String>,
) -> Result<Json<AppDto>, Problem> {
    handlers::delete_app(service, path).await
}

async fn toggle_app_status_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<String>,
) -> Result<Json<AppDto>, Problem> {
    handlers::toggle_app_status(service, path).await
}

async fn openapi_handler(
    Extension(doc): Extension<Arc<utoipa::openapi::OpenApi>>,
) -> Json<utoipa::openapi::OpenApi> {
    Json((*doc).clone())
}
