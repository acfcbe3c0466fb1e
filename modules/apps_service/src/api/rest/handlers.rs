//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::{AppDto, CreateAppRequest, UpdateAppRequest},
    error::{map_domain_error, map_json_rejection, Problem},
};
use crate::domain::Service;
use axum::{
    extract::{rejection::JsonRejection, Path},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

/// Create a new app
#[utoipa::path(
    post,
    path = "/apps",
    tag = "apps",
    request_body = CreateAppRequest,
    responses(
        (status = 201, description = "App created", body = AppDto),
        (status = 400, description = "Validation failure or name conflict", body = Problem),
    )
)]
pub async fn create_app(
    service: Arc<Service>,
    body: Result<Json<CreateAppRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AppDto>), Problem> {
    let Json(req) = body.map_err(map_json_rejection)?;
    let app = service.create(req.into()).await.map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(app.into())))
}

/// List all apps, newest first
#[utoipa::path(
    get,
    path = "/apps",
    tag = "apps",
    responses((status = 200, description = "All apps", body = [AppDto]))
)]
pub async fn list_apps(service: Arc<Service>) -> Result<Json<Vec<AppDto>>, Problem> {
    let apps = service.find_all().await.map_err(map_domain_error)?;

    Ok(Json(apps.into_iter().map(AppDto::from).collect()))
}

/// Get a specific app
#[utoipa::path(
    get,
    path = "/app/{id}",
    tag = "apps",
    params(("id" = String, Path, description = "App UUID")),
    responses(
        (status = 200, description = "The app", body = AppDto),
        (status = 400, description = "Malformed UUID", body = Problem),
        (status = 404, description = "No such app", body = Problem),
    )
)]
pub async fn get_app(
    service: Arc<Service>,
    Path(id): Path<String>,
) -> Result<Json<AppDto>, Problem> {
    let app = service.find_one(&id).await.map_err(map_domain_error)?;

    Ok(Json(app.into()))
}

/// Partially update an app
#[utoipa::path(
    patch,
    path = "/app/{id}",
    tag = "apps",
    params(("id" = String, Path, description = "App UUID")),
    request_body = UpdateAppRequest,
    responses(
        (status = 200, description = "Updated app", body = AppDto),
        (status = 400, description = "Malformed UUID or invalid fields", body = Problem),
        (status = 404, description = "No such app", body = Problem),
    )
)]
pub async fn update_app(
    service: Arc<Service>,
    Path(id): Path<String>,
    body: Result<Json<UpdateAppRequest>, JsonRejection>,
) -> Result<Json<AppDto>, Problem> {
    let Json(req) = body.map_err(map_json_rejection)?;
    let app = service
        .update(&id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(app.into()))
}

/// Delete an app, returning the removed record
#[utoipa::path(
    delete,
    path = "/app/{id}",
    tag = "apps",
    params(("id" = String, Path, description = "App UUID")),
    responses(
        (status = 200, description = "Deleted app", body = AppDto),
        (status = 400, description = "Malformed UUID", body = Problem),
        (status = 404, description = "No such app", body = Problem),
    )
)]
pub async fn delete_app(
    service: Arc<Service>,
    Path(id): Path<String>,
) -> Result<Json<AppDto>, Problem> {
    let app = service.remove(&id).await.map_err(map_domain_error)?;

    Ok(Json(app.into()))
}

/// Toggle an app between normal and disabled
#[utoipa::path(
    post,
    path = "/app/{id}/toggle",
    tag = "apps",
    params(("id" = String, Path, description = "App UUID")),
    responses(
        (status = 200, description = "App with its new status", body = AppDto),
        (status = 400, description = "Malformed UUID", body = Problem),
        (status = 404, description = "No such app", body = Problem),
    )
)]
pub async fn toggle_app_status(
    service: Arc<Service>,
    Path(id): Path<String>,
) -> Result<Json<AppDto>, Problem> {
    let app = service.toggle_status(&id).await.map_err(map_domain_error)?;

    Ok(Json(app.into()))
}
