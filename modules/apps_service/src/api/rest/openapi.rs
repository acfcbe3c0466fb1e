//! OpenAPI document for the apps REST surface

use super::{
    dto::{AppDto, CreateAppRequest, UpdateAppRequest},
    error::Problem,
    handlers,
};
use utoipa::openapi::server::Server;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::create_app,
        handlers::list_apps,
        handlers::get_app,
        handlers::update_app,
        handlers::delete_app,
        handlers::toggle_app_status,
    ),
    components(schemas(AppDto, CreateAppRequest, UpdateAppRequest, Problem)),
    tags((name = "apps", description = "Dify app administration"))
)]
pub struct ApiDoc;

/// Build the document with paths relative to `base_path`
pub fn document(base_path: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(base_path)]);
    doc
}
