//! HTTP client tests against a mocked gateway

use apps_service::api::http::HttpClient;
use apps_service::contract::*;
use httpmock::prelude::*;
use serde_json::{json, Value};

mod common;
use common::print_test_header;

const APP_ID: &str = "3f2b8c1e-5a4d-4e6f-9b7a-1c2d3e4f5a6b";

fn app_json(status: &str) -> Value {
    json!({
        "id": APP_ID,
        "tenant_id": "t1",
        "name": "Bot A",
        "mode": "chat",
        "status": status,
        "enable_site": false,
        "enable_api": false,
        "api_rpm": 0,
        "api_rph": 0,
        "is_demo": false,
        "is_public": false,
        "is_universal": false,
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z"
    })
}

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(&format!("{}/dify", server.base_url())).unwrap()
}

#[tokio::test]
async fn test_list_and_create_hit_collection_route() {
    print_test_header(
        "test_list_and_create_hit_collection_route",
        &["GET and POST go to {base}/apps"],
    );
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/dify/apps");
            then.status(200).json_body(json!([app_json("normal")]));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/dify/apps");
            then.status(201).json_body(app_json("normal"));
        })
        .await;

    let client = client_for(&server);
    let apps = client.list_apps().await.unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].mode, AppMode::Chat);

    let app = client
        .create_app(NewApp::new("t1", "Bot A", "chat"))
        .await
        .unwrap();
    assert_eq!(app.id.to_string(), APP_ID);

    list.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
async fn test_toggle_posts_to_toggle_route() {
    print_test_header("test_toggle_posts_to_toggle_route", &["POST {base}/app/{id}/toggle"]);
    let server = MockServer::start_async().await;
    let toggle = server
        .mock_async(|when, then| {
            when.method(POST).path(format!("/dify/app/{APP_ID}/toggle"));
            then.status(200).json_body(app_json("disabled"));
        })
        .await;

    let app = client_for(&server).toggle_app_status(APP_ID).await.unwrap();
    assert_eq!(app.status, AppStatus::Disabled);
    toggle.assert_async().await;
}

#[tokio::test]
async fn test_problem_responses_become_domain_errors() {
    print_test_header(
        "test_problem_responses_become_domain_errors",
        &["Problem bodies are mapped back to AppsError with the sent id"],
    );
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/dify/app/{APP_ID}"));
            then.status(404).json_body(json!({
                "type": "https://httpstatuses.io/404",
                "title": "App Not Found",
                "status": 404,
                "code": "not_found"
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(PATCH).path(format!("/dify/app/{APP_ID}"));
            then.status(400).json_body(json!({
                "type": "https://httpstatuses.io/400",
                "title": "Validation Error",
                "status": 400,
                "code": "validation",
                "errors": {"name": "App name is required"}
            }));
        })
        .await;

    let client = client_for(&server);
    let err = client.get_app(APP_ID).await.unwrap_err();
    assert_eq!(err, AppsError::NotFound { id: APP_ID.to_string() });

    let patch = AppPatch {
        name: Some(String::new()),
        ..AppPatch::default()
    };
    let err = client.update_app(APP_ID, patch).await.unwrap_err();
    let AppsError::Validation { errors } = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors.get("name"), Some("App name is required"));
}

#[tokio::test]
async fn test_non_problem_error_body_is_internal() {
    print_test_header(
        "test_non_problem_error_body_is_internal",
        &["A 5xx without a problem body is still reported"],
    );
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path(format!("/dify/app/{APP_ID}"));
            then.status(502).body("bad gateway");
        })
        .await;

    let err = client_for(&server).delete_app(APP_ID).await.unwrap_err();
    assert!(matches!(err, AppsError::Internal { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_raw_backend_error_bodies_keep_their_meaning() {
    print_test_header(
        "test_raw_backend_error_bodies_keep_their_meaning",
        &[
            "{statusCode, message, error} bodies are mapped by status",
            "400 naming a UUID -> BadFormat, 400 list -> Validation",
            "404 -> NotFound, 409 -> Conflict with the backend message",
        ],
    );
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/dify/app/not-a-uuid");
            then.status(400).json_body(json!({
                "statusCode": 400,
                "message": "Invalid UUID format",
                "error": "Bad Request"
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(PATCH).path(format!("/dify/app/{APP_ID}"));
            then.status(400).json_body(json!({
                "statusCode": 400,
                "message": ["name should not be empty", "api_rpm must not be less than 0"],
                "error": "Bad Request"
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path(format!("/dify/app/{APP_ID}"));
            then.status(404).json_body(json!({
                "statusCode": 404,
                "message": "App not found",
                "error": "Not Found"
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/dify/apps");
            then.status(409).json_body(json!({
                "statusCode": 409,
                "message": "App name already taken",
                "error": "Conflict"
            }));
        })
        .await;

    let client = client_for(&server);

    let err = client.get_app("not-a-uuid").await.unwrap_err();
    assert_eq!(err, AppsError::BadFormat { id: "not-a-uuid".to_string() });

    let patch = AppPatch {
        name: Some(String::new()),
        ..AppPatch::default()
    };
    let err = client.update_app(APP_ID, patch).await.unwrap_err();
    let AppsError::Validation { errors } = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors.get("name"), Some("name should not be empty"));
    assert_eq!(errors.get("api_rpm"), Some("api_rpm must not be less than 0"));

    let err = client.delete_app(APP_ID).await.unwrap_err();
    assert_eq!(err, AppsError::NotFound { id: APP_ID.to_string() });

    let err = client
        .create_app(NewApp::new("t1", "Bot A", "chat"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AppsError::Conflict {
            reason: "App name already taken".to_string()
        }
    );
}

#[tokio::test]
async fn test_unreachable_gateway_is_network_error() {
    print_test_header(
        "test_unreachable_gateway_is_network_error",
        &["Transport failures surface as Network"],
    );
    let client = HttpClient::new("http://127.0.0.1:9/dify").unwrap();
    let err = client.list_apps().await.unwrap_err();
    assert!(matches!(err, AppsError::Network { .. }), "got {err:?}");
}
