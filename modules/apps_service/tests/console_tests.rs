//! Admin console tests over the in-process client

use apps_service::api::http::HttpClient;
use apps_service::api::native::NativeClient;
use apps_service::console::{AppForm, AppListController, ListState, NETWORK_RETRY_MESSAGE};
use apps_service::contract::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

mod common;
use apps_service::domain::Service;
use common::{create_service, print_test_header, InMemoryAppsRepository};

fn controller() -> (AppListController, Arc<AtomicUsize>) {
    let (controller, refreshes, _service, _repo) = controller_with_backend();
    (controller, refreshes)
}

fn controller_with_backend() -> (
    AppListController,
    Arc<AtomicUsize>,
    Arc<Service>,
    InMemoryAppsRepository,
) {
    let (service, repo) = create_service();
    let refreshes = Arc::new(AtomicUsize::new(0));
    let counter = refreshes.clone();
    let controller = AppListController::new(
        Arc::new(NativeClient::new(service.clone())),
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );
    (controller, refreshes, service, repo)
}

fn filled_form(name: &str) -> AppForm {
    let mut form = AppForm::open(None);
    form.set_tenant_id("t1");
    form.fields.name = name.to_string();
    form
}

#[tokio::test]
async fn test_save_create_then_edit() {
    print_test_header(
        "test_save_create_then_edit",
        &["Create mode calls create, edit mode calls update, list follows along"],
    );
    let (mut controller, refreshes) = controller();
    assert!(controller.list().is_loading());
    controller.load().await;
    assert!(controller.list().items().is_empty());

    let mut form = filled_form("Bot A");
    let created = controller.save(&mut form).await;
    assert!(created.success, "{:?}", created.message);
    assert_eq!(created.message.as_deref(), Some("App created"));
    let app = created.data.unwrap();
    assert_eq!(app.status, AppStatus::Normal);
    assert_eq!(app.icon_background.as_deref(), Some("#4CAF50"));
    assert_eq!(controller.list().items().len(), 1);

    let mut form = AppForm::open(Some(&app));
    form.set_tenant_id("t2");
    form.fields.name = "Bot B".to_string();
    let updated = controller.save(&mut form).await;
    assert!(updated.success);
    assert_eq!(updated.message.as_deref(), Some("App updated"));
    let app = updated.data.unwrap();
    assert_eq!(app.tenant_id, "t1");
    assert_eq!(controller.list().get(&app.id.to_string()).map(|a| a.name.as_str()), Some("Bot B"));
    assert_eq!(controller.list().items().len(), 1);

    assert_eq!(refreshes.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_invalid_form_is_not_submitted() {
    print_test_header(
        "test_invalid_form_is_not_submitted",
        &["Local validation blocks the call and keeps errors on the form"],
    );
    let (mut controller, refreshes) = controller();
    controller.load().await;

    let mut form = AppForm::open(None);
    form.fields.api_rpm = -1;
    let response = controller.save(&mut form).await;
    assert!(!response.success);
    assert!(form.errors().contains("tenant_id"));
    assert!(form.errors().contains("api_rpm"));
    assert!(response.errors.is_some());
    assert_eq!(refreshes.load(Ordering::SeqCst), 0);
    assert!(controller.list().items().is_empty());
}

#[tokio::test]
async fn test_backend_conflict_is_reported() {
    print_test_header(
        "test_backend_conflict_is_reported",
        &["Server-side failures come back as an unsuccessful envelope"],
    );
    let (mut controller, _refreshes) = controller();
    controller.load().await;

    assert!(controller.save(&mut filled_form("Same")).await.success);
    let response = controller.save(&mut filled_form("Same")).await;
    assert!(!response.success);
    assert_eq!(response.message.as_deref(), Some("App with this name already exists"));
    assert_eq!(controller.list().items().len(), 1);
}

#[tokio::test]
async fn test_toggle_and_delete_patch_the_list() {
    print_test_header(
        "test_toggle_and_delete_patch_the_list",
        &["Row actions update the local copy and fire the refresh callback"],
    );
    let (mut controller, refreshes) = controller();
    controller.load().await;
    let app = controller.save(&mut filled_form("Bot A")).await.data.unwrap();
    let id = app.id.to_string();

    let toggled = controller.toggle_status(&id).await;
    assert_eq!(toggled.message.as_deref(), Some("App status switched to disabled"));
    assert_eq!(controller.list().get(&id).map(|a| a.status), Some(AppStatus::Disabled));

    let deleted = controller.delete(&id).await;
    assert_eq!(deleted.data, Some(true));
    assert_eq!(deleted.message.as_deref(), Some("App deleted"));
    assert!(controller.list().items().is_empty());

    let missing = controller.delete(&id).await;
    assert!(!missing.success);
    assert_eq!(missing.message.as_deref(), Some("App does not exist"));

    let bad = controller.toggle_status("not-a-uuid").await;
    assert_eq!(bad.message.as_deref(), Some("Invalid app ID"));

    assert_eq!(refreshes.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_delete_by_uppercase_id_drops_the_row() {
    print_test_header(
        "test_delete_by_uppercase_id_drops_the_row",
        &["The local list is pruned by the deleted record's key, not the raw id"],
    );
    let (mut controller, _refreshes, _service, repo) = controller_with_backend();
    controller.load().await;
    let app = controller.save(&mut filled_form("Shouty")).await.data.unwrap();

    let deleted = controller.delete(&app.id.to_string().to_uppercase()).await;
    assert!(deleted.success, "{:?}", deleted.message);
    assert!(controller.list().items().is_empty());
    assert_eq!(repo.count(), 0);
}

#[tokio::test]
async fn test_edit_keeps_unset_optional_fields_unset() {
    print_test_header(
        "test_edit_keeps_unset_optional_fields_unset",
        &["Editing only the name never writes a default icon background"],
    );
    let (mut controller, _refreshes, service, _repo) = controller_with_backend();
    let plain = service.create(NewApp::new("t1", "Plain", "chat")).await.unwrap();
    assert_eq!(plain.icon_background, None);
    controller.load().await;

    let mut form = AppForm::open(Some(&plain));
    form.fields.name = "Plain renamed".to_string();
    let updated = controller.save(&mut form).await;
    assert!(updated.success, "{:?}", updated.message);

    let app = updated.data.unwrap();
    assert_eq!(app.name, "Plain renamed");
    assert_eq!(app.icon_background, None);
    assert_eq!(app.icon, None);
    assert_eq!(app.app_model_config_id, None);
}

#[tokio::test]
async fn test_unreachable_backend_fails_the_list() {
    print_test_header(
        "test_unreachable_backend_fails_the_list",
        &["A network failure leaves the list in the failed state"],
    );
    let client = HttpClient::new("http://127.0.0.1:9/dify").unwrap();
    let mut controller = AppListController::new(Arc::new(client), Box::new(|| {}));

    let state = controller.load().await;
    assert_eq!(state, &ListState::Failed(NETWORK_RETRY_MESSAGE.to_string()));
}
