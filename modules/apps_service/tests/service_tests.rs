//! Integration tests for the apps domain service

use apps_service::contract::*;

mod common;
use common::{create_service, print_test_header};

fn new_app(name: &str) -> NewApp {
    NewApp::new("t1", name, "chat")
}

#[tokio::test]
async fn test_full_lifecycle() {
    print_test_header(
        "test_full_lifecycle",
        &["Create, read, update, toggle and delete one app end to end"],
    );
    let (service, repo) = create_service();

    let created = service.create(new_app("Bot A")).await.unwrap();
    assert_eq!(created.status, AppStatus::Normal);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = service.find_one(&created.id.to_string()).await.unwrap();
    assert_eq!(fetched, created);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let patch = AppPatch {
        name: Some("Bot B".to_string()),
        api_rpm: Some(60),
        ..AppPatch::default()
    };
    let updated = service
        .update(&created.id.to_string(), patch)
        .await
        .unwrap();
    assert_eq!(updated.name, "Bot B");
    assert_eq!(updated.api_rpm, 60);
    assert_eq!(updated.tenant_id, "t1");
    assert_eq!(updated.mode, AppMode::Chat);
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.created_at, created.created_at);

    let toggled = service
        .toggle_status(&created.id.to_string())
        .await
        .unwrap();
    assert_eq!(toggled.status, AppStatus::Disabled);

    let removed = service.remove(&created.id.to_string()).await.unwrap();
    assert_eq!(removed.id, created.id);
    repo.print_state("after delete");
    assert_eq!(repo.count(), 0);

    let err = service.find_one(&created.id.to_string()).await.unwrap_err();
    assert_eq!(err, AppsError::not_found(created.id));
}

#[tokio::test]
async fn test_create_applies_defaults() {
    print_test_header(
        "test_create_applies_defaults",
        &["Omitted optional fields receive their documented defaults"],
    );
    let (service, _repo) = create_service();

    let app = service.create(new_app("Defaults")).await.unwrap();
    assert_eq!(app.status, AppDefaults::STATUS);
    assert!(!app.enable_site);
    assert!(!app.enable_api);
    assert!(!app.is_demo);
    assert!(!app.is_public);
    assert!(!app.is_universal);
    assert_eq!(app.api_rpm, 0);
    assert_eq!(app.api_rph, 0);
    assert_eq!(app.app_model_config_id, None);
}

#[tokio::test]
async fn test_create_reports_every_invalid_field() {
    print_test_header(
        "test_create_reports_every_invalid_field",
        &["All failing fields come back together and nothing is stored"],
    );
    let (service, repo) = create_service();

    let input = NewApp {
        api_rpm: Some(-1),
        status: Some("archived".to_string()),
        ..NewApp::default()
    };
    let err = service.create(input).await.unwrap_err();
    let AppsError::Validation { errors } = err else {
        panic!("expected validation error, got {err:?}");
    };
    for field in ["tenant_id", "name", "mode", "api_rpm", "status"] {
        assert!(errors.contains(field), "missing {field}");
    }
    assert_eq!(repo.count(), 0);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    print_test_header("test_list_is_newest_first", &["find_all orders by created_at desc"]);
    let (service, _repo) = create_service();

    assert!(service.find_all().await.unwrap().is_empty());

    for name in ["first", "second", "third"] {
        service.create(new_app(name)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    let names: Vec<String> = service
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn test_toggle_is_an_involution() {
    print_test_header(
        "test_toggle_is_an_involution",
        &[
            "Toggling twice restores normal/disabled",
            "maintenance leaves to normal",
        ],
    );
    let (service, _repo) = create_service();

    let app = service.create(new_app("Toggle")).await.unwrap();
    let id = app.id.to_string();
    let once = service.toggle_status(&id).await.unwrap();
    let twice = service.toggle_status(&id).await.unwrap();
    assert_eq!(once.status, AppStatus::Disabled);
    assert_eq!(twice.status, AppStatus::Normal);

    let input = NewApp {
        status: Some("maintenance".to_string()),
        ..new_app("Maint")
    };
    let app = service.create(input).await.unwrap();
    let toggled = service.toggle_status(&app.id.to_string()).await.unwrap();
    assert_eq!(toggled.status, AppStatus::Normal);
}

#[tokio::test]
async fn test_bad_format_never_touches_storage() {
    print_test_header(
        "test_bad_format_never_touches_storage",
        &["Malformed identifiers fail before any repository call"],
    );
    let (service, repo) = create_service();

    for id in ["not-a-uuid", "", "123e4567-e89b-62d3-a456-426614174000"] {
        let err = service.find_one(id).await.unwrap_err();
        assert_eq!(err, AppsError::BadFormat { id: id.to_string() });
        assert!(matches!(
            service.update(id, AppPatch::default()).await,
            Err(AppsError::BadFormat { .. })
        ));
        assert!(matches!(
            service.remove(id).await,
            Err(AppsError::BadFormat { .. })
        ));
        assert!(matches!(
            service.toggle_status(id).await,
            Err(AppsError::BadFormat { .. })
        ));
    }
    assert_eq!(repo.calls(), 0);
}

#[tokio::test]
async fn test_missing_app_is_not_found() {
    print_test_header(
        "test_missing_app_is_not_found",
        &["Well-formed but unknown ids yield NotFound for every operation"],
    );
    let (service, _repo) = create_service();
    let id = uuid::Uuid::new_v4().to_string();

    let expected = AppsError::NotFound { id: id.clone() };
    assert_eq!(service.find_one(&id).await.unwrap_err(), expected);
    assert_eq!(
        service.update(&id, AppPatch::default()).await.unwrap_err(),
        expected
    );
    assert_eq!(service.remove(&id).await.unwrap_err(), expected);
    assert_eq!(service.toggle_status(&id).await.unwrap_err(), expected);
}

#[tokio::test]
async fn test_duplicate_name_is_conflict() {
    print_test_header(
        "test_duplicate_name_is_conflict",
        &["Names are unique on create and on rename"],
    );
    let (service, repo) = create_service();

    service.create(new_app("Taken")).await.unwrap();
    let err = service.create(new_app("Taken")).await.unwrap_err();
    assert!(matches!(err, AppsError::Conflict { .. }));
    assert_eq!(repo.count(), 1);

    let other = service.create(new_app("Free")).await.unwrap();
    let patch = AppPatch {
        name: Some("Taken".to_string()),
        ..AppPatch::default()
    };
    let err = service
        .update(&other.id.to_string(), patch)
        .await
        .unwrap_err();
    assert!(matches!(err, AppsError::Conflict { .. }));
}

#[tokio::test]
async fn test_concurrent_delete_surfaces_as_not_found() {
    print_test_header(
        "test_concurrent_delete_surfaces_as_not_found",
        &["A row removed between the existence check and the write is NotFound"],
    );
    let (service, repo) = create_service();

    let app = service.create(new_app("Racy")).await.unwrap();
    let id = app.id.to_string();

    repo.vanish_before_next_write();
    let err = service.toggle_status(&id).await.unwrap_err();
    assert_eq!(err, AppsError::not_found(app.id));

    let app = service.create(new_app("Racy again")).await.unwrap();
    repo.vanish_before_next_write();
    let err = service.remove(&app.id.to_string()).await.unwrap_err();
    assert_eq!(err, AppsError::not_found(app.id));
}

#[tokio::test]
async fn test_concurrent_delete_during_update() {
    print_test_header(
        "test_concurrent_delete_during_update",
        &["An update whose row disappears before the write is NotFound"],
    );
    let (service, repo) = create_service();

    let app = service.create(new_app("Racy update")).await.unwrap();
    repo.vanish_before_next_write();
    let patch = AppPatch {
        name: Some("Renamed".to_string()),
        ..AppPatch::default()
    };
    let err = service
        .update(&app.id.to_string(), patch)
        .await
        .unwrap_err();
    assert_eq!(err, AppsError::not_found(app.id));
    assert_eq!(repo.count(), 0);
}

#[tokio::test]
async fn test_update_clears_optional_columns() {
    print_test_header(
        "test_update_clears_optional_columns",
        &["null or blank clears icon, icon_background and app_model_config_id"],
    );
    let (service, _repo) = create_service();

    let config_id = uuid::Uuid::new_v4();
    let mut input = new_app("Decorated");
    input.icon = Some("🤖".to_string());
    input.icon_background = Some("#FFEAD5".to_string());
    input.app_model_config_id = Some(config_id.to_string());
    let app = service.create(input).await.unwrap();
    assert_eq!(app.app_model_config_id, Some(config_id));

    let patch = AppPatch {
        icon: Some(None),
        icon_background: Some(Some("   ".to_string())),
        app_model_config_id: Some(None),
        ..AppPatch::default()
    };
    let cleared = service.update(&app.id.to_string(), patch).await.unwrap();
    assert_eq!(cleared.icon, None);
    assert_eq!(cleared.icon_background, None);
    assert_eq!(cleared.app_model_config_id, None);
    assert_eq!(cleared.name, "Decorated");
}

#[tokio::test]
async fn test_update_validates_before_lookup() {
    print_test_header(
        "test_update_validates_before_lookup",
        &["Invalid patch fields are reported even for unknown ids"],
    );
    let (service, _repo) = create_service();

    let patch = AppPatch {
        mode: Some("agent".to_string()),
        ..AppPatch::default()
    };
    let err = service
        .update(&uuid::Uuid::new_v4().to_string(), patch)
        .await
        .unwrap_err();
    assert!(matches!(err, AppsError::Validation { ref errors } if errors.contains("mode")));
}
