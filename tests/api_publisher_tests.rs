//! 出版商 API 集成测试

use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;

mod common;
use common::{
    create_lazy_app, json_request, login, read_json, seed_admin, setup_test_app, ADMIN_PASSWORD,
    ADMIN_USERNAME,
};

#[tokio::test]
async fn test_create_publisher_requires_token() {
    let app = create_lazy_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/v1/publishers",
            &json!({ "name": "Acme", "city": "Springfield" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
#[ignore] // 需要数据库
async fn test_create_publisher() {
    let (state, app) = setup_test_app().await;
    seed_admin(&state).await;
    let (access_token, _) = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/v1/publishers",
            &json!({ "name": "Acme", "city": "Springfield" }),
            Some(&access_token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = read_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["name"], "Acme");
    assert_eq!(json["data"]["city"], "Springfield");

    let id = json["data"]["id"].as_i64().unwrap();
    let stored = base_api::repository::PublisherRepository::new(
        state.db.clone(),
        std::time::Duration::from_secs(5),
    )
    .find_by_id(id)
    .await
    .unwrap();
    assert_eq!(stored.name, "Acme");
}

#[tokio::test]
#[serial]
#[ignore] // 需要数据库
async fn test_create_publisher_duplicate_name() {
    let (state, app) = setup_test_app().await;
    seed_admin(&state).await;
    let (access_token, _) = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let body = json!({ "name": "Acme", "city": "Springfield" });
    let first = app
        .clone()
        .oneshot(json_request("POST", "/v1/publishers", &body, Some(&access_token)))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request("POST", "/v1/publishers", &body, Some(&access_token)))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[serial]
#[ignore] // 需要数据库
async fn test_create_publisher_validation() {
    let (state, app) = setup_test_app().await;
    seed_admin(&state).await;
    let (access_token, _) = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/v1/publishers",
            &json!({ "name": "A", "city": "Springfield" }),
            Some(&access_token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = read_json(response).await;
    assert_eq!(json["errors"][0]["field"], "name");
}

#[tokio::test]
#[serial]
#[ignore] // 需要数据库
async fn test_create_publisher_padded_name_rejected() {
    let (state, app) = setup_test_app().await;
    seed_admin(&state).await;
    let (access_token, _) = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/v1/publishers",
            &json!({ "name": "  A   ", "city": "Springfield" }),
            Some(&access_token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = read_json(response).await;
    assert_eq!(json["errors"][0]["field"], "name");
}
