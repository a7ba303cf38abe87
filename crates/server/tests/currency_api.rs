use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;

async fn test_app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    server::app(Arc::new(engine))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn create_returns_201_and_is_fetched_back() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/currency",
        Some(json!({"name": "USD", "rate": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "USD");
    assert_eq!(created["rate"], 1.0);
    assert!(created["id"].as_str().is_some());

    let (status, current) = send(&app, "GET", "/currency", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(current, created);
    assert_eq!(current.as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn create_coerces_numeric_text_rate() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/currency",
        Some(json!({"name": "FCFA", "rate": "655.957"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["rate"], 655.957);
}

#[tokio::test]
async fn create_failures_are_generic_500() {
    let app = test_app().await;

    for body in [
        json!({"name": "USD", "rate": -1}),
        json!({"name": "USD", "rate": "abc"}),
        json!({"name": "  ", "rate": 1}),
        json!({"name": "USD"}),
    ] {
        let (status, error) = send(&app, "POST", "/currency", Some(body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error, json!({"error": "currency creation failed"}));
    }

    let (status, current) = send(&app, "GET", "/currency", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(current, Value::Null);
}

#[tokio::test]
async fn get_on_empty_store_is_null_with_200() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/currency", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn update_rate_only_keeps_name() {
    let app = test_app().await;
    let (_, created) = send(
        &app,
        "POST",
        "/currency",
        Some(json!({"name": "FCFA", "rate": 1})),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/currency/{id}"),
        Some(json!({"rate": 655.957})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "FCFA");
    assert_eq!(updated["rate"], 655.957);
}

#[tokio::test]
async fn update_unknown_id_is_404_and_creates_nothing() {
    let app = test_app().await;
    let missing = uuid::Uuid::new_v4();

    let (status, error) = send(
        &app,
        "PUT",
        &format!("/currency/{missing}"),
        Some(json!({"name": "USD", "rate": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error, json!({"error": "currency not found"}));

    let (status, _) = send(
        &app,
        "PUT",
        "/currency/undefined",
        Some(json!({"rate": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, current) = send(&app, "GET", "/currency", None).await;
    assert_eq!(current, Value::Null);
}

#[tokio::test]
async fn update_validation_failure_is_generic_500() {
    let app = test_app().await;
    let (_, created) = send(
        &app,
        "POST",
        "/currency",
        Some(json!({"name": "USD", "rate": 1})),
    )
    .await;
    let uri = format!("/currency/{}", created["id"].as_str().unwrap());

    let (status, error) = send(&app, "PUT", &uri, Some(json!({"rate": -3}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error, json!({"error": "currency update failed"}));

    let (status, _) = send(&app, "PUT", &uri, Some(json!({"name": ""}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, current) = send(&app, "GET", "/currency", None).await;
    assert_eq!(current, created);
}

#[tokio::test]
async fn identical_updates_are_idempotent() {
    let app = test_app().await;
    let (_, created) = send(
        &app,
        "POST",
        "/currency",
        Some(json!({"name": "USD", "rate": 1})),
    )
    .await;
    let uri = format!("/currency/{}", created["id"].as_str().unwrap());
    let body = json!({"name": "EUR", "rate": 0.92});

    let (_, first) = send(&app, "PUT", &uri, Some(body.clone())).await;
    let (status, second) = send(&app, "PUT", &uri, Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(second["name"], "EUR");
}

#[tokio::test]
async fn update_with_empty_body_returns_record_unchanged() {
    let app = test_app().await;
    let (_, created) = send(
        &app,
        "POST",
        "/currency",
        Some(json!({"name": "USD", "rate": 1})),
    )
    .await;
    let uri = format!("/currency/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(&app, "PUT", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, created);

    let (_, current) = send(&app, "GET", "/currency", None).await;
    assert_eq!(current, created);
}

#[tokio::test]
async fn update_without_json_content_type_is_generic_500() {
    let app = test_app().await;
    let (_, created) = send(
        &app,
        "POST",
        "/currency",
        Some(json!({"name": "USD", "rate": 1})),
    )
    .await;
    let uri = format!("/currency/{}", created["id"].as_str().unwrap());

    let request = Request::builder()
        .method("PUT")
        .uri(&uri)
        .body(Body::from(json!({"rate": 2}).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let error: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error, json!({"error": "currency update failed"}));

    let (_, current) = send(&app, "GET", "/currency", None).await;
    assert_eq!(current, created);
}
