//! End-to-end tests of the HTTP API over an in-memory SQLite store.

mod support;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use user_service_lib::api::{create_router, AppState};

use support::{insert_job, test_database};

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_user_lifecycle() {
    let db = test_database().await;
    let app = create_router(AppState::from_database(&db));

    let (status, created) = call(
        &app,
        Method::POST,
        "/users",
        Some(json!({
            "first_name": "Grace",
            "last_name": "Hopper",
            "username": "grace",
            "password": "cobol",
            "role": "admin",
            "age": 85,
            "locations": ["Arlington", "New York"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = call(&app, Method::GET, &format!("/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["location"], json!(["Arlington", "New York"]));
    assert!(fetched.get("password").is_none());

    let (status, updated) = call(
        &app,
        Method::PATCH,
        &format!("/users/{}", id),
        Some(json!({"age": 31})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["age"], 31);
    assert_eq!(updated["first_name"], "Grace");
    assert_eq!(updated["role"], "admin");
    assert_eq!(updated["location"], json!(["Arlington", "New York"]));

    let (status, deleted) = call(&app, Method::DELETE, &format!("/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({"status": "ok", "id": id}));

    let (status, body) = call(&app, Method::GET, &format!("/users/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_with_empty_body_stores_nulls() {
    let db = test_database().await;
    let app = create_router(AppState::from_database(&db));

    let (status, created) = call(&app, Method::POST, "/users", Some(json!({}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(created["first_name"].is_null());
    assert!(created["age"].is_null());
    assert_eq!(created["location"], json!([]));
}

#[tokio::test]
async fn test_update_null_overwrites_field() {
    let db = test_database().await;
    let app = create_router(AppState::from_database(&db));
    let (_, created) = call(
        &app,
        Method::POST,
        "/users",
        Some(json!({"first_name": "Alan", "last_name": "Turing"})),
    )
    .await;
    let uri = format!("/users/{}", created["id"]);

    let (status, updated) = call(&app, Method::PATCH, &uri, Some(json!({"last_name": null}))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(updated["last_name"].is_null());
    assert_eq!(updated["first_name"], "Alan");
}

#[tokio::test]
async fn test_list_reports_published_ads() {
    let db = test_database().await;
    let app = create_router(AppState::from_database(&db));
    let (_, author) = call(
        &app,
        Method::POST,
        "/users",
        Some(json!({"username": "author", "locations": ["Oslo"]})),
    )
    .await;
    let (_, reader) = call(&app, Method::POST, "/users", Some(json!({"username": "reader"}))).await;

    let author_id = author["id"].as_i64().unwrap() as i32;
    insert_job(&db, author_id, true).await;
    insert_job(&db, author_id, false).await;

    let (status, listing) = call(&app, Method::GET, "/users", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing.as_array().unwrap().len(), 2);
    assert_eq!(listing[0]["id"], author["id"]);
    assert_eq!(listing[0]["total_ads"], 1);
    assert_eq!(listing[0]["location"], json!(["Oslo"]));
    assert_eq!(listing[1]["id"], reader["id"]);
    assert_eq!(listing[1]["total_ads"], 0);
}

#[tokio::test]
async fn test_clearing_locations_removes_shared_location_for_everyone() {
    let db = test_database().await;
    let app = create_router(AppState::from_database(&db));
    let (_, first) = call(
        &app,
        Method::POST,
        "/users",
        Some(json!({"username": "first", "locations": ["A", "B"]})),
    )
    .await;
    let (_, second) = call(
        &app,
        Method::POST,
        "/users",
        Some(json!({"username": "second", "locations": ["B", "C"]})),
    )
    .await;

    let (status, cleared) = call(
        &app,
        Method::PATCH,
        &format!("/users/{}", first["id"]),
        Some(json!({"locations": []})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["location"], json!([]));

    let (_, second) = call(&app, Method::GET, &format!("/users/{}", second["id"]), None).await;
    assert_eq!(second["location"], json!(["C"]));
}

#[tokio::test]
async fn test_missing_user_returns_not_found() {
    let db = test_database().await;
    let app = create_router(AppState::from_database(&db));

    let (status, _) = call(&app, Method::GET, "/users/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::PATCH, "/users/999", Some(json!({"age": 1}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::DELETE, "/users/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let db = test_database().await;
    let app = create_router(AppState::from_database(&db));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("[1, 2"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, listing) = call(&app, Method::GET, "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing, json!([]));
}

#[tokio::test]
async fn test_array_body_creates_nothing() {
    let db = test_database().await;
    let app = create_router(AppState::from_database(&db));

    let (status, body) = call(
        &app,
        Method::POST,
        "/users",
        Some(json!(["Ada", "Lovelace", "ada", "pw", "admin", 36, ["X"]])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MALFORMED_INPUT");

    let (_, listing) = call(&app, Method::GET, "/users", None).await;
    assert_eq!(listing, json!([]));
}

#[tokio::test]
async fn test_non_numeric_id_gets_json_error() {
    let db = test_database().await;
    let app = create_router(AppState::from_database(&db));

    let (status, body) = call(&app, Method::GET, "/users/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MALFORMED_INPUT");
}

#[tokio::test]
async fn test_health_reports_database() {
    let db = test_database().await;
    let app = create_router(AppState::from_database(&db));

    let (status, body) = call(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["services"]["database"]["status"], "healthy");
}
