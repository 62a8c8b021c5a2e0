#![allow(dead_code)]

//! Test infrastructure for shop-server API tests

use shop_config::AuthConfig;
use shop_server::{AppState, build_router};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .foreign_keys(true);

    // In-memory needs a single long-lived connection
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    shop_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Cheapest hash cost so tests stay fast
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: Some(TEST_SECRET.to_string()),
        token_ttl_secs: 3600,
        hash_cost: 1,
        min_password_length: 6,
    }
}

/// Create AppState for testing
pub async fn create_test_app_state() -> AppState {
    let pool = create_test_pool().await;
    AppState::new(pool, &test_auth_config()).expect("Failed to build app state")
}

pub async fn create_test_app() -> (Router, AppState) {
    let state = create_test_app_state().await;
    (build_router(state.clone()), state)
}

/// Send one request and decode the JSON body (Null when the body is not JSON).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

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
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Register a customer and return `(id, token)`
pub async fn register(app: &Router, email: &str, name: &str, password: &str) -> (i64, String) {
    let (status, json) = send(
        app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({ "email": email, "name": name, "password": password })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "register failed: {json}");

    (
        json["user"]["id"].as_i64().unwrap(),
        json["token"].as_str().unwrap().to_string(),
    )
}

/// Create a product through the API and return its id
pub async fn create_product(app: &Router, token: &str, name: &str, price_cents: i64) -> i64 {
    let (status, json) = send(
        app,
        "POST",
        "/api/v1/products",
        Some(token),
        Some(json!({ "name": name, "price_cents": price_cents })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "create product failed: {json}");

    json["product"]["id"].as_i64().unwrap()
}

/// Place an order for the caller and return its id
pub async fn create_order(app: &Router, token: &str, product_id: i64, quantity: i64) -> i64 {
    let (status, json) = send(
        app,
        "POST",
        "/api/v1/orders",
        Some(token),
        Some(json!({ "items": [{ "product_id": product_id, "quantity": quantity }] })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "create order failed: {json}");

    json["order"]["id"].as_i64().unwrap()
}
