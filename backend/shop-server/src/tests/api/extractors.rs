use crate::{ApiError, ApiJson, AppState, CurrentUser};

use shop_config::AuthConfig;

use axum::{
    body::Body,
    extract::{FromRequest, FromRequestParts},
    http::Request,
};
use serde::Deserialize;
use sqlx::sqlite::SqlitePoolOptions;

fn test_state() -> AppState {
    let pool = SqlitePoolOptions::new()
        .connect_lazy(":memory:")
        .expect("Failed to create lazy pool");

    let auth = AuthConfig {
        jwt_secret: Some("extractor-test-secret-at-least-32-bytes".to_string()),
        hash_cost: 1,
        ..AuthConfig::default()
    };

    AppState::new(pool, &auth).unwrap()
}

async fn extract_user(state: &AppState, authorization: Option<&str>) -> Result<CurrentUser, ApiError> {
    let mut builder = Request::builder();
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    let (mut parts, _body) = builder.body(Body::empty()).unwrap().into_parts();

    CurrentUser::from_request_parts(&mut parts, state).await
}

#[tokio::test]
async fn test_extractor_with_valid_bearer_token() {
    let state = test_state();
    let token = state
        .auth_service
        .token_service()
        .issue(12, "a@x.com")
        .unwrap();

    let CurrentUser(user) = extract_user(&state, Some(&format!("Bearer {}", token)))
        .await
        .unwrap();

    assert_eq!(user.id, 12);
    assert_eq!(user.email, "a@x.com");
}

#[tokio::test]
async fn test_extractor_without_header_rejects() {
    let state = test_state();

    let result = extract_user(&state, None).await;

    assert!(matches!(result, Err(ApiError::Unauthenticated { .. })));
}

#[tokio::test]
async fn test_extractor_with_wrong_scheme_rejects() {
    let state = test_state();
    let token = state
        .auth_service
        .token_service()
        .issue(12, "a@x.com")
        .unwrap();

    let result = extract_user(&state, Some(&format!("Token {}", token))).await;

    assert!(matches!(result, Err(ApiError::Unauthenticated { .. })));
}

#[derive(Debug, Deserialize)]
struct Payload {
    name: String,
}

#[tokio::test]
async fn test_api_json_parses_body() {
    let request = Request::builder()
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"name":"Mug"}"#))
        .unwrap();

    let ApiJson(payload) = ApiJson::<Payload>::from_request(request, &()).await.unwrap();

    assert_eq!(payload.name, "Mug");
}

#[tokio::test]
async fn test_api_json_rejection_becomes_bad_request() {
    let request = Request::builder()
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let result = ApiJson::<Payload>::from_request(request, &()).await;

    assert!(matches!(result, Err(ApiError::BadRequest { .. })));
}
