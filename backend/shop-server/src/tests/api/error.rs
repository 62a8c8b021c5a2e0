use crate::ApiError;

use shop_auth::AuthError;
use shop_core::CoreError;
use shop_db::DbError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

#[tokio::test]
async fn test_not_found_returns_404_with_json_body() {
    let (status, json) = body_json(ApiError::NotFound {
        message: "Order 4 not found".into(),
        location: here(),
    })
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "Order 4 not found");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let (status, json) = body_json(ApiError::validation("email", "email is not valid")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "email");
}

#[tokio::test]
async fn test_internal_error_hides_details() {
    let (status, json) = body_json(ApiError::Internal {
        message: "disk I/O error at /var/lib/shop.db".into(),
        location: here(),
    })
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"]["message"], "Internal server error");
}

#[tokio::test]
async fn test_unauthenticated_sets_bearer_challenge() {
    let response = ApiError::Unauthenticated { location: here() }.into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(http::header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[tokio::test]
async fn test_invalid_credentials_returns_401_without_challenge() {
    let response = ApiError::InvalidCredentials { location: here() }.into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(http::header::WWW_AUTHENTICATE).is_none());
}

#[test]
fn test_token_failures_convert_to_unauthenticated() {
    let failures = [
        AuthError::Unauthenticated,
        AuthError::MissingHeader { location: here() },
        AuthError::InvalidScheme { location: here() },
        AuthError::TokenExpired { location: here() },
        AuthError::TokenInvalid {
            message: "bad signature".into(),
            location: here(),
        },
        AuthError::TokenMalformed {
            message: "garbage".into(),
            location: here(),
        },
    ];

    for failure in failures {
        assert!(matches!(
            ApiError::from(failure),
            ApiError::Unauthenticated { .. }
        ));
    }
}

#[test]
fn test_auth_errors_map_to_expected_statuses() {
    let cases = [
        (
            ApiError::from(AuthError::DuplicateEmail { location: here() }),
            StatusCode::CONFLICT,
        ),
        (
            ApiError::from(AuthError::InvalidCredentials),
            StatusCode::UNAUTHORIZED,
        ),
        (
            ApiError::from(AuthError::Forbidden { location: here() }),
            StatusCode::FORBIDDEN,
        ),
        (
            ApiError::from(AuthError::NotFound {
                entity: "Customer",
                id: 3,
                location: here(),
            }),
            StatusCode::NOT_FOUND,
        ),
        (
            ApiError::from(AuthError::Hashing {
                message: "boom".into(),
                location: here(),
            }),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(error.status(), expected, "{error}");
    }
}

#[test]
fn test_db_errors_convert() {
    let not_found = ApiError::from(DbError::NotFound {
        entity: "Product",
        id: 9,
        location: here(),
    });
    let conflict = ApiError::from(DbError::Conflict {
        message: "UNIQUE constraint failed: users.email".into(),
        location: here(),
    });
    let migration = ApiError::from(DbError::Migration {
        message: "checksum mismatch".into(),
        location: here(),
    });

    assert!(matches!(not_found, ApiError::NotFound { ref message, .. } if message == "Product 9 not found"));
    assert!(matches!(conflict, ApiError::Conflict { ref message, .. } if !message.contains("users.email")));
    assert!(matches!(migration, ApiError::Internal { .. }));
}

#[test]
fn test_invalid_order_status_converts_to_validation_on_status() {
    let error = ApiError::from(CoreError::InvalidOrderStatus {
        value: "refunded".into(),
        location: here(),
    });

    assert!(matches!(error, ApiError::Validation { field: Some(ref f), .. } if f == "status"));
}

#[test]
fn test_order_write_errors_convert() {
    let overflow = ApiError::from(DbError::Validation {
        message: "order total overflows".into(),
        location: here(),
    });
    let owner_missing = ApiError::from(DbError::OwnerMissing {
        owner_id: 3,
        location: here(),
    });

    assert_eq!(overflow.status(), StatusCode::BAD_REQUEST);
    assert!(matches!(overflow, ApiError::Validation { ref message, .. } if message == "order total overflows"));
    assert!(matches!(owner_missing, ApiError::Unauthenticated { .. }));
}

#[tokio::test]
async fn test_payload_too_large_returns_413() {
    let (status, json) = body_json(ApiError::PayloadTooLarge {
        message: "length limit exceeded".into(),
        location: here(),
    })
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["error"]["code"], "PAYLOAD_TOO_LARGE");
}
