//! Registration, login and "who am I".

use crate::{
    ApiError, ApiJson, ApiResult, AppState, AuthResponse, CurrentUser, LoginRequest,
    RegisterRequest, UserResponse,
};

use shop_auth::{AuthError, AuthSession};

use std::panic::Location;

use axum::{Json, extract::State, http::StatusCode};
use error_location::ErrorLocation;

fn auth_response(state: &AppState, session: AuthSession) -> AuthResponse {
    AuthResponse {
        user: session.user.into(),
        token: session.token,
        token_type: "Bearer",
        expires_in: state.auth_service.token_service().ttl().as_secs(),
    }
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let session = state
        .auth_service
        .register(&req.email, &req.name, &req.password)
        .await?;

    Ok((StatusCode::CREATED, Json(auth_response(&state, session))))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let session = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(auth_response(&state, session)))
}

/// GET /api/v1/auth/me
///
/// A still-valid token for a deleted account no longer identifies anyone.
pub async fn me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<UserResponse>> {
    let profile = state
        .auth_service
        .profile(user.id)
        .await
        .map_err(|e| match e {
            AuthError::NotFound { .. } => ApiError::Unauthenticated {
                location: ErrorLocation::from(Location::caller()),
            },
            other => other.into(),
        })?;

    Ok(Json(UserResponse {
        user: profile.into(),
    }))
}
