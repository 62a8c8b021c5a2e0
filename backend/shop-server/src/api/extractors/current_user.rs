//! Axum extractors for REST API authentication

use crate::{ApiError, AppState};

use shop_auth::AuthenticatedUser;

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// The caller of a protected endpoint, resolved from `Authorization: Bearer`.
///
/// Taking this extractor is what makes a route protected: any failure
/// rejects the request with 401 before the handler runs.
pub struct CurrentUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            // A non-UTF-8 header counts as missing
            let header = parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok());

            let user = state.identity_guard.authenticate(header)?;
            log::debug!("Authenticated customer {}", user.id);

            Ok(CurrentUser(user))
        }
    }
}
