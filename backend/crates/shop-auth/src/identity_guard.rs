use crate::{AuthError, AuthenticatedUser, Result as AuthErrorResult, TokenService};

use std::panic::Location;
use std::sync::Arc;

use chrono::Utc;
use error_location::ErrorLocation;
use log::warn;

/// Resolves the caller of a protected operation from its `Authorization`
/// header. Never consults the credential store.
#[derive(Clone)]
pub struct IdentityGuard {
    token_service: Arc<TokenService>,
}

impl IdentityGuard {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }

    /// Every failure is reported as `AuthError::Unauthenticated`; the
    /// specific reason only reaches the log.
    pub fn authenticate(&self, authorization: Option<&str>) -> AuthErrorResult<AuthenticatedUser> {
        self.authenticate_at(authorization, Utc::now().timestamp())
    }

    pub fn authenticate_at(
        &self,
        authorization: Option<&str>,
        now: i64,
    ) -> AuthErrorResult<AuthenticatedUser> {
        self.resolve(authorization, now).map_err(|e| {
            warn!("Authentication failed: {}", e);
            AuthError::Unauthenticated
        })
    }

    fn resolve(&self, authorization: Option<&str>, now: i64) -> AuthErrorResult<AuthenticatedUser> {
        let header = authorization.ok_or_else(|| AuthError::MissingHeader {
            location: ErrorLocation::from(Location::caller()),
        })?;

        let token = bearer_token(header)?;
        let claims = self.token_service.verify_at(token, now)?;

        AuthenticatedUser::from_claims(claims)
    }
}

/// Extract the token from a `Bearer <token>` header value. The scheme name is
/// matched case-insensitively.
#[track_caller]
pub fn bearer_token(header: &str) -> AuthErrorResult<&str> {
    let (scheme, token) = header.trim().split_once(' ').ok_or_else(|| AuthError::InvalidScheme {
        location: ErrorLocation::from(Location::caller()),
    })?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidScheme {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::malformed("empty bearer token"));
    }

    Ok(token)
}
