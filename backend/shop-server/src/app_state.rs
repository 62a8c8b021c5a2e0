use crate::error::Result as ServerErrorResult;

use shop_auth::{AuthService, IdentityGuard, PasswordHasher, TokenService};
use shop_config::AuthConfig;
use shop_db::UserRepository;

use std::sync::Arc;
use std::time::Duration;

use log::info;
use sqlx::SqlitePool;

/// Shared state handed to every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub identity_guard: IdentityGuard,
    pub auth_service: Arc<AuthService<UserRepository>>,
}

impl AppState {
    /// Build the auth components from validated configuration. The signing
    /// secret is consumed here and only lives on inside the token service.
    pub fn new(pool: SqlitePool, auth: &AuthConfig) -> ServerErrorResult<Self> {
        let token_service = Arc::new(TokenService::with_hs256(
            auth.secret_bytes()?,
            Duration::from_secs(auth.token_ttl_secs),
        )?);
        let hasher = PasswordHasher::new(auth.hash_cost)?;

        let auth_service = AuthService::new(
            Arc::new(UserRepository::new(pool.clone())),
            hasher,
            token_service.clone(),
            auth.min_password_length,
        )?;

        info!(
            "Auth ready: {} tokens, ttl={}s",
            token_service.algorithm(),
            token_service.ttl().as_secs()
        );

        Ok(Self {
            pool,
            identity_guard: IdentityGuard::new(token_service),
            auth_service: Arc::new(auth_service),
        })
    }
}
