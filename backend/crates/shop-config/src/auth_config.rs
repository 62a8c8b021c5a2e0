use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HASH_COST, DEFAULT_MIN_PASSWORD_LENGTH,
    DEFAULT_TOKEN_TTL_SECS, MAX_HASH_COST, MAX_MIN_PASSWORD_LENGTH, MAX_TOKEN_TTL_SECS,
    MIN_HASH_COST, MIN_JWT_SECRET_LENGTH, MIN_TOKEN_TTL_SECS,
};

use std::fmt;

use serde::Deserialize;

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret. Required; there is no built-in fallback.
    pub jwt_secret: Option<String>,
    pub token_ttl_secs: u64,
    /// Password hashing work factor
    pub hash_cost: u32,
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            hash_cost: DEFAULT_HASH_COST,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

// Keeps the secret out of `{:?}` output.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "jwt_secret",
                &self.jwt_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("hash_cost", &self.hash_cost)
            .field("min_password_length", &self.min_password_length)
            .finish()
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let secret = self.jwt_secret.as_deref().ok_or_else(|| {
            ConfigError::auth("auth.jwt_secret is required (set SHOP_AUTH_JWT_SECRET)")
        })?;

        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::auth(format!(
                "auth.jwt_secret must be at least {} characters",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        if !(MIN_TOKEN_TTL_SECS..=MAX_TOKEN_TTL_SECS).contains(&self.token_ttl_secs) {
            return Err(ConfigError::auth(format!(
                "auth.token_ttl_secs must be {}-{}, got {}",
                MIN_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS, self.token_ttl_secs
            )));
        }

        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&self.hash_cost) {
            return Err(ConfigError::auth(format!(
                "auth.hash_cost must be {}-{}, got {}",
                MIN_HASH_COST, MAX_HASH_COST, self.hash_cost
            )));
        }

        if self.min_password_length == 0 || self.min_password_length > MAX_MIN_PASSWORD_LENGTH {
            return Err(ConfigError::auth(format!(
                "auth.min_password_length must be 1-{}, got {}",
                MAX_MIN_PASSWORD_LENGTH, self.min_password_length
            )));
        }

        Ok(())
    }

    /// The validated secret. Only meaningful after `validate()` succeeded.
    pub fn secret_bytes(&self) -> ConfigErrorResult<&[u8]> {
        self.jwt_secret
            .as_deref()
            .map(str::as_bytes)
            .ok_or_else(|| ConfigError::auth("auth.jwt_secret is not set"))
    }
}
