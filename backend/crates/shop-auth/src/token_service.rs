//! Stateless identity tokens (HS256 JWT).
//!
//! A token is valid iff its signature verifies under the configured secret
//! and the current time is strictly before `exp`. There is no server-side
//! record, refresh or revocation.

use crate::{AuthError, Claims, Result as AuthErrorResult};

use std::panic::Location;
use std::time::Duration;

use chrono::Utc;
use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

/// Shortest accepted signing secret, in bytes
pub const MIN_SECRET_LENGTH: usize = 32;

/// Issues and verifies identity tokens with a process-wide secret.
///
/// Built once at startup and shared behind an `Arc`; the secret is never
/// exposed again after construction.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service signing with HS256.
    #[track_caller]
    pub fn with_hs256(secret: &[u8], ttl: Duration) -> AuthErrorResult<Self> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(AuthError::Configuration {
                message: format!(
                    "signing secret must be at least {} bytes",
                    MIN_SECRET_LENGTH
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if ttl.as_secs() == 0 {
            return Err(AuthError::Configuration {
                message: "token ttl must be at least one second".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // Expiry is checked against the caller's clock in `verify_at`, with
        // no leeway, so the library check is disabled.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get the algorithm being used (for logging/debugging)
    pub fn algorithm(&self) -> &'static str {
        "HS256"
    }

    pub fn issue(&self, subject: i64, email: &str) -> AuthErrorResult<String> {
        self.issue_at(subject, email, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (unix seconds).
    #[track_caller]
    pub fn issue_at(&self, subject: i64, email: &str, now: i64) -> AuthErrorResult<String> {
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims::new(subject, email, now, now.saturating_add(ttl));

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AuthError::Internal {
                message: format!("Failed to sign token: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    pub fn verify(&self, token: &str) -> AuthErrorResult<Claims> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as if the current time were `now` (unix seconds).
    #[track_caller]
    pub fn verify_at(&self, token: &str, now: i64) -> AuthErrorResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                let location = ErrorLocation::from(Location::caller());
                match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        AuthError::TokenInvalid {
                            message: e.to_string(),
                            location,
                        }
                    }
                    _ => AuthError::TokenMalformed {
                        message: e.to_string(),
                        location,
                    },
                }
            })?;

        let claims = token_data.claims;
        claims.validate()?;

        if now >= claims.exp {
            return Err(AuthError::TokenExpired {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(claims)
    }
}
