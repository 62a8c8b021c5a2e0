//! Registration, login and self-service profile management.
//!
//! Emails are used exactly as supplied: no trimming, no case folding. Two
//! addresses differing only in case are two different identities.

use crate::{AuthError, PasswordHasher, Result as AuthErrorResult, TokenService};

use shop_core::{CredentialStore, IdentityPatch, NewIdentity, Profile};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, info};

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_NAME_LENGTH: usize = 100;
/// Upper bound keeps a single hash from becoming arbitrarily expensive.
const MAX_PASSWORD_LENGTH: usize = 1024;

/// Verified against when the email is unknown, so both login failures cost
/// one hash verification.
const TIMING_DUMMY_PASSWORD: &str = "timing-equalisation-dummy-password";

/// Result of a successful register or login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: Profile,
    pub token: String,
}

/// Self-service profile changes. `None` fields stay unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

pub struct AuthService<S> {
    store: Arc<S>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
    min_password_length: usize,
    dummy_hash: String,
}

impl<S: CredentialStore> AuthService<S> {
    /// Computes one hash up front for the unknown-email login path.
    pub fn new(
        store: Arc<S>,
        hasher: PasswordHasher,
        tokens: Arc<TokenService>,
        min_password_length: usize,
    ) -> AuthErrorResult<Self> {
        let dummy_hash = hasher.hash(TIMING_DUMMY_PASSWORD)?;

        Ok(Self {
            store,
            hasher,
            tokens,
            min_password_length: min_password_length.max(1),
            dummy_hash,
        })
    }

    pub fn token_service(&self) -> &TokenService {
        &self.tokens
    }

    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> AuthErrorResult<AuthSession> {
        validate_email(email)?;
        validate_name(name)?;
        self.validate_password(password)?;

        if self.store.find_by_email(email).await?.is_some() {
            debug!("Registration rejected: email already registered");
            return Err(AuthError::DuplicateEmail {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let password_hash = self.hash_password(password).await?;

        // A concurrent registration can still win the race; the store's
        // unique index turns that into DuplicateEmail as well.
        let identity = self
            .store
            .create_identity(NewIdentity {
                email: email.to_string(),
                name: name.to_string(),
                password_hash,
            })
            .await?;

        let token = self.tokens.issue(identity.id, &identity.email)?;

        info!("Registered customer {}", identity.id);

        Ok(AuthSession {
            user: identity.into_profile(),
            token,
        })
    }

    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> AuthErrorResult<AuthSession> {
        let identity = match self.store.find_by_email(email).await? {
            Some(identity) => identity,
            None => {
                self.verify_password(password, &self.dummy_hash).await?;
                debug!("Login failed: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !self
            .verify_password(password, &identity.password_hash)
            .await?
        {
            debug!("Login failed: wrong password for customer {}", identity.id);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(identity.id, &identity.email)?;

        info!("Customer {} logged in", identity.id);

        Ok(AuthSession {
            user: identity.into_profile(),
            token,
        })
    }

    pub async fn profile(&self, id: i64) -> AuthErrorResult<Profile> {
        self.store
            .find_by_id(id)
            .await?
            .map(|identity| identity.into_profile())
            .ok_or_else(|| AuthError::NotFound {
                entity: "Customer",
                id,
                location: ErrorLocation::from(Location::caller()),
            })
    }

    pub async fn update_profile(&self, id: i64, update: ProfileUpdate) -> AuthErrorResult<Profile> {
        if let Some(ref email) = update.email {
            validate_email(email)?;
        }
        if let Some(ref name) = update.name {
            validate_name(name)?;
        }

        let password_hash = match update.password {
            Some(ref password) => {
                self.validate_password(password)?;
                Some(self.hash_password(password).await?)
            }
            None => None,
        };

        let patch = IdentityPatch {
            email: update.email,
            name: update.name,
            password_hash,
        };

        if patch.is_empty() {
            return Err(AuthError::InvalidInput {
                message: "no fields to update".to_string(),
                field: None,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let identity = self.store.update_identity(id, patch).await?;

        info!("Updated profile of customer {}", id);

        Ok(identity.into_profile())
    }

    pub async fn delete_account(&self, id: i64) -> AuthErrorResult<()> {
        self.store.delete_identity(id).await?;

        info!("Deleted customer {}", id);

        Ok(())
    }

    #[track_caller]
    fn validate_password(&self, password: &str) -> AuthErrorResult<()> {
        let length = password.chars().count();

        if length < self.min_password_length {
            return Err(AuthError::invalid_input(
                "password",
                format!(
                    "password must be at least {} characters",
                    self.min_password_length
                ),
            ));
        }

        if password.len() > MAX_PASSWORD_LENGTH {
            return Err(AuthError::invalid_input(
                "password",
                format!("password exceeds {} bytes", MAX_PASSWORD_LENGTH),
            ));
        }

        Ok(())
    }

    /// Hashing is CPU-bound; run it off the async workers.
    async fn hash_password(&self, password: &str) -> AuthErrorResult<String> {
        let hasher = self.hasher.clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal {
                message: format!("Password hashing task failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
    }

    async fn verify_password(&self, password: &str, hash: &str) -> AuthErrorResult<bool> {
        let hasher = self.hasher.clone();
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AuthError::Internal {
                message: format!("Password verification task failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

#[track_caller]
fn validate_email(email: &str) -> AuthErrorResult<()> {
    if email.is_empty() {
        return Err(AuthError::invalid_input("email", "email cannot be empty"));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(AuthError::invalid_input(
            "email",
            format!("email exceeds {} characters", MAX_EMAIL_LENGTH),
        ));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(AuthError::invalid_input(
            "email",
            "email cannot contain whitespace",
        ));
    }

    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if !well_formed {
        return Err(AuthError::invalid_input("email", "email is not valid"));
    }

    Ok(())
}

#[track_caller]
fn validate_name(name: &str) -> AuthErrorResult<()> {
    if name.trim().is_empty() {
        return Err(AuthError::invalid_input("name", "name cannot be empty"));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AuthError::invalid_input(
            "name",
            format!("name exceeds {} characters", MAX_NAME_LENGTH),
        ));
    }

    Ok(())
}
