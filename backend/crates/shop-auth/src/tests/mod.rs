mod auth_service;

use crate::{PasswordHasher, TokenService};

use shop_core::{
    CoreError, CredentialStore, Identity, IdentityPatch, NewIdentity, Result as CoreErrorResult,
};

use std::panic::Location;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use error_location::ErrorLocation;

pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";
pub(crate) const OTHER_SECRET: &[u8] = b"another-secret-key-at-least-32-bytes";

pub(crate) fn token_service() -> TokenService {
    TokenService::with_hs256(TEST_SECRET, Duration::from_secs(3600)).unwrap()
}

/// Cheapest valid cost keeps the suite fast.
pub(crate) fn hasher() -> PasswordHasher {
    PasswordHasher::new(1).unwrap()
}

/// Credential store backed by a vector, with the same uniqueness rules as the
/// SQLite store.
#[derive(Default)]
pub(crate) struct InMemoryCredentialStore {
    identities: Mutex<Vec<Identity>>,
}

impl InMemoryCredentialStore {
    pub(crate) fn len(&self) -> usize {
        self.identities.lock().unwrap().len()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create_identity(&self, new_identity: NewIdentity) -> CoreErrorResult<Identity> {
        let mut identities = self.identities.lock().unwrap();

        if identities.iter().any(|i| i.email == new_identity.email) {
            return Err(CoreError::DuplicateEmail {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let now = Utc::now();
        let identity = Identity {
            id: identities.iter().map(|i| i.id).max().unwrap_or(0) + 1,
            email: new_identity.email,
            name: new_identity.name,
            password_hash: new_identity.password_hash,
            created_at: now,
            updated_at: now,
        };
        identities.push(identity.clone());

        Ok(identity)
    }

    async fn find_by_email(&self, email: &str) -> CoreErrorResult<Option<Identity>> {
        let identities = self.identities.lock().unwrap();
        Ok(identities.iter().find(|i| i.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> CoreErrorResult<Option<Identity>> {
        let identities = self.identities.lock().unwrap();
        Ok(identities.iter().find(|i| i.id == id).cloned())
    }

    async fn update_identity(&self, id: i64, patch: IdentityPatch) -> CoreErrorResult<Identity> {
        let mut identities = self.identities.lock().unwrap();

        if let Some(ref email) = patch.email
            && identities.iter().any(|i| &i.email == email && i.id != id)
        {
            return Err(CoreError::DuplicateEmail {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let identity = identities
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "User",
                id,
                location: ErrorLocation::from(Location::caller()),
            })?;

        if let Some(email) = patch.email {
            identity.email = email;
        }
        if let Some(name) = patch.name {
            identity.name = name;
        }
        if let Some(password_hash) = patch.password_hash {
            identity.password_hash = password_hash;
        }
        identity.updated_at = Utc::now();

        Ok(identity.clone())
    }

    async fn delete_identity(&self, id: i64) -> CoreErrorResult<()> {
        let mut identities = self.identities.lock().unwrap();
        let before = identities.len();
        identities.retain(|i| i.id != id);

        if identities.len() == before {
            return Err(CoreError::NotFound {
                entity: "User",
                id,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
