//! Persistence contract for user records consumed by the auth core.

use crate::{Identity, IdentityPatch, NewIdentity, Result as CoreErrorResult};

use async_trait::async_trait;

/// Storage for identities.
///
/// Implementations own email uniqueness: `create_identity` and
/// `update_identity` must fail with [`crate::CoreError::DuplicateEmail`] when
/// the email is already taken, comparing emails exactly as stored.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn create_identity(&self, new_identity: NewIdentity) -> CoreErrorResult<Identity>;

    async fn find_by_email(&self, email: &str) -> CoreErrorResult<Option<Identity>>;

    async fn find_by_id(&self, id: i64) -> CoreErrorResult<Option<Identity>>;

    /// Applies the non-empty fields of `patch`. Fails with `NotFound` when no
    /// identity has this id.
    async fn update_identity(&self, id: i64, patch: IdentityPatch) -> CoreErrorResult<Identity>;

    /// Fails with `NotFound` when no identity has this id.
    async fn delete_identity(&self, id: i64) -> CoreErrorResult<()>;
}
