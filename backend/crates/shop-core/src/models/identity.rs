//! Identity entity - a registered customer and their credentials.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A registered customer as persisted by the credential store.
///
/// Carries the password hash, so it is never serialized; use
/// [`Identity::into_profile`] for anything that leaves the process.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    /// Unique, compared exactly as stored (no case folding)
    pub email: String,
    pub name: String,
    /// PHC-format password hash
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// Strip credential material for responses.
    pub fn into_profile(self) -> Profile {
        Profile {
            id: self.id,
            email: self.email,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Public view of an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to create an identity. The password is already hashed.
#[derive(Clone)]
pub struct NewIdentity {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// Partial update of an identity. `None` fields are left untouched.
#[derive(Clone, Default)]
pub struct IdentityPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_hash: Option<String>,
}

impl IdentityPatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.password_hash.is_none()
    }
}
