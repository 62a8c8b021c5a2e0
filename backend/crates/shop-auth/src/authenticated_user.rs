use crate::{Claims, Result as AuthErrorResult};

/// Request-scoped identity resolved by the identity guard from a verified
/// token. Lives only as long as the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub email: String,
}

impl AuthenticatedUser {
    #[track_caller]
    pub fn from_claims(claims: Claims) -> AuthErrorResult<Self> {
        Ok(Self {
            id: claims.subject_id()?,
            email: claims.email,
        })
    }
}
