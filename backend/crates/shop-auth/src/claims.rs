use crate::{AuthError, Result as AuthErrorResult};

use serde::{Deserialize, Serialize};

/// JWT claims signed into every identity token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (identity id, decimal)
    pub sub: String,
    pub email: String,
    /// Issued at timestamp (Unix)
    pub iat: i64,
    /// Expiration timestamp (Unix)
    pub exp: i64,
}

impl Claims {
    pub fn new(subject: i64, email: &str, issued_at: i64, expires_at: i64) -> Self {
        Self {
            sub: subject.to_string(),
            email: email.to_string(),
            iat: issued_at,
            exp: expires_at,
        }
    }

    /// Identity id carried in `sub`.
    #[track_caller]
    pub fn subject_id(&self) -> AuthErrorResult<i64> {
        match self.sub.parse::<i64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(AuthError::malformed("sub must be a positive integer")),
        }
    }

    /// Structural checks after signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        self.subject_id()?;

        if self.email.is_empty() {
            return Err(AuthError::malformed("email cannot be empty"));
        }

        if self.exp <= self.iat {
            return Err(AuthError::malformed("exp must be after iat"));
        }

        Ok(())
    }
}
