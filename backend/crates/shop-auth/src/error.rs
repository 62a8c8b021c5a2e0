use shop_core::CoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid input: {message} {location}")]
    InvalidInput {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Email already registered {location}")]
    DuplicateEmail { location: ErrorLocation },

    /// Unknown email and wrong password. Carries no location so every cause
    /// renders identically.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Any identity guard failure as seen by the caller.
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Access to this resource is not allowed {location}")]
    Forbidden { location: ErrorLocation },

    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("Invalid token: {message} {location}")]
    TokenInvalid {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Malformed token: {message} {location}")]
    TokenMalformed {
        message: String,
        location: ErrorLocation,
    },

    #[error("{entity} {id} not found {location}")]
    NotFound {
        entity: &'static str,
        id: i64,
        location: ErrorLocation,
    },

    #[error("Auth configuration error: {message} {location}")]
    Configuration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {message} {location}")]
    Hashing {
        message: String,
        location: ErrorLocation,
    },

    #[error("Credential store error: {message} {location}")]
    Store {
        message: String,
        location: ErrorLocation,
    },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Machine-readable code for client responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "VALIDATION_ERROR",
            Self::DuplicateEmail { .. } => "CONFLICT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Unauthenticated
            | Self::MissingHeader { .. }
            | Self::InvalidScheme { .. }
            | Self::TokenInvalid { .. }
            | Self::TokenExpired { .. }
            | Self::TokenMalformed { .. } => "UNAUTHENTICATED",
            Self::Configuration { .. }
            | Self::Hashing { .. }
            | Self::Store { .. }
            | Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// True for the token and header failures the identity guard folds into
    /// `Unauthenticated`.
    pub fn is_authentication_failure(&self) -> bool {
        self.error_code() == "UNAUTHENTICATED"
    }

    #[track_caller]
    pub(crate) fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::TokenMalformed {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for AuthError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            CoreError::DuplicateEmail { .. } => Self::DuplicateEmail { location },
            CoreError::NotFound { entity, id, .. } => Self::NotFound {
                entity,
                id,
                location,
            },
            CoreError::Validation { message, .. } => Self::InvalidInput {
                message,
                field: None,
                location,
            },
            other => Self::Store {
                message: other.to_string(),
                location,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
