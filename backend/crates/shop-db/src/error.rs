use shop_core::CoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("{entity} {id} not found {location}")]
    NotFound {
        entity: &'static str,
        id: i64,
        location: ErrorLocation,
    },

    #[error("Unique constraint violated: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    /// Request data the schema cannot hold, e.g. an order total past i64
    #[error("Invalid data: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    /// A write on behalf of a customer that no longer exists
    #[error("Owner {owner_id} does not exist {location}")]
    OwnerMissing {
        owner_id: i64,
        location: ErrorLocation,
    },
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if let sqlx::Error::Database(ref db_error) = source
            && db_error.is_unique_violation()
        {
            return Self::Conflict {
                message: db_error.message().to_string(),
                location,
            };
        }

        Self::Sqlx { source, location }
    }
}

/// Store-trait view of a database failure. The only unique constraint in the
/// schema is `users.email`, so every conflict is a duplicate email.
impl From<DbError> for CoreError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            DbError::Conflict { .. } => CoreError::DuplicateEmail { location },
            DbError::NotFound { entity, id, .. } => CoreError::NotFound {
                entity,
                id,
                location,
            },
            DbError::Validation { message, .. } => CoreError::Validation { message, location },
            other => CoreError::Store {
                message: other.to_string(),
                location,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
