use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid order status: {value} {location}")]
    InvalidOrderStatus {
        value: String,
        location: ErrorLocation,
    },

    /// Email already belongs to another identity. The address itself is
    /// deliberately left out of the message.
    #[error("Email already registered {location}")]
    DuplicateEmail { location: ErrorLocation },

    #[error("{entity} {id} not found {location}")]
    NotFound {
        entity: &'static str,
        id: i64,
        location: ErrorLocation,
    },

    #[error("Store error: {message} {location}")]
    Store {
        message: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
