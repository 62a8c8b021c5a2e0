pub mod order_repository;
pub mod product_repository;
pub mod user_repository;

use crate::{DbError, Result as DbErrorResult};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;

/// Decode a stored unix timestamp column.
#[track_caller]
pub(crate) fn timestamp(value: i64, column: &str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(value, 0).ok_or_else(|| DbError::Initialization {
        message: format!("Invalid timestamp in {}", column),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Current time truncated to the precision the schema stores.
pub(crate) fn now() -> (DateTime<Utc>, i64) {
    let ts = Utc::now().timestamp();
    (DateTime::from_timestamp(ts, 0).unwrap_or_default(), ts)
}
