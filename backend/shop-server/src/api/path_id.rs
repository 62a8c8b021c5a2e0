use crate::{ApiError, ApiResult};

/// Parse a numeric path id. Ids are positive.
#[track_caller]
pub fn parse_id(raw: &str) -> ApiResult<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::validation(
            "id",
            format!("Invalid id: {}", raw),
        )),
    }
}
