use serde::Serialize;

/// Body returned by every DELETE endpoint
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub id: i64,
    pub deleted: bool,
}
