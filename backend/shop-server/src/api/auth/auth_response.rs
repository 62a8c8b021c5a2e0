use crate::UserDto;

use serde::Serialize;

/// Register and login response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserDto,
    pub token: String,
    pub token_type: &'static str,
    /// Token lifetime in seconds
    pub expires_in: u64,
}
