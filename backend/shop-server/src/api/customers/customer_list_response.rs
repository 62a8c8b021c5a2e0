use crate::UserDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CustomerListResponse {
    pub customers: Vec<UserDto>,
}
