use crate::UserDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub customer: UserDto,
}
