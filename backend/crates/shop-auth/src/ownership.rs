use crate::{AuthError, AuthenticatedUser, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use log::debug;

/// Self-only access: the caller must be the resource's owner.
#[track_caller]
pub fn authorize_owner(user: &AuthenticatedUser, owner_id: i64) -> AuthErrorResult<()> {
    if user.id == owner_id {
        return Ok(());
    }

    debug!(
        "Ownership check failed: user {} on resource owned by {}",
        user.id, owner_id
    );

    Err(AuthError::Forbidden {
        location: ErrorLocation::from(Location::caller()),
    })
}
