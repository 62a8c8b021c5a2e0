pub mod auth_service;
pub mod authenticated_user;
pub mod claims;
pub mod error;
pub mod identity_guard;
pub mod ownership;
pub mod password_hasher;
pub mod token_service;

pub use auth_service::{AuthService, AuthSession, ProfileUpdate};
pub use authenticated_user::AuthenticatedUser;
pub use claims::Claims;
pub use error::{AuthError, Result};
pub use identity_guard::{IdentityGuard, bearer_token};
pub use ownership::authorize_owner;
pub use password_hasher::PasswordHasher;
pub use token_service::{MIN_SECRET_LENGTH, TokenService};

#[cfg(test)]
mod tests;
