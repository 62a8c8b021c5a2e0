pub mod credential_store;
pub mod error;
pub mod models;

pub use credential_store::CredentialStore;
pub use error::{CoreError, Result};
pub use models::identity::{Identity, IdentityPatch, NewIdentity, Profile};
pub use models::order::{NewOrderItem, Order, OrderItem};
pub use models::order_status::OrderStatus;
pub use models::product::{NewProduct, Product};

#[cfg(test)]
mod tests;
