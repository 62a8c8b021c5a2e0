pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::{create_pool, run_migrations};
pub use error::{DbError, Result};
pub use repositories::order_repository::OrderRepository;
pub use repositories::product_repository::ProductRepository;
pub use repositories::user_repository::UserRepository;
