use shop_core::{Identity, NewIdentity, NewProduct, Product};
use shop_db::{ProductRepository, UserRepository};

use sqlx::SqlitePool;

pub fn new_identity(email: &str) -> NewIdentity {
    NewIdentity {
        email: email.to_string(),
        name: "Test Customer".to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$dGVzdHNhbHQ$dGVzdGhhc2g".to_string(),
    }
}

/// Inserts a customer for foreign key constraints
pub async fn create_test_user(pool: &SqlitePool, email: &str) -> Identity {
    UserRepository::new(pool.clone())
        .create(&new_identity(email))
        .await
        .expect("Failed to create test user")
}

pub async fn create_test_product(pool: &SqlitePool, name: &str, price_cents: i64) -> Product {
    ProductRepository::new(pool.clone())
        .create(&NewProduct {
            name: name.to_string(),
            description: Some(format!("{} description", name)),
            price_cents,
        })
        .await
        .expect("Failed to create test product")
}
