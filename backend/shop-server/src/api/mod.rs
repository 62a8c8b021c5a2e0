pub mod auth;
pub mod customers;
pub mod delete_response;
pub mod error;
pub mod extractors;
pub mod orders;
pub mod path_id;
pub mod products;
