pub mod identity;
pub mod order;
pub mod order_status;
pub mod product;
