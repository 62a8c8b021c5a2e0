mod identity;
mod order;
mod order_status;
