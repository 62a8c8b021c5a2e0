pub mod customer_list_response;
pub mod customer_response;
#[allow(clippy::module_inception)]
pub mod customers;
pub mod update_customer_request;
