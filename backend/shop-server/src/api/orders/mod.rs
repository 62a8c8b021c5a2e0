pub mod create_order_request;
pub mod order_dto;
pub mod order_item_dto;
pub mod order_list_response;
pub mod order_response;
#[allow(clippy::module_inception)]
pub mod orders;
pub mod update_order_request;
