pub mod create_product_request;
pub mod product_dto;
pub mod product_list_response;
pub mod product_response;
#[allow(clippy::module_inception)]
pub mod products;
