pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{
        auth::{login, me, register},
        auth_response::AuthResponse,
        login_request::LoginRequest,
        register_request::RegisterRequest,
        user_dto::UserDto,
        user_response::UserResponse,
    },
    customers::{
        customer_list_response::CustomerListResponse,
        customer_response::CustomerResponse,
        customers::{delete_customer, get_customer, list_customers, update_customer},
        update_customer_request::UpdateCustomerRequest,
    },
    delete_response::DeleteResponse,
    error::ApiError,
    error::Result as ApiResult,
    extractors::{api_json::ApiJson, current_user::CurrentUser},
    orders::{
        create_order_request::{CreateOrderRequest, OrderItemRequest},
        order_dto::OrderDto,
        order_item_dto::OrderItemDto,
        order_list_response::OrderListResponse,
        order_response::OrderResponse,
        orders::{create_order, delete_order, get_order, list_orders, update_order},
        update_order_request::UpdateOrderRequest,
    },
    path_id::parse_id,
    products::{
        create_product_request::CreateProductRequest,
        product_dto::ProductDto,
        product_list_response::ProductListResponse,
        product_response::ProductResponse,
        products::{create_product, get_product, list_products},
    },
};
pub use app_state::AppState;

pub use crate::routes::build_router;
