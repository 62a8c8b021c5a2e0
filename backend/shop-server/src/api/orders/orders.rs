//! Order REST API handlers
//!
//! New orders always belong to the caller. Single-order routes load the
//! order first (404) and then require the caller to own it (403).

use crate::{
    ApiError, ApiJson, ApiResult, AppState, CreateOrderRequest, CurrentUser, DeleteResponse,
    OrderDto, OrderListResponse, OrderResponse, UpdateOrderRequest, parse_id,
};

use shop_auth::{AuthenticatedUser, authorize_owner};
use shop_core::{NewOrderItem, Order, OrderStatus};
use shop_db::OrderRepository;

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use log::info;

const MAX_ORDER_ITEMS: usize = 100;
const MAX_ITEM_QUANTITY: i64 = 10_000;

/// Load an order the caller owns.
async fn owned_order(
    repo: &OrderRepository,
    user: &AuthenticatedUser,
    order_id: i64,
) -> ApiResult<Order> {
    let order = repo
        .find_by_id(order_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Order", order_id))?;

    authorize_owner(user, order.owner_id)?;

    Ok(order)
}

/// GET /api/v1/orders
///
/// Any authenticated caller sees every order.
pub async fn list_orders(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> ApiResult<Json<OrderListResponse>> {
    let repo = OrderRepository::new(state.pool.clone());
    let orders = repo.find_all().await?;

    Ok(Json(OrderListResponse {
        orders: orders.into_iter().map(OrderDto::from).collect(),
    }))
}

/// POST /api/v1/orders
pub async fn create_order(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(req): ApiJson<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<OrderResponse>)> {
    if req.items.is_empty() {
        return Err(ApiError::validation(
            "items",
            "an order needs at least one item",
        ));
    }
    if req.items.len() > MAX_ORDER_ITEMS {
        return Err(ApiError::validation(
            "items",
            format!("an order can have at most {} items", MAX_ORDER_ITEMS),
        ));
    }

    let items = req
        .items
        .iter()
        .map(|item| {
            if item.quantity < 1 || item.quantity > MAX_ITEM_QUANTITY {
                return Err(ApiError::validation(
                    "quantity",
                    format!("quantity must be 1-{}", MAX_ITEM_QUANTITY),
                ));
            }
            Ok(NewOrderItem {
                product_id: item.product_id,
                quantity: item.quantity,
            })
        })
        .collect::<ApiResult<Vec<_>>>()?;

    let repo = OrderRepository::new(state.pool.clone());
    let order = repo.create(user.id, &items).await?;

    info!(
        "Customer {} placed order {} ({} cents)",
        user.id, order.id, order.total_cents
    );

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse {
            order: order.into(),
        }),
    ))
}

/// GET /api/v1/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<OrderResponse>> {
    let order_id = parse_id(&id)?;
    let repo = OrderRepository::new(state.pool.clone());

    let order = owned_order(&repo, &user, order_id).await?;

    Ok(Json(OrderResponse {
        order: order.into(),
    }))
}

/// PUT /api/v1/orders/{id}
pub async fn update_order(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateOrderRequest>,
) -> ApiResult<Json<OrderResponse>> {
    let order_id = parse_id(&id)?;
    let status = OrderStatus::from_str(&req.status)?;
    let repo = OrderRepository::new(state.pool.clone());

    owned_order(&repo, &user, order_id).await?;

    let order = repo
        .update_status(order_id, status)
        .await?
        .ok_or_else(|| ApiError::not_found("Order", order_id))?;

    info!("Order {} is now {}", order_id, status);

    Ok(Json(OrderResponse {
        order: order.into(),
    }))
}

/// DELETE /api/v1/orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let order_id = parse_id(&id)?;
    let repo = OrderRepository::new(state.pool.clone());

    owned_order(&repo, &user, order_id).await?;

    if !repo.delete(order_id).await? {
        return Err(ApiError::not_found("Order", order_id));
    }

    info!("Order {} deleted", order_id);

    Ok(Json(DeleteResponse {
        id: order_id,
        deleted: true,
    }))
}
