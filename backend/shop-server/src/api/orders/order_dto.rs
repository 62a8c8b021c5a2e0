use crate::OrderItemDto;

use shop_core::Order;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct OrderDto {
    pub id: i64,
    pub owner_id: i64,
    pub status: String,
    pub total_cents: i64,
    pub items: Vec<OrderItemDto>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Order> for OrderDto {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            owner_id: o.owner_id,
            status: o.status.as_str().to_string(),
            total_cents: o.total_cents,
            items: o.items.into_iter().map(OrderItemDto::from).collect(),
            created_at: o.created_at.timestamp(),
            updated_at: o.updated_at.timestamp(),
        }
    }
}
