use shop_core::OrderItem;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct OrderItemDto {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl From<OrderItem> for OrderItemDto {
    fn from(item: OrderItem) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price_cents: item.unit_price_cents,
        }
    }
}
