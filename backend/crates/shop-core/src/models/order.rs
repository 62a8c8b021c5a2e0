//! Order entity - a customer's purchase of one or more products.

use crate::{CoreError, OrderStatus, Result as CoreErrorResult};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// An order always belongs to exactly one customer (`owner_id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    /// Identity id of the customer who placed the order
    pub owner_id: i64,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Line item, priced at the moment the order was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

/// Requested line item before prices are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub quantity: i64,
}

impl Order {
    /// Sum of all line totals.
    #[track_caller]
    pub fn compute_total(items: &[OrderItem]) -> CoreErrorResult<i64> {
        items.iter().try_fold(0i64, |acc, item| {
            item.unit_price_cents
                .checked_mul(item.quantity)
                .and_then(|line| acc.checked_add(line))
                .ok_or_else(|| CoreError::Validation {
                    message: "order total overflows".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })
        })
    }
}
