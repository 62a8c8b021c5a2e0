use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    /// "pending", "paid", "shipped" or "cancelled"
    pub status: String,
}
