use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Unit price in cents
    pub price_cents: i64,
}
