use crate::ProductDto;

use serde::Serialize;

/// List of products response
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductDto>,
}
