//! Product catalogue. Browsing is public; adding products needs a token.

use crate::{
    ApiError, ApiJson, ApiResult, AppState, CreateProductRequest, CurrentUser, ProductDto,
    ProductListResponse, ProductResponse, parse_id,
};

use shop_core::NewProduct;
use shop_db::ProductRepository;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use log::info;

const MAX_PRODUCT_NAME_LENGTH: usize = 200;
const MAX_PRODUCT_DESCRIPTION_LENGTH: usize = 10_000;

/// GET /api/v1/products
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<ProductListResponse>> {
    let repo = ProductRepository::new(state.pool.clone());
    let products = repo.find_all().await?;

    Ok(Json(ProductListResponse {
        products: products.into_iter().map(ProductDto::from).collect(),
    }))
}

/// GET /api/v1/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProductResponse>> {
    let product_id = parse_id(&id)?;

    let repo = ProductRepository::new(state.pool.clone());
    let product = repo
        .find_by_id(product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    Ok(Json(ProductResponse {
        product: product.into(),
    }))
}

/// POST /api/v1/products
pub async fn create_product(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(req): ApiJson<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<ProductResponse>)> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("name", "name cannot be empty"));
    }
    if name.chars().count() > MAX_PRODUCT_NAME_LENGTH {
        return Err(ApiError::validation(
            "name",
            format!("name exceeds {} characters", MAX_PRODUCT_NAME_LENGTH),
        ));
    }
    if let Some(ref description) = req.description
        && description.chars().count() > MAX_PRODUCT_DESCRIPTION_LENGTH
    {
        return Err(ApiError::validation(
            "description",
            format!(
                "description exceeds {} characters",
                MAX_PRODUCT_DESCRIPTION_LENGTH
            ),
        ));
    }
    if req.price_cents < 0 {
        return Err(ApiError::validation(
            "price_cents",
            "price_cents cannot be negative",
        ));
    }

    let repo = ProductRepository::new(state.pool.clone());
    let product = repo
        .create(&NewProduct {
            name: name.to_string(),
            description: req.description,
            price_cents: req.price_cents,
        })
        .await?;

    info!("Customer {} created product {}", user.id, product.id);

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            product: product.into(),
        }),
    ))
}
