//! Customer REST API handlers
//!
//! Single-customer routes are owner-only. The ownership check runs before
//! any lookup, so a non-owner gets 403 whether or not the id exists.

use crate::{
    ApiJson, ApiResult, AppState, CurrentUser, CustomerListResponse, CustomerResponse,
    DeleteResponse, UpdateCustomerRequest, UserDto, parse_id,
};

use shop_auth::{ProfileUpdate, authorize_owner};
use shop_db::UserRepository;

use axum::{
    Json,
    extract::{Path, State},
};
use log::info;

/// GET /api/v1/customers
///
/// Any authenticated caller sees every customer.
pub async fn list_customers(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> ApiResult<Json<CustomerListResponse>> {
    let repo = UserRepository::new(state.pool.clone());
    let identities = repo.find_all().await?;

    Ok(Json(CustomerListResponse {
        customers: identities
            .into_iter()
            .map(|identity| UserDto::from(identity.into_profile()))
            .collect(),
    }))
}

/// GET /api/v1/customers/{id}
pub async fn get_customer(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<CustomerResponse>> {
    let customer_id = parse_id(&id)?;
    authorize_owner(&user, customer_id)?;

    let profile = state.auth_service.profile(customer_id).await?;

    Ok(Json(CustomerResponse {
        customer: profile.into(),
    }))
}

/// PUT /api/v1/customers/{id}
pub async fn update_customer(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateCustomerRequest>,
) -> ApiResult<Json<CustomerResponse>> {
    let customer_id = parse_id(&id)?;
    authorize_owner(&user, customer_id)?;

    let profile = state
        .auth_service
        .update_profile(
            customer_id,
            ProfileUpdate {
                email: req.email,
                name: req.name,
                password: req.password,
            },
        )
        .await?;

    Ok(Json(CustomerResponse {
        customer: profile.into(),
    }))
}

/// DELETE /api/v1/customers/{id}
///
/// The customer's orders go with the account.
pub async fn delete_customer(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let customer_id = parse_id(&id)?;
    authorize_owner(&user, customer_id)?;

    state.auth_service.delete_account(customer_id).await?;
    info!("Customer {} deleted their account", customer_id);

    Ok(Json(DeleteResponse {
        id: customer_id,
        deleted: true,
    }))
}
