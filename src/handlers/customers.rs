use super::common::{created_response, map_service_error, no_content_response, success_response};
use crate::{
    errors::ApiError,
    handlers::AppState,
    services::customers::{CustomerPatch, NewCustomer},
};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

// Request DTOs

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

// Handler functions

/// List all customers, newest first
#[utoipa::path(
    get,
    path = "/customers",
    tag = "Customers",
    responses(
        (status = 200, description = "Customers retrieved successfully", body = [crate::entities::customer::Model]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn list_customers(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let customers = state
        .services
        .customers
        .list_customers()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(customers))
}

/// Get a customer by ID
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer retrieved successfully", body = crate::entities::customer::Model),
        (status = 404, description = "Customer not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state
        .services
        .customers
        .get_customer(customer_id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound(format!("Customer with id {} not found", customer_id)))?;

    Ok(success_response(customer))
}

/// Create a new customer
#[utoipa::path(
    post,
    path = "/customers",
    tag = "Customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created successfully", body = crate::entities::customer::Model),
        (status = 400, description = "Missing required fields", body = crate::errors::ErrorResponse),
    )
)]
pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(name) = payload.name else {
        return Err(ApiError::BadRequest("name is required".to_string()));
    };

    let customer = state
        .services
        .customers
        .create_customer(NewCustomer {
            name,
            email: payload.email,
        })
        .await
        .map_err(map_service_error)?;

    info!("Customer created: {}", customer.id);

    Ok(created_response(customer))
}

/// Update a customer; omitted fields keep their value
#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer id")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated successfully", body = crate::entities::customer::Model),
        (status = 404, description = "Customer not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn update_customer(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<i32>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state
        .services
        .customers
        .update_customer(
            customer_id,
            CustomerPatch {
                name: payload.name,
                email: payload.email,
            },
        )
        .await
        .map_err(map_service_error)?;

    info!("Customer updated: {}", customer_id);

    Ok(success_response(customer))
}

/// Delete a customer; rejected while sales orders still reference them
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 400, description = "Customer still has sales", body = crate::errors::ErrorResponse),
        (status = 404, description = "Customer not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn delete_customer(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .customers
        .delete_customer(customer_id)
        .await
        .map_err(map_service_error)?;

    info!("Customer deleted: {}", customer_id);

    Ok(no_content_response())
}

/// Creates the router for customer endpoints
pub fn customer_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_customers))
        .route("/", post(create_customer))
        .route("/:id", get(get_customer))
        .route("/:id", put(update_customer))
        .route("/:id", delete(delete_customer))
}
