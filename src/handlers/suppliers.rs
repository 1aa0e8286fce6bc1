use super::common::{created_response, map_service_error, no_content_response, success_response};
use crate::{
    errors::ApiError,
    handlers::AppState,
    services::suppliers::{NewSupplier, SupplierPatch},
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
pub struct CreateSupplierRequest {
    pub name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSupplierRequest {
    pub name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

// Handler functions

/// List all suppliers
#[utoipa::path(
    get,
    path = "/suppliers",
    tag = "Suppliers",
    responses(
        (status = 200, description = "Suppliers retrieved successfully", body = [crate::entities::supplier::Model]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn list_suppliers(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let suppliers = state
        .services
        .suppliers
        .list_suppliers()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(suppliers))
}

/// Get a supplier by ID
#[utoipa::path(
    get,
    path = "/suppliers/{id}",
    tag = "Suppliers",
    params(("id" = i32, Path, description = "Supplier id")),
    responses(
        (status = 200, description = "Supplier retrieved successfully", body = crate::entities::supplier::Model),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_supplier(
    State(state): State<Arc<AppState>>,
    Path(supplier_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let supplier = state
        .services
        .suppliers
        .get_supplier(supplier_id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound(format!("Supplier with id {} not found", supplier_id)))?;

    Ok(success_response(supplier))
}

/// Create a new supplier
#[utoipa::path(
    post,
    path = "/suppliers",
    tag = "Suppliers",
    request_body = CreateSupplierRequest,
    responses(
        (status = 201, description = "Supplier created successfully", body = crate::entities::supplier::Model),
        (status = 400, description = "Missing required fields", body = crate::errors::ErrorResponse),
    )
)]
pub async fn create_supplier(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateSupplierRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(name) = payload.name else {
        return Err(ApiError::BadRequest("name is required".to_string()));
    };

    let supplier = state
        .services
        .suppliers
        .create_supplier(NewSupplier {
            name,
            contact_email: payload.contact_email,
            contact_phone: payload.contact_phone,
        })
        .await
        .map_err(map_service_error)?;

    info!("Supplier created: {}", supplier.id);

    Ok(created_response(supplier))
}

/// Update a supplier; omitted fields keep their value
#[utoipa::path(
    put,
    path = "/suppliers/{id}",
    tag = "Suppliers",
    params(("id" = i32, Path, description = "Supplier id")),
    request_body = UpdateSupplierRequest,
    responses(
        (status = 200, description = "Supplier updated successfully", body = crate::entities::supplier::Model),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn update_supplier(
    State(state): State<Arc<AppState>>,
    Path(supplier_id): Path<i32>,
    Json(payload): Json<UpdateSupplierRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let supplier = state
        .services
        .suppliers
        .update_supplier(
            supplier_id,
            SupplierPatch {
                name: payload.name,
                contact_email: payload.contact_email,
                contact_phone: payload.contact_phone,
            },
        )
        .await
        .map_err(map_service_error)?;

    info!("Supplier updated: {}", supplier_id);

    Ok(success_response(supplier))
}

/// Delete a supplier; rejected while products still reference it
#[utoipa::path(
    delete,
    path = "/suppliers/{id}",
    tag = "Suppliers",
    params(("id" = i32, Path, description = "Supplier id")),
    responses(
        (status = 204, description = "Supplier deleted"),
        (status = 400, description = "Supplier still has products", body = crate::errors::ErrorResponse),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn delete_supplier(
    State(state): State<Arc<AppState>>,
    Path(supplier_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .suppliers
        .delete_supplier(supplier_id)
        .await
        .map_err(map_service_error)?;

    info!("Supplier deleted: {}", supplier_id);

    Ok(no_content_response())
}

/// Creates the router for supplier endpoints
pub fn supplier_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_suppliers))
        .route("/", post(create_supplier))
        .route("/:id", get(get_supplier))
        .route("/:id", put(update_supplier))
        .route("/:id", delete(delete_supplier))
}
