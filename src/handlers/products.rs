use super::common::{created_response, map_service_error, no_content_response, success_response};
use crate::{
    errors::ApiError,
    handlers::AppState,
    services::products::{NewProduct, ProductPatch},
};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

// Request DTOs

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub platform: Option<String>,
    pub edition: Option<String>,
    pub genre: Option<String>,
    pub base_price: Option<Decimal>,
    pub is_physical: Option<bool>,
    pub is_digital: Option<bool>,
    pub supplier_id: Option<i32>,
    /// Initial stock level (default 0)
    pub quantity_on_hand: Option<i32>,
    /// Low-stock threshold (default 5)
    pub reorder_level: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub platform: Option<String>,
    pub edition: Option<String>,
    pub genre: Option<String>,
    pub base_price: Option<Decimal>,
    pub is_physical: Option<bool>,
    pub is_digital: Option<bool>,
    pub supplier_id: Option<i32>,
}

// Handler functions

/// List all products with supplier and inventory info
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses(
        (status = 200, description = "Products retrieved successfully", body = [crate::services::products::ProductWithStock]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let products = state
        .services
        .products
        .list_products()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(products))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product retrieved successfully", body = crate::services::products::ProductWithStock),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .services
        .products
        .get_product(product_id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound(format!("Product with id {} not found", product_id)))?;

    Ok(success_response(product))
}

/// Create a product together with its inventory row
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = crate::entities::product::Model),
        (status = 400, description = "Missing required fields", body = crate::errors::ErrorResponse),
    )
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(name), Some(supplier_id)) = (payload.name, payload.supplier_id) else {
        return Err(ApiError::BadRequest(
            "name and supplier_id are required".to_string(),
        ));
    };

    let input = NewProduct {
        name,
        platform: payload.platform,
        edition: payload.edition,
        genre: payload.genre,
        base_price: payload.base_price,
        is_physical: payload.is_physical,
        is_digital: payload.is_digital,
        supplier_id,
        quantity_on_hand: payload.quantity_on_hand,
        reorder_level: payload.reorder_level,
    };

    let product = state
        .services
        .products
        .create_product(input)
        .await
        .map_err(map_service_error)?;

    info!("Product created: {}", product.id);

    Ok(created_response(product))
}

/// Update product fields (not inventory); omitted fields keep their value
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated successfully", body = crate::entities::product::Model),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let patch = ProductPatch {
        name: payload.name,
        platform: payload.platform,
        edition: payload.edition,
        genre: payload.genre,
        base_price: payload.base_price,
        is_physical: payload.is_physical,
        is_digital: payload.is_digital,
        supplier_id: payload.supplier_id,
    };

    let product = state
        .services
        .products
        .update_product(product_id, patch)
        .await
        .map_err(map_service_error)?;

    info!("Product updated: {}", product_id);

    Ok(success_response(product))
}

/// Delete a product and its inventory row
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .products
        .delete_product(product_id)
        .await
        .map_err(map_service_error)?;

    info!("Product deleted: {}", product_id);

    Ok(no_content_response())
}

/// Creates the router for product endpoints
pub fn product_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_products))
        .route("/", post(create_product))
        .route("/:id", get(get_product))
        .route("/:id", put(update_product))
        .route("/:id", delete(delete_product))
}
