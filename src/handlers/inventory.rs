use super::common::{map_service_error, success_response};
use crate::{errors::ApiError, handlers::AppState};
use axum::{
    extract::{Json, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

// Request DTOs

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReceiveStockRequest {
    pub product_id: Option<i32>,
    pub quantity: Option<i32>,
}

// Handler functions

/// Receive new stock via sp_receive_stock
#[utoipa::path(
    post,
    path = "/inventory/receive",
    tag = "Inventory",
    request_body = ReceiveStockRequest,
    responses(
        (status = 200, description = "Stock received", body = serde_json::Value),
        (status = 400, description = "Missing fields or procedure-raised error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn receive_stock(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ReceiveStockRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(product_id), Some(quantity)) = (payload.product_id, payload.quantity) else {
        return Err(ApiError::BadRequest(
            "product_id and quantity are required".to_string(),
        ));
    };

    state
        .services
        .inventory
        .receive_stock(product_id, quantity)
        .await
        .map_err(map_service_error)?;

    info!("Stock received: product {} +{}", product_id, quantity);

    Ok(success_response(serde_json::json!({
        "message": "Stock received successfully"
    })))
}

/// List products below their reorder level, lowest stock first
#[utoipa::path(
    get,
    path = "/inventory/low-stock",
    tag = "Inventory",
    responses(
        (status = 200, description = "Low-stock products retrieved", body = [crate::services::inventory::LowStockItem]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn low_stock(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let items = state
        .services
        .inventory
        .low_stock()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(items))
}

/// Creates the router for inventory endpoints
pub fn inventory_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/receive", post(receive_stock))
        .route("/low-stock", get(low_stock))
}
