use super::common::{created_response, map_service_error, success_response};
use crate::{
    entities::sales_order::SaleChannel,
    errors::ApiError,
    handlers::AppState,
    procedures::RecordSale,
    services::sales::SaleFilter,
};
use axum::{
    extract::{Json, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

// Request DTOs

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSaleRequest {
    /// Omit for a guest sale
    pub customer_id: Option<i32>,
    pub product_id: Option<i32>,
    pub quantity: Option<i32>,
    /// Defaults to in_store
    pub channel: Option<SaleChannel>,
    pub payment_method: Option<String>,
    /// Only used for online sales
    pub shipping_address: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SalesListParams {
    pub channel: Option<SaleChannel>,
    /// Inclusive lower bound on order_date (YYYY-MM-DD)
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on order_date (YYYY-MM-DD)
    pub to: Option<NaiveDate>,
}

// Handler functions

/// Record a single-product sale via sp_record_sale
#[utoipa::path(
    post,
    path = "/sales",
    tag = "Sales",
    request_body = CreateSaleRequest,
    responses(
        (status = 201, description = "Sale recorded, returns the new order id", body = serde_json::Value),
        (status = 400, description = "Missing fields or business-rule violation (e.g. insufficient stock)", body = crate::errors::ErrorResponse),
    )
)]
pub async fn create_sale(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateSaleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(product_id), Some(quantity)) = (payload.product_id, payload.quantity) else {
        return Err(ApiError::BadRequest(
            "product_id and quantity are required".to_string(),
        ));
    };

    let sale = RecordSale {
        customer_id: payload.customer_id,
        product_id,
        quantity,
        channel: payload.channel.unwrap_or(SaleChannel::InStore),
        payment_method: payload.payment_method,
        shipping_address: payload.shipping_address,
    };

    let order_id = state
        .services
        .sales
        .record_sale(sale)
        .await
        .map_err(map_service_error)?;

    info!("Sale recorded: order {}", order_id);

    Ok(created_response(serde_json::json!({ "order_id": order_id })))
}

/// List sales with computed order totals, newest first
#[utoipa::path(
    get,
    path = "/sales",
    tag = "Sales",
    params(SalesListParams),
    responses(
        (status = 200, description = "Sales retrieved successfully", body = [crate::services::sales::SaleSummary]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn list_sales(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SalesListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = SaleFilter {
        channel: params.channel,
        from: params.from,
        to: params.to,
    };

    let sales = state
        .services
        .sales
        .list_sales(filter)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(sales))
}

/// Creates the router for sales endpoints
pub fn sales_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_sale))
        .route("/", get(list_sales))
}
