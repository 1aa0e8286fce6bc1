use super::common::{map_service_error, success_response};
use crate::{
    entities::sales_order::SaleChannel, errors::ApiError, handlers::AppState,
    services::sales::SaleFilter,
};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

// Query DTOs

#[derive(Debug, Deserialize, IntoParams)]
pub struct TopProductsParams {
    /// Inclusive lower bound on order_date (YYYY-MM-DD)
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on order_date (YYYY-MM-DD)
    pub to: Option<NaiveDate>,
    pub channel: Option<SaleChannel>,
    /// Maximum number of products to return (default 10)
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SalesByChannelParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

// Handler functions

/// Best-selling products by units sold
#[utoipa::path(
    get,
    path = "/reports/top-products",
    tag = "Reports",
    params(TopProductsParams),
    responses(
        (status = 200, description = "Top products retrieved", body = [crate::services::reports::TopProduct]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn top_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopProductsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = SaleFilter {
        channel: params.channel,
        from: params.from,
        to: params.to,
    };

    let rows = state
        .services
        .reports
        .top_products(filter, params.limit)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(rows))
}

/// Revenue and order count per channel
#[utoipa::path(
    get,
    path = "/reports/sales-by-channel",
    tag = "Reports",
    params(SalesByChannelParams),
    responses(
        (status = 200, description = "Channel aggregates retrieved", body = [crate::services::reports::ChannelSales]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn sales_by_channel(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SalesByChannelParams>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .services
        .reports
        .sales_by_channel(params.from, params.to)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(rows))
}

/// Creates the router for report endpoints
pub fn report_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/top-products", get(top_products))
        .route("/sales-by-channel", get(sales_by_channel))
}
