use crate::{errors::ApiError, handlers::AppState};
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use std::sync::Arc;

use super::common::map_service_error;

/// Health check backed by a database round-trip
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service healthy", body = serde_json::Value),
        (status = 500, description = "Database unreachable", body = crate::errors::ErrorResponse),
    )
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    crate::db::check_connection(&state.db)
        .await
        .map_err(map_service_error)?;

    Ok(Json(json!({
        "status": "ok",
        "time": chrono::Utc::now().to_rfc3339(),
    })))
}

/// Creates the router for health check endpoints
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(health_check))
}
