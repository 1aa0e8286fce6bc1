//! Gameshelf API Library
//!
//! Inventory and sales backend for a video-game retailer. Route handlers
//! translate HTTP verbs into sea-orm queries or stored-procedure calls
//! against the relational schema; the non-trivial sale logic lives in the
//! database procedures reached through [`procedures::StoredProcedures`].
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod migrator;
pub mod openapi;
pub mod procedures;
pub mod services;

use axum::{response::Redirect, routing::get, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

/// Builds the application router: one resource router per endpoint family,
/// the health check, and a root redirect to the API docs.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/docs") }))
        .nest("/products", handlers::products::product_routes())
        .nest("/suppliers", handlers::suppliers::supplier_routes())
        .nest("/customers", handlers::customers::customer_routes())
        .nest("/sales", handlers::sales::sales_routes())
        .nest("/inventory", handlers::inventory::inventory_routes())
        .nest("/reports", handlers::reports::report_routes())
        .nest("/health", handlers::health::health_routes())
}
