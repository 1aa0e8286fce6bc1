use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, Set, TransactionTrait};
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use tower::ServiceExt;

use gameshelf_api::{
    config::AppConfig,
    db::{self, DbPool},
    entities::{inventory, inventory_audit, product, sales_order, sales_order_item},
    errors::ServiceError,
    handlers::AppServices,
    procedures::{RecordSale, StoredProcedures},
    AppState,
};

/// Test double for the opaque stored procedures.
///
/// Implements the documented contract of `sp_record_sale` / `sp_receive_stock`
/// (stock validation, inventory mutation, order + line item insert, audit row,
/// all in one transaction) against the test database, so the API tier can be
/// exercised end-to-end without a PostgreSQL server.
pub struct RecordingProcedures {
    db: Arc<DbPool>,
}

impl RecordingProcedures {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StoredProcedures for RecordingProcedures {
    async fn record_sale(&self, sale: RecordSale) -> Result<i32, ServiceError> {
        if sale.quantity <= 0 {
            return Err(ServiceError::InventoryError(
                "quantity must be positive".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let Some(stock) = inventory::Entity::find_by_id(sale.product_id).one(&txn).await? else {
            return Err(ServiceError::InventoryError(format!(
                "invalid product id {}",
                sale.product_id
            )));
        };
        let Some(item) = product::Entity::find_by_id(sale.product_id).one(&txn).await? else {
            return Err(ServiceError::InventoryError(format!(
                "invalid product id {}",
                sale.product_id
            )));
        };

        if stock.quantity_on_hand < sale.quantity {
            return Err(ServiceError::InventoryError(format!(
                "insufficient stock for product {}",
                sale.product_id
            )));
        }

        let old_quantity = stock.quantity_on_hand;
        let new_quantity = old_quantity - sale.quantity;

        let mut level: inventory::ActiveModel = stock.into();
        level.quantity_on_hand = Set(new_quantity);
        level.update(&txn).await?;

        let order = sales_order::ActiveModel {
            customer_id: Set(sale.customer_id),
            order_date: Set(Utc::now()),
            channel: Set(sale.channel),
            payment_method: Set(sale.payment_method),
            status: Set("completed".to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        sales_order_item::ActiveModel {
            order_id: Set(order.id),
            product_id: Set(item.id),
            quantity: Set(sale.quantity),
            unit_price: Set(item.base_price),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        inventory_audit::ActiveModel {
            product_id: Set(item.id),
            old_quantity: Set(old_quantity),
            new_quantity: Set(new_quantity),
            changed_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(order.id)
    }

    async fn receive_stock(&self, product_id: i32, quantity: i32) -> Result<(), ServiceError> {
        if quantity <= 0 {
            return Err(ServiceError::InventoryError(
                "quantity must be positive".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let Some(stock) = inventory::Entity::find_by_id(product_id).one(&txn).await? else {
            return Err(ServiceError::InventoryError(format!(
                "invalid product id {}",
                product_id
            )));
        };

        let old_quantity = stock.quantity_on_hand;
        let new_quantity = old_quantity + quantity;

        let mut level: inventory::ActiveModel = stock.into();
        level.quantity_on_hand = Set(new_quantity);
        level.update(&txn).await?;

        inventory_audit::ActiveModel {
            product_id: Set(product_id),
            old_quantity: Set(old_quantity),
            new_quantity: Set(new_quantity),
            changed_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(())
    }
}

/// Helper harness spinning up the application against a throwaway SQLite file.
pub struct TestApp {
    router: Router,
    pub state: Arc<AppState>,
    _db_file: NamedTempFile,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let db_file = NamedTempFile::new().expect("create temp db file");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_file.path().display()),
            "127.0.0.1".to_string(),
            0,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");

        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let procedures: Arc<dyn StoredProcedures> =
            Arc::new(RecordingProcedures::new(db_arc.clone()));
        let services = AppServices::new(db_arc.clone(), procedures);

        let state = Arc::new(AppState {
            db: db_arc,
            config: cfg,
            services,
        });

        let router = gameshelf_api::api_routes().with_state(state.clone());

        Self {
            router,
            state,
            _db_file: db_file,
        }
    }

    /// Send a request against the router with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }
}

/// Decode a response body as JSON.
pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

/// Read a decimal field that serializes as a string (or a bare number).
#[allow(dead_code)]
pub fn decimal_field(value: &Value, key: &str) -> f64 {
    let field = &value[key];
    field
        .as_str()
        .map(|s| s.parse::<f64>().expect("numeric string"))
        .or_else(|| field.as_f64())
        .expect("decimal field")
}

/// Create a supplier through the API and return its id.
#[allow(dead_code)]
pub async fn seed_supplier(app: &TestApp, name: &str) -> i32 {
    let response = app
        .request(Method::POST, "/suppliers", Some(json!({ "name": name })))
        .await;
    assert_eq!(response.status(), 201);
    let body = response_json(response).await;
    body["id"].as_i64().expect("supplier id") as i32
}

/// Create a product through the API and return its id.
#[allow(dead_code)]
pub async fn seed_product(
    app: &TestApp,
    supplier_id: i32,
    name: &str,
    quantity_on_hand: i32,
    reorder_level: i32,
) -> i32 {
    let response = app
        .request(
            Method::POST,
            "/products",
            Some(json!({
                "name": name,
                "platform": "Switch",
                "base_price": "59.99",
                "supplier_id": supplier_id,
                "quantity_on_hand": quantity_on_hand,
                "reorder_level": reorder_level,
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let body = response_json(response).await;
    body["id"].as_i64().expect("product id") as i32
}

/// Create a customer through the API and return its id.
#[allow(dead_code)]
pub async fn seed_customer(app: &TestApp, name: &str) -> i32 {
    let response = app
        .request(
            Method::POST,
            "/customers",
            Some(json!({ "name": name, "email": "buyer@example.com" })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let body = response_json(response).await;
    body["id"].as_i64().expect("customer id") as i32
}
