mod common;

use axum::http::Method;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde_json::json;

use common::{response_json, seed_customer, seed_product, seed_supplier, TestApp};
use gameshelf_api::entities::{
    inventory_audit, sales_order,
    sales_order::SaleChannel,
    sales_order_item,
};

/// Insert an order with a fixed date directly, bypassing the procedures,
/// for listing and filter assertions.
async fn seed_order(
    app: &TestApp,
    product_id: i32,
    customer_id: Option<i32>,
    channel: SaleChannel,
    quantity: i32,
    order_date: DateTime<Utc>,
) -> i32 {
    let order = sales_order::ActiveModel {
        customer_id: Set(customer_id),
        order_date: Set(order_date),
        channel: Set(channel),
        payment_method: Set(Some("cash".to_string())),
        status: Set("completed".to_string()),
        ..Default::default()
    }
    .insert(app.state.db.as_ref())
    .await
    .expect("insert order");

    sales_order_item::ActiveModel {
        order_id: Set(order.id),
        product_id: Set(product_id),
        quantity: Set(quantity),
        unit_price: Set(dec!(60)),
        ..Default::default()
    }
    .insert(app.state.db.as_ref())
    .await
    .expect("insert order item");

    order.id
}

#[tokio::test]
async fn record_sale_decrements_stock_and_writes_audit() {
    let app = TestApp::new().await;
    let supplier_id = seed_supplier(&app, "Prime Games").await;
    let product_id = seed_product(&app, supplier_id, "Night Circuit", 10, 2).await;
    let customer_id = seed_customer(&app, "Avid Collector").await;

    let response = app
        .request(
            Method::POST,
            "/sales",
            Some(json!({
                "customer_id": customer_id,
                "product_id": product_id,
                "quantity": 3,
                "channel": "in_store",
                "payment_method": "cash",
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let body = response_json(response).await;
    let order_id = body["order_id"].as_i64().expect("order id") as i32;

    // Stock decremented
    let response = app
        .request(Method::GET, &format!("/products/{}", product_id), None)
        .await;
    let row = response_json(response).await;
    assert_eq!(row["quantity_on_hand"], 7);

    // Order row exists with the requesting customer
    let order = sales_order::Entity::find_by_id(order_id)
        .one(app.state.db.as_ref())
        .await
        .expect("order query")
        .expect("order row");
    assert_eq!(order.customer_id, Some(customer_id));

    // Exactly one audit row recording the transition
    let audits = inventory_audit::Entity::find()
        .filter(inventory_audit::Column::ProductId.eq(product_id))
        .all(app.state.db.as_ref())
        .await
        .expect("audit query");
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0].old_quantity, 10);
    assert_eq!(audits[0].new_quantity, 7);
}

#[tokio::test]
async fn insufficient_stock_is_rejected_and_inventory_unchanged() {
    let app = TestApp::new().await;
    let supplier_id = seed_supplier(&app, "Prime Games").await;
    let product_id = seed_product(&app, supplier_id, "Scarce Edition", 2, 1).await;

    let response = app
        .request(
            Method::POST,
            "/sales",
            Some(json!({ "product_id": product_id, "quantity": 5 })),
        )
        .await;
    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert!(body["message"]
        .as_str()
        .expect("message")
        .contains("insufficient stock"));

    // Inventory untouched, no order, no audit entry
    let response = app
        .request(Method::GET, &format!("/products/{}", product_id), None)
        .await;
    let row = response_json(response).await;
    assert_eq!(row["quantity_on_hand"], 2);

    let orders = sales_order::Entity::find()
        .all(app.state.db.as_ref())
        .await
        .expect("orders query");
    assert!(orders.is_empty());

    let audits = inventory_audit::Entity::find()
        .all(app.state.db.as_ref())
        .await
        .expect("audit query");
    assert!(audits.is_empty());
}

#[tokio::test]
async fn create_sale_requires_product_and_quantity() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::POST, "/sales", Some(json!({ "quantity": 1 })))
        .await;
    assert_eq!(response.status(), 400);

    let response = app
        .request(Method::POST, "/sales", Some(json!({ "product_id": 1 })))
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn guest_sale_has_no_customer() {
    let app = TestApp::new().await;
    let supplier_id = seed_supplier(&app, "Prime Games").await;
    let product_id = seed_product(&app, supplier_id, "Walk-in Special", 5, 1).await;

    let response = app
        .request(
            Method::POST,
            "/sales",
            Some(json!({ "product_id": product_id, "quantity": 1 })),
        )
        .await;
    assert_eq!(response.status(), 201);

    let response = app.request(Method::GET, "/sales", None).await;
    assert_eq!(response.status(), 200);
    let sales = response_json(response).await;
    let sale = &sales.as_array().expect("array")[0];
    assert!(sale["customer_name"].is_null());
    assert_eq!(sale["channel"], "in_store");
}

#[tokio::test]
async fn list_sales_is_newest_first_with_computed_totals() {
    let app = TestApp::new().await;
    let supplier_id = seed_supplier(&app, "Prime Games").await;
    let product_id = seed_product(&app, supplier_id, "Chrono Blade", 50, 5).await;

    let oldest = seed_order(
        &app,
        product_id,
        None,
        SaleChannel::InStore,
        1,
        Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap(),
    )
    .await;
    let newest = seed_order(
        &app,
        product_id,
        None,
        SaleChannel::Online,
        3,
        Utc.with_ymd_and_hms(2026, 7, 3, 9, 30, 0).unwrap(),
    )
    .await;
    let middle = seed_order(
        &app,
        product_id,
        None,
        SaleChannel::InStore,
        2,
        Utc.with_ymd_and_hms(2026, 7, 2, 18, 45, 0).unwrap(),
    )
    .await;

    let response = app.request(Method::GET, "/sales", None).await;
    assert_eq!(response.status(), 200);
    let sales = response_json(response).await;
    let ids: Vec<i64> = sales
        .as_array()
        .expect("array")
        .iter()
        .map(|s| s["order_id"].as_i64().expect("order id"))
        .collect();
    assert_eq!(ids, vec![newest as i64, middle as i64, oldest as i64]);

    // quantity 3 at 60 each
    assert_eq!(common::decimal_field(&sales[0], "total_amount"), 180.0);
}

#[tokio::test]
async fn list_sales_filters_by_channel_and_date() {
    let app = TestApp::new().await;
    let supplier_id = seed_supplier(&app, "Prime Games").await;
    let product_id = seed_product(&app, supplier_id, "Filter Test", 50, 5).await;

    seed_order(
        &app,
        product_id,
        None,
        SaleChannel::InStore,
        1,
        Utc.with_ymd_and_hms(2026, 6, 15, 10, 0, 0).unwrap(),
    )
    .await;
    let online_id = seed_order(
        &app,
        product_id,
        None,
        SaleChannel::Online,
        1,
        Utc.with_ymd_and_hms(2026, 7, 10, 10, 0, 0).unwrap(),
    )
    .await;

    let response = app
        .request(Method::GET, "/sales?channel=online", None)
        .await;
    assert_eq!(response.status(), 200);
    let sales = response_json(response).await;
    let rows = sales.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["order_id"].as_i64(), Some(online_id as i64));

    let response = app
        .request(Method::GET, "/sales?from=2026-07-01", None)
        .await;
    let sales = response_json(response).await;
    assert_eq!(sales.as_array().expect("array").len(), 1);

    let response = app
        .request(Method::GET, "/sales?to=2026-06-30", None)
        .await;
    let sales = response_json(response).await;
    assert_eq!(sales.as_array().expect("array").len(), 1);
}
