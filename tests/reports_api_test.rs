mod common;

use axum::http::Method;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;

use common::{decimal_field, response_json, seed_product, seed_supplier, TestApp};
use gameshelf_api::entities::{sales_order, sales_order::SaleChannel, sales_order_item};

async fn seed_order_with_items(
    app: &TestApp,
    channel: SaleChannel,
    order_date: DateTime<Utc>,
    items: &[(i32, i32, Decimal)],
) -> i32 {
    let order = sales_order::ActiveModel {
        customer_id: Set(None),
        order_date: Set(order_date),
        channel: Set(channel),
        payment_method: Set(None),
        status: Set("completed".to_string()),
        ..Default::default()
    }
    .insert(app.state.db.as_ref())
    .await
    .expect("insert order");

    for (product_id, quantity, unit_price) in items {
        sales_order_item::ActiveModel {
            order_id: Set(order.id),
            product_id: Set(*product_id),
            quantity: Set(*quantity),
            unit_price: Set(*unit_price),
            ..Default::default()
        }
        .insert(app.state.db.as_ref())
        .await
        .expect("insert order item");
    }

    order.id
}

fn july(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, day, 12, 0, 0).unwrap()
}

/// Three products with decreasing sales volume across two channels.
async fn seed_report_fixture(app: &TestApp) -> (i32, i32, i32) {
    let supplier_id = seed_supplier(app, "Report Supplier").await;
    let hit = seed_product(app, supplier_id, "Block Buster", 100, 5).await;
    let steady = seed_product(app, supplier_id, "Steady Seller", 100, 5).await;
    let niche = seed_product(app, supplier_id, "Niche Pick", 100, 5).await;

    let price = Decimal::from(60);
    seed_order_with_items(app, SaleChannel::InStore, july(1), &[(hit, 5, price)]).await;
    seed_order_with_items(app, SaleChannel::Online, july(2), &[(hit, 4, price)]).await;
    seed_order_with_items(app, SaleChannel::InStore, july(3), &[(steady, 6, price)]).await;
    seed_order_with_items(app, SaleChannel::Online, july(4), &[(niche, 1, price)]).await;

    (hit, steady, niche)
}

fn units(row: &Value) -> i64 {
    row["total_units_sold"].as_i64().expect("units")
}

#[tokio::test]
async fn top_products_orders_by_units_sold() {
    let app = TestApp::new().await;
    let (hit, steady, niche) = seed_report_fixture(&app).await;

    let response = app.request(Method::GET, "/reports/top-products", None).await;
    assert_eq!(response.status(), 200);
    let report = response_json(response).await;
    let rows = report.as_array().expect("array");
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0]["product_id"].as_i64(), Some(hit as i64));
    assert_eq!(units(&rows[0]), 9);
    assert_eq!(rows[1]["product_id"].as_i64(), Some(steady as i64));
    assert_eq!(units(&rows[1]), 6);
    assert_eq!(rows[2]["product_id"].as_i64(), Some(niche as i64));
    assert_eq!(units(&rows[2]), 1);

    assert_eq!(decimal_field(&rows[0], "total_revenue"), 540.0);
}

#[tokio::test]
async fn top_products_respects_limit() {
    let app = TestApp::new().await;
    seed_report_fixture(&app).await;

    let response = app
        .request(Method::GET, "/reports/top-products?limit=2", None)
        .await;
    assert_eq!(response.status(), 200);
    let report = response_json(response).await;
    let rows = report.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert!(units(&rows[0]) >= units(&rows[1]));
}

#[tokio::test]
async fn top_products_filters_by_channel() {
    let app = TestApp::new().await;
    let (hit, steady, _niche) = seed_report_fixture(&app).await;

    let response = app
        .request(
            Method::GET,
            "/reports/top-products?channel=in_store",
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    let report = response_json(response).await;
    let rows = report.as_array().expect("array");
    assert_eq!(rows.len(), 2);

    // In-store only: steady sold 6, hit sold 5
    assert_eq!(rows[0]["product_id"].as_i64(), Some(steady as i64));
    assert_eq!(rows[1]["product_id"].as_i64(), Some(hit as i64));
}

#[tokio::test]
async fn top_products_filters_by_date_range() {
    let app = TestApp::new().await;
    let (hit, steady, _niche) = seed_report_fixture(&app).await;

    let response = app
        .request(
            Method::GET,
            "/reports/top-products?from=2026-07-03&to=2026-07-05",
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    let report = response_json(response).await;
    let rows = report.as_array().expect("array");

    // Only the July 3rd and 4th orders fall in the window
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["product_id"].as_i64(), Some(steady as i64));
    assert!(rows
        .iter()
        .all(|r| r["product_id"].as_i64() != Some(hit as i64)));
}

#[tokio::test]
async fn sales_by_channel_aggregates_orders_and_revenue() {
    let app = TestApp::new().await;
    seed_report_fixture(&app).await;

    let response = app
        .request(Method::GET, "/reports/sales-by-channel", None)
        .await;
    assert_eq!(response.status(), 200);
    let report = response_json(response).await;
    let rows = report.as_array().expect("array");
    assert_eq!(rows.len(), 2);

    let in_store = rows
        .iter()
        .find(|r| r["channel"] == "in_store")
        .expect("in_store row");
    assert_eq!(in_store["total_orders"].as_i64(), Some(2));
    assert_eq!(decimal_field(in_store, "total_revenue"), 660.0);

    let online = rows
        .iter()
        .find(|r| r["channel"] == "online")
        .expect("online row");
    assert_eq!(online["total_orders"].as_i64(), Some(2));
    assert_eq!(decimal_field(online, "total_revenue"), 300.0);
}

#[tokio::test]
async fn sales_by_channel_respects_date_range() {
    let app = TestApp::new().await;
    seed_report_fixture(&app).await;

    let response = app
        .request(
            Method::GET,
            "/reports/sales-by-channel?from=2026-07-02&to=2026-07-03",
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    let report = response_json(response).await;
    let rows = report.as_array().expect("array");

    // Only the online order from July 2nd remains
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["channel"], "online");
    assert_eq!(rows[0]["total_orders"].as_i64(), Some(1));
}
