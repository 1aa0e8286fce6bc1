mod common;

use axum::http::Method;
use serde_json::json;

use common::{response_json, seed_product, seed_supplier, TestApp};

#[tokio::test]
async fn supplier_crud_roundtrip() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/suppliers",
            Some(json!({
                "name": "Arcade Classics Ltd",
                "contact_email": "orders@arcadeclassics.example",
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let created = response_json(response).await;
    let supplier_id = created["id"].as_i64().expect("supplier id");
    assert_eq!(created["name"], "Arcade Classics Ltd");

    // Partial update keeps the name
    let response = app
        .request(
            Method::PUT,
            &format!("/suppliers/{}", supplier_id),
            Some(json!({ "contact_phone": "+44 20 7000 0000" })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let updated = response_json(response).await;
    assert_eq!(updated["name"], "Arcade Classics Ltd");
    assert_eq!(updated["contact_email"], "orders@arcadeclassics.example");
    assert_eq!(updated["contact_phone"], "+44 20 7000 0000");

    let response = app
        .request(Method::GET, &format!("/suppliers/{}", supplier_id), None)
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn create_supplier_requires_name() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/suppliers",
            Some(json!({ "contact_email": "nameless@example.com" })),
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn suppliers_list_is_ordered_by_name() {
    let app = TestApp::new().await;
    seed_supplier(&app, "Zeta Games").await;
    seed_supplier(&app, "Alpha Distribution").await;

    let response = app.request(Method::GET, "/suppliers", None).await;
    assert_eq!(response.status(), 200);
    let suppliers = response_json(response).await;
    let names: Vec<&str> = suppliers
        .as_array()
        .expect("array")
        .iter()
        .map(|s| s["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["Alpha Distribution", "Zeta Games"]);
}

#[tokio::test]
async fn delete_supplier_with_products_is_rejected() {
    let app = TestApp::new().await;
    let supplier_id = seed_supplier(&app, "Busy Supplier").await;
    let product_id = seed_product(&app, supplier_id, "Anchor Title", 1, 1).await;

    let response = app
        .request(Method::DELETE, &format!("/suppliers/{}", supplier_id), None)
        .await;
    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert!(body["message"]
        .as_str()
        .expect("message")
        .contains("existing products"));

    // Both the supplier and its product are intact
    let response = app
        .request(Method::GET, &format!("/suppliers/{}", supplier_id), None)
        .await;
    assert_eq!(response.status(), 200);
    let response = app
        .request(Method::GET, &format!("/products/{}", product_id), None)
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn delete_supplier_without_products_succeeds() {
    let app = TestApp::new().await;
    let supplier_id = seed_supplier(&app, "Idle Supplier").await;

    let response = app
        .request(Method::DELETE, &format!("/suppliers/{}", supplier_id), None)
        .await;
    assert_eq!(response.status(), 204);

    let response = app
        .request(Method::GET, &format!("/suppliers/{}", supplier_id), None)
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn delete_missing_supplier_returns_not_found() {
    let app = TestApp::new().await;

    let response = app.request(Method::DELETE, "/suppliers/31337", None).await;
    assert_eq!(response.status(), 404);
}
