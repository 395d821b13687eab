mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn malformed_order_body_is_400_and_stores_nothing() {
    let app = TestApp::new();
    let (status, json) = app.send(Method::POST, "/orders", Some(r#"{"name": "x","#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());

    let (status, _) = app
        .send(Method::POST, "/orders", Some(r#"{"name":"x","timestamp":"not a date"}"#))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(app.orders.len(), 0);
    let (_, list) = app.send(Method::GET, "/orders", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn order_lifecycle() {
    let app = TestApp::new();
    let (status, created) = app
        .send(
            Method::POST,
            "/orders",
            Some(r#"{"name":"books","timestamp":"2024-03-01T10:15:00Z"}"#),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        created,
        json!({ "id": 1, "name": "books", "timestamp": "2024-03-01T10:15:00Z" })
    );

    let (status, fetched) = app.send(Method::GET, "/orders/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = app
        .send(Method::PUT, "/orders/1", Some(r#"{"name":"more books"}"#))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "more books");
    assert_eq!(updated["timestamp"], "2024-03-01T10:15:00Z");

    let (status, json) = app.send(Method::DELETE, "/orders/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "message": "Order deleted" }));

    let (status, json) = app.send(Method::GET, "/orders/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "error": "Order not found" }));
}

#[tokio::test]
async fn order_without_timestamp_gets_zero_time() {
    let app = TestApp::new();
    let (status, json) = app.send(Method::POST, "/orders", Some(r#"{"name":"pens"}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        json,
        json!({ "id": 1, "name": "pens", "timestamp": "0001-01-01T00:00:00Z" })
    );
}

#[tokio::test]
async fn null_timestamp_in_update_keeps_stored_value() {
    let app = TestApp::new();
    app.send(
        Method::POST,
        "/orders",
        Some(r#"{"name":"books","timestamp":"2024-03-01T10:15:00Z"}"#),
    )
    .await;

    let (status, json) = app
        .send(Method::PUT, "/orders/1", Some(r#"{"name":"atlas","timestamp":null}"#))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({ "id": 1, "name": "atlas", "timestamp": "2024-03-01T10:15:00Z" })
    );
}

#[tokio::test]
async fn orders_and_customers_are_independent() {
    let app = TestApp::new();
    app.send(Method::POST, "/customers", Some(r#"{"name":"Ann","age":30}"#))
        .await;

    let (status, _) = app.send(Method::GET, "/orders/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send(Method::DELETE, "/orders/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::GET, "/customers/1", None).await;
    assert_eq!(status, StatusCode::OK);
}
