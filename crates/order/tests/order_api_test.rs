mod common;

use axum::http::StatusCode;
use bakery_order::domain::requests::order::{INVALID_QUANTITY, INVALID_STATUS, MISSING_FIELDS};
use common::TestApp;
use serde_json::{Value, json};

fn order(order_id: &str, order_date: &str) -> Value {
    json!({
        "order_id": order_id,
        "customer_name": "Dana Brooks",
        "contact_number": "555-0199",
        "item": "Baguette",
        "quantity": 3,
        "order_date": order_date
    })
}

#[tokio::test]
async fn create_returns_the_persisted_order_with_defaults() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "order_id": "ORD-100",
                "customer_name": "Eli",
                "item": "Scones",
                "quantity": 4
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["order_id"], "ORD-100");
    assert_eq!(body["customer_name"], "Eli");
    assert_eq!(body["contact_number"], "");
    assert_eq!(body["item"], "Scones");
    assert_eq!(body["quantity"], 4);
    assert_eq!(body["status"], "Pending");
    assert_eq!(
        body["order_date"],
        chrono::Utc::now().date_naive().to_string()
    );
    assert!(body["id"].as_i64().is_some());
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn create_accepts_explicit_status_and_numeric_string_quantity() {
    let app = TestApp::new();

    let mut payload = order("ORD-101", "2024-01-15");
    payload["quantity"] = json!("12");
    payload["status"] = json!("Completed");

    let (status, body) = app.request("POST", "/api/orders", Some(payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["quantity"], 12);
    assert_eq!(body["status"], "Completed");
    assert_eq!(body["order_date"], "2024-01-15");
}

#[tokio::test]
async fn duplicate_order_id_is_a_conflict() {
    let app = TestApp::new();

    let (status, _) = app
        .request("POST", "/api/orders", Some(order("ORD-200", "2024-01-15")))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .request("POST", "/api/orders", Some(order("ORD-200", "2024-02-01")))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Order with order_id 'ORD-200' already exists");

    let (_, list) = app.request("GET", "/api/orders", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let app = TestApp::new();

    let (status, body) = app.request("POST", "/api/orders", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], MISSING_FIELDS);

    let mut payload = order("ORD-300", "2024-01-15");
    payload["customer_name"] = json!("");
    let (status, body) = app.request("POST", "/api/orders", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], MISSING_FIELDS);
}

#[tokio::test]
async fn non_positive_or_non_numeric_quantity_is_rejected() {
    let app = TestApp::new();

    for quantity in [json!(0), json!(-1), json!("abc")] {
        let mut payload = order("ORD-400", "2024-01-15");
        payload["quantity"] = quantity;

        let (status, body) = app.request("POST", "/api/orders", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], INVALID_QUANTITY);
    }

    let (_, list) = app.request("GET", "/api/orders", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn unknown_status_on_create_is_rejected() {
    let app = TestApp::new();

    let mut payload = order("ORD-500", "2024-01-15");
    payload["status"] = json!("Shipped");

    let (status, body) = app.request("POST", "/api/orders", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], INVALID_STATUS);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::new();

    let (status, body) = app.raw("POST", "/api/orders", "{\"order_id\": ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON"));
}

#[tokio::test]
async fn list_is_newest_order_date_first() {
    let app = TestApp::new();

    for (id, date) in [
        ("ORD-A", "2024-01-15"),
        ("ORD-B", "2024-01-16"),
        ("ORD-C", "2023-12-31"),
    ] {
        let (status, _) = app.request("POST", "/api/orders", Some(order(id, date))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, list) = app.request("GET", "/api/orders", None).await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["order_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["ORD-B", "ORD-A", "ORD-C"]);
}

#[tokio::test]
async fn same_day_orders_list_newest_created_first() {
    let app = TestApp::new();

    for id in ["ORD-EARLY", "ORD-LATE"] {
        let (status, _) = app
            .request("POST", "/api/orders", Some(order(id, "2024-01-16")))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, _) = app
        .request("POST", "/api/orders", Some(order("ORD-OLDER", "2024-01-15")))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, list) = app.request("GET", "/api/orders", None).await;
    let ids: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["order_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["ORD-LATE", "ORD-EARLY", "ORD-OLDER"]);
}

#[tokio::test]
async fn create_falls_back_to_the_id_when_the_reread_fails() {
    let app = TestApp::new();
    app.store.set_lookups_failing(true);

    let (status, body) = app
        .request("POST", "/api/orders", Some(order("ORD-150", "2024-01-15")))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 1 }));

    app.store.set_lookups_failing(false);
    let (_, list) = app.request("GET", "/api/orders", None).await;
    assert_eq!(list[0]["order_id"], "ORD-150");
}

#[tokio::test]
async fn missing_fields_are_reported_before_a_bad_quantity() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({ "item": "Bagel", "quantity": 0 })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], MISSING_FIELDS);
}

#[tokio::test]
async fn status_update_changes_only_the_status() {
    let app = TestApp::new();

    let (_, created) = app
        .request("POST", "/api/orders", Some(order("ORD-600", "2024-01-15")))
        .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/orders/{id}"),
            Some(json!({ "status": "Completed" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "success", "message": "Order status updated successfully" })
    );

    let (_, list) = app.request("GET", "/api/orders", None).await;
    let updated = &list[0];
    assert_eq!(updated["status"], "Completed");
    assert_eq!(updated["quantity"], created["quantity"]);
    assert_eq!(updated["created_at"], created["created_at"]);
}

#[tokio::test]
async fn invalid_status_update_leaves_the_row_untouched() {
    let app = TestApp::new();

    let (_, created) = app
        .request("POST", "/api/orders", Some(order("ORD-700", "2024-01-15")))
        .await;
    let id = created["id"].as_i64().unwrap();

    for body in [json!({ "status": "Shipped" }), json!({})] {
        let (status, response) = app
            .request("PUT", &format!("/api/orders/{id}"), Some(body))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], INVALID_STATUS);
    }

    let (_, list) = app.request("GET", "/api/orders", None).await;
    assert_eq!(list[0], created);
}

#[tokio::test]
async fn updating_a_missing_order_is_not_found() {
    let app = TestApp::new();

    let (status, body) = app
        .request("PUT", "/api/orders/999", Some(json!({ "status": "Pending" })))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Order not found");
}

#[tokio::test]
async fn delete_returns_the_prior_row_and_removes_it() {
    let app = TestApp::new();

    let (_, created) = app
        .request("POST", "/api/orders", Some(order("ORD-800", "2024-01-15")))
        .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = app
        .request("DELETE", &format!("/api/orders/{id}"), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Order deleted successfully");
    assert_eq!(body["data"], created);

    let (_, list) = app.request("GET", "/api/orders", None).await;
    assert_eq!(list, json!([]));

    let (status, body) = app
        .request("DELETE", &format!("/api/orders/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Order not found");
}

#[tokio::test]
async fn non_integer_id_is_a_bad_request() {
    let app = TestApp::new();

    let (status, body) = app.request("DELETE", "/api/orders/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid order id"));

    let (status, _) = app
        .request("PUT", "/api/orders/1.5", Some(json!({ "status": "Pending" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_outage_surfaces_as_internal_error() {
    let app = TestApp::new();
    app.store.set_down(true);

    let (status, body) = app.request("GET", "/api/orders", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], sqlx::Error::PoolClosed.to_string());
}
