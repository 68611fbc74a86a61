mod fixtures;

use axum::http::{Method, StatusCode};
use fixtures::{CUSTOMER, PROVIDER, gateway, request, send, spawn_stub};
use serde_json::json;

#[tokio::test]
async fn providers_are_sent_to_their_own_dashboard() {
    let router = gateway(spawn_stub().await);

    let (status, location, _) = send(&router, request(Method::GET, "/dashboard/cart", PROVIDER, None)).await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location.as_deref(), Some("/provider-dashboard"));
}

#[tokio::test]
async fn overview_and_profile() {
    let router = gateway(spawn_stub().await);

    let (status, _, body) = send(&router, request(Method::GET, "/dashboard", CUSTOMER, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["role"], "CUSTOMER");
    assert_eq!(body["data"]["navigation"][0]["items"][1]["url"], "/dashboard/cart");

    let (status, _, body) = send(&router, request(Method::GET, "/dashboard/profile", CUSTOMER, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "c@foodhub.test");
}

#[tokio::test]
async fn cart_lines_are_hydrated_with_placeholders() {
    let router = gateway(spawn_stub().await);

    let (status, _, body) = send(&router, request(Method::GET, "/dashboard/cart", CUSTOMER, None)).await;
    assert_eq!(status, StatusCode::OK);

    let lines = &body["data"]["lines"];
    assert_eq!(lines[0]["menuItem"]["name"], "Pho");
    assert_eq!(lines[0]["quantity"], 2);
    assert_eq!(lines[1]["menuItemId"], "gone");
    assert_eq!(lines[1]["quantity"], 1);
    assert_eq!(lines[1]["menuItem"]["name"], "Item not found");
    assert_eq!(lines[1]["menuItem"]["priceCents"], 0);
    assert_eq!(body["data"]["totalCents"], 900);
}

#[tokio::test]
async fn cart_actions_report_their_outcome() {
    let router = gateway(spawn_stub().await);

    let (status, _, body) =
        send(&router, request(Method::DELETE, "/dashboard/cart/items/m1", CUSTOMER, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "message": "Item removed from cart." }));

    let (status, _, body) = send(&router, request(Method::DELETE, "/dashboard/cart", CUSTOMER, None)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({ "ok": false, "message": "Failed to clear cart." }));
}

#[tokio::test]
async fn checkout_validates_then_places_the_order() {
    let router = gateway(spawn_stub().await);

    let incomplete = json!({ "deliveryAddressSnapshot": { "label": "Home", "city": "", "line1": "12 Road" } });
    let (status, _, body) =
        send(&router, request(Method::POST, "/dashboard/cart/checkout", CUSTOMER, Some(incomplete))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Label, city and address line are required.");

    let (status, _, body) =
        send(&router, request(Method::POST, "/dashboard/cart/checkout", CUSTOMER, Some(json!({})))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert!(body["message"].as_str().is_some_and(|m| m.contains("deliveryAddressSnapshot")));

    let complete = json!({
        "deliveryAddressSnapshot": { "label": "Home", "city": "Dhaka", "line1": "12 Road" },
        "notes": "Ring twice",
    });
    let (status, _, body) =
        send(&router, request(Method::POST, "/dashboard/cart/checkout", CUSTOMER, Some(complete))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["message"], "Order created");
    assert_eq!(body["data"]["echo"]["notes"], "Ring twice");
}

#[tokio::test]
async fn my_orders_unwrap_the_envelope() {
    let router = gateway(spawn_stub().await);

    let (status, _, body) = send(&router, request(Method::GET, "/dashboard/order", CUSTOMER, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["status"], "PENDING");
    assert_eq!(body["data"][0]["totalCents"], 900);
}
