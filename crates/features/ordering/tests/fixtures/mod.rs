#![allow(dead_code)]

use axum::body::{Body, to_bytes};
use axum::extract::Path;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router, middleware};
use fhub_identity::route_guard;
use fhub_kernel::backend::BackendClient;
use fhub_kernel::domain::config::GatewayConfig;
use fhub_kernel::domain::registry::InitializedSlice;
use fhub_kernel::server::state::ApiState;
use serde_json::{Value, json};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const CUSTOMER: &str = "session=customer";
pub const PROVIDER: &str = "session=provider";

async fn get_session(headers: HeaderMap) -> Json<Value> {
    let raw = headers.get(COOKIE).and_then(|value| value.to_str().ok()).unwrap_or_default();
    let role = if raw.contains("customer") {
        "CUSTOMER"
    } else if raw.contains("provider") {
        "PROVIDER"
    } else {
        return Json(Value::Null);
    };
    Json(json!({ "user": { "id": "u-1", "role": role, "email": "c@foodhub.test", "name": "Cee" } }))
}

async fn menu_item(Path(id): Path<String>) -> Response {
    if id != "m1" {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Menu item not found" }))).into_response();
    }
    Json(json!({
        "id": "m1",
        "restaurantId": "r1",
        "name": "Pho",
        "priceCents": 450,
        "isAvailable": true,
        "cuisine": "MEAT",
    }))
    .into_response()
}

fn order() -> Value {
    json!({
        "id": "o1",
        "status": "PENDING",
        "totalCents": 900,
        "createdAt": "2026-03-01T10:00:00Z",
        "customerId": "u-1",
        "restaurantId": "r1",
        "menuItemId": "m1",
    })
}

async fn checkout(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "success": true, "message": "Order created", "data": { "id": "o1", "echo": body } }))
}

pub async fn spawn_stub() -> SocketAddr {
    let router = Router::new()
        .route("/api/auth/get-session", get(get_session))
        .route(
            "/api/cart",
            get(|| async {
                Json(json!({ "data": { "items": [{ "menuItemId": "m1", "quantity": 2 }, { "menuItemId": "gone" }] } }))
            }),
        )
        .route("/api/menu-items/{id}", get(menu_item))
        .route("/api/cart/item/{id}", delete(|| async { Json(json!({ "success": true })) }))
        .route(
            "/api/cart/clear",
            delete(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))) }),
        )
        .route("/api/orders/checkout", post(checkout))
        .route("/api/orders/me", get(|| async { Json(json!({ "data": [order()] })) }))
        .route(
            "/api/users/me",
            get(|| async { Json(json!({ "id": "u-1", "name": "Cee", "email": "c@foodhub.test", "role": "CUSTOMER" })) }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

pub fn gateway(addr: SocketAddr) -> Router {
    let mut config = GatewayConfig::default();
    config.auth.url = format!("http://{addr}/api/auth");
    config.backend.url = format!("http://{addr}/api");

    let backend = BackendClient::builder()
        .base_url(config.backend.url.as_str())
        .build()
        .expect("backend client");
    let identity = fhub_identity::init(&config).expect("identity slice");
    let resolver = identity.resolver.clone();
    let state = ApiState::builder()
        .config(config)
        .backend(backend.clone())
        .register_slice(InitializedSlice::new(identity))
        .register_slice(fhub_ordering::init(&backend))
        .build()
        .expect("state");

    let (router, _api) = fhub_ordering::router().split_for_parts();
    router.layer(middleware::from_fn_with_state(resolver, route_guard)).with_state(state)
}

pub fn request(method: Method, path: &str, cookie: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(path).header(COOKIE, cookie);
    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

/// Status, `Location` header and JSON body (`null` when empty).
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = router.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let location =
        response.headers().get(LOCATION).and_then(|value| value.to_str().ok()).map(str::to_owned);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).expect("json") };
    (status, location, body)
}
