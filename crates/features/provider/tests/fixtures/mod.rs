#![allow(dead_code)]

use axum::body::{Body, to_bytes};
use axum::extract::Path;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
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

pub const PROVIDER: &str = "session=provider";
/// Active according to the session, suspended according to the profile.
pub const SUSPENDED: &str = "session=suspended";

fn cookie(headers: &HeaderMap) -> &str {
    headers.get(COOKIE).and_then(|value| value.to_str().ok()).unwrap_or_default()
}

async fn get_session(headers: HeaderMap) -> Json<Value> {
    let id = match cookie(&headers) {
        raw if raw.contains("suspended") => "u-p2",
        raw if raw.contains("provider") => "u-p1",
        _ => return Json(Value::Null),
    };
    Json(json!({ "user": { "id": id, "role": "PROVIDER", "email": "p@foodhub.test", "name": "Pat", "status": "ACTIVE" } }))
}

async fn me(headers: HeaderMap) -> Json<Value> {
    let status = if cookie(&headers).contains("suspended") { "SUSPENDED" } else { "ACTIVE" };
    Json(json!({ "id": "u-p1", "name": "Pat", "email": "p@foodhub.test", "role": "PROVIDER", "status": status }))
}

pub fn restaurant(id: &str, provider_id: &str) -> Value {
    json!({
        "id": id,
        "providerId": provider_id,
        "name": "Noodle Bar",
        "addressLine": "1 Main St",
        "city": "Dhaka",
        "isActive": true,
        "createdAt": "2026-01-01T00:00:00Z",
        "updatedAt": "2026-01-01T00:00:00Z",
    })
}

pub fn menu_item(id: &str, is_available: bool) -> Value {
    json!({
        "id": id,
        "restaurantId": "r1",
        "name": "Pho",
        "priceCents": 1200,
        "isAvailable": is_available,
        "cuisine": "MEAT",
    })
}

pub fn order(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "status": status,
        "totalCents": 1200,
        "createdAt": "2026-03-01T10:00:00Z",
        "customerId": "c1",
        "restaurantId": "r1",
        "menuItemId": "m1",
    })
}

async fn patch_menu_item(Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    if id == "locked" {
        return (StatusCode::FORBIDDEN, Json(json!({ "message": "Not your item" }))).into_response();
    }
    let mut item = menu_item(&id, true);
    item["isAvailable"] = body["isAvailable"].clone();
    item["updatedAt"] = json!("server");
    Json(json!({ "success": true, "data": item })).into_response()
}

async fn patch_order_status(Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    if id == "o-fail" {
        return (StatusCode::CONFLICT, Json(json!({ "message": "Order was cancelled" }))).into_response();
    }
    let mut updated = order(&id, body["status"].as_str().unwrap_or_default());
    updated["updatedAt"] = json!("server");
    Json(json!({ "data": updated })).into_response()
}

pub async fn spawn_stub() -> SocketAddr {
    let router = Router::new()
        .route("/api/auth/get-session", get(get_session))
        .route("/api/users/me", get(me))
        .route(
            "/api/restaurants",
            get(|| async { Json(json!([restaurant("r9", "someone-else"), restaurant("r1", "u-p1")])) })
                .post(|Json(body): Json<Value>| async move { Json(json!({ "data": { "id": "r-new", "input": body } })) }),
        )
        .route(
            "/api/restaurants/{id}",
            patch(|Json(body): Json<Value>| async move { Json(json!({ "data": body })) }),
        )
        .route(
            "/api/menu-items/restaurant/{id}",
            get(|| async { Json(json!({ "data": [menu_item("m1", true), menu_item("m2", false)] })) }),
        )
        .route(
            "/api/menu-items",
            axum::routing::post(|Json(body): Json<Value>| async move { Json(json!({ "data": body })) }),
        )
        .route(
            "/api/menu-items/{id}",
            get(|Path(id): Path<String>| async move { Json(menu_item(&id, true)) })
                .patch(patch_menu_item)
                .delete(|| async { StatusCode::NO_CONTENT }),
        )
        .route(
            "/api/orders/provider",
            get(|| async {
                Json(json!({ "data": [order("o1", "PENDING"), order("o2", "PENDING"), order("o3", "DELIVERED")] }))
            }),
        )
        .route("/api/orders/{id}/status", patch(patch_order_status));

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
        .register_slice(fhub_provider::init(&backend))
        .build()
        .expect("state");

    let (router, _api) = fhub_provider::router().split_for_parts();
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

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).expect("json") };
    (status, body)
}
