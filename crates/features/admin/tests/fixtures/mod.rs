#![allow(dead_code)]

use axum::body::{Body, to_bytes};
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use axum::{Json, Router, middleware};
use chrono::{Days, Utc};
use fhub_identity::route_guard;
use fhub_kernel::backend::BackendClient;
use fhub_kernel::domain::config::GatewayConfig;
use fhub_kernel::domain::registry::InitializedSlice;
use fhub_kernel::server::state::ApiState;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const ADMIN: &str = "session=admin";
pub const CUSTOMER: &str = "session=customer";
/// Admin session whose `GET /orders` fails upstream.
pub const ADMIN_ORDERS_DOWN: &str = "session=admin; orders=down";

fn cookie(headers: &HeaderMap) -> &str {
    headers.get(COOKIE).and_then(|value| value.to_str().ok()).unwrap_or_default()
}

async fn get_session(headers: HeaderMap) -> Json<Value> {
    let role = match cookie(&headers) {
        raw if raw.contains("session=admin") => "ADMIN",
        raw if raw.contains("session=customer") => "CUSTOMER",
        _ => return Json(Value::Null),
    };
    Json(json!({ "user": { "id": "u-admin", "role": role, "email": "a@foodhub.test", "name": "Ada" } }))
}

fn days_ago(days: u64) -> String {
    (Utc::now() - Days::new(days)).to_rfc3339()
}

pub fn user(id: &str, name: &str, role: &str, is_approved: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{id}@foodhub.test"),
        "role": role,
        "status": "ACTIVE",
        "isApproved": is_approved,
        "createdAt": days_ago(0),
    })
}

fn users() -> Value {
    json!({
        "success": true,
        "data": [
            user("c1", "Cee", "CUSTOMER", true),
            user("p1", "Pat", "PROVIDER", false),
            user("u-admin", "Ada", "ADMIN", true),
        ],
    })
}

fn restaurant(id: &str, name: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "providerId": "p1",
        "name": name,
        "addressLine": "1 Main St",
        "city": "Dhaka",
        "isActive": true,
        "createdAt": created_at,
        "updatedAt": created_at,
    })
}

fn order(id: &str, customer_id: &str, restaurant_id: &str, menu_item_id: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "status": "PENDING",
        "totalCents": 1200,
        "createdAt": created_at,
        "customerId": customer_id,
        "restaurantId": restaurant_id,
        "menuItemId": menu_item_id,
    })
}

async fn orders(headers: HeaderMap) -> Response {
    if cookie(&headers).contains("orders=down") {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(json!([
        order("o1", "c1", "r1", "m1", &days_ago(0)),
        order("o2", "c-gone", "r1", "m1", &days_ago(1)),
        order("o3", "c1", "r-gone", "m-gone", &days_ago(30)),
    ]))
    .into_response()
}

async fn restaurant_by_id(State(lookups): State<Arc<AtomicUsize>>, Path(id): Path<String>) -> Response {
    lookups.fetch_add(1, Ordering::SeqCst);
    match id.as_str() {
        "r1" => Json(json!({ "data": restaurant("r1", "Noodle Bar", &days_ago(2)) })).into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "message": "Restaurant not found" }))).into_response(),
    }
}

async fn menu_item_by_id(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "m1" => Json(json!({ "id": "m1", "name": "Pho" })).into_response(),
        _ => Json(json!({ "data": null })).into_response(),
    }
}

async fn set_status(Path(id): Path<String>) -> Response {
    if id == "u-admin" {
        return (StatusCode::FORBIDDEN, Json(json!({ "message": "Admins cannot be suspended" }))).into_response();
    }
    Json(json!({ "success": true, "data": { "id": id } })).into_response()
}

async fn set_approval(Path(id): Path<String>) -> Response {
    if id == "p1" {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

pub struct Stub {
    pub addr: SocketAddr,
    /// Hits on `GET /restaurants/{id}`.
    pub restaurant_lookups: Arc<AtomicUsize>,
}

pub async fn spawn_stub() -> Stub {
    let restaurant_lookups = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route("/api/auth/get-session", get(get_session))
        .route(
            "/api/users/me",
            get(|| async { Json(json!({ "id": "u-admin", "name": "Ada", "email": "a@foodhub.test", "role": "ADMIN" })) }),
        )
        .route("/api/users", get(|| async { Json(users()) }))
        .route("/api/users/{id}/status", patch(set_status))
        .route("/api/users/{id}/approval", patch(set_approval))
        .route(
            "/api/restaurants",
            get(|| async {
                Json(json!([restaurant("r1", "Noodle Bar", &days_ago(2)), restaurant("r2", "Taco Stand", &days_ago(40))]))
            }),
        )
        .route("/api/restaurants/{id}", get(restaurant_by_id))
        .route("/api/menu-items/{id}", get(menu_item_by_id))
        .route("/api/orders", get(orders))
        .with_state(restaurant_lookups.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Stub { addr, restaurant_lookups }
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
        .register_slice(fhub_admin::init(&backend))
        .build()
        .expect("state");

    let (router, _api) = fhub_admin::router().split_for_parts();
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
