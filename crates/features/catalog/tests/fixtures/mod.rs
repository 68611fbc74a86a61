#![allow(dead_code)]

use axum::body::{Body, Bytes, to_bytes};
use axum::extract::{Path, RawQuery};
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router, middleware};
use fhub_identity::route_guard;
use fhub_kernel::backend::BackendClient;
use fhub_kernel::domain::config::GatewayConfig;
use fhub_kernel::server::state::ApiState;
use serde_json::{Value, json};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const CUSTOMER: &str = "session=customer";
pub const PROVIDER: &str = "session=provider";

fn signed_in(headers: &HeaderMap) -> Option<&'static str> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    if raw.contains("session=customer") {
        Some("CUSTOMER")
    } else if raw.contains("session=provider") {
        Some("PROVIDER")
    } else {
        None
    }
}

async fn get_session(headers: HeaderMap) -> Json<Value> {
    Json(signed_in(&headers).map_or(Value::Null, |role| {
        json!({ "user": { "id": "u-1", "role": role, "email": "c@foodhub.test", "name": "Cee" } })
    }))
}

pub fn menu_item(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "restaurantId": "r1",
        "name": name,
        "description": null,
        "priceCents": 1200,
        "imageUrl": null,
        "isAvailable": true,
        "cuisine": "VEG",
    })
}

fn restaurant() -> Value {
    json!({
        "id": "r1",
        "providerId": "p1",
        "name": "Noodle Bar",
        "addressLine": "1 Main St",
        "city": "Dhaka",
        "isActive": true,
        "createdAt": "2026-01-01T00:00:00Z",
        "updatedAt": "2026-01-01T00:00:00Z",
    })
}

fn review(id: &str, user_id: &str, rating: u8) -> Value {
    json!({
        "id": id,
        "userId": user_id,
        "menuItemId": "m1",
        "rating": rating,
        "comment": null,
        "createdAt": "2026-01-02T00:00:00Z",
        "updatedAt": "2026-01-02T00:00:00Z",
        "user": { "id": user_id, "name": "Reviewer" },
    })
}

async fn restaurant_by_id(Path(id): Path<String>) -> Json<Value> {
    Json(if id == "r1" { json!({ "success": true, "data": restaurant() }) } else { json!({ "data": null }) })
}

async fn menu_item_by_id(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "m1" => Json(menu_item("m1", "Pho")).into_response(),
        "m2" => Json(json!({ "data": menu_item("m2", "Rice") })).into_response(),
        "boom" => (StatusCode::INTERNAL_SERVER_ERROR, "db down").into_response(),
        _ => Json(Value::Null).into_response(),
    }
}

async fn add_to_cart(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if signed_in(&headers).is_none() {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthorized" }))).into_response();
    }
    if body["menuItemId"] == "sold-out" {
        return (StatusCode::CONFLICT, Json(json!({ "message": "Item is unavailable" }))).into_response();
    }
    if body["menuItemId"] == "quiet" {
        return (StatusCode::BAD_REQUEST, Json(json!({}))).into_response();
    }
    (StatusCode::CREATED, Json(json!({ "success": true, "data": body }))).into_response()
}

async fn delete_review(Path(id): Path<String>) -> Response {
    if id == "theirs" {
        return (StatusCode::FORBIDDEN, Json(json!({ "message": "Not your review" }))).into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

pub async fn spawn_stub() -> SocketAddr {
    let router = Router::new()
        .route("/api/auth/get-session", get(get_session))
        .route("/api/restaurants", get(|| async { Json(json!([restaurant()])) }))
        .route("/api/restaurants/{id}", get(restaurant_by_id))
        .route(
            "/api/menu-items",
            get(|RawQuery(query): RawQuery| async move {
                Json(json!([menu_item("m1", &query.unwrap_or_default())]))
            }),
        )
        .route("/api/menu-items/{id}", get(menu_item_by_id))
        .route(
            "/api/menu-items/restaurant/{id}",
            get(|| async { Json(json!([menu_item("m1", "Pho"), menu_item("m2", "Rice")])) }),
        )
        .route(
            "/api/reviews/menu-item/{id}",
            get(|| async { Json(json!({ "data": [review("rv1", "u-1", 4), review("rv2", "u-2", 5)] })) }),
        )
        .route("/api/cart/add", post(add_to_cart))
        .route("/api/reviews", post(|Json(body): Json<Value>| async move { Json(json!({ "data": body })) }))
        .route("/api/reviews/{id}", delete(delete_review));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

/// Backend whose lists come back as `{ "data": null }`.
pub async fn spawn_empty_stub() -> SocketAddr {
    let empty = || async { Json(json!({ "data": null })) };
    let router = Router::new()
        .route("/api/auth/get-session", get(|| async { Json(Value::Null) }))
        .route("/api/restaurants", get(empty))
        .route("/api/restaurants/{id}", get(|| async { Json(restaurant()) }))
        .route("/api/menu-items", get(empty))
        .route("/api/menu-items/restaurant/{id}", get(empty));

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
        .register_slice(fhub_kernel::domain::registry::InitializedSlice::new(identity))
        .register_slice(fhub_catalog::init(&backend))
        .build()
        .expect("state");

    let (router, _api) = fhub_identity::router().merge(fhub_catalog::router()).split_for_parts();
    router.layer(middleware::from_fn_with_state(resolver, route_guard)).with_state(state)
}

pub fn request(method: Method, path: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
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
    let bytes: Bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).expect("json") };
    (status, body)
}
