#![allow(dead_code)]

use axum::body::{Body, Bytes, to_bytes};
use axum::extract::{RawQuery, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use fhub_identity::{AuthContext, route_guard};
use fhub_kernel::backend::BackendClient;
use fhub_kernel::domain::config::GatewayConfig;
use fhub_kernel::domain::registry::InitializedSlice;
use fhub_kernel::server::state::ApiState;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Stand-in for the auth service and the REST backend.
#[derive(Debug, Clone)]
pub struct Stub {
    pub addr: SocketAddr,
    session_hits: Arc<AtomicUsize>,
}

impl Stub {
    pub fn session_hits(&self) -> usize {
        self.session_hits.load(Ordering::SeqCst)
    }
}

fn user(role: &str) -> Value {
    json!({
        "id": format!("u-{}", role.to_ascii_lowercase()),
        "role": role,
        "email": "someone@foodhub.test",
        "name": "Someone",
        "status": "ACTIVE",
    })
}

async fn get_session(State(hits): State<Arc<AtomicUsize>>, headers: HeaderMap) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    let token = headers
        .get(COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.split(';').find_map(|part| part.trim().strip_prefix("session=")))
        .map(str::to_owned);

    match token.as_deref() {
        Some("customer") => Json(json!({ "user": user("CUSTOMER"), "session": { "id": "s-1" } })).into_response(),
        Some("provider") => Json(json!({ "user": user("provider") })).into_response(),
        Some("admin") => Json(json!({ "user": user("Admin") })).into_response(),
        Some("chef") => Json(json!({ "user": user("CHEF") })).into_response(),
        Some("broken") => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        Some("slow") => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({ "user": user("CUSTOMER") })).into_response()
        },
        _ => Json(Value::Null).into_response(),
    }
}

async fn sign_in(RawQuery(query): RawQuery, headers: HeaderMap, body: Bytes) -> Response {
    let content_type = headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let received: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (
        [(SET_COOKIE, "session=customer; Path=/; HttpOnly")],
        Json(json!({ "query": query, "contentType": content_type, "received": received })),
    )
        .into_response()
}

async fn update_me(Json(input): Json<Value>) -> Response {
    if input["name"] == "" {
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "message": "Name cannot be empty" })))
            .into_response();
    }
    let mut me = user("CUSTOMER");
    me["name"] = input["name"].clone();
    Json(json!({ "success": true, "data": me })).into_response()
}

pub async fn spawn_stub() -> Stub {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route("/api/auth/get-session", get(get_session))
        .route("/api/auth/sign-in/email", post(sign_in))
        .route("/api/users/me", get(|| async { Json(user("CUSTOMER")) }).patch(update_me))
        .with_state(hits.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Stub { addr, session_hits: hits }
}

pub fn config(addr: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.auth.url = format!("http://{addr}/api/auth");
    config.auth.session_timeout_ms = 300;
    config.backend.url = format!("http://{addr}/api");
    config
}

async fn whoami(context: AuthContext) -> String {
    context.role().map_or_else(|| "anonymous".to_owned(), |role| role.to_string())
}

/// Identity routes plus probe pages behind the route guard.
pub fn gateway(addr: SocketAddr) -> Router {
    let config = config(addr);
    let identity = fhub_identity::init(&config).expect("identity slice");
    let resolver = identity.resolver.clone();
    let backend = BackendClient::builder()
        .base_url(config.backend.url.as_str())
        .build()
        .expect("backend client");
    let state = ApiState::builder()
        .config(config)
        .backend(backend)
        .register_slice(InitializedSlice::new(identity))
        .build()
        .expect("state");

    let (router, _api) = fhub_identity::router().split_for_parts();
    router
        .route("/dashboard", get(whoami))
        .route("/dashboard/{*rest}", get(whoami))
        .route("/provider-dashboard/{*rest}", get(whoami))
        .route("/admin-dashboard/{*rest}", get(whoami))
        .route("/some/public/page", get(whoami))
        .layer(middleware::from_fn_with_state(resolver, route_guard))
        .with_state(state)
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = router.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, headers, body)
}

pub fn get_with(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

pub fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("json body")
}
