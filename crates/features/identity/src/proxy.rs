//! Pass-through of `/api/auth/*` to the auth service.

use crate::Identity;
use axum::body::{Body, to_bytes};
use axum::extract::Request;
use axum::http::header::{ACCEPT, CONTENT_TYPE, COOKIE, LOCATION, ORIGIN, SET_COOKIE, USER_AGENT};
use axum::http::{HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use fhub_kernel::domain::constants::GENERIC_FAILURE;
use fhub_kernel::server::extract::{Path, Slice};
use fhub_kernel::server::reply::ServiceError;
use tracing::warn;

const BODY_LIMIT: usize = 1024 * 1024;
const FORWARDED_REQUEST_HEADERS: [HeaderName; 5] = [ACCEPT, CONTENT_TYPE, COOKIE, ORIGIN, USER_AGENT];
const FORWARDED_RESPONSE_HEADERS: [HeaderName; 3] = [CONTENT_TYPE, LOCATION, SET_COOKIE];

pub(crate) async fn auth_proxy(
    Slice(identity): Slice<Identity>,
    Path(path): Path<String>,
    request: Request,
) -> Response {
    match forward(&identity, &path, request).await {
        Ok(response) => response,
        Err(error) => error.into_response(),
    }
}

async fn forward(identity: &Identity, path: &str, request: Request) -> Result<Response, ServiceError> {
    let (parts, body) = request.into_parts();

    let mut url = identity
        .proxy
        .url(path.split('/').filter(|segment| !segment.is_empty()))
        .map_err(|error| ServiceError::from_backend(&error, GENERIC_FAILURE))?;
    url.set_query(parts.uri.query());

    let body = to_bytes(body, BODY_LIMIT)
        .await
        .map_err(|_| ServiceError::new(StatusCode::PAYLOAD_TOO_LARGE, "Request body is too large"))?;

    let mut call = identity.proxy.request_url(parts.method, url);
    for name in FORWARDED_REQUEST_HEADERS {
        for value in parts.headers.get_all(&name).iter().filter_map(|value| value.to_str().ok()) {
            call = call.header(name.clone(), value);
        }
    }
    if !body.is_empty() {
        call = call.body(body);
    }

    let upstream = call.send().await.map_err(|error| ServiceError::from_backend(&error, GENERIC_FAILURE))?;

    let status = upstream.status();
    let headers = upstream.headers().clone();
    let bytes = upstream.bytes().await.map_err(|error| {
        warn!(%error, "Auth proxy could not read the upstream body");
        ServiceError::new(StatusCode::BAD_GATEWAY, GENERIC_FAILURE)
    })?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    for name in FORWARDED_RESPONSE_HEADERS {
        for value in headers.get_all(&name) {
            response.headers_mut().append(name.clone(), value.clone());
        }
    }
    Ok(response)
}
