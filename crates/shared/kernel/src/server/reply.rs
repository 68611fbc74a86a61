//! Uniform reply bodies.
//!
//! * [`ServiceResult`]: `{ "data": T | null, "error": { "message" } | null }` for reads.
//! * [`ActionOutcome`]: `{ "ok", "message"?, "data"? }` for mutations.
//! * [`MutationOutcome`]: `{ "ok", "row", "message"? }` for optimistic table edits.
//!
//! HTTP status: 200 on success, the upstream status for upstream 4xx, 502 for every other
//! upstream or transport failure.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fhub_backend::BackendError;
use fhub_domain::constants::GENERIC_FAILURE;
use fhub_domain::mutation::Optimistic;
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// User-facing failure of a service call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceError {
    pub message: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl ServiceError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { message: message.into(), status }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Gateway-side fault; the details stay in the logs.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE)
    }

    /// Maps a backend failure: the backend's message (or `fallback`) for status errors,
    /// the generic message for transport and decoding failures.
    #[must_use]
    pub fn from_backend(err: &BackendError, fallback: &str) -> Self {
        warn!(error = %err, "Backend call failed");
        match err.status() {
            Some(upstream) => {
                let status = StatusCode::from_u16(upstream)
                    .ok()
                    .filter(StatusCode::is_client_error)
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                Self::new(status, err.upstream_message().unwrap_or(fallback))
            },
            None => Self::new(StatusCode::BAD_GATEWAY, GENERIC_FAILURE),
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ServiceError {}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        ServiceResult::<()>::err(self).into_response()
    }
}

/// Converts backend results into service results with an operation-specific fallback.
pub trait BackendResultExt<T> {
    fn or_fallback(self, fallback: &str) -> Result<T, ServiceError>;
}

impl<T> BackendResultExt<T> for Result<T, BackendError> {
    fn or_fallback(self, fallback: &str) -> Result<T, ServiceError> {
        self.map_err(|err| ServiceError::from_backend(&err, fallback))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceResult<T> {
    data: Option<T>,
    error: Option<ServiceError>,
}

impl<T> ServiceResult<T> {
    pub const fn ok(data: T) -> Self {
        Self { data: Some(data), error: None }
    }

    pub const fn err(error: ServiceError) -> Self {
        Self { data: None, error: Some(error) }
    }

    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    #[must_use]
    pub const fn error(&self) -> Option<&ServiceError> {
        self.error.as_ref()
    }

    pub fn into_result(self) -> Result<T, ServiceError> {
        match (self.data, self.error) {
            (_, Some(error)) => Err(error),
            (Some(data), None) => Ok(data),
            (None, None) => Err(ServiceError::new(StatusCode::BAD_GATEWAY, GENERIC_FAILURE)),
        }
    }

    fn status(&self) -> StatusCode {
        self.error.as_ref().map_or(StatusCode::OK, |error| error.status)
    }
}

impl<T> From<Result<T, ServiceError>> for ServiceResult<T> {
    fn from(result: Result<T, ServiceError>) -> Self {
        result.map_or_else(Self::err, Self::ok)
    }
}

impl<T: Serialize> IntoResponse for ServiceResult<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Reply of a server action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome<T = serde_json::Value> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T> ActionOutcome<T> {
    pub const fn done() -> Self {
        Self { ok: true, message: None, data: None, status: StatusCode::OK }
    }

    pub fn confirmed(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()), ..Self::done() }
    }

    #[must_use]
    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn failed(error: ServiceError) -> Self {
        Self { ok: false, message: Some(error.message), data: None, status: error.status }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.ok
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl<T: Serialize> IntoResponse for ActionOutcome<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Reply of an optimistic edit: the reconciled row, or the restored snapshot and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationOutcome<S> {
    ok: bool,
    row: S,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip)]
    status: StatusCode,
}

impl<S: Clone> MutationOutcome<S> {
    /// Settles `edit` against the mutation result.
    pub fn settle(edit: Optimistic<S>, result: Result<Option<S>, ServiceError>) -> Self {
        let status = result.as_ref().err().map_or(StatusCode::OK, |error| error.status);
        match edit.settle(result) {
            Ok(row) => Self { ok: true, row, message: None, status },
            Err(reverted) => {
                Self { ok: false, row: reverted.row, message: Some(reverted.message), status }
            },
        }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.ok
    }

    #[must_use]
    pub const fn row(&self) -> &S {
        &self.row
    }
}

impl<S: Serialize> IntoResponse for MutationOutcome<S> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
