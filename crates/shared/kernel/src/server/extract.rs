//! Request extractors.
//!
//! Input rejections are answered in the gateway's reply shapes instead of axum's plain-text
//! bodies: [`JsonBody`], [`Query`] and [`Path`] fail with a [`ServiceError`], [`ActionBody`]
//! fails the server action with an [`ActionOutcome`]. All of them answer `400`.

use super::reply::{ActionOutcome, ServiceError};
use super::state::ApiState;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use fhub_domain::registry::FeatureSlice;
use tracing::{debug, error};

/// Extracts a registered feature slice from [`ApiState`].
///
/// A missing slice is a wiring fault and is answered with a 500.
#[derive(Debug, Clone)]
pub struct Slice<T>(pub T);

impl<T> FromRequestParts<ApiState> for Slice<T>
where
    T: FeatureSlice + Clone,
{
    type Rejection = ServiceError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &ApiState,
    ) -> Result<Self, Self::Rejection> {
        state.try_get_slice::<T>().cloned().map(Slice).map_err(|e| {
            error!(error = %e, "Feature slice is not registered");
            ServiceError::internal()
        })
    }
}

fn invalid_input(rejection: &str) -> ServiceError {
    debug!(rejection, "Rejected request input");
    ServiceError::bad_request(rejection)
}

/// JSON request body.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(invalid_input(&rejection.body_text())),
        }
    }
}

/// JSON body of a server action.
#[derive(Debug, Clone)]
pub struct ActionBody<T>(pub T);

impl<T, S> FromRequest<S> for ActionBody<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ActionOutcome;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        JsonBody::<T>::from_request(req, state)
            .await
            .map(|JsonBody(value)| Self(value))
            .map_err(ActionOutcome::failed)
    }
}

#[derive(Debug, Clone)]
pub struct Query<T>(pub T);

impl<T, S> FromRequestParts<S> for Query<T>
where
    axum::extract::Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Query::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(invalid_input(&rejection.body_text())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Path<T>(pub T);

impl<T, S> FromRequestParts<S> for Path<T>
where
    axum::extract::Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(invalid_input(&rejection.body_text())),
        }
    }
}
