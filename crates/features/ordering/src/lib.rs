//! Ordering feature slice: everything under `/dashboard` for customers.

mod handlers;
mod service;

pub use crate::handlers::Overview;
pub use crate::service::{OrderingService, Placed};

use fhub_kernel::backend::BackendClient;
use fhub_kernel::domain::registry::InitializedSlice;
use fhub_kernel::server::state::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Ordering feature state
#[fhub_derive::fhub_slice]
pub struct Ordering {
    pub service: OrderingService,
}

pub fn init(backend: &BackendClient) -> InitializedSlice {
    tracing::info!("Ordering slice initialized");
    InitializedSlice::new(Ordering::new(OrderingInner { service: OrderingService::new(backend.clone()) }))
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::overview))
        .routes(routes!(handlers::profile))
        .routes(routes!(handlers::cart, handlers::clear_cart))
        .routes(routes!(handlers::remove_line))
        .routes(routes!(handlers::checkout))
        .routes(routes!(handlers::my_orders))
}
