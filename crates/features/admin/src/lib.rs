//! Admin feature slice: everything under `/admin-dashboard`.
//!
//! Read-mostly views over every user, restaurant and order, plus optimistic moderation of
//! user status and approval.

mod dashboard;
mod handlers;
mod service;

pub use crate::dashboard::{AdminDashboard, AdminStats, DayCount, daily_series, day_of};
pub use crate::service::AdminService;

use fhub_kernel::backend::BackendClient;
use fhub_kernel::domain::registry::InitializedSlice;
use fhub_kernel::server::state::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Admin feature state
#[fhub_derive::fhub_slice]
pub struct Admin {
    pub service: AdminService,
}

pub fn init(backend: &BackendClient) -> InitializedSlice {
    tracing::info!("Admin slice initialized");
    InitializedSlice::new(Admin::new(AdminInner { service: AdminService::new(backend.clone()) }))
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::dashboard))
        .routes(routes!(handlers::profile))
        .routes(routes!(handlers::users))
        .routes(routes!(handlers::set_status))
        .routes(routes!(handlers::set_approval))
        .routes(routes!(handlers::orders))
}
