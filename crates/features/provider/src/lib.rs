//! Provider feature slice: everything under `/provider-dashboard`.
//!
//! Catalog changes (restaurant and menu) are refused for suspended accounts. Table edits
//! (availability, order status) are optimistic and answer with a [`MutationOutcome`].
//!
//! [`MutationOutcome`]: fhub_kernel::server::reply::MutationOutcome

mod handlers;
mod service;

pub use crate::service::{ProviderOverview, ProviderService, StatusCount, count_by_status};

use fhub_kernel::backend::BackendClient;
use fhub_kernel::domain::registry::InitializedSlice;
use fhub_kernel::server::state::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Provider feature state
#[fhub_derive::fhub_slice]
pub struct Provider {
    pub service: ProviderService,
}

pub fn init(backend: &BackendClient) -> InitializedSlice {
    tracing::info!("Provider slice initialized");
    InitializedSlice::new(Provider::new(ProviderInner { service: ProviderService::new(backend.clone()) }))
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::overview))
        .routes(routes!(handlers::profile))
        .routes(routes!(handlers::my_restaurant, handlers::create_restaurant))
        .routes(routes!(handlers::update_restaurant))
        .routes(routes!(handlers::menu, handlers::create_menu_item))
        .routes(routes!(handlers::menu_item, handlers::update_menu_item, handlers::delete_menu_item))
        .routes(routes!(handlers::set_availability))
        .routes(routes!(handlers::orders))
        .routes(routes!(handlers::set_order_status))
}
