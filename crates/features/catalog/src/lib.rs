//! Catalog feature slice: the public storefront.
//!
//! Restaurants, menu items and reviews are public reads. Adding to the cart and
//! writing reviews need a session.

mod handlers;
mod service;

pub use crate::service::{CatalogService, MenuItemPage, RestaurantPage};

use fhub_kernel::backend::BackendClient;
use fhub_kernel::domain::registry::InitializedSlice;
use fhub_kernel::server::state::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Catalog feature state
#[fhub_derive::fhub_slice]
pub struct Catalog {
    pub service: CatalogService,
}

pub fn init(backend: &BackendClient) -> InitializedSlice {
    tracing::info!("Catalog slice initialized");
    InitializedSlice::new(Catalog::new(CatalogInner { service: CatalogService::new(backend.clone()) }))
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::list_restaurants))
        .routes(routes!(handlers::restaurant_page))
        .routes(routes!(handlers::list_menu_items))
        .routes(routes!(handlers::menu_item_page))
        .routes(routes!(handlers::add_to_cart))
        .routes(routes!(handlers::save_review))
        .routes(routes!(handlers::delete_review))
}
