use crate::Catalog;
use crate::service::{MenuItemPage, RestaurantPage};
use fhub_identity::{AuthContext, Authenticated};
use fhub_kernel::domain::constants::CATALOG_TAG;
use fhub_kernel::domain::models::cart::AddToCartInput;
use fhub_kernel::domain::models::menu::{MenuFilter, MenuItem};
use fhub_kernel::domain::models::restaurant::Restaurant;
use fhub_kernel::domain::models::review::ReviewInput;
use fhub_kernel::server::extract::{ActionBody, Path, Query, Slice};
use fhub_kernel::server::reply::{ActionOutcome, ServiceResult};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct CartRequest {
    #[serde(default)]
    quantity: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewRequest {
    rating: i64,
    #[serde(default)]
    comment: Option<String>,
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses((status = OK, description = "All restaurants")),
    tag = CATALOG_TAG,
)]
pub(crate) async fn list_restaurants(Slice(catalog): Slice<Catalog>) -> ServiceResult<Vec<Restaurant>> {
    catalog.service.restaurants().await.into()
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = OK, description = "Restaurant with its menu"),
        (status = NOT_FOUND, description = "Unknown restaurant"),
    ),
    tag = CATALOG_TAG,
)]
pub(crate) async fn restaurant_page(
    Slice(catalog): Slice<Catalog>,
    Path(id): Path<String>,
) -> ServiceResult<RestaurantPage> {
    catalog.service.restaurant_page(&id).await.into()
}

#[utoipa::path(
    get,
    path = "/menu-items",
    params(
        ("cuisine" = Option<String>, Query, description = "MEAT, FISH, VEG or VEGAN"),
        ("minPrice" = Option<i64>, Query, description = "Lower price bound in cents"),
    ),
    responses((status = OK, description = "Matching menu items")),
    tag = CATALOG_TAG,
)]
pub(crate) async fn list_menu_items(
    Slice(catalog): Slice<Catalog>,
    Query(filter): Query<MenuFilter>,
) -> ServiceResult<Vec<MenuItem>> {
    catalog.service.menu_items(&filter).await.into()
}

#[utoipa::path(
    get,
    path = "/menu-items/{id}",
    params(("id" = String, Path, description = "Menu item id")),
    responses(
        (status = OK, description = "Menu item, reviews and the viewer's own review"),
        (status = NOT_FOUND, description = "Unknown menu item"),
    ),
    tag = CATALOG_TAG,
)]
pub(crate) async fn menu_item_page(
    Slice(catalog): Slice<Catalog>,
    context: AuthContext,
    Path(id): Path<String>,
) -> ServiceResult<MenuItemPage> {
    catalog.service.menu_item_page(&id, context.session.as_ref()).await.into()
}

#[utoipa::path(
    post,
    path = "/menu-items/{id}/cart",
    params(("id" = String, Path, description = "Menu item id")),
    responses((status = OK, description = "Added"), (status = UNAUTHORIZED, description = "No session")),
    tag = CATALOG_TAG,
)]
pub(crate) async fn add_to_cart(
    Slice(catalog): Slice<Catalog>,
    auth: Authenticated,
    Path(id): Path<String>,
    ActionBody(request): ActionBody<CartRequest>,
) -> ActionOutcome {
    let input = AddToCartInput { menu_item_id: id, quantity: request.quantity };
    match catalog.service.add_to_cart(auth.cookie(), &input).await {
        Ok(()) => ActionOutcome::confirmed("Added to cart."),
        Err(error) => ActionOutcome::failed(error),
    }
}

#[utoipa::path(
    post,
    path = "/menu-items/{id}/reviews",
    params(("id" = String, Path, description = "Menu item id")),
    responses(
        (status = OK, description = "Review created or updated"),
        (status = BAD_REQUEST, description = "Rating outside 1..=5"),
    ),
    tag = CATALOG_TAG,
)]
pub(crate) async fn save_review(
    Slice(catalog): Slice<Catalog>,
    auth: Authenticated,
    Path(id): Path<String>,
    ActionBody(request): ActionBody<ReviewRequest>,
) -> ActionOutcome {
    let input = ReviewInput { menu_item_id: id, rating: request.rating, comment: request.comment };
    match catalog.service.save_review(auth.cookie(), input).await {
        Ok(()) => ActionOutcome::confirmed("Review saved."),
        Err(error) => ActionOutcome::failed(error),
    }
}

#[utoipa::path(
    delete,
    path = "/menu-items/{id}/reviews/{review_id}",
    params(
        ("id" = String, Path, description = "Menu item id"),
        ("review_id" = String, Path, description = "Review id"),
    ),
    responses((status = OK, description = "Review deleted")),
    tag = CATALOG_TAG,
)]
pub(crate) async fn delete_review(
    Slice(catalog): Slice<Catalog>,
    auth: Authenticated,
    Path((_id, review_id)): Path<(String, String)>,
) -> ActionOutcome {
    match catalog.service.delete_review(auth.cookie(), &review_id).await {
        Ok(()) => ActionOutcome::confirmed("Review deleted."),
        Err(error) => ActionOutcome::failed(error),
    }
}
