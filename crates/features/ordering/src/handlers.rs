use crate::Ordering;
use axum::extract::State;
use fhub_identity::{Authenticated, load_profile};
use fhub_kernel::backend::BackendClient;
use fhub_kernel::domain::constants::ORDERING_TAG;
use fhub_kernel::domain::models::cart::CartView;
use fhub_kernel::domain::models::order::{CheckoutInput, Order};
use fhub_kernel::domain::models::user::UserMe;
use fhub_kernel::domain::navigation::{NavSection, sections_for};
use fhub_kernel::domain::session::SessionUser;
use fhub_kernel::server::extract::{ActionBody, Path, Slice};
use fhub_kernel::server::reply::{ActionOutcome, ServiceResult};
use serde::Serialize;

/// Landing view of a dashboard: who is signed in and where they can go.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub user: SessionUser,
    pub navigation: &'static [NavSection],
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses((status = OK, description = "Customer dashboard overview")),
    tag = ORDERING_TAG,
)]
pub(crate) async fn overview(auth: Authenticated) -> ServiceResult<Overview> {
    let navigation = sections_for(auth.role());
    ServiceResult::ok(Overview { user: auth.session.user, navigation })
}

#[utoipa::path(
    get,
    path = "/dashboard/profile",
    responses((status = OK, description = "Own profile")),
    tag = ORDERING_TAG,
)]
pub(crate) async fn profile(State(backend): State<BackendClient>, auth: Authenticated) -> ServiceResult<UserMe> {
    load_profile(&backend, auth.cookie()).await.into()
}

#[utoipa::path(
    get,
    path = "/dashboard/cart",
    responses((status = OK, description = "Cart lines with their menu items and the total")),
    tag = ORDERING_TAG,
)]
pub(crate) async fn cart(Slice(ordering): Slice<Ordering>, auth: Authenticated) -> ServiceResult<CartView> {
    ordering.service.cart(auth.cookie()).await.into()
}

#[utoipa::path(
    delete,
    path = "/dashboard/cart/items/{menu_item_id}",
    params(("menu_item_id" = String, Path, description = "Menu item of the line")),
    responses((status = OK, description = "Line removed")),
    tag = ORDERING_TAG,
)]
pub(crate) async fn remove_line(
    Slice(ordering): Slice<Ordering>,
    auth: Authenticated,
    Path(menu_item_id): Path<String>,
) -> ActionOutcome {
    match ordering.service.remove_line(auth.cookie(), &menu_item_id).await {
        Ok(()) => ActionOutcome::confirmed("Item removed from cart."),
        Err(error) => ActionOutcome::failed(error),
    }
}

#[utoipa::path(
    delete,
    path = "/dashboard/cart",
    responses((status = OK, description = "Cart emptied")),
    tag = ORDERING_TAG,
)]
pub(crate) async fn clear_cart(Slice(ordering): Slice<Ordering>, auth: Authenticated) -> ActionOutcome {
    match ordering.service.clear(auth.cookie()).await {
        Ok(()) => ActionOutcome::confirmed("Cart cleared."),
        Err(error) => ActionOutcome::failed(error),
    }
}

#[utoipa::path(
    post,
    path = "/dashboard/cart/checkout",
    responses(
        (status = OK, description = "Order placed"),
        (status = BAD_REQUEST, description = "Incomplete delivery address"),
    ),
    tag = ORDERING_TAG,
)]
pub(crate) async fn checkout(
    Slice(ordering): Slice<Ordering>,
    auth: Authenticated,
    ActionBody(input): ActionBody<CheckoutInput>,
) -> ActionOutcome {
    match ordering.service.checkout(auth.cookie(), input).await {
        Ok(placed) => {
            let message = placed.message.unwrap_or_else(|| "Order placed.".to_owned());
            ActionOutcome::confirmed(message).with_data(placed.order)
        },
        Err(error) => ActionOutcome::failed(error),
    }
}

#[utoipa::path(
    get,
    path = "/dashboard/order",
    responses((status = OK, description = "The customer's orders")),
    tag = ORDERING_TAG,
)]
pub(crate) async fn my_orders(Slice(ordering): Slice<Ordering>, auth: Authenticated) -> ServiceResult<Vec<Order>> {
    ordering.service.my_orders(auth.cookie()).await.into()
}
