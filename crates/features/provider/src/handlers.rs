use crate::Provider;
use crate::service::ProviderOverview;
use axum::extract::State;
use fhub_identity::{Authenticated, load_profile};
use fhub_kernel::backend::BackendClient;
use fhub_kernel::domain::constants::PROVIDER_TAG;
use fhub_kernel::domain::models::menu::{CreateMenuItemInput, MenuItem, UpdateMenuItemInput};
use fhub_kernel::domain::models::order::{Order, OrderStatus};
use fhub_kernel::domain::models::restaurant::{Restaurant, RestaurantUpsertInput};
use fhub_kernel::domain::models::user::UserMe;
use fhub_kernel::domain::mutation::{MutationRequest, Optimistic};
use fhub_kernel::server::extract::{ActionBody, JsonBody, Path, Slice};
use fhub_kernel::server::reply::{ActionOutcome, MutationOutcome, ServiceError, ServiceResult};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AvailabilityChange {
    is_available: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct OrderStatusChange {
    status: OrderStatus,
}

fn outcome(result: Result<serde_json::Value, ServiceError>) -> ActionOutcome {
    match result {
        Ok(data) => ActionOutcome::done().with_data(data),
        Err(error) => ActionOutcome::failed(error),
    }
}

#[utoipa::path(
    get,
    path = "/provider-dashboard",
    responses((status = OK, description = "Restaurant, menu size and orders per status")),
    tag = PROVIDER_TAG,
)]
pub(crate) async fn overview(Slice(provider): Slice<Provider>, auth: Authenticated) -> ServiceResult<ProviderOverview> {
    provider.service.overview(&auth.session, auth.cookie()).await.into()
}

#[utoipa::path(
    get,
    path = "/provider-dashboard/profile",
    responses((status = OK, description = "Own profile")),
    tag = PROVIDER_TAG,
)]
pub(crate) async fn profile(State(backend): State<BackendClient>, auth: Authenticated) -> ServiceResult<UserMe> {
    load_profile(&backend, auth.cookie()).await.into()
}

#[utoipa::path(
    get,
    path = "/provider-dashboard/restaurant",
    responses((status = OK, description = "The provider's restaurant, or null before one is created")),
    tag = PROVIDER_TAG,
)]
pub(crate) async fn my_restaurant(
    Slice(provider): Slice<Provider>,
    auth: Authenticated,
) -> ServiceResult<Option<Restaurant>> {
    provider.service.my_restaurant(&auth.session, auth.cookie()).await.into()
}

#[utoipa::path(
    post,
    path = "/provider-dashboard/restaurant",
    responses(
        (status = OK, description = "Restaurant created"),
        (status = BAD_REQUEST, description = "Missing name, address line or city"),
        (status = FORBIDDEN, description = "Account suspended"),
    ),
    tag = PROVIDER_TAG,
)]
pub(crate) async fn create_restaurant(
    Slice(provider): Slice<Provider>,
    auth: Authenticated,
    ActionBody(input): ActionBody<RestaurantUpsertInput>,
) -> ActionOutcome {
    outcome(provider.service.create_restaurant(&auth.session, auth.cookie(), input).await)
}

#[utoipa::path(
    patch,
    path = "/provider-dashboard/restaurant/{id}",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = OK, description = "Restaurant updated"),
        (status = FORBIDDEN, description = "Account suspended"),
    ),
    tag = PROVIDER_TAG,
)]
pub(crate) async fn update_restaurant(
    Slice(provider): Slice<Provider>,
    auth: Authenticated,
    Path(id): Path<String>,
    ActionBody(input): ActionBody<RestaurantUpsertInput>,
) -> ActionOutcome {
    outcome(provider.service.update_restaurant(&auth.session, auth.cookie(), &id, input).await)
}

#[utoipa::path(
    get,
    path = "/provider-dashboard/menu-items",
    responses((status = OK, description = "Menu of the provider's restaurant")),
    tag = PROVIDER_TAG,
)]
pub(crate) async fn menu(Slice(provider): Slice<Provider>, auth: Authenticated) -> ServiceResult<Vec<MenuItem>> {
    provider.service.my_menu(&auth.session, auth.cookie()).await.into()
}

#[utoipa::path(
    post,
    path = "/provider-dashboard/menu-items",
    responses(
        (status = OK, description = "Menu item created"),
        (status = BAD_REQUEST, description = "Missing name or non-positive price"),
        (status = FORBIDDEN, description = "Account suspended"),
    ),
    tag = PROVIDER_TAG,
)]
pub(crate) async fn create_menu_item(
    Slice(provider): Slice<Provider>,
    auth: Authenticated,
    ActionBody(input): ActionBody<CreateMenuItemInput>,
) -> ActionOutcome {
    outcome(provider.service.create_menu_item(&auth.session, auth.cookie(), input).await)
}

#[utoipa::path(
    get,
    path = "/provider-dashboard/menu-items/{id}",
    params(("id" = String, Path, description = "Menu item id")),
    responses((status = OK, description = "Menu item"), (status = NOT_FOUND, description = "Unknown item")),
    tag = PROVIDER_TAG,
)]
pub(crate) async fn menu_item(
    Slice(provider): Slice<Provider>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> ServiceResult<MenuItem> {
    provider
        .service
        .menu_item(&id, auth.cookie())
        .await
        .and_then(|item| item.ok_or_else(|| ServiceError::not_found("Menu item not found.")))
        .into()
}

#[utoipa::path(
    patch,
    path = "/provider-dashboard/menu-items/{id}",
    params(("id" = String, Path, description = "Menu item id")),
    responses((status = OK, description = "Menu item updated"), (status = FORBIDDEN, description = "Account suspended")),
    tag = PROVIDER_TAG,
)]
pub(crate) async fn update_menu_item(
    Slice(provider): Slice<Provider>,
    auth: Authenticated,
    Path(id): Path<String>,
    ActionBody(input): ActionBody<UpdateMenuItemInput>,
) -> ActionOutcome {
    outcome(provider.service.update_menu_item(&auth.session, auth.cookie(), &id, &input).await)
}

#[utoipa::path(
    delete,
    path = "/provider-dashboard/menu-items/{id}",
    params(("id" = String, Path, description = "Menu item id")),
    responses((status = OK, description = "Menu item deleted"), (status = FORBIDDEN, description = "Account suspended")),
    tag = PROVIDER_TAG,
)]
pub(crate) async fn delete_menu_item(
    Slice(provider): Slice<Provider>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> ActionOutcome {
    match provider.service.delete_menu_item(&auth.session, auth.cookie(), &id).await {
        Ok(()) => ActionOutcome::done(),
        Err(error) => ActionOutcome::failed(error),
    }
}

#[utoipa::path(
    patch,
    path = "/provider-dashboard/menu-items/{id}/availability",
    params(("id" = String, Path, description = "Menu item id")),
    responses((status = OK, description = "Reconciled row, or the restored row and why")),
    tag = PROVIDER_TAG,
)]
pub(crate) async fn set_availability(
    Slice(provider): Slice<Provider>,
    auth: Authenticated,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<MutationRequest<MenuItem, AvailabilityChange>>,
) -> MutationOutcome<MenuItem> {
    let MutationRequest { mut row, change } = request;
    row.id.clone_from(&id);
    let is_available = change.is_available;
    let edit = Optimistic::apply(row, |row| row.is_available = is_available);
    let result = provider.service.set_availability(&auth.session, auth.cookie(), &id, is_available).await;
    MutationOutcome::settle(edit, result)
}

#[utoipa::path(
    get,
    path = "/provider-dashboard/order",
    responses((status = OK, description = "Orders of the provider's restaurant")),
    tag = PROVIDER_TAG,
)]
pub(crate) async fn orders(Slice(provider): Slice<Provider>, auth: Authenticated) -> ServiceResult<Vec<Order>> {
    provider.service.orders(auth.cookie()).await.into()
}

#[utoipa::path(
    patch,
    path = "/provider-dashboard/order/{id}/status",
    params(("id" = String, Path, description = "Order id")),
    responses((status = OK, description = "Reconciled row, or the restored row and why")),
    tag = PROVIDER_TAG,
)]
pub(crate) async fn set_order_status(
    Slice(provider): Slice<Provider>,
    auth: Authenticated,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<MutationRequest<Order, OrderStatusChange>>,
) -> MutationOutcome<Order> {
    let MutationRequest { mut row, change } = request;
    row.id = id;
    let edit = Optimistic::apply(row, |row| row.status = change.status);
    let result = provider.service.set_order_status(auth.cookie(), edit.snapshot(), change.status).await;
    MutationOutcome::settle(edit, result)
}
