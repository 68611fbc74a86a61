use crate::Admin;
use crate::dashboard::AdminDashboard;
use axum::extract::State;
use fhub_identity::{Authenticated, load_profile};
use fhub_kernel::backend::BackendClient;
use fhub_kernel::domain::constants::ADMIN_TAG;
use fhub_kernel::domain::models::order::AdminOrderRow;
use fhub_kernel::domain::models::user::{AdminUser, ApprovalChange, StatusChange, UserMe};
use fhub_kernel::domain::mutation::{MutationRequest, Optimistic};
use fhub_kernel::server::extract::{JsonBody, Path, Slice};
use fhub_kernel::server::reply::{MutationOutcome, ServiceResult};

#[utoipa::path(
    get,
    path = "/admin-dashboard",
    responses((status = OK, description = "Platform KPIs, 14-day series and the most recent records")),
    tag = ADMIN_TAG,
)]
pub(crate) async fn dashboard(Slice(admin): Slice<Admin>, auth: Authenticated) -> ServiceResult<AdminDashboard> {
    ServiceResult::ok(admin.service.dashboard(auth.cookie()).await)
}

#[utoipa::path(
    get,
    path = "/admin-dashboard/profile",
    responses((status = OK, description = "Own profile")),
    tag = ADMIN_TAG,
)]
pub(crate) async fn profile(State(backend): State<BackendClient>, auth: Authenticated) -> ServiceResult<UserMe> {
    load_profile(&backend, auth.cookie()).await.into()
}

#[utoipa::path(
    get,
    path = "/admin-dashboard/users",
    responses((status = OK, description = "Every user account")),
    tag = ADMIN_TAG,
)]
pub(crate) async fn users(Slice(admin): Slice<Admin>, auth: Authenticated) -> ServiceResult<Vec<AdminUser>> {
    admin.service.users(auth.cookie()).await.into()
}

#[utoipa::path(
    patch,
    path = "/admin-dashboard/users/{id}/status",
    params(("id" = String, Path, description = "User id")),
    responses((status = OK, description = "Updated row, or the restored row and why")),
    tag = ADMIN_TAG,
)]
pub(crate) async fn set_status(
    Slice(admin): Slice<Admin>,
    auth: Authenticated,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<MutationRequest<AdminUser, StatusChange>>,
) -> MutationOutcome<AdminUser> {
    let MutationRequest { row, change } = request;
    let edit = Optimistic::apply(row, |row| row.status = Some(change.status));
    let result = admin.service.set_status(auth.cookie(), &id, change).await.map(|()| None);
    MutationOutcome::settle(edit, result)
}

#[utoipa::path(
    patch,
    path = "/admin-dashboard/users/{id}/approval",
    params(("id" = String, Path, description = "User id")),
    responses((status = OK, description = "Updated row, or the restored row and why")),
    tag = ADMIN_TAG,
)]
pub(crate) async fn set_approval(
    Slice(admin): Slice<Admin>,
    auth: Authenticated,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<MutationRequest<AdminUser, ApprovalChange>>,
) -> MutationOutcome<AdminUser> {
    let MutationRequest { row, change } = request;
    let edit = Optimistic::apply(row, |row| row.is_approved = change.is_approved);
    let result = admin.service.set_approval(auth.cookie(), &id, change).await.map(|()| None);
    MutationOutcome::settle(edit, result)
}

#[utoipa::path(
    get,
    path = "/admin-dashboard/order",
    responses((status = OK, description = "Every order with customer, restaurant and item names")),
    tag = ADMIN_TAG,
)]
pub(crate) async fn orders(Slice(admin): Slice<Admin>, auth: Authenticated) -> ServiceResult<Vec<AdminOrderRow>> {
    admin.service.orders_table(auth.cookie()).await.into()
}
