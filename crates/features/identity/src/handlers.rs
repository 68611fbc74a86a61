use crate::context::{AuthContext, Authenticated};
use axum::Json;
use axum::extract::State;
use fhub_kernel::backend::BackendClient;
use fhub_kernel::domain::constants::IDENTITY_TAG;
use fhub_kernel::domain::models::user::{UpdateMeInput, UserMe};
use fhub_kernel::domain::navigation::{NavSection, sections_for};
use fhub_kernel::domain::role::Role;
use fhub_kernel::domain::session::Session;
use fhub_kernel::server::extract::JsonBody;
use fhub_kernel::server::reply::{BackendResultExt, ServiceError, ServiceResult};
use serde::Serialize;

const SIGN_IN_ENDPOINT: &str = "/api/auth/sign-in/email";
const SIGN_UP_ENDPOINT: &str = "/api/auth/sign-up/email";

/// Caller's profile from `/users/me`. Backs every dashboard profile page.
pub async fn load_profile(
    backend: &BackendClient,
    cookie: Option<&str>,
) -> Result<UserMe, ServiceError> {
    backend.get(["users", "me"]).cookie(cookie).fetch().await.or_fallback("Failed to load profile")
}

/// What an auth page needs to render its form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPage {
    pub page: &'static str,
    /// Where the form posts its credentials.
    pub action: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
    /// Role that must also provide a business name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name_required_for: Option<Role>,
}

#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = OK, description = "Session of the caller"),
        (status = UNAUTHORIZED, description = "No session"),
    ),
    tag = IDENTITY_TAG,
)]
pub(crate) async fn session(context: AuthContext) -> ServiceResult<Session> {
    context.session.ok_or_else(|| ServiceError::unauthorized("Session is missing.")).into()
}

#[utoipa::path(
    get,
    path = "/api/navigation",
    responses(
        (status = OK, description = "Sidebar sections for the caller's role"),
        (status = UNAUTHORIZED, description = "No session"),
    ),
    tag = IDENTITY_TAG,
)]
pub(crate) async fn navigation(auth: Authenticated) -> ServiceResult<&'static [NavSection]> {
    ServiceResult::ok(sections_for(auth.role()))
}

#[utoipa::path(
    patch,
    path = "/api/users/me",
    responses(
        (status = OK, description = "Updated profile"),
        (status = BAD_REQUEST, description = "The backend refused the update"),
    ),
    tag = IDENTITY_TAG,
)]
pub(crate) async fn update_me(
    State(backend): State<BackendClient>,
    auth: Authenticated,
    JsonBody(input): JsonBody<UpdateMeInput>,
) -> ServiceResult<UserMe> {
    backend
        .patch(["users", "me"])
        .cookie(auth.cookie())
        .json(&input)
        .fetch()
        .await
        .or_fallback("Failed to update profile")
        .map_err(|error| ServiceError::bad_request(error.message))
        .into()
}

#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = OK, description = "Login form"),
        (status = TEMPORARY_REDIRECT, description = "Already signed in"),
    ),
    tag = IDENTITY_TAG,
)]
pub(crate) async fn login_page() -> Json<AuthPage> {
    Json(AuthPage {
        page: "login",
        action: SIGN_IN_ENDPOINT,
        roles: Vec::new(),
        business_name_required_for: None,
    })
}

#[utoipa::path(
    get,
    path = "/register",
    responses(
        (status = OK, description = "Registration form"),
        (status = TEMPORARY_REDIRECT, description = "Already signed in"),
    ),
    tag = IDENTITY_TAG,
)]
pub(crate) async fn register_page() -> Json<AuthPage> {
    Json(AuthPage {
        page: "register",
        action: SIGN_UP_ENDPOINT,
        roles: vec![Role::Customer, Role::Provider],
        business_name_required_for: Some(Role::Provider),
    })
}
