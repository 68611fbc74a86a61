//! Identity feature slice.
//!
//! * [`SessionResolver`]: cookie to session, failing closed.
//! * [`route_guard`]: the middleware in front of auth pages and dashboards.
//! * [`AuthContext`] / [`Authenticated`]: per-request authorization context for handlers.
//! * `/api/auth/*` pass-through, session, navigation and own-profile endpoints.

mod context;
mod error;
mod guard;
mod handlers;
mod proxy;
mod resolver;

pub use crate::context::{AuthContext, Authenticated, cookie_header};
pub use crate::error::{IdentityError, IdentityErrorExt};
pub use crate::guard::route_guard;
pub use crate::handlers::{AuthPage, load_profile};
pub use crate::resolver::SessionResolver;

use axum::routing::any;
use fhub_kernel::backend::BackendClient;
use fhub_kernel::domain::config::GatewayConfig;
use fhub_kernel::server::state::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Identity feature state
#[fhub_derive::fhub_slice]
pub struct Identity {
    pub resolver: SessionResolver,
    /// Client rooted at the auth proxy target.
    pub proxy: BackendClient,
}

/// Initialize the identity feature.
///
/// Returns the slice itself rather than an [`InitializedSlice`](fhub_kernel::domain::registry::InitializedSlice):
/// the route guard runs with its [`SessionResolver`].
///
/// # Errors
/// Either auth service URL is not a valid base URL.
pub fn init(config: &GatewayConfig) -> Result<Identity, IdentityError> {
    let resolver = SessionResolver::new(&config.auth)?;
    let proxy = BackendClient::builder()
        .base_url(config.auth.proxy_target())
        .timeout(config.backend.timeout())
        .build()
        .context("Building auth proxy client")?;

    tracing::info!(auth = %config.auth.url, proxy = config.auth.proxy_target(), "Identity slice initialized");
    Ok(Identity::new(IdentityInner { resolver, proxy }))
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::session))
        .routes(routes!(handlers::navigation))
        .routes(routes!(handlers::update_me))
        .routes(routes!(handlers::login_page))
        .routes(routes!(handlers::register_page))
        .route("/api/auth/{*path}", any(proxy::auth_proxy))
}
