//! Facade crate for the `FoodHub` gateway features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Call [`init`] to build every feature slice and the session resolver.
//! - Mount [`router`] and put [`features::identity::route_guard`] in front of it.

pub use fhub_domain as domain;
use fhub_domain::config::GatewayConfig;
use fhub_domain::registry::InitializedSlice;
use fhub_identity::{IdentityError, SessionResolver};
pub use fhub_kernel as kernel;
use fhub_kernel::backend::BackendClient;
use fhub_kernel::server::state::ApiState;
use utoipa_axum::router::OpenApiRouter;

pub mod server {
    pub mod router {
        pub use fhub_kernel::server::router::system_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use fhub_admin as admin;
    pub use fhub_catalog as catalog;
    pub use fhub_identity as identity;
    pub use fhub_ordering as ordering;
    pub use fhub_provider as provider;

    pub const ENABLED: &[&str] = &["identity", "catalog", "ordering", "provider", "admin"];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Every initialized slice, plus the resolver the route guard runs with.
#[derive(Debug)]
pub struct Features {
    pub slices: Vec<InitializedSlice>,
    pub resolver: SessionResolver,
}

/// Initialize all features.
///
/// # Errors
/// The auth service URLs in `config` are not valid base URLs.
pub fn init(config: &GatewayConfig, backend: &BackendClient) -> Result<Features, IdentityError> {
    let identity = features::identity::init(config)?;
    let resolver = identity.resolver.clone();

    let slices = vec![
        InitializedSlice::new(identity),
        features::catalog::init(backend),
        features::ordering::init(backend),
        features::provider::init(backend),
        features::admin::init(backend),
    ];

    Ok(Features { slices, resolver })
}

/// Routes of every feature, with their OpenAPI descriptions.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .merge(features::identity::router())
        .merge(features::catalog::router())
        .merge(features::ordering::router())
        .merge(features::provider::router())
        .merge(features::admin::router())
}
