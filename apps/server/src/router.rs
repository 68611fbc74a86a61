use axum::{Router, middleware};
use fhub::features::identity::{SessionResolver, route_guard};
use fhub::kernel::server::reply::ServiceError;
use fhub::kernel::server::state::ApiState;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(
    title = "FoodHub Gateway",
    description = "Session-aware gateway between the FoodHub web client and the marketplace backend"
))]
struct ApiDoc;

async fn not_found() -> ServiceError {
    ServiceError::not_found("Page not found.")
}

/// Every route, guarded. The fallback sits inside the guard so unknown dashboard paths
/// still redirect visitors without the right role.
#[allow(unreachable_pub)]
pub fn init(state: ApiState, resolver: SessionResolver) -> Router {
    let api = ApiDoc::openapi();

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(fhub::server::router::system_router())
        .merge(fhub::router())
        .split_for_parts();

    let scalar_routes = Scalar::with_url("/api", api_doc);

    Router::new()
        .merge(openapi_routes)
        .merge(scalar_routes)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(resolver, route_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
