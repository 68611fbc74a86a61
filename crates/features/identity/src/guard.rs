use crate::context::{AuthContext, cookie_header};
use crate::resolver::SessionResolver;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use fhub_kernel::security::route::{Decision, classify, decide};
use tracing::debug;

/// Route guard middleware.
///
/// Paths outside the auth pages and dashboards pass straight through without a
/// session lookup. Guarded paths are either allowed, with the resolved [`AuthContext`]
/// stored for the handlers, or answered with a silent 307 redirect.
pub async fn route_guard(
    State(resolver): State<SessionResolver>,
    mut request: Request,
    next: Next,
) -> Response {
    let route = classify(request.uri().path());
    if !route.is_guarded() {
        return next.run(request).await;
    }

    let cookie = cookie_header(request.headers());
    let session = resolver.resolve(cookie.as_deref()).await;
    let role = session.as_ref().map(|session| session.role());

    match decide(route, role) {
        Decision::Allow => {
            request.extensions_mut().insert(AuthContext { session, cookie });
            next.run(request).await
        },
        Decision::Redirect(to) => {
            debug!(path = %request.uri().path(), ?role, to, "Route guard redirect");
            Redirect::temporary(to).into_response()
        },
    }
}
