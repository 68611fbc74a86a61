use crate::Identity;
use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use fhub_kernel::domain::constants::AUTH_REQUIRED;
use fhub_kernel::domain::role::Role;
use fhub_kernel::domain::session::Session;
use fhub_kernel::server::extract::Slice;
use fhub_kernel::server::reply::ServiceError;
use fhub_kernel::server::state::ApiState;

/// Who is calling, resolved at most once per request.
///
/// The route guard stores it in the request extensions for guarded paths. Anywhere else
/// the first extraction resolves it and stores it for later extractors.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    pub session: Option<Session>,
    /// Inbound `Cookie` header, forwarded verbatim to the backend.
    pub cookie: Option<String>,
}

impl AuthContext {
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().map(Session::role)
    }
}

impl FromRequestParts<ApiState> for AuthContext {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ApiState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(context) = parts.extensions.get::<Self>() {
            return Ok(context.clone());
        }

        let Slice(identity) = Slice::<Identity>::from_request_parts(parts, state).await?;
        let cookie = cookie_header(&parts.headers);
        let session = identity.resolver.resolve(cookie.as_deref()).await;

        let context = Self { session, cookie };
        parts.extensions.insert(context.clone());
        Ok(context)
    }
}

/// An [`AuthContext`] that is known to carry a session. Rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub session: Session,
    pub cookie: Option<String>,
}

impl Authenticated {
    #[must_use]
    pub const fn role(&self) -> Role {
        self.session.role()
    }

    #[must_use]
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }
}

impl FromRequestParts<ApiState> for Authenticated {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ApiState,
    ) -> Result<Self, Self::Rejection> {
        let AuthContext { session, cookie } = AuthContext::from_request_parts(parts, state).await?;
        session
            .map(|session| Self { session, cookie })
            .ok_or_else(|| ServiceError::unauthorized(AUTH_REQUIRED))
    }
}

/// All inbound `Cookie` headers joined into one, or `None` when there are none.
pub fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let joined = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join("; ");

    (!joined.is_empty()).then_some(joined)
}
