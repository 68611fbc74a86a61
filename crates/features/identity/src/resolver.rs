use crate::error::{IdentityError, IdentityErrorExt};
use fhub_kernel::backend::BackendClient;
use fhub_kernel::domain::config::AuthConfig;
use fhub_kernel::domain::constants::SESSION_PATH;
use fhub_kernel::domain::session::Session;
use tracing::{debug, warn};

/// Looks up the session behind an inbound `Cookie` header.
///
/// One call to `{auth.url}/get-session` per lookup, bounded by the session timeout.
/// Every failure (transport, timeout, non-2xx, malformed payload) reads as "no session";
/// nothing is cached between requests. An unrecognized role is still a session.
#[derive(Debug, Clone)]
pub struct SessionResolver {
    client: BackendClient,
}

impl SessionResolver {
    pub fn new(config: &AuthConfig) -> Result<Self, IdentityError> {
        let client = BackendClient::builder()
            .base_url(config.url.as_str())
            .timeout(config.session_timeout())
            .build()
            .context("Building session client")?;
        Ok(Self { client })
    }

    #[must_use]
    pub const fn from_client(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn resolve(&self, cookie: Option<&str>) -> Option<Session> {
        let Some(cookie) = cookie.map(str::trim).filter(|raw| !raw.is_empty()) else {
            debug!("No cookie on request, skipping session lookup");
            return None;
        };

        match self.client.get([SESSION_PATH]).cookie(Some(cookie)).fetch::<Option<Session>>().await {
            Ok(session) => session,
            Err(error) => {
                warn!(%error, "Session lookup failed, treating request as anonymous");
                None
            },
        }
    }
}
