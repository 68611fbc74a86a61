use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Top-level gateway configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfigInner {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
}

/// Arc-wrapped config, cheap to clone into every subsystem.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(flatten, default)]
    inner: Arc<GatewayConfigInner>,
}

impl Deref for GatewayConfig {
    type Target = GatewayConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for GatewayConfig {
    fn deref_mut(&mut self) -> &mut GatewayConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP listener.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// External authentication service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Base URL of the auth API; the session endpoint is appended to it.
    pub url: String,
    pub session_timeout_ms: u64,
    /// Target of the `/api/auth/*` pass-through. Falls back to `url` when unset.
    pub proxy_url: Option<String>,
}

impl AuthConfig {
    #[must_use]
    pub const fn session_timeout(&self) -> Duration {
        Duration::from_millis(self.session_timeout_ms)
    }

    #[must_use]
    pub fn proxy_target(&self) -> &str {
        self.proxy_url.as_deref().unwrap_or(&self.url)
    }
}

/// External REST backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub url: String,
    pub timeout_ms: u64,
}

impl BackendConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Extra filter directives, e.g. `fhub=debug,hyper=info`.
    pub filter: Option<String>,
    pub json: bool,
    /// Directory for rolling log files; console only when unset.
    pub path: Option<PathBuf>,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 3000, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5000/api/auth".to_owned(),
            session_timeout_ms: 3_000,
            proxy_url: None,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self { url: "http://localhost:5000/api".to_owned(), timeout_ms: 10_000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, json: false, path: None }
    }
}
