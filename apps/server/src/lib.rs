//! # FoodHub Gateway Server
//!
//! The session-aware gateway in front of the `FoodHub` marketplace backend, built on `Axum`.
//!
//! ## Example
//! ```no_run
//! use fhub_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(3000)
//!         .build()?
//!         .run()
//!         .await
//! }
//! ```

mod router;

use anyhow::{Context, Result};
use axum::Router;
use axum_server::Handle;
use fhub::domain::config::GatewayConfig;
use fhub::features::identity::SessionResolver;
use fhub::kernel::backend::BackendClient;
use fhub::kernel::server::state::ApiState;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: GatewayConfig,
}

impl ServerBuilder {
    /// Set up the server's configuration.
    pub fn config(mut self, cfg: GatewayConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    fn validate_ssl_config(&self) -> Result<()> {
        if let Some(ssl) = &self.cfg.server.ssl {
            if !ssl.cert.exists() {
                anyhow::bail!("SSL certificate not found at: {}", ssl.cert.display());
            }
            if !ssl.key.exists() {
                anyhow::bail!("SSL key not found at: {}", ssl.key.display());
            }

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let metadata = ssl.key.metadata()?;
                if metadata.permissions().mode() & 0o077 != 0 {
                    tracing::warn!(
                        "SECURITY: SSL Private Key {} has insecure permissions (should be 600)",
                        ssl.key.display()
                    );
                }
            }
        }
        Ok(())
    }

    /// Consumes the builder and initializes the server.
    ///
    /// # Process
    /// 1. Validates the TLS files, when TLS is configured
    /// 2. Builds the backend client
    /// 3. Initializes every feature slice and the session resolver
    /// 4. Constructs application state
    ///
    /// # Errors
    /// Returns an error if:
    /// * SSL certificate/key files are missing
    /// * The backend or auth service URL is not a valid base URL
    pub fn build(self) -> Result<Server> {
        self.validate_ssl_config()?;

        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);
        info!(
            address = %address,
            backend = %self.cfg.backend.url,
            auth = %self.cfg.auth.url,
            "Initializing server"
        );

        let backend = BackendClient::builder()
            .base_url(self.cfg.backend.url.as_str())
            .timeout(self.cfg.backend.timeout())
            .build()
            .context("Failed to build backend client")?;

        let features = fhub::init(&self.cfg, &backend).context("Platform bootstrap failed")?;
        info!(features = ?fhub::features::ENABLED, "Feature slices ready");

        let state = ApiState::builder()
            .config(self.cfg)
            .backend(backend)
            .register_slices(features.slices)
            .build()
            .context("Failed to finalize API state registry")?;

        Ok(Server { state, resolver: features.resolver })
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
    resolver: SessionResolver,
}

impl Server {
    /// Returns a new [`ServerBuilder`] to configure the server.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// The complete, guarded application router.
    #[must_use]
    pub fn app(&self) -> Router {
        router::init(self.state.clone(), self.resolver.clone())
    }

    /// Starts the server and runs until the shutdown signal is received.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the configured address
    /// or if SSL/TLS setup fails.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);

        info!(
            address = %address,
            ssl = cfg.server.ssl.is_some(),
            "Starting server"
        );

        let app = self.app();

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, draining connections...");
            shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });

        if let Some(ssl_config) = &cfg.server.ssl {
            info!("Starting HTTPS server on https://{address}");

            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                &ssl_config.cert,
                &ssl_config.key,
            )
            .await
            .context("Failed to load SSL/TLS certificates")?;

            axum_server::bind_rustls(address, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTPS server failed")?;
        } else {
            info!("Starting HTTP server on http://{address}");

            axum_server::bind(address)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTP server failed")?;
        }

        info!("Server shutdown complete");
        Ok(())
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }
}

/// Listens for shutdown signals (Ctrl+C, SIGTERM).
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => {
            res.context("Ctrl+C signal received")?;
        },
        res = terminate => {
            res.context("SIGTERM signal received")?;
        },
    }

    Ok(())
}
