//! # Logger
//!
//! Installs the gateway's global `tracing` subscriber: a compact console layer
//! and an optional rolling file layer written through a non-blocking worker.
//!
//! * `RUST_LOG` still applies on top of the configured level.
//! * [`LoggerBuilder::env_filter`] sets module directives (`fhub=debug,hyper=info`).
//! * [`LoggerBuilder::json`] switches every layer to JSON lines.
//!
//! ## Example
//!
//! ```rust
//! # use fhub_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("gateway")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use private::Sealed;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug)]
struct LoggerConfig {
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            path: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}

/// Builder for the global tracing subscriber. A name is required before [`LoggerBuilder::init`].
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName> {
    config: LoggerConfig,
    name: N,
}

impl LoggerBuilder<NoName> {
    /// Sets the logger name, also used as the log file prefix.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName> {
        LoggerBuilder { config: self.config, name: WithName(name.into()) }
    }
}

impl LoggerBuilder<WithName> {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Adds explicit filter directives. Invalid directives make [`LoggerBuilder::init`] fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.config.json = enabled;
        self
    }

    /// Enables the rolling file layer under `path`.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = Some(path.into());
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    /// Installs the global subscriber.
    ///
    /// The returned [`Logger`] owns the file writer's [`WorkerGuard`]; keep it alive until
    /// shutdown so buffered lines are flushed.
    ///
    /// # Errors
    /// [`LoggerError::Subscriber`] when a global subscriber is already set,
    /// [`LoggerError::InvalidConfiguration`] for invalid settings.
    pub fn init(self) -> Result<Logger, LoggerError> {
        validate_config(&self.config, &self.name.0)?;
        let env_filter = build_env_filter(&self.config)?;

        let mut layers: Vec<BoxedLayer> = Vec::new();
        if self.config.console {
            layers.push(console_layer(self.config.json));
        }

        let guard = match &self.config.path {
            Some(path) => {
                let (file_layer, guard) = file_layer(&self.config, path.clone(), &self.name.0)?;
                layers.push(file_layer);
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console or file output.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(layers).with(env_filter).try_init()?;

        Ok(Logger { guard })
    }
}

fn console_layer(json: bool) -> BoxedLayer {
    if json {
        layer().json().with_ansi(false).boxed()
    } else {
        layer().compact().with_ansi(true).boxed()
    }
}

fn file_layer(
    config: &LoggerConfig,
    path: PathBuf,
    name: &str,
) -> Result<(BoxedLayer, WorkerGuard), LoggerError> {
    fs::create_dir_all(&path)
        .context(format!("Failed to create log directory: {}", path.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(config.rotation.clone())
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(config.max_files)
        .build(path)?;

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let base = layer().with_writer(writer).with_ansi(false);
    let boxed = if config.json { base.json().boxed() } else { base.boxed() };

    Ok((boxed, guard))
}

/// Handle to the installed logging system. Drop it only on shutdown.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: NoName }
    }

    /// The file writer's guard, present only when file output is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

/// Parses a textual level such as `"info"` or `"DEBUG"`.
///
/// # Errors
/// [`LoggerError::InvalidConfiguration`] for unknown level names.
pub fn parse_level(raw: &str) -> Result<LevelFilter, LoggerError> {
    LevelFilter::from_str(raw.trim()).map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Invalid log level '{raw}': {e}").into(),
        context: None,
    })
}

fn validate_config(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if config.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }

    Ok(())
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    config.env_filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
                context: None,
            })
        },
    )
}
