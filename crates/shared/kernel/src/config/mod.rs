use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_CONFIG_FILE: &str = "gateway";
pub const ENV_PREFIX: &str = "FHUB";

#[fhub_derive::fhub_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader.
///
/// 1. **Base file**: `path`, or `gateway` in the working directory. The extension may be
///    omitted; any format the `config` crate knows is accepted.
/// 2. **Environment**: variables prefixed `FHUB__`, nested with double underscores
///    (`FHUB__AUTH__SESSION_TIMEOUT_MS` overrides `auth.session_timeout_ms`).
///
/// # Errors
/// The file is missing, a value has the wrong type, or deserialization into `T` fails.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    info!("Loading config from {}", effective_path.display());

    let config = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
