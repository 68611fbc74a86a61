use anyhow::Context;
use fhub::domain::config::GatewayConfig;
use fhub::kernel::config::load_config;
use fhub_logger::{Logger, parse_level};
use fhub_server::Server;

#[fhub_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    let cfg: GatewayConfig = load_config(Some("gateway")).context("Critical: Configuration is malformed")?;

    let logging = &cfg.logging;
    let mut logger =
        Logger::builder().name(env!("CARGO_PKG_NAME")).level(parse_level(&logging.level)?).json(logging.json);
    if let Some(filter) = &logging.filter {
        logger = logger.env_filter(filter.as_str());
    }
    if let Some(path) = &logging.path {
        logger = logger.path(path);
    }
    let _log = logger.init()?;

    Server::builder().config(cfg).build()?.run().await
}
