//! # Runtime
//!
//! Tokio runtime presets shared by the gateway binaries.
//!
//! * **High Performance**: the gateway server; larger stacks, long keep-alive.
//! * **Memory Efficient**: tooling and constrained environments.
//! * **Default**: worker count from `TOKIO_WORKER_THREADS` or the available parallelism.
//!
//! ## Example
//!
//! ```rust,ignore
//! #[fhub_runtime::main(high_performance)]
//! async fn main() -> anyhow::Result<()> {
//!     Ok(())
//! }
//! ```

pub use anyhow::Result;
pub use fhub_derive::main;

use anyhow::anyhow;
use std::sync::OnceLock;
use std::thread::available_parallelism;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

const DEFAULT_WORKER_THREADS: usize = 4;
const MAX_WORKER_THREADS: usize = 1024;
/// 3 `MiB`.
const DEFAULT_STACK_SIZE: usize = 3 * 1024 * 1024;
const MIN_STACK_SIZE: usize = 1024 * 1024;
const MAX_STACK_SIZE: usize = 16 * 1024 * 1024;
const DEFAULT_THREAD_NAME: &str = "fhub-worker";

static WORKER_THREADS: OnceLock<usize> = OnceLock::new();

fn detected_worker_threads() -> usize {
    *WORKER_THREADS.get_or_init(|| {
        std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|&n| (1..=MAX_WORKER_THREADS).contains(&n))
            .unwrap_or_else(|| {
                available_parallelism().map_or(DEFAULT_WORKER_THREADS, std::num::NonZero::get)
            })
    })
}

/// Configuration for the Tokio runtime. Setters clamp values into safe bounds.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub worker_threads: usize,
    pub stack_size: usize,
    pub thread_name: String,
    pub thread_keep_alive: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_threads: detected_worker_threads(),
            stack_size: DEFAULT_STACK_SIZE,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
            thread_keep_alive: Duration::from_secs(60),
        }
    }
}

impl RuntimeConfig {
    /// Preset for the gateway server.
    #[must_use]
    pub fn high_performance() -> Self {
        Self {
            worker_threads: detected_worker_threads(),
            stack_size: 4 * 1024 * 1024,
            thread_name: "fhub-hp".to_owned(),
            thread_keep_alive: Duration::from_secs(300),
        }
    }

    /// Preset for tools where memory footprint matters more than throughput.
    #[must_use]
    pub fn memory_efficient() -> Self {
        Self {
            worker_threads: (detected_worker_threads() / 2).max(1),
            stack_size: 2 * 1024 * 1024,
            thread_name: "fhub-mem".to_owned(),
            thread_keep_alive: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.clamp(1, MAX_WORKER_THREADS);
        self
    }

    #[must_use]
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = size.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE);
        self
    }

    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.thread_name =
            if name.trim().is_empty() { DEFAULT_THREAD_NAME.to_owned() } else { name };
        self
    }

    #[must_use]
    pub const fn with_thread_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.thread_keep_alive = keep_alive;
        self
    }
}

/// Builds a multi-threaded runtime with every driver (I/O, time) enabled.
///
/// Values that bypassed the setters are clamped here as well.
///
/// # Errors
///
/// Returns an error if the OS refuses to create the worker threads.
pub fn build_runtime_with_config(config: &RuntimeConfig) -> Result<Runtime> {
    let config = config
        .clone()
        .with_worker_threads(config.worker_threads)
        .with_stack_size(config.stack_size)
        .with_thread_name(config.thread_name.clone());
    debug!(config = ?config, "Building tokio runtime");

    Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .thread_name(&config.thread_name)
        .thread_stack_size(config.stack_size)
        .thread_keep_alive(config.thread_keep_alive)
        .enable_all()
        .build()
        .map_err(|e| anyhow!("Failed to initialize runtime: {e}"))
}
