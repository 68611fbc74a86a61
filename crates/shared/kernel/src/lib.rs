//! Kernel utilities shared across slices.
//! Keep this crate lightweight: config loading, the pure route-guard decision,
//! the shared [`server::state::ApiState`] and the uniform reply types.
//!
//! ## Config loading
//! ```rust,no_run
//! use fhub_kernel::config::load_config;
//! use fhub_kernel::domain::config::GatewayConfig;
//!
//! let cfg: GatewayConfig = load_config(Some("gateway")).unwrap();
//! ```
pub mod config;
pub mod security;
pub mod server;

pub use fhub_backend as backend;
pub use fhub_domain as domain;
