//! healthcheck - Liveness and readiness probes over HTTP.
//!
//! Callers register named checks against a [`HealthHandler`]; orchestrators
//! poll two endpoints and read the aggregate verdict from the status code.
//!
//! # Features
//!
//! - **Two-tier probes**: readiness always includes every liveness check
//! - **Concurrent registry**: checks may be registered while probes are served
//! - **No short-circuit**: every check runs, every failure is reported
//! - **Terse by default**: `{}` body unless `?full=1` is requested
//! - **Structured logging**: JSON lines via tracing
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use healthcheck::{CheckError, HealthHandler, HealthServer};
//!
//! let handler = Arc::new(HealthHandler::default());
//! handler.register_liveness("threads", || -> Result<(), CheckError> { Ok(()) });
//! handler.register_readiness("database", move || db.ping());
//!
//! HealthServer::new(handler).run("0.0.0.0:8080".parse()?).await?;
//! ```

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod check;
pub mod config;
pub mod health;
pub mod logging;
pub mod server;

// Re-exports for convenience
pub use check::{Check, CheckError};
pub use config::{Config, HandlerConfig};
pub use health::{AggregateStatus, CheckRegistry, CheckResults, Evaluation, ProbeType};
pub use server::{HealthHandler, HealthServer};
