//! Configuration module for healthcheck.
//!
//! Centralized configuration loading from environment variables. The probe
//! handler itself never reads the environment; it takes a [`HandlerConfig`].
//!
//! # Example
//!
//! ```rust,ignore
//! use healthcheck::config::Config;
//!
//! let config = Config::from_env()?;
//! println!("Listen address: {}", config.server.listen_addr);
//! println!("Liveness path: {}", config.handler.liveness_path);
//! ```

mod error;
mod handler;
mod logging;
mod parse;
mod server;

pub use error::ConfigError;
pub use handler::{HandlerConfig, DEFAULT_LIVENESS_PATH, DEFAULT_READINESS_PATH};
pub use logging::LoggingConfig;
pub use parse::parse_duration;
pub use server::ServerConfig;

/// Complete application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Probe endpoint configuration.
    pub handler: HandlerConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            handler: HandlerConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }

    /// Print configuration summary to log.
    pub fn log_summary(&self) {
        use tracing::info;

        info!("Configuration loaded:");
        info!("  Listen: {}", self.server.listen_addr);
        info!("  Liveness: {}", self.handler.liveness_path);
        info!("  Readiness: {}", self.handler.readiness_path);

        match self.server.drain_timeout {
            Some(timeout) => info!("  Drain timeout: {:?}", timeout),
            None => info!("  Drain timeout: disabled"),
        }

        match self.server.shutdown_timeout {
            Some(timeout) => info!("  Shutdown timeout: {:?}", timeout),
            None => info!("  Shutdown timeout: unlimited"),
        }
    }
}
