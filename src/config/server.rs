//! Probe server configuration.

use std::net::SocketAddr;
use std::time::Duration;

use super::parse::{env_duration, env_or};
use super::ConfigError;

/// Server configuration loaded from environment.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen address (default: 0.0.0.0:8080).
    pub listen_addr: SocketAddr,
    /// How long readiness reports unavailable before the listener closes.
    /// None disables the drain period.
    pub drain_timeout: Option<Duration>,
    /// How long open connections may take to finish after the listener
    /// closes. None waits indefinitely.
    pub shutdown_timeout: Option<Duration>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env_or("LISTEN_ADDR", "0.0.0.0:8080");
        let listen_addr: SocketAddr = addr.parse().map_err(|e| ConfigError::Parse {
            key: "LISTEN_ADDR".into(),
            value: addr.clone(),
            error: format!("{}", e),
        })?;

        Ok(Self {
            listen_addr,
            drain_timeout: env_duration("DRAIN_TIMEOUT", "5s")?,
            shutdown_timeout: env_duration("SHUTDOWN_TIMEOUT", "10s")?,
        })
    }
}
