//! Probe endpoint configuration.

use super::parse::env_or;
use super::ConfigError;

/// Default liveness path.
pub const DEFAULT_LIVENESS_PATH: &str = "/live";
/// Default readiness path.
pub const DEFAULT_READINESS_PATH: &str = "/ready";

/// Paths served by the probe handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Liveness endpoint (default: /live).
    pub liveness_path: String,
    /// Readiness endpoint (default: /ready).
    pub readiness_path: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            liveness_path: DEFAULT_LIVENESS_PATH.to_string(),
            readiness_path: DEFAULT_READINESS_PATH.to_string(),
        }
    }
}

impl HandlerConfig {
    /// Load endpoint paths from LIVENESS_ENDPOINT and READINESS_ENDPOINT.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            liveness_path: env_or("LIVENESS_ENDPOINT", DEFAULT_LIVENESS_PATH),
            readiness_path: env_or("READINESS_ENDPOINT", DEFAULT_READINESS_PATH),
        };
        config.validate()?;
        Ok(config)
    }

    /// Override the liveness path.
    pub fn with_liveness_path(mut self, path: impl Into<String>) -> Self {
        self.liveness_path = path.into();
        self
    }

    /// Override the readiness path.
    pub fn with_readiness_path(mut self, path: impl Into<String>) -> Self {
        self.readiness_path = path.into();
        self
    }

    /// Paths must be absolute and distinct.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, path) in [
            ("LIVENESS_ENDPOINT", &self.liveness_path),
            ("READINESS_ENDPOINT", &self.readiness_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::Invalid {
                    key: key.into(),
                    message: format!("path must start with '/': {}", path),
                });
            }
        }

        if self.liveness_path == self.readiness_path {
            return Err(ConfigError::Invalid {
                key: "READINESS_ENDPOINT".into(),
                message: format!(
                    "readiness path must differ from liveness path ({})",
                    self.liveness_path
                ),
            });
        }

        Ok(())
    }
}
