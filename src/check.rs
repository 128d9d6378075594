//! The check contract.
//!
//! A check is a zero-argument, synchronous probe that either succeeds or
//! fails with a human-readable reason. Only the rendered message of a
//! failure is ever inspected, so any closure returning
//! `Result<(), E: Display>` plugs in directly:
//!
//! ```rust,ignore
//! use healthcheck::{CheckError, HealthHandler};
//!
//! let health = HealthHandler::default();
//! health.register_readiness("database", move || -> Result<(), CheckError> {
//!     pool.ping().map_err(|e| CheckError::new(e.to_string()))
//! });
//! ```

use std::fmt;

/// A named health probe.
///
/// Implementations may block (network calls, file reads) and must bound
/// their own run time: the evaluator waits for every check to return.
pub trait Check: Send + Sync {
    /// Run the probe once.
    fn check(&self) -> Result<(), CheckError>;
}

impl<F, E> Check for F
where
    F: Fn() -> Result<(), E> + Send + Sync,
    E: fmt::Display,
{
    fn check(&self) -> Result<(), CheckError> {
        self().map_err(|e| CheckError::new(e.to_string()))
    }
}

/// Failure reported by a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckError {
    message: String,
}

impl CheckError {
    /// Create a failure with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Message reported in the full probe body.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CheckError {}

impl From<String> for CheckError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for CheckError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
