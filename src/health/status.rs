//! Probe kinds and evaluation results.

use std::collections::BTreeMap;

use http::StatusCode;
use serde::Serialize;

/// Result recorded for a passing check.
pub const CHECK_OK: &str = "OK";

/// Health probe types (Kubernetes-compatible).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeType {
    /// Liveness probe: restart container if failed.
    Liveness,
    /// Readiness probe: remove from load balancer if failed.
    /// Includes every liveness check.
    Readiness,
}

impl std::fmt::Display for ProbeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Liveness => write!(f, "liveness"),
            Self::Readiness => write!(f, "readiness"),
        }
    }
}

/// Aggregate verdict of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateStatus {
    Ok,
    Unavailable,
}

impl AggregateStatus {
    /// HTTP status code reported to the orchestrator.
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::Ok => StatusCode::OK,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

/// Per-check outcome: `"OK"` or the failure message.
///
/// Serializes as a flat JSON object with keys in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CheckResults(BTreeMap<String, String>);

impl CheckResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_ok(&mut self, name: String) {
        self.0.insert(name, CHECK_OK.to_string());
    }

    pub(crate) fn record_failure(&mut self, name: String, message: String) {
        self.0.insert(name, message);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Names whose entry is not `"OK"`.
    pub fn failing(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, result)| result.as_str() != CHECK_OK)
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outcome of evaluating one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub status: AggregateStatus,
    pub results: CheckResults,
}

impl Evaluation {
    /// Unavailable with no per-check entries.
    pub fn unavailable() -> Self {
        Self {
            status: AggregateStatus::Unavailable,
            results: CheckResults::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}
