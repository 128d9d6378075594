//! Liveness and readiness endpoint handler.

use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Method, Request, Response, Uri};
use tracing::{debug, error};

use super::request::wants_full_body;
use super::response::{method_not_allowed, not_found, probe_response};
use crate::check::Check;
use crate::config::HandlerConfig;
use crate::health::{CheckRegistry, Evaluation, ProbeType};

/// Serves `/live` and `/ready` (paths configurable) from a shared registry.
///
/// One instance is meant to be shared across all connections for the life
/// of the process.
#[derive(Debug, Default)]
pub struct HealthHandler {
    config: HandlerConfig,
    registry: Arc<CheckRegistry>,
}

impl HealthHandler {
    /// Create a handler with an empty registry.
    pub fn new(config: HandlerConfig) -> Self {
        Self::with_registry(config, Arc::new(CheckRegistry::new()))
    }

    /// Create a handler over an existing registry.
    pub fn with_registry(config: HandlerConfig, registry: Arc<CheckRegistry>) -> Self {
        Self { config, registry }
    }

    /// Register (or replace) a liveness check.
    pub fn register_liveness<C>(&self, name: impl Into<String>, check: C)
    where
        C: Check + 'static,
    {
        self.registry.register_liveness(name, check);
    }

    /// Register (or replace) a readiness check.
    pub fn register_readiness<C>(&self, name: impl Into<String>, check: C)
    where
        C: Check + 'static,
    {
        self.registry.register_readiness(name, check);
    }

    pub fn registry(&self) -> &Arc<CheckRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Run the checks for `probe` on the calling thread.
    pub fn evaluate(&self, probe: ProbeType) -> Evaluation {
        self.registry.evaluate(probe)
    }

    /// Probe served at `path`, if any.
    pub fn route(&self, path: &str) -> Option<ProbeType> {
        if path == self.config.liveness_path {
            Some(ProbeType::Liveness)
        } else if path == self.config.readiness_path {
            Some(ProbeType::Readiness)
        } else {
            None
        }
    }

    /// Answer a probe request synchronously.
    ///
    /// Blocks for as long as the slowest check. Intended for callers that
    /// run their own HTTP stack; [`HealthHandler::handle`] is the async
    /// variant.
    pub fn respond(&self, method: &Method, uri: &Uri) -> Response<Full<Bytes>> {
        let probe = match self.route(uri.path()) {
            Some(probe) => probe,
            None => return not_found(),
        };

        if *method != Method::GET {
            debug!(target: "probe", probe = %probe, method = %method, "Rejected probe method");
            return method_not_allowed();
        }

        let evaluation = self.evaluate(probe);
        probe_response(&evaluation, wants_full_body(uri.query()))
    }

    /// Answer a probe request, running the checks on a blocking worker.
    pub async fn handle<B>(self: Arc<Self>, req: Request<B>) -> Response<Full<Bytes>> {
        let probe = match self.route(req.uri().path()) {
            Some(probe) => probe,
            None => return not_found(),
        };

        if *req.method() != Method::GET {
            debug!(target: "probe", probe = %probe, method = %req.method(), "Rejected probe method");
            return method_not_allowed();
        }

        let full = wants_full_body(req.uri().query());
        let handler = Arc::clone(&self);
        let evaluation = match tokio::task::spawn_blocking(move || handler.evaluate(probe)).await
        {
            Ok(evaluation) => evaluation,
            Err(e) => {
                error!(target: "probe", probe = %probe, "Probe evaluation aborted: {}", e);
                Evaluation::unavailable()
            }
        };

        probe_response(&evaluation, full)
    }
}
