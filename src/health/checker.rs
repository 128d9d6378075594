//! Check evaluation and status aggregation.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use tracing::{debug, warn};

use super::registry::{CheckCollection, CheckRegistry};
use super::{AggregateStatus, CheckResults, Evaluation, ProbeType};

/// Run every check in `collections`, in order, and aggregate the outcome.
///
/// All checks run; a single failure anywhere makes the result unavailable.
/// When a name appears in several collections the entry from the later
/// collection is kept in the results, while the aggregate status still
/// accounts for every invocation.
pub fn evaluate(probe: ProbeType, collections: &[&CheckCollection]) -> Evaluation {
    let start = Instant::now();
    let mut status = AggregateStatus::Ok;
    let mut results = CheckResults::new();
    let mut invoked = 0usize;

    for collection in collections {
        for (name, check) in collection.snapshot() {
            invoked += 1;
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| check.check()))
                .unwrap_or_else(|payload| {
                    Err(format!("check panicked: {}", panic_message(payload.as_ref())).into())
                });

            match outcome {
                Ok(()) => results.record_ok(name),
                Err(e) => {
                    warn!(target: "probe", probe = %probe, check = %name, error = %e, "Health check failed");
                    status = AggregateStatus::Unavailable;
                    results.record_failure(name, e.to_string());
                }
            }
        }
    }

    debug!(
        target: "probe",
        probe = %probe,
        checks = invoked,
        healthy = status.is_ok(),
        failing = %results.failing().collect::<Vec<_>>().join(","),
        duration_us = start.elapsed().as_micros() as u64,
        "Probe evaluated"
    );

    Evaluation { status, results }
}

impl CheckRegistry {
    /// Evaluate the collections covered by `probe`.
    ///
    /// Readiness walks liveness first and readiness second, so readiness
    /// entries win on a name collision.
    pub fn evaluate(&self, probe: ProbeType) -> Evaluation {
        match probe {
            ProbeType::Liveness => evaluate(probe, &[self.liveness()]),
            ProbeType::Readiness => evaluate(probe, &[self.liveness(), self.readiness()]),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
