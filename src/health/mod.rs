//! Check registry and probe evaluation for Kubernetes probes.
//!
//! Two probe kinds are served:
//! - **Liveness**: Is the process alive? (restart container if failed)
//! - **Readiness**: Can the service handle traffic? (remove from LB if failed).
//!   A process that is not alive cannot be ready, so readiness also runs
//!   every liveness check.
//!
//! # Kubernetes Integration
//!
//! ```yaml
//! livenessProbe:
//!   httpGet:
//!     path: /live
//!     port: 8080
//!   periodSeconds: 10
//!
//! readinessProbe:
//!   httpGet:
//!     path: /ready
//!     port: 8080
//!   periodSeconds: 5
//! ```

mod checker;
mod registry;
mod status;

pub use checker::evaluate;
pub use registry::{CheckCollection, CheckRegistry};
pub use status::{AggregateStatus, CheckResults, Evaluation, ProbeType, CHECK_OK};
