//! Integration tests for healthcheck
//!
//! Each test starts an in-process probe server on an ephemeral port and
//! talks to it over real HTTP.


mod concurrency;
mod liveness;
mod readiness;
