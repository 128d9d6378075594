//! Readiness endpoint tests

use crate::helpers::*;
use reqwest::StatusCode;
use serde_json::json;

/// No checks registered: 200 with an empty object
#[tokio::test]
async fn test_ready_no_checks() {
    let server = TestServer::start().await;

    let (status, body) = server.probe("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "{}\n");
}

/// Failing database: 503 with the message in the full body only
#[tokio::test]
async fn test_ready_failing_database() {
    let server = TestServer::start().await;
    server
        .handler
        .register_readiness("database", failing("connection refused"));

    let (status, body) = server.probe_full("/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"database": "connection refused"}));

    let (status, body) = server.probe("/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, "{}\n");
}

/// Readiness includes liveness checks
#[tokio::test]
async fn test_ready_includes_liveness() {
    let server = TestServer::start().await;
    server.handler.register_liveness("threads", ok);
    server.handler.register_readiness("database", ok);
    server.handler.register_readiness("cache", ok);

    let (status, body) = server.probe_full("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"threads": "OK", "database": "OK", "cache": "OK"})
    );
}

/// A failing liveness check fails both endpoints
#[tokio::test]
async fn test_liveness_failure_fails_both() {
    let server = TestServer::start().await;
    server.handler.register_liveness("threads", failing("too many threads"));
    server.handler.register_readiness("database", ok);

    assert_eq!(server.probe("/live").await.0, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = server.probe_full("/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body,
        json!({"threads": "too many threads", "database": "OK"})
    );
}

/// Re-registering a name replaces the check for later probes
#[tokio::test]
async fn test_ready_overwrite() {
    let server = TestServer::start().await;
    server.handler.register_readiness("database", ok);
    assert_eq!(server.probe("/ready").await.0, StatusCode::OK);

    server
        .handler
        .register_readiness("database", failing("connection refused"));
    let (status, body) = server.probe_full("/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"database": "connection refused"}));

    server.handler.register_readiness("database", ok);
    assert_eq!(server.probe("/ready").await.0, StatusCode::OK);
}

/// On a name collision the readiness entry is reported
#[tokio::test]
async fn test_ready_name_collision() {
    let server = TestServer::start().await;
    server.handler.register_liveness("shared", failing("liveness says no"));
    server.handler.register_readiness("shared", ok);

    let (status, body) = server.probe_full("/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"shared": "OK"}));

    let (status, body) = server.probe_full("/live").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"shared": "liveness says no"}));
}

/// A panicking check is reported, not fatal
#[tokio::test]
async fn test_ready_panicking_check() {
    let server = TestServer::start().await;
    server
        .handler
        .register_readiness("broken", || -> Result<(), healthcheck::CheckError> {
            panic!("driver crashed")
        });

    let (status, body) = server.probe_full("/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"broken": "check panicked: driver crashed"}));

    // Server keeps serving
    assert_eq!(server.probe("/live").await.0, StatusCode::OK);
}

/// Draining flips readiness to unavailable while liveness stays up
#[tokio::test]
async fn test_drain_fails_readiness_only() {
    let server = TestServer::start().await;
    server.server.register_drain_check();
    server.handler.register_liveness("threads", ok);

    let (status, body) = server.probe_full("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"threads": "OK", "shutdown": "OK"}));

    server.server.begin_drain();

    let (status, body) = server.probe_full("/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"threads": "OK", "shutdown": "shutting down"}));

    let (status, body) = server.probe("/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, "{}\n");

    let (status, body) = server.probe_full("/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"threads": "OK"}));
}
