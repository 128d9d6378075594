//! Liveness endpoint tests

use crate::helpers::*;
use healthcheck::HandlerConfig;
use reqwest::StatusCode;
use serde_json::json;

/// No checks registered: 200 with an empty object
#[tokio::test]
async fn test_live_no_checks() {
    let server = TestServer::start().await;
    let resp = server.get("/live").await;

    assert_status(&resp, StatusCode::OK);
    assert_header(&resp, "content-type", "application/json; charset=utf-8");
    assert_eq!(resp.text().await.unwrap(), "{}\n");
}

/// All liveness checks pass
#[tokio::test]
async fn test_live_all_pass_full() {
    let server = TestServer::start().await;
    server.handler.register_liveness("threads", ok);
    server.handler.register_liveness("gc-pause", ok);

    let (status, body) = server.probe_full("/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"threads": "OK", "gc-pause": "OK"}));
}

/// Full body is indented with four spaces
#[tokio::test]
async fn test_live_full_body_format() {
    let server = TestServer::start().await;
    server.handler.register_liveness("threads", ok);

    let (status, body) = server.probe("/live?full=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "{\n    \"threads\": \"OK\"\n}\n");
}

/// A failing liveness check makes the probe unavailable
#[tokio::test]
async fn test_live_failure() {
    let server = TestServer::start().await;
    server.handler.register_liveness("threads", failing("too many threads (120 > 100)"));
    server.handler.register_liveness("gc-pause", ok);

    let (status, body) = server.probe("/live").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, "{}\n");

    let (status, body) = server.probe_full("/live").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body,
        json!({"threads": "too many threads (120 > 100)", "gc-pause": "OK"})
    );
}

/// Readiness-only failures do not leak into liveness
#[tokio::test]
async fn test_live_ignores_readiness_checks() {
    let server = TestServer::start().await;
    server.handler.register_liveness("threads", ok);
    server.handler.register_readiness("database", failing("connection refused"));

    let (status, body) = server.probe_full("/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"threads": "OK"}));
}

/// Only full=1 enables the per-check body
#[tokio::test]
async fn test_live_full_flag_values() {
    let server = TestServer::start().await;
    server.handler.register_liveness("threads", ok);

    for query in ["?full=0", "?full=true", "?full", "?verbose=1"] {
        let (status, body) = server.probe(&format!("/live{}", query)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "{}\n", "query {}", query);
    }
}

/// Custom endpoint paths
#[tokio::test]
async fn test_custom_paths() {
    let config = HandlerConfig::default()
        .with_liveness_path("/healthz")
        .with_readiness_path("/readyz");
    let server = TestServer::start_with(config).await;

    assert_eq!(server.probe("/healthz").await.0, StatusCode::OK);
    assert_eq!(server.probe("/readyz").await.0, StatusCode::OK);
    assert_eq!(server.probe("/live").await.0, StatusCode::NOT_FOUND);
}
