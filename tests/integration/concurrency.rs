//! Concurrent probe and registration tests

use std::sync::Arc;
use std::time::Duration;

use crate::helpers::*;
use healthcheck::CheckError;
use reqwest::StatusCode;

/// Many probes in flight at once all get a complete answer
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_probes() {
    let server = Arc::new(TestServer::start().await);
    server.handler.register_liveness("threads", ok);
    server
        .handler
        .register_readiness("slow", || -> Result<(), CheckError> {
            std::thread::sleep(Duration::from_millis(50));
            Ok(())
        });

    let mut tasks = Vec::new();
    for i in 0..16 {
        let server = Arc::clone(&server);
        tasks.push(tokio::spawn(async move {
            let path = if i % 2 == 0 { "/ready" } else { "/live" };
            server.probe_full(path).await
        }));
    }

    for task in tasks {
        let (status, body) = task.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["threads"], "OK");
    }
}

/// Registration racing with evaluation never corrupts the registry
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_register_during_probes() {
    let server = Arc::new(TestServer::start().await);

    let registrar = {
        let handler = Arc::clone(&server.handler);
        tokio::task::spawn_blocking(move || {
            for i in 0..200 {
                handler.register_readiness(format!("check-{}", i % 20), ok);
            }
        })
    };

    for _ in 0..20 {
        let (status, _) = server.probe_full("/ready").await;
        assert_eq!(status, StatusCode::OK);
    }
    registrar.await.unwrap();

    let (status, body) = server.probe_full("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_object().unwrap().len(), 20);
}

/// A slow check does not block registration
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_slow_check_does_not_block_registration() {
    let server = Arc::new(TestServer::start().await);
    server
        .handler
        .register_liveness("slow", || -> Result<(), CheckError> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(())
        });

    let probe = {
        let server = Arc::clone(&server);
        tokio::spawn(async move { server.probe("/live").await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    let started = std::time::Instant::now();
    server.handler.register_liveness("fast", ok);
    assert!(started.elapsed() < Duration::from_millis(200));

    let (status, _) = probe.await.unwrap();
    assert_eq!(status, StatusCode::OK);
}

/// After shutdown the listener stops accepting
#[tokio::test]
async fn test_shutdown_stops_accepting() {
    let server = TestServer::start().await;
    assert_eq!(server.probe("/live").await.0, StatusCode::OK);

    server.shutdown();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let result = server
        .client
        .get(format!("{}/live", server.base_url))
        .timeout(Duration::from_secs(2))
        .send()
        .await;
    assert!(result.is_err(), "expected connection failure after shutdown");
}

/// Shutdown mid-request still delivers the complete response
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shutdown_finishes_in_flight_request() {
    let server = Arc::new(TestServer::start().await);
    server
        .handler
        .register_liveness("slow", || -> Result<(), CheckError> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(())
        });

    let in_flight = {
        let server = Arc::clone(&server);
        tokio::spawn(async move { server.probe("/live?full=1").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(server.server.active_connections(), 1);

    server.shutdown();
    assert!(server.server.wait_for_drain(Duration::from_secs(5)).await);
    assert_eq!(server.server.active_connections(), 0);

    let (status, body) = in_flight.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "{\n    \"slow\": \"OK\"\n}\n");
}
