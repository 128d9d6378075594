use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use healthcheck::config::Config;
use healthcheck::{logging, HealthHandler, HealthServer};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;
    logging::init(&config.logging)?;

    info!("Starting healthcheck {}...", healthcheck::VERSION);
    config.log_summary();

    // Checks block, so evaluation runs on the blocking pool; the accept
    // loop only needs a small runtime.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(config))
}

async fn async_main(config: Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let handler = Arc::new(HealthHandler::new(config.handler.clone()));
    let server = Arc::new(HealthServer::new(Arc::clone(&handler)));

    // Readiness fails as soon as shutdown starts so traffic drains first.
    server.register_drain_check();

    let mut serve = {
        let server = Arc::clone(&server);
        let addr = config.server.listen_addr;
        tokio::spawn(async move { server.run(addr).await })
    };

    tokio::select! {
        result = &mut serve => {
            return match result {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => {
                    error!("Probe server error: {}", e);
                    Err(e)
                }
                Err(e) => Err(format!("probe server task failed: {}", e).into()),
            };
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down...");
        }
    }

    server.begin_drain();
    if let Some(timeout) = config.server.drain_timeout {
        info!("Draining for {:?}", timeout);
        tokio::time::sleep(timeout).await;
    }

    server.trigger_shutdown();
    match serve.await {
        Ok(Err(e)) => error!("Probe server error: {}", e),
        Err(e) => error!("Probe server task failed: {}", e),
        Ok(Ok(())) => {}
    }

    let timeout = config.server.shutdown_timeout.unwrap_or(Duration::MAX);
    if !server.wait_for_drain(timeout).await {
        warn!(
            "Exiting with {} connections still open",
            server.active_connections()
        );
    }
    info!("Stopped");

    Ok(())
}
