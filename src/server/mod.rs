//! HTTP server for liveness and readiness probes.
//!
//! Each accepted connection is served on its own task; each probe
//! evaluation runs on tokio's blocking pool so checks may do blocking I/O.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use healthcheck::{HealthHandler, HealthServer};
//!
//! let handler = Arc::new(HealthHandler::default());
//! handler.register_readiness("database", move || db.ping());
//!
//! let server = HealthServer::new(Arc::clone(&handler));
//! server.register_drain_check();
//! server.run("0.0.0.0:8080".parse()?).await?;
//! ```
//!
//! # Graceful Shutdown
//!
//! ```rust,ignore
//! // Fail readiness so the orchestrator stops routing traffic
//! server.begin_drain();
//! tokio::time::sleep(drain_timeout).await;
//!
//! // Stop accepting, then let open connections finish their request
//! server.trigger_shutdown();
//! server.wait_for_drain(Duration::from_secs(10)).await;
//! ```

pub mod handler;
pub mod request;
pub mod response;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::check::CheckError;

pub use handler::HealthHandler;

/// Name of the readiness check registered by [`HealthServer::register_drain_check`].
pub const DRAIN_CHECK_NAME: &str = "shutdown";

/// Probe server bound to one [`HealthHandler`].
pub struct HealthServer {
    handler: Arc<HealthHandler>,
    /// Open connections (decremented when a connection task ends)
    active_connections: Arc<AtomicUsize>,
    /// Set once draining starts; fails the drain check
    draining: Arc<AtomicBool>,
    /// Shutdown signal sender
    shutdown_tx: watch::Sender<bool>,
    /// Shutdown signal receiver (cloneable)
    shutdown_rx: watch::Receiver<bool>,
    /// Shutdown initiated flag
    shutdown_initiated: AtomicBool,
}

impl HealthServer {
    pub fn new(handler: Arc<HealthHandler>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            handler,
            active_connections: Arc::new(AtomicUsize::new(0)),
            draining: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
            shutdown_rx,
            shutdown_initiated: AtomicBool::new(false),
        }
    }

    pub fn handler(&self) -> &Arc<HealthHandler> {
        &self.handler
    }

    /// Bind `addr` and serve until shutdown.
    pub async fn run(
        &self,
        addr: SocketAddr,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve probes on an already bound listener until shutdown.
    pub async fn serve(
        &self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let local_addr = listener.local_addr()?;
        let config = self.handler.config();
        info!(
            "Probe server listening on http://{} (liveness: {}, readiness: {})",
            local_addr, config.liveness_path, config.readiness_path
        );

        let mut shutdown_rx = self.shutdown_rx.clone();
        if *shutdown_rx.borrow() {
            return Ok(());
        }

        loop {
            tokio::select! {
                result = listener.accept() => {
                    let (stream, remote_addr) = match result {
                        Ok(conn) => conn,
                        Err(e) => {
                            error!("Accept error: {}", e);
                            continue;
                        }
                    };
                    let _ = stream.set_nodelay(true);

                    let guard = ConnectionGuard::new(&self.active_connections);
                    let handler = Arc::clone(&self.handler);
                    let conn_shutdown = self.shutdown_rx.clone();
                    tokio::spawn(async move {
                        serve_connection(stream, remote_addr, handler, conn_shutdown).await;
                        drop(guard);
                    });
                }
                _ = shutdown_rx.changed() => {
                    debug!("Probe server received shutdown signal, stopping accept loop");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Trigger graceful shutdown.
    pub fn trigger_shutdown(&self) {
        if self.shutdown_initiated.swap(true, Ordering::SeqCst) {
            return; // Already initiated
        }
        let _ = self.shutdown_tx.send(true);
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_initiated.load(Ordering::SeqCst)
    }

    /// Register a readiness check that fails once [`HealthServer::begin_drain`]
    /// has been called.
    pub fn register_drain_check(&self) {
        self.handler
            .register_readiness(DRAIN_CHECK_NAME, drain_check(Arc::clone(&self.draining)));
    }

    /// Start reporting not-ready through the drain check.
    pub fn begin_drain(&self) {
        if !self.draining.swap(true, Ordering::SeqCst) {
            info!("Draining: readiness now reports unavailable");
        }
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::SeqCst)
    }

    /// Get current open connections count.
    pub fn active_connections(&self) -> usize {
        self.active_connections.load(Ordering::Relaxed)
    }

    /// Wait for all open connections to finish.
    /// Returns true if drained successfully, false if timeout was reached.
    pub async fn wait_for_drain(&self, timeout: Duration) -> bool {
        let start = Instant::now();
        let check_interval = Duration::from_millis(20);

        loop {
            let active = self.active_connections.load(Ordering::Relaxed);
            if active == 0 {
                return true;
            }

            if start.elapsed() >= timeout {
                warn!("Drain timeout reached with {} active connections", active);
                return false;
            }

            debug!("Waiting for {} connections to drain...", active);
            tokio::time::sleep(check_interval).await;
        }
    }
}

/// Readiness check that fails with `shutting down` while `draining` is set.
pub fn drain_check(
    draining: Arc<AtomicBool>,
) -> impl Fn() -> Result<(), CheckError> + Send + Sync + 'static {
    move || {
        if draining.load(Ordering::SeqCst) {
            Err(CheckError::new("shutting down"))
        } else {
            Ok(())
        }
    }
}

/// Decrements the open connection count when dropped, including when the
/// connection task is cancelled.
struct ConnectionGuard(Arc<AtomicUsize>);

impl ConnectionGuard {
    fn new(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self(Arc::clone(counter))
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

async fn serve_connection(
    stream: tokio::net::TcpStream,
    remote_addr: SocketAddr,
    handler: Arc<HealthHandler>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let service = service_fn(move |req| {
        let handler = Arc::clone(&handler);
        async move { Ok::<_, Infallible>(handler.handle(req).await) }
    });

    let io = TokioIo::new(stream);
    let conn = http1::Builder::new().serve_connection(io, service);
    tokio::pin!(conn);

    tokio::select! {
        result = conn.as_mut() => {
            if let Err(e) = result {
                debug!("Connection from {} closed with error: {}", remote_addr, e);
            }
        }
        _ = shutdown_rx.changed() => {
            conn.as_mut().graceful_shutdown();
            if let Err(e) = conn.await {
                debug!("Connection from {} closed during shutdown: {}", remote_addr, e);
            }
        }
    }
}
