//! Runs the analysis service in-process on a localhost port.
//!
//! The TUI and tests use this so no external service has to be running:
//! bind an ephemeral port, serve the router on a background task, wait
//! for the health route to answer, shut down gracefully on exit.

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use litmus_core::config::AnalyzerConfig;

use crate::protocol::HEALTH_PATH;
use crate::server::{router, ServiceState};

/// How long to wait for the service to report healthy (in seconds).
const STARTUP_TIMEOUT_SECS: u64 = 10;

/// How long between health check polls during startup (in milliseconds).
const HEALTH_POLL_INTERVAL_MS: u64 = 50;

/// A running in-process analysis service.
pub struct EmbeddedService {
    base_url: String,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<std::io::Result<()>>>,
}

impl EmbeddedService {
    /// Bind and serve. `port` 0 picks an ephemeral port.
    pub async fn start(analyzer: AnalyzerConfig, port: u16) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", port)).await?;
        let addr = listener.local_addr()?;
        let base_url = format!("http://{addr}");

        info!(url = %base_url, "Starting embedded analysis service");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let app = router(ServiceState { analyzer });

        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        let service = Self {
            base_url,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        };
        service.wait_for_healthy().await?;
        info!(url = %service.base_url, "Embedded analysis service is ready");
        Ok(service)
    }

    /// Base URL for clients, e.g. `http://127.0.0.1:49321`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Poll the health route until the service answers.
    async fn wait_for_healthy(&self) -> anyhow::Result<()> {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.base_url, HEALTH_PATH);
        let deadline =
            tokio::time::Instant::now() + tokio::time::Duration::from_secs(STARTUP_TIMEOUT_SECS);

        loop {
            if tokio::time::Instant::now() > deadline {
                anyhow::bail!(
                    "Embedded service failed to answer within {} seconds",
                    STARTUP_TIMEOUT_SECS
                );
            }

            match client.get(&url).send().await {
                Ok(resp) if resp.status().is_success() => return Ok(()),
                Ok(resp) => {
                    debug!(status = %resp.status(), "Service not ready yet");
                }
                Err(_) => {
                    // Not listening yet.
                }
            }

            tokio::time::sleep(tokio::time::Duration::from_millis(HEALTH_POLL_INTERVAL_MS)).await;
        }
    }

    /// Gracefully shut down the serve task.
    pub async fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            info!("Shutting down embedded analysis service");
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            match task.await {
                Ok(Ok(())) => debug!("Service task exited cleanly"),
                Ok(Err(e)) => warn!("Service task ended with error: {e}"),
                Err(e) => warn!("Service task join error: {e}"),
            }
        }
    }
}

impl Drop for EmbeddedService {
    fn drop(&mut self) {
        // Best-effort cleanup if shutdown() was never awaited.
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
