//! Serve loop with bounded graceful drain.
//!
//! Once the shutdown signal fires the listener stops accepting, readiness flips
//! to draining, and in-flight requests get `shutdown_timeout` to finish. After
//! that the server task is aborted and outstanding requests are abandoned.

use std::future::{Future, IntoFuture};

use tokio::net::TcpListener;
use tokio::sync::watch;

use taskgate_core::error::{Result, TaskGateError};

use crate::{app_state::AppState, router};

/// How the server came down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Every in-flight request finished inside the timeout.
    Drained,
    /// The timeout elapsed first; remaining requests were abandoned.
    TimedOut,
}

pub async fn serve<F>(listener: TcpListener, state: AppState, signal: F) -> Result<DrainOutcome>
where
    F: Future<Output = ()> + Send,
{
    let app = router::build_router(state.clone());
    let (stop_tx, mut stop_rx) = watch::channel(false);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = stop_rx.changed().await;
    });
    let mut server = tokio::spawn(server.into_future());

    tokio::select! {
        joined = &mut server => {
            // Only reachable if the accept loop died on its own.
            flatten(joined)?;
            return Err(TaskGateError::Internal("server exited without shutdown signal".into()));
        }
        _ = signal => {}
    }

    let timeout = state.cfg().shutdown_timeout;
    tracing::info!(
        active_requests = state.metrics().snapshot().active_requests,
        timeout_ms = timeout.as_millis() as u64,
        "shutting down server"
    );
    state.set_draining();
    let _ = stop_tx.send(true);

    match tokio::time::timeout(timeout, &mut server).await {
        Ok(joined) => {
            flatten(joined)?;
            tracing::info!("server stopped gracefully");
            Ok(DrainOutcome::Drained)
        }
        Err(_) => {
            server.abort();
            tracing::warn!(
                active_requests = state.metrics().snapshot().active_requests,
                "shutdown timeout reached, abandoning in-flight requests"
            );
            Ok(DrainOutcome::TimedOut)
        }
    }
}

fn flatten(
    joined: std::result::Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<()> {
    joined
        .map_err(|e| TaskGateError::Internal(format!("server task failed: {e}")))?
        .map_err(|e| TaskGateError::Internal(format!("server error: {e}")))
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
