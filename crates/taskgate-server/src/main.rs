//! taskgate server
//!
//! - `POST /process`: admit a simulated task through the gate
//! - `GET /metrics` : completion statistics
//! - Graceful drain on Ctrl+C / SIGTERM

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskgate_server::{app_state::AppState, config, lifecycle};

#[tokio::main]
async fn main() {
    // Load .env before the filter so RUST_LOG can come from it.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = dotenv {
        tracing::warn!(error = %e, "no .env file found or unable to load");
    }

    let cfg = match config::load_from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(code = e.client_code().as_str(), error = %e, "config load failed");
            std::process::exit(1);
        }
    };
    tracing::info!(
        max_concurrent = cfg.max_concurrent,
        shutdown_timeout_ms = cfg.shutdown_timeout.as_millis() as u64,
        "setting max concurrent requests"
    );

    let listen = cfg.listen;
    let state = AppState::new(cfg);

    let listener = match tokio::net::TcpListener::bind(listen).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%listen, error = %e, "failed to bind listener");
            std::process::exit(1);
        }
    };
    tracing::info!(%listen, "server is running");

    match lifecycle::serve(listener, state, lifecycle::shutdown_signal()).await {
        Ok(outcome) => tracing::info!(?outcome, "server stopped"),
        Err(e) => {
            tracing::error!(error = %e, "server error");
            std::process::exit(1);
        }
    }
}
