//! HTTP health endpoint.
//!
//! Serves `GET /` and `GET /health` with a small JSON status document so
//! hosting platforms can probe the process. Shut down gracefully via the
//! daemon's shutdown `watch` channel.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

/// Shared state for the health handlers.
struct AppState {
    started: Instant,
}

/// Start the health server on the given address.
///
/// Serves until the `shutdown` channel flips to `true`. Returns `Ok(())`
/// on clean shutdown or an error if binding fails.
pub async fn serve(
    listen_addr: &str,
    shutdown: tokio::sync::watch::Receiver<bool>,
) -> Result<(), String> {
    let addr: SocketAddr = listen_addr
        .parse()
        .map_err(|e| format!("invalid listen address {listen_addr:?}: {e}"))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("failed to bind {addr}: {e}"))?;

    info!(addr = %addr, "starting health server");
    serve_on(listener, shutdown).await
}

/// Serve on an already-bound listener (used by tests with an ephemeral port).
pub async fn serve_on(
    listener: tokio::net::TcpListener,
    shutdown: tokio::sync::watch::Receiver<bool>,
) -> Result<(), String> {
    let state = Arc::new(AppState {
        started: Instant::now(),
    });

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    let mut shutdown = shutdown;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|&v| v).await;
        })
        .await
        .map_err(|e| format!("health server error: {e}"))
}

async fn root_handler() -> Json<Value> {
    Json(json!({
        "status": "Bot is running",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "uptime_secs": state.started.elapsed().as_secs(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
