//! Liveness HTTP server.
//!
//! Hosting platforms classify the process as healthy only while a port
//! answers, and an external pinger polls `/` every few minutes. No
//! business logic lives here.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::time::Instant;

use crate::core::utils::format_duration;

/// Application state for the liveness server
#[derive(Clone)]
struct AppState {
    start_time: Instant,
}

/// Start the liveness HTTP server
///
/// Exposes two endpoints:
/// - / - constant 200 for the hosting platform's port check
/// - /health - health status with uptime (JSON)
///
/// # Arguments
/// * `port` - Port to listen on (PORT env, default 10000)
pub async fn start_health_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let state = AppState {
        start_time: Instant::now(),
    };

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .with_state(Arc::new(state));

    log::info!("Starting health server on http://{}", addr);
    log::info!("  /       - uptime check (constant 200)");
    log::info!("  /health - health status (JSON)");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Handler for / - the body never changes, uptime monitors only look at
/// the status code
async fn root_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Handler for /health
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let uptime = state.start_time.elapsed();

    let health_status = serde_json::json!({
        "status": "healthy",
        "uptime_seconds": uptime.as_secs(),
        "uptime_human": format_duration(uptime),
        "service": "gardenwatch",
        "version": env!("CARGO_PKG_VERSION"),
    });

    (StatusCode::OK, axum::Json(health_status))
}
