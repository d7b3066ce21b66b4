//! Twinscan Server
//!
//! Evil-twin access point detection behind a small HTTP surface.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use twinscan::api::{self, AppState};
use twinscan::capture::ProcessCapture;
use twinscan::config::Config;
use twinscan::logic::{BaselineStore, Scanner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "twinscan=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("Twinscan starting...");
    tracing::info!("Scanner command: {}", config.scanner_command);

    let baseline = Arc::new(match &config.baseline_path {
        Some(path) => BaselineStore::open(path.clone()),
        None => BaselineStore::in_memory(),
    });

    let capture = Arc::new(ProcessCapture::from_command_line(&config.scanner_command));
    let scanner = Arc::new(Scanner::new(capture, Arc::clone(&baseline)));

    let state = AppState {
        scanner,
        baseline,
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/v1/scan", post(api::scan))
        .route("/api/v1/scan/cancel", post(api::cancel_scan))
        .route("/api/v1/scan/status", get(api::scan_status))
        .route("/api/v1/baseline", get(api::baseline_snapshot))
        .route("/api/v1/baseline/reset", post(api::baseline_reset))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
