//! Dark Pattern Detector - HTTP API Server
//!
//! Thin axum boundary around `darkscan-core`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      DARKSCAN SERVER                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  POST /analyze           ─┐                                  │
//! │  POST /detect-from-text  ─┼──► DetectionService (Arc, shared)│
//! │  POST /detect-from-url   ─┘        ▲                         │
//! │        │                           │ chunks                  │
//! │        └──► PageFetcher ──► ContentExtractor                 │
//! │  GET  /health                                                │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod fetcher;
mod handlers;
mod models;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use darkscan_core::DetectionService;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

use crate::config::Config;
use crate::fetcher::PageFetcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "darkscan_server=debug,darkscan_core=info,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    tracing::info!("Darkscan server starting ({})...", config.environment);
    if !config.is_production() {
        tracing::debug!("Detector config: {:?}", config.detector);
    }

    // Artifacts and language resources; any failure aborts startup
    let detector_config = config.detector.clone();
    let detector = tokio::task::spawn_blocking(move || DetectionService::load(&detector_config))
        .await
        .context("detector loading task failed")?
        .context("failed to load detection service")?;

    let fetcher = PageFetcher::new(Duration::from_secs(config.fetch_timeout_secs), &config.user_agent)
        .context("failed to create page fetcher")?;

    // Build application state
    let state = AppState {
        detector: Arc::new(detector),
        fetcher,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.host, config.port);
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<DetectionService>,
    pub fetcher: PageFetcher,
    pub config: Arc<Config>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allow_origin(state.config.cors_allow_origin.as_deref()))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/analyze", post(handlers::analyze::analyze))
        .route("/detect-from-text", post(handlers::analyze::detect_from_text))
        .route("/detect-from-url", post(handlers::detect::detect_from_url))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn allow_origin(origin: Option<&str>) -> AllowOrigin {
    match origin.map(HeaderValue::from_str) {
        Some(Ok(value)) => AllowOrigin::exact(value),
        Some(Err(_)) => {
            tracing::warn!("Ignoring malformed CORS_ALLOW_ORIGIN, allowing any origin");
            Any.into()
        }
        None => Any.into(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
