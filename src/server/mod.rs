//! HTTP server for task analysis.
//!
//! Provides REST API endpoints for:
//! - Health checks
//! - Analyzing and ranking submitted task lists
//! - Static task suggestions

pub mod handlers;

use crate::config::{ServerConfig, ServiceConfig};
use crate::env::api;
use crate::task::{Clock, SystemClock, TaskAnalyzer};
use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::*;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;

/// Server state shared across handlers.
#[derive(Debug)]
pub struct AppState {
    /// Request handler around the scorer and cycle detector
    pub analyzer: TaskAnalyzer,
    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: &ServiceConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            analyzer: TaskAnalyzer::new(clock, config.scoring.clone()),
            config: config.server.clone(),
        }
    }

    /// State backed by the host clock.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }
}

/// Build the HTTP router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_handler))
        .route(api::ROOT, get(index_handler))
        .route(api::ROOT_NO_SLASH, get(api_root_redirect))
        .route(api::ANALYZE_ENDPOINT, post(analyze_handler))
        .route(api::SUGGEST_ENDPOINT, get(suggest_handler))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_bytes))
        .layer(TraceLayer::new_for_http());

    if state.config.permissive_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}

/// Start the HTTP server.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the configured address.
pub async fn run_server(state: Arc<AppState>) -> Result<()> {
    let addr = state.config.bind_address.clone();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Task analyzer listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Task analyzer stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
