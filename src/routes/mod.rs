//! API Routes
//!
//! This module organizes all HTTP endpoints for the dash server:
//! - `/api/jobs` - Job listing, submission, actions and event logs
//! - `/api/meta` - Backend metadata (out_dir presets, version)
//! - `/api/settings` - Queue settings (concurrency, max attempts)
//! - `/api/browse` - Server-side directory browsing
//! - `/api/health` - Health checks (answered locally)

pub mod browse;
pub mod health;
pub mod jobs;
pub mod meta;
pub mod settings;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::AppState;

/// Create the main application router
///
/// Every route except `/api/health` forwards to the DLQ backend named in
/// the config; responses come back with the backend's status and body so
/// browser clients see exactly what the queue said.
pub fn create_router(state: AppState) -> Router {
    info!("Creating dash router");

    Router::new()
        .merge(jobs::router(state.clone()))
        .merge(meta::router(state.clone()))
        .merge(settings::router(state.clone()))
        .merge(browse::router(state.clone()))
        .merge(health::router(state))
        .layer(TraceLayer::new_for_http())
}
