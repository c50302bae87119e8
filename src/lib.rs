// DLQ Dash - proxy server and terminal client for the DLQ download queue

pub mod cli;
pub mod client;
pub mod config;
pub mod format;
pub mod jobs;
pub mod models;
pub mod proxy;
pub mod routes;
pub mod status;
pub mod types;

// Re-exports for convenience
pub use client::ApiClient;
pub use config::Config;
pub use models::AppState;
// Note: Import specific items from types module instead of glob to avoid name conflicts
// e.g., use dlq_dash::types::{JobStatus, DashResult};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
