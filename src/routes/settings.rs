//! Settings proxy routes
//!
//! - `GET  /api/settings` - current queue settings
//! - `POST /api/settings` - partial update, full view comes back
//!
//! The backend already serves these under `/api`, so the path maps onto
//! itself.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method},
    response::Response,
    routing::get,
    Router,
};

use crate::models::AppState;
use crate::proxy;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/settings", get(get_settings).post(update_settings))
        .with_state(state)
}

async fn get_settings(State(state): State<AppState>) -> Response {
    proxy::forward(&state, Method::GET, "/api/settings", None, None).await
}

async fn update_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let body = (!body.is_empty()).then_some(body);
    proxy::forward(&state, Method::POST, "/api/settings", content_type, body).await
}
