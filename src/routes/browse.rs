//! Directory-browser proxy routes
//!
//! - `GET  /api/browse` - list directories under a path
//! - `POST /api/browse/mkdir` - create a directory

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{header, HeaderMap, Method},
    response::Response,
    routing::{get, post},
    Router,
};

use crate::models::AppState;
use crate::proxy;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/browse", get(browse))
        .route("/api/browse/mkdir", post(mkdir))
        .with_state(state)
}

async fn browse(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let requested = proxy::first_query_value(query.as_deref(), "path");
    let mut pairs: Vec<(&str, &str)> = Vec::new();
    if let Some(path) = requested.as_deref() {
        if !path.is_empty() {
            pairs.push(("path", path));
        }
    }
    let path = format!("/browse{}", proxy::query_string(&pairs));
    proxy::forward(&state, Method::GET, &path, None, None).await
}

async fn mkdir(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let body = (!body.is_empty()).then_some(body);
    proxy::forward(&state, Method::POST, "/api/browse/mkdir", content_type, body).await
}
