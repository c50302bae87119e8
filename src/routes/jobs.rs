//! Job proxy routes
//!
//! Relays the browser-facing job surface to the backend queue:
//! - `GET  /api/jobs` - list jobs (status / include_deleted filters)
//! - `POST /api/jobs` - create a job
//! - `GET  /api/jobs/{id}` - fetch one job
//! - `GET  /api/jobs/{id}/events` - recent job events
//! - `POST /api/jobs/{id}/{action}` - retry / remove / pause / resume
//! - `POST /api/jobs/clear` - clear the queue

use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::str::FromStr;
use tracing::info;

use crate::models::AppState;
use crate::proxy;
use crate::types::JobAction;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/jobs", get(list_jobs).post(create_job))
        .route("/api/jobs/clear", post(clear_jobs))
        .route("/api/jobs/{id}", get(get_job))
        .route("/api/jobs/{id}/events", get(job_events))
        .route("/api/jobs/{id}/{action}", post(job_action))
        .with_state(state)
}

/// GET /api/jobs - forward the two recognized filters, drop the rest. A
/// repeated filter key keeps its first value.
async fn list_jobs(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let status = proxy::first_query_value(query.as_deref(), "status");
    let include_deleted = proxy::first_query_value(query.as_deref(), "include_deleted");
    let mut pairs: Vec<(&str, &str)> = Vec::new();
    if let Some(status) = status.as_deref() {
        if !status.is_empty() {
            pairs.push(("status", status));
        }
    }
    if let Some(include_deleted) = include_deleted.as_deref() {
        if !include_deleted.is_empty() {
            pairs.push(("include_deleted", include_deleted));
        }
    }
    let path = format!("/jobs{}", proxy::query_string(&pairs));
    proxy::forward(&state, Method::GET, &path, None, None).await
}

/// POST /api/jobs - body and content-type pass through untouched
async fn create_job(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let body = (!body.is_empty()).then_some(body);
    proxy::forward(&state, Method::POST, "/jobs", content_type, body).await
}

async fn get_job(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    proxy::forward(&state, Method::GET, &format!("/jobs/{}", id), None, None).await
}

/// GET /api/jobs/{id}/events - limit passes through for the backend to bound
async fn job_events(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let limit = proxy::first_query_value(query.as_deref(), "limit");
    let mut pairs: Vec<(&str, &str)> = Vec::new();
    if let Some(limit) = limit.as_deref() {
        if !limit.is_empty() {
            pairs.push(("limit", limit));
        }
    }
    let path = format!("/jobs/{}/events{}", id, proxy::query_string(&pairs));
    proxy::forward(&state, Method::GET, &path, None, None).await
}

/// POST /api/jobs/{id}/{action} - unknown actions are rejected here, before
/// any backend traffic
async fn job_action(
    State(state): State<AppState>,
    Path((id, action)): Path<(String, String)>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let action = match JobAction::from_str(&action) {
        Ok(action) => action,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "unsupported_action" })),
            )
                .into_response();
        }
    };
    info!("Forwarding job action: id={} action={}", id, action);
    let path = format!("/jobs/{}/{}", id, action.as_str());
    proxy::forward(&state, Method::POST, &path, None, Some(Bytes::from_static(b"{}"))).await
}

async fn clear_jobs(State(state): State<AppState>) -> Response {
    info!("Forwarding queue clear");
    proxy::forward(&state, Method::POST, "/jobs/clear", None, Some(Bytes::from_static(b"{}"))).await
}

fn parse_id(raw: &str) -> Result<i64, Response> {
    raw.parse::<i64>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "invalid job id" })),
        )
            .into_response()
    })
}
