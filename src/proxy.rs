// Backend relay.
//
// The dash never interprets a backend response: status and body are
// re-emitted verbatim. Only a connection-level failure is rewritten, into
// a uniform 502 so browser clients see one stable error shape.

use axum::body::Bytes;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::models::AppState;

/// Target URL on the backend for a path (with query) under the configured
/// base address.
pub fn backend_url(state: &AppState, path_and_query: &str) -> String {
    format!("{}{}", state.config.backend.base_url, path_and_query)
}

/// Forward a request to the backend and relay its response.
///
/// A supplied body defaults to `content-type: application/json` when the
/// caller did not name one, matching what every dash client sends.
pub async fn forward(
    state: &AppState,
    method: Method,
    path_and_query: &str,
    content_type: Option<&str>,
    body: Option<Bytes>,
) -> Response {
    let url = backend_url(state, path_and_query);
    let mut request = state.http.request(method.clone(), &url);
    if let Some(body) = body {
        let content_type = content_type.unwrap_or("application/json");
        request = request.header(header::CONTENT_TYPE, content_type).body(body);
    }
    match request.send().await {
        Ok(response) => relay(response).await,
        Err(err) => {
            error!("Backend unreachable: {} {}: {}", method, url, err);
            bad_gateway(&err.to_string())
        }
    }
}

// Re-emit the backend response: same status, same body, content-type
// defaulted to JSON when the backend omitted one.
async fn relay(response: reqwest::Response) -> Response {
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json")
        .to_string();
    match response.bytes().await {
        Ok(body) => (status, [(header::CONTENT_TYPE, content_type)], body).into_response(),
        Err(err) => {
            error!("Backend response body lost mid-read: {}", err);
            bad_gateway(&err.to_string())
        }
    }
}

/// Uniform shape for a backend that cannot be reached at all.
pub fn bad_gateway(message: &str) -> Response {
    let message = if message.is_empty() {
        "dlq_unreachable"
    } else {
        message
    };
    (
        StatusCode::BAD_GATEWAY,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

/// Encode query pairs into a `?`-prefixed string, or nothing for no pairs.
pub fn query_string(pairs: &[(&str, &str)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("?{}", encoded)
}

/// First value for `key` in a raw query string, percent-decoded. A repeated
/// key keeps its first occurrence; later ones are dropped.
pub fn first_query_value(query: Option<&str>, key: &str) -> Option<String> {
    let raw = query?;
    url::form_urlencoded::parse(raw.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
