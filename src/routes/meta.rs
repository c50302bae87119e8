use axum::{extract::State, http::Method, response::Response, routing::get, Router};

use crate::models::AppState;
use crate::proxy;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/meta", get(get_meta))
        .with_state(state)
}

/// GET /api/meta - backend metadata (output directory presets)
async fn get_meta(State(state): State<AppState>) -> Response {
    proxy::forward(&state, Method::GET, "/meta", None, None).await
}
