//! API Routes
//!
//! REST endpoints exposing server-side breakpoint detection.

mod viewport;


use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/viewport", get(viewport::get_viewport))
        .route("/viewport/queries", get(viewport::get_queries))
        .route("/viewport/options", get(viewport::get_options))
        .route("/viewport/breakpoint", post(viewport::set_breakpoint))
        .route("/viewport/compare", get(viewport::compare_breakpoint))
        // API fallback: return 404 for unknown API endpoints
        .fallback(api_not_found)
}

async fn api_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(serde_json::json!({"error": "Not found"})))
}
