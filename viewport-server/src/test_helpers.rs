//! Test helpers for viewport-server unit tests.

use axum::body::{to_bytes, Body};
use axum::http::Response;
use axum::Router;
use std::time::Duration;

use viewport_types::ViewportOptions;

use crate::router::build_router;
use crate::state::AppState;

/// Create an `AppState` with default options.
pub fn test_app_state() -> AppState {
    AppState::new(ViewportOptions::default(), Duration::from_millis(250))
        .expect("default options are valid")
}

/// Full router over [`test_app_state`].
pub fn test_router() -> Router {
    build_router(test_app_state())
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body is readable");
    serde_json::from_slice(&bytes).expect("body is JSON")
}
