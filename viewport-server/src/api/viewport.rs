//! Viewport handlers
//!
//! Every request runs detection on its own headers. The manager is
//! single-threaded, so it is built and dropped inside a synchronous helper
//! after the last `.await`.

use axum::{
    extract::{Query, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::{debug, info};

use viewport_core::{
    create_viewport_manager, is_device_hint_header, DetectInput, MediaQueries, ResponseCookieJar,
    ViewportManager,
};
use viewport_types::{ConfigError, RequestHeaders, ViewportOptions};

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportResponse {
    pub breakpoint: String,
    pub queries: MediaQueries,
    /// Breakpoint names, narrowest first
    pub order: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetBreakpointRequest {
    pub breakpoint: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointSnapshot {
    pub breakpoint: String,
    pub previous: String,
    /// Breakpoints the current one is wider than
    pub greater_than: Vec<String>,
    /// Breakpoints the current one is narrower than
    pub less_than: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub breakpoint: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub current: String,
    pub breakpoint: String,
    pub is_greater_than: bool,
    pub is_less_than: bool,
    pub is_greater_or_equals: bool,
    pub is_less_or_equals: bool,
    #[serde(rename = "match")]
    pub matches: bool,
}

/// Convert axum headers, skipping values that are not valid UTF-8.
///
/// Repeated headers are joined: `cookie` with `; `, others with `, `. Device
/// hints keep their first value.
pub(crate) fn request_headers(headers: &HeaderMap) -> RequestHeaders {
    let mut converted = RequestHeaders::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            debug!("[api] skipping non UTF-8 header {}", name);
            continue;
        };
        let joined = match converted.get(name.as_str()) {
            Some(_) if is_device_hint_header(name.as_str()) => continue,
            Some(existing) if name.as_str() == "cookie" => format!("{existing}; {value}"),
            Some(existing) => format!("{existing}, {value}"),
            None => value.to_string(),
        };
        converted.insert(name.as_str(), joined);
    }
    converted
}

fn config_error(e: ConfigError) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

fn viewport_snapshot(
    options: &ViewportOptions,
    detected: String,
) -> Result<ViewportResponse, ConfigError> {
    let manager = create_viewport_manager(options.clone(), detected)?;
    let queries = manager.queries();
    Ok(ViewportResponse {
        breakpoint: manager.current_breakpoint(),
        order: queries.names().map(str::to_string).collect(),
        queries,
    })
}

fn comparison_lists(manager: &ViewportManager) -> (Vec<String>, Vec<String>) {
    let names: Vec<String> = manager.queries().names().map(str::to_string).collect();
    let greater = names.iter().filter(|name| manager.is_greater_than(name)).cloned().collect();
    let less = names.iter().filter(|name| manager.is_less_than(name)).cloned().collect();
    (greater, less)
}

fn assign_breakpoint(
    options: &ViewportOptions,
    detected: String,
    cookie_header: Option<&str>,
    breakpoint: &str,
) -> Result<(BreakpointSnapshot, Vec<String>), ConfigError> {
    let jar = Rc::new(ResponseCookieJar::from_request_header(cookie_header));
    let manager = ViewportManager::builder(options.clone())
        .initial_state(detected)
        .cookie_store(jar.clone())
        .build()?;

    let previous = manager.current_breakpoint();
    manager.set_current_breakpoint(breakpoint);
    let (greater_than, less_than) = comparison_lists(&manager);

    let snapshot = BreakpointSnapshot {
        breakpoint: manager.current_breakpoint(),
        previous,
        greater_than,
        less_than,
    };
    Ok((snapshot, jar.set_cookie_headers()))
}

fn compare(
    options: &ViewportOptions,
    detected: String,
    breakpoint: String,
) -> Result<CompareResponse, ConfigError> {
    let manager = create_viewport_manager(options.clone(), detected)?;
    Ok(CompareResponse {
        current: manager.current_breakpoint(),
        is_greater_than: manager.is_greater_than(&breakpoint),
        is_less_than: manager.is_less_than(&breakpoint),
        is_greater_or_equals: manager.is_greater_or_equals(&breakpoint),
        is_less_or_equals: manager.is_less_or_equals(&breakpoint),
        matches: manager.matches_one(&breakpoint),
        breakpoint,
    })
}

pub async fn get_viewport(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ViewportResponse>, (StatusCode, String)> {
    let input = DetectInput::new().with_headers(request_headers(&headers));
    let detected = state.detect(&input).await;

    viewport_snapshot(state.options(), detected).map(Json).map_err(config_error)
}

pub async fn get_queries(State(state): State<AppState>) -> Json<MediaQueries> {
    Json(state.queries().clone())
}

pub async fn get_options(State(state): State<AppState>) -> Json<ViewportOptions> {
    Json(state.options().clone())
}

pub async fn set_breakpoint(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SetBreakpointRequest>,
) -> Result<Response, (StatusCode, String)> {
    if !state.options().breakpoints.contains(&payload.breakpoint) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Unknown breakpoint: {}", payload.breakpoint),
        ));
    }

    let request = request_headers(&headers);
    let cookie_header = request.get("cookie").map(str::to_string);
    let detected = state.detect(&DetectInput::new().with_headers(request)).await;

    let (snapshot, set_cookie) =
        assign_breakpoint(state.options(), detected, cookie_header.as_deref(), &payload.breakpoint)
            .map_err(config_error)?;
    info!("[api] breakpoint set to {} (was {})", snapshot.breakpoint, snapshot.previous);

    let mut response = Json(snapshot).into_response();
    for cookie in set_cookie {
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
        response.headers_mut().append(SET_COOKIE, value);
    }
    Ok(response)
}

pub async fn compare_breakpoint(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CompareQuery>,
) -> Result<Json<CompareResponse>, (StatusCode, String)> {
    let input = DetectInput::new().with_headers(request_headers(&headers));
    let detected = state.detect(&input).await;

    compare(state.options(), detected, query.breakpoint).map(Json).map_err(config_error)
}
